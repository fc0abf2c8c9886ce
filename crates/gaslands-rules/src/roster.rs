//! The ordered collection of vehicles being built.
//!
//! Every operation returns a new [`Roster`]; a roster value handed out
//! earlier is never changed, so stats computed against it stay valid.
//!
//! ```
//! use gaslands_rules::roster::Roster;
//! use gaslands_rules::vehicles::VehicleKind;
//!
//! let roster = Roster::default()
//!     .add_vehicle(VehicleKind::Car)
//!     .add_vehicle(VehicleKind::Buggy);
//! let trimmed = roster.remove_vehicle(0);
//! assert_eq!(trimmed.len(), 1);
//! assert_eq!(roster.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::stats::total_cost;
use crate::vehicles::{ActiveVehicle, VehicleKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    vehicles: Vec<ActiveVehicle>,
}

/// A roster edit issued by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterAction {
    AddVehicle(VehicleKind),
    DuplicateVehicle(usize),
    RemoveVehicle(usize),
    ReplaceVehicle(usize, ActiveVehicle),
}

impl Roster {
    pub fn from_vehicles(vehicles: Vec<ActiveVehicle>) -> Self {
        Self { vehicles }
    }

    pub fn vehicles(&self) -> &[ActiveVehicle] {
        &self.vehicles
    }

    pub fn get(&self, index: usize) -> Option<&ActiveVehicle> {
        self.vehicles.get(index)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Append a fresh vehicle of `kind`.
    pub fn add_vehicle(&self, kind: VehicleKind) -> Self {
        let mut next = self.clone();
        next.vehicles.push(ActiveVehicle::new(kind));
        log::debug!("roster: added {} (#{})", kind.spec().name, next.len() - 1);
        next
    }

    /// Append an independent copy of `vehicle`.
    pub fn duplicate_vehicle(&self, vehicle: &ActiveVehicle) -> Self {
        let mut next = self.clone();
        next.vehicles.push(vehicle.clone());
        log::debug!(
            "roster: duplicated {} (#{})",
            vehicle.kind.spec().name,
            next.len() - 1
        );
        next
    }

    /// Drop the vehicle at `index`, keeping the others in order.
    pub fn remove_vehicle(&self, index: usize) -> Self {
        if index >= self.len() {
            log::warn!("roster: no vehicle #{index} to remove");
            return self.clone();
        }
        let mut next = self.clone();
        let removed = next.vehicles.remove(index);
        log::debug!("roster: removed {} (#{index})", removed.kind.spec().name);
        next
    }

    /// Swap in an edited vehicle at `index`.
    pub fn replace_vehicle(&self, index: usize, vehicle: ActiveVehicle) -> Self {
        if index >= self.len() {
            log::warn!("roster: no vehicle #{index} to replace");
            return self.clone();
        }
        let mut next = self.clone();
        next.vehicles[index] = vehicle;
        next
    }

    /// Apply a vehicle edit to the vehicle at `index`.
    ///
    /// ```
    /// use gaslands_rules::roster::Roster;
    /// use gaslands_rules::vehicles::VehicleKind;
    /// use gaslands_rules::weapons::WeaponKind;
    ///
    /// let roster = Roster::default().add_vehicle(VehicleKind::Car);
    /// let armed = roster.update_vehicle(0, |v| v.with_weapon(WeaponKind::MachineGun));
    /// assert_eq!(armed.vehicles()[0].weapons.len(), 2);
    /// ```
    pub fn update_vehicle(
        &self,
        index: usize,
        edit: impl FnOnce(&ActiveVehicle) -> ActiveVehicle,
    ) -> Self {
        match self.get(index) {
            Some(vehicle) => self.replace_vehicle(index, edit(vehicle)),
            None => {
                log::warn!("roster: no vehicle #{index} to update");
                self.clone()
            }
        }
    }

    pub fn apply(&self, action: RosterAction) -> Self {
        match action {
            RosterAction::AddVehicle(kind) => self.add_vehicle(kind),
            RosterAction::DuplicateVehicle(index) => match self.get(index) {
                Some(vehicle) => self.duplicate_vehicle(vehicle),
                None => {
                    log::warn!("roster: no vehicle #{index} to duplicate");
                    self.clone()
                }
            },
            RosterAction::RemoveVehicle(index) => self.remove_vehicle(index),
            RosterAction::ReplaceVehicle(index, vehicle) => self.replace_vehicle(index, vehicle),
        }
    }

    /// Cans spent across the whole roster.
    pub fn total_cost(&self) -> u32 {
        self.vehicles.iter().map(total_cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrades::UpgradeKind;
    use crate::weapons::WeaponKind;

    fn three_vehicles() -> Roster {
        Roster::default()
            .add_vehicle(VehicleKind::Buggy)
            .add_vehicle(VehicleKind::Car)
            .add_vehicle(VehicleKind::Bus)
    }

    fn kinds(roster: &Roster) -> Vec<VehicleKind> {
        roster.vehicles().iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_add_appends() {
        let roster = three_vehicles();
        assert_eq!(
            kinds(&roster),
            vec![VehicleKind::Buggy, VehicleKind::Car, VehicleKind::Bus]
        );
        assert_eq!(roster.vehicles()[2], ActiveVehicle::new(VehicleKind::Bus));
    }

    #[test]
    fn test_remove_preserves_order() {
        let roster = three_vehicles();
        let removed = roster.remove_vehicle(1);
        assert_eq!(kinds(&removed), vec![VehicleKind::Buggy, VehicleKind::Bus]);
        assert_eq!(roster.len(), 3, "original roster untouched");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let roster = three_vehicles();
        assert_eq!(roster.remove_vehicle(3), roster);
    }

    #[test]
    fn test_duplicate_is_independent_copy() {
        let roster = Roster::default()
            .add_vehicle(VehicleKind::Car)
            .update_vehicle(0, |v| v.with_weapon(WeaponKind::MachineGun));
        let doubled = roster.apply(RosterAction::DuplicateVehicle(0));
        assert_eq!(doubled.len(), 2);
        assert_eq!(doubled.vehicles()[0], doubled.vehicles()[1]);

        let edited = doubled.update_vehicle(1, |v| v.with_upgrade(UpgradeKind::RollCage));
        assert!(edited.vehicles()[0].upgrades.is_empty());
        assert_eq!(edited.vehicles()[1].upgrades.len(), 1);
    }

    #[test]
    fn test_duplicate_then_remove_restores() {
        let roster = three_vehicles().update_vehicle(1, |v| v.with_weapon(WeaponKind::Minigun));
        let round_trip = roster
            .apply(RosterAction::DuplicateVehicle(1))
            .apply(RosterAction::RemoveVehicle(3));
        assert_eq!(round_trip, roster);
    }

    #[test]
    fn test_replace_and_update() {
        let roster = three_vehicles();
        let replaced = roster.apply(RosterAction::ReplaceVehicle(
            0,
            ActiveVehicle::new(VehicleKind::HeavyTruck),
        ));
        assert_eq!(replaced.vehicles()[0].kind, VehicleKind::HeavyTruck);
        assert_eq!(
            roster.replace_vehicle(9, ActiveVehicle::new(VehicleKind::Car)),
            roster
        );
        assert_eq!(roster.update_vehicle(9, |v| v.clone()), roster);
    }

    #[test]
    fn test_total_cost() {
        // 6 + 12 + 30
        assert_eq!(three_vehicles().total_cost(), 48);
        assert_eq!(Roster::default().total_cost(), 0);
    }
}
