//! Read-only catalog queries and lookup by stable name.
//!
//! Catalog entries are identified by their enum key; display names and
//! abbreviations are only used where text crosses into the rules.

use crate::error::{RulesError, RulesResult};
use crate::upgrades::UpgradeKind;
use crate::vehicles::VehicleKind;
use crate::weapons::WeaponKind;

pub fn vehicle_kinds() -> &'static [VehicleKind] {
    VehicleKind::all()
}

pub fn weapon_kinds() -> &'static [WeaponKind] {
    WeaponKind::all()
}

pub fn upgrade_kinds() -> &'static [UpgradeKind] {
    UpgradeKind::all()
}

/// Non-removable weapons seeded onto every new vehicle.
pub fn default_weapon_kinds() -> Vec<WeaponKind> {
    WeaponKind::all()
        .iter()
        .copied()
        .filter(|w| w.spec().is_default)
        .collect()
}

/// Weapons a player may add to a vehicle.
pub fn mountable_weapon_kinds() -> Vec<WeaponKind> {
    WeaponKind::all()
        .iter()
        .copied()
        .filter(|w| !w.spec().is_default)
        .collect()
}

pub fn find_vehicle(name: &str) -> RulesResult<VehicleKind> {
    VehicleKind::all()
        .iter()
        .copied()
        .find(|v| v.spec().name == name)
        .ok_or_else(|| RulesError::UnknownVehicle(name.to_string()))
}

/// Look up a weapon by name or abbreviation.
pub fn find_weapon(name: &str) -> RulesResult<WeaponKind> {
    WeaponKind::all()
        .iter()
        .copied()
        .find(|w| {
            let spec = w.spec();
            spec.name == name || spec.abbreviation == name
        })
        .ok_or_else(|| RulesError::UnknownWeapon(name.to_string()))
}

/// Look up an upgrade by name or abbreviation.
pub fn find_upgrade(name: &str) -> RulesResult<UpgradeKind> {
    UpgradeKind::all()
        .iter()
        .copied()
        .find(|u| {
            let spec = u.spec();
            spec.name == name || spec.abbreviation == name
        })
        .ok_or_else(|| RulesError::UnknownUpgrade(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weapons_are_exactly_non_removable() {
        let defaults = default_weapon_kinds();
        assert_eq!(defaults, vec![WeaponKind::Handgun]);
        for w in weapon_kinds() {
            assert_eq!(defaults.contains(w), w.spec().is_default);
        }
    }

    #[test]
    fn test_mountable_and_default_partition_catalog() {
        let defaults = default_weapon_kinds();
        let mountable = mountable_weapon_kinds();
        assert_eq!(defaults.len() + mountable.len(), weapon_kinds().len());
        assert!(mountable.iter().all(|w| !defaults.contains(w)));
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find_vehicle("Pickup Truck"), Ok(VehicleKind::PickupTruck));
        assert_eq!(find_weapon("Machine Gun"), Ok(WeaponKind::MachineGun));
        assert_eq!(find_weapon("HMG"), Ok(WeaponKind::HeavyMachineGun));
        assert_eq!(find_upgrade("Roll Cage"), Ok(UpgradeKind::RollCage));
        assert_eq!(find_upgrade("XC"), Ok(UpgradeKind::ExtraCrewmember));
    }

    #[test]
    fn test_find_unknown() {
        assert_eq!(
            find_vehicle("Hovercraft"),
            Err(RulesError::UnknownVehicle("Hovercraft".into()))
        );
        assert!(find_weapon("machine gun").is_err());
        assert!(find_upgrade("").is_err());
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<_> = vehicle_kinds().iter().map(|v| v.spec().name).collect();
        names.extend(weapon_kinds().iter().map(|w| w.spec().name));
        names.extend(upgrade_kinds().iter().map(|u| u.spec().name));
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
