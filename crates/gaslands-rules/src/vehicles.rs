//! Vehicle catalog and per-vehicle loadout edits.
//!
//! An [`ActiveVehicle`] is a catalog vehicle plus its mounted weapons and
//! fitted upgrades. Edits never mutate in place: each returns a new vehicle,
//! and an edit the rules forbid returns an unchanged copy.
//!
//! Vehicles read through serde skip those edits, so they are checked with
//! [`ActiveVehicle::validate`] on the way in and rejected when inconsistent.

use serde::{Deserialize, Serialize};

use crate::catalog::default_weapon_kinds;
use crate::eligibility::{can_add_upgrade, can_cycle_facing, can_remove_weapon};
use crate::error::{RulesError, RulesResult};
use crate::facing::{next_facing, WeaponFacing};
use crate::upgrades::{quantity_limit, ActiveVehicleUpgrade, UpgradeKind};
use crate::weapons::{ActiveWeapon, WeaponKind};

/// Weight class printed on a vehicle profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightClass {
    Lightweight,
    Middleweight,
    Heavyweight,
}

impl WeightClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Lightweight => "Lightweight",
            Self::Middleweight => "Middleweight",
            Self::Heavyweight => "Heavyweight",
        }
    }
}

/// Static vehicle profile.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleSpec {
    pub name: &'static str,
    pub weight: WeightClass,
    /// Price in cans before weapons and upgrades.
    pub cost: u32,
    pub hull: u32,
    pub handling: u32,
    pub max_gear: u32,
    pub crew: u32,
    pub build_slots: u32,
    pub special_rule: Option<&'static str>,
}

// ============================================================================
// VEHICLE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VehicleKind {
    Buggy = 0,
    Car = 1,
    PerformanceCar = 2,
    PickupTruck = 3,
    MonsterTruck = 4,
    HeavyTruck = 5,
    Bus = 6,
}

impl VehicleKind {
    pub fn spec(&self) -> VehicleSpec {
        match self {
            Self::Buggy => VehicleSpec {
                name: "Buggy",
                weight: WeightClass::Lightweight,
                cost: 6,
                hull: 6,
                handling: 4,
                max_gear: 6,
                crew: 2,
                build_slots: 2,
                special_rule: Some("Roll Cage"),
            },
            Self::Car => VehicleSpec {
                name: "Car",
                weight: WeightClass::Middleweight,
                cost: 12,
                hull: 10,
                handling: 3,
                max_gear: 5,
                crew: 2,
                build_slots: 2,
                special_rule: None,
            },
            Self::PerformanceCar => VehicleSpec {
                name: "Performance Car",
                weight: WeightClass::Middleweight,
                cost: 15,
                hull: 8,
                handling: 4,
                max_gear: 6,
                crew: 1,
                build_slots: 2,
                special_rule: Some("Slip Away"),
            },
            Self::PickupTruck => VehicleSpec {
                name: "Pickup Truck",
                weight: WeightClass::Middleweight,
                cost: 8,
                hull: 12,
                handling: 2,
                max_gear: 4,
                crew: 3,
                build_slots: 3,
                special_rule: None,
            },
            Self::MonsterTruck => VehicleSpec {
                name: "Monster Truck",
                weight: WeightClass::Heavyweight,
                cost: 25,
                hull: 10,
                handling: 3,
                max_gear: 4,
                crew: 2,
                build_slots: 2,
                special_rule: Some("All Terrain"),
            },
            Self::HeavyTruck => VehicleSpec {
                name: "Heavy Truck",
                weight: WeightClass::Heavyweight,
                cost: 25,
                hull: 14,
                handling: 2,
                max_gear: 3,
                crew: 4,
                build_slots: 5,
                special_rule: None,
            },
            Self::Bus => VehicleSpec {
                name: "Bus",
                weight: WeightClass::Heavyweight,
                cost: 30,
                hull: 16,
                handling: 2,
                max_gear: 3,
                crew: 8,
                build_slots: 3,
                special_rule: None,
            },
        }
    }

    pub fn all() -> &'static [VehicleKind] {
        &[
            Self::Buggy,
            Self::Car,
            Self::PerformanceCar,
            Self::PickupTruck,
            Self::MonsterTruck,
            Self::HeavyTruck,
            Self::Bus,
        ]
    }
}

/// A vehicle on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawActiveVehicle")]
pub struct ActiveVehicle {
    pub kind: VehicleKind,
    pub weapons: Vec<ActiveWeapon>,
    pub upgrades: Vec<ActiveVehicleUpgrade>,
}

/// Unchecked wire shape of an [`ActiveVehicle`].
#[derive(Deserialize)]
struct RawActiveVehicle {
    kind: VehicleKind,
    weapons: Vec<ActiveWeapon>,
    upgrades: Vec<ActiveVehicleUpgrade>,
}

impl TryFrom<RawActiveVehicle> for ActiveVehicle {
    type Error = RulesError;

    fn try_from(raw: RawActiveVehicle) -> RulesResult<Self> {
        let vehicle = Self {
            kind: raw.kind,
            weapons: raw.weapons,
            upgrades: raw.upgrades,
        };
        vehicle.validate()?;
        Ok(vehicle)
    }
}

impl ActiveVehicle {
    /// A fresh vehicle carrying only the catalog's default weapons.
    pub fn new(kind: VehicleKind) -> Self {
        Self {
            kind,
            weapons: default_weapon_kinds()
                .into_iter()
                .map(ActiveWeapon::mount)
                .collect(),
            upgrades: Vec::new(),
        }
    }

    /// The fitted entry for `kind`, if any.
    pub fn upgrade(&self, kind: UpgradeKind) -> Option<&ActiveVehicleUpgrade> {
        self.upgrades.iter().find(|u| u.kind == kind)
    }

    /// Copies of `kind` fitted (0 when absent).
    pub fn upgrade_amount(&self, kind: UpgradeKind) -> u32 {
        self.upgrade(kind).map_or(0, |u| u.amount)
    }

    /// Check the invariants the edit methods maintain.
    ///
    /// Every default weapon is mounted exactly once, crew-fired weapons and
    /// only they have the crew-fired facing, and each upgrade appears in one
    /// entry whose amount is between 1 and its current quantity limit.
    pub fn validate(&self) -> RulesResult<()> {
        let vehicle = self.kind.spec().name;
        let invalid = |reason: String| RulesError::InvalidLoadout { vehicle, reason };

        for kind in default_weapon_kinds() {
            let mounted = self.weapons.iter().filter(|w| w.kind == kind).count();
            if mounted != 1 {
                return Err(invalid(format!(
                    "{mounted} copies of default weapon {}",
                    kind.spec().name
                )));
            }
        }

        for (index, weapon) in self.weapons.iter().enumerate() {
            let crew_fired = weapon.kind.spec().is_crew_fired();
            if crew_fired != (weapon.facing == WeaponFacing::CrewFired) {
                return Err(invalid(format!(
                    "weapon #{index} ({}) has a {} facing",
                    weapon.kind.spec().name,
                    weapon.facing.kind_tag()
                )));
            }
        }

        for (index, upgrade) in self.upgrades.iter().enumerate() {
            let name = upgrade.kind.spec().name;
            if upgrade.amount == 0 {
                return Err(invalid(format!("{name} has amount 0")));
            }
            if self.upgrades[..index].iter().any(|u| u.kind == upgrade.kind) {
                return Err(invalid(format!("{name} is listed more than once")));
            }
            if let Some(limit) = quantity_limit(upgrade.kind, self) {
                if upgrade.amount > limit {
                    return Err(invalid(format!(
                        "{name} x{} exceeds its limit of {limit}",
                        upgrade.amount
                    )));
                }
            }
        }
        Ok(())
    }

    // ── Weapons ─────────────────────────────────────────────────────────

    /// Mount another weapon. Default weapons are only ever seeded at creation.
    pub fn with_weapon(&self, kind: WeaponKind) -> Self {
        if kind.spec().is_default {
            log::warn!(
                "{}: refusing to mount default weapon {}",
                self.kind.spec().name,
                kind.spec().name
            );
            return self.clone();
        }
        let mut next = self.clone();
        next.weapons.push(ActiveWeapon::mount(kind));
        log::debug!("{}: mounted {}", self.kind.spec().name, kind.spec().name);
        next
    }

    /// Unmount the weapon at `index` unless it is a default weapon.
    pub fn without_weapon(&self, index: usize) -> Self {
        if !can_remove_weapon(self, index) {
            log::warn!(
                "{}: weapon #{index} cannot be removed",
                self.kind.spec().name
            );
            return self.clone();
        }
        let mut next = self.clone();
        let removed = next.weapons.remove(index);
        log::debug!(
            "{}: removed {}",
            self.kind.spec().name,
            removed.kind.spec().name
        );
        next
    }

    /// Advance the facing of the weapon at `index`. Crew-fired weapons don't move.
    pub fn with_cycled_facing(&self, index: usize) -> Self {
        if !can_cycle_facing(self, index) {
            log::warn!(
                "{}: weapon #{index} has a fixed facing",
                self.kind.spec().name
            );
            return self.clone();
        }
        let mut next = self.clone();
        let weapon = &mut next.weapons[index];
        weapon.facing = next_facing(weapon.facing);
        log::debug!(
            "{}: {} now faces {}",
            self.kind.spec().name,
            weapon.kind.spec().name,
            weapon.facing.direction()
        );
        next
    }

    // ── Upgrades ────────────────────────────────────────────────────────

    /// Fit one more copy of `kind`: a new entry, or the existing one stepped up.
    pub fn with_upgrade(&self, kind: UpgradeKind) -> Self {
        if !can_add_upgrade(kind, self) {
            log::warn!(
                "{}: {} is at its limit",
                self.kind.spec().name,
                kind.spec().name
            );
            return self.clone();
        }
        let mut next = self.clone();
        match next.upgrades.iter_mut().find(|u| u.kind == kind) {
            Some(entry) => entry.amount += 1,
            None => next.upgrades.push(ActiveVehicleUpgrade { kind, amount: 1 }),
        }
        log::debug!(
            "{}: fitted {} (now {})",
            self.kind.spec().name,
            kind.spec().name,
            next.upgrade_amount(kind)
        );
        next
    }

    /// Take one copy of `kind` off. Single upgrades and last copies drop the entry.
    pub fn with_upgrade_decremented(&self, kind: UpgradeKind) -> Self {
        let Some(position) = self.upgrades.iter().position(|u| u.kind == kind) else {
            log::warn!(
                "{}: {} is not fitted",
                self.kind.spec().name,
                kind.spec().name
            );
            return self.clone();
        };
        let mut next = self.clone();
        let entry = &mut next.upgrades[position];
        if kind.spec().quantity.policy().is_multi() && entry.amount > 1 {
            entry.amount -= 1;
        } else {
            next.upgrades.remove(position);
        }
        log::debug!(
            "{}: took off {} (now {})",
            self.kind.spec().name,
            kind.spec().name,
            next.upgrade_amount(kind)
        );
        next
    }

    /// Remove every copy of `kind`.
    pub fn without_upgrade(&self, kind: UpgradeKind) -> Self {
        if self.upgrade(kind).is_none() {
            log::warn!(
                "{}: {} is not fitted",
                self.kind.spec().name,
                kind.spec().name
            );
            return self.clone();
        }
        let mut next = self.clone();
        next.upgrades.retain(|u| u.kind != kind);
        log::debug!(
            "{}: removed all {}",
            self.kind.spec().name,
            kind.spec().name
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facing::{ArcDirection, WeaponFacing};

    #[test]
    fn test_vehicle_count() {
        assert_eq!(VehicleKind::all().len(), 7);
    }

    #[test]
    fn test_new_vehicle_has_default_handgun() {
        for kind in VehicleKind::all() {
            let v = ActiveVehicle::new(*kind);
            assert_eq!(v.weapons.len(), 1);
            assert_eq!(v.weapons[0].kind, WeaponKind::Handgun);
            assert_eq!(v.weapons[0].facing, WeaponFacing::CrewFired);
            assert!(v.upgrades.is_empty());
        }
    }

    #[test]
    fn test_profiles_are_sane() {
        for kind in VehicleKind::all() {
            let s = kind.spec();
            assert!(s.cost > 0, "{}", s.name);
            assert!(s.hull > 0, "{}", s.name);
            assert!(s.crew >= 1, "{}", s.name);
            assert!(s.max_gear >= 1 && s.max_gear <= 6, "{}", s.name);
            assert!(s.build_slots >= 1, "{}", s.name);
        }
    }

    #[test]
    fn test_weight_labels() {
        assert_eq!(VehicleKind::Buggy.spec().weight.label(), "Lightweight");
        assert_eq!(VehicleKind::Bus.spec().weight.label(), "Heavyweight");
    }

    #[test]
    fn test_mount_and_remove_weapon() {
        let car = ActiveVehicle::new(VehicleKind::Car);
        let armed = car.with_weapon(WeaponKind::Minigun);
        assert_eq!(armed.weapons.len(), 2);
        assert_eq!(car.weapons.len(), 1, "source vehicle untouched");

        let disarmed = armed.without_weapon(1);
        assert_eq!(disarmed, car);
    }

    #[test]
    fn test_default_weapon_not_removed() {
        let car = ActiveVehicle::new(VehicleKind::Car);
        assert_eq!(car.without_weapon(0), car);
        assert_eq!(car.without_weapon(7), car);
    }

    #[test]
    fn test_default_weapon_not_mounted_twice() {
        let car = ActiveVehicle::new(VehicleKind::Car);
        assert_eq!(car.with_weapon(WeaponKind::Handgun), car);
    }

    #[test]
    fn test_cycle_facing() {
        let car = ActiveVehicle::new(VehicleKind::Car).with_weapon(WeaponKind::MachineGun);
        let rear = car.with_cycled_facing(1);
        assert_eq!(
            rear.weapons[1].facing,
            WeaponFacing::UserSelected(ArcDirection::Rear)
        );
        // Handgun is crew fired.
        assert_eq!(car.with_cycled_facing(0), car);
    }

    #[test]
    fn test_upgrade_increment_and_decrement() {
        let car = ActiveVehicle::new(VehicleKind::Car);
        let plated = car
            .with_upgrade(UpgradeKind::ArmourPlating)
            .with_upgrade(UpgradeKind::ArmourPlating);
        assert_eq!(plated.upgrades.len(), 1);
        assert_eq!(plated.upgrade_amount(UpgradeKind::ArmourPlating), 2);

        let one = plated.with_upgrade_decremented(UpgradeKind::ArmourPlating);
        assert_eq!(one.upgrade_amount(UpgradeKind::ArmourPlating), 1);
        let none = one.with_upgrade_decremented(UpgradeKind::ArmourPlating);
        assert!(none.upgrades.is_empty());
    }

    #[test]
    fn test_single_upgrade_capped() {
        let car = ActiveVehicle::new(VehicleKind::Car)
            .with_upgrade(UpgradeKind::NitroBooster)
            .with_upgrade(UpgradeKind::NitroBooster);
        assert_eq!(car.upgrades.len(), 1);
        assert_eq!(car.upgrade_amount(UpgradeKind::NitroBooster), 1);
        assert!(car
            .with_upgrade_decremented(UpgradeKind::NitroBooster)
            .upgrades
            .is_empty());
    }

    #[test]
    fn test_without_upgrade_drops_all_copies() {
        let truck = ActiveVehicle::new(VehicleKind::PickupTruck)
            .with_upgrade(UpgradeKind::Ram)
            .with_upgrade(UpgradeKind::Ram)
            .with_upgrade(UpgradeKind::RollCage);
        let stripped = truck.without_upgrade(UpgradeKind::Ram);
        assert_eq!(stripped.upgrade_amount(UpgradeKind::Ram), 0);
        assert_eq!(stripped.upgrade_amount(UpgradeKind::RollCage), 1);
        assert_eq!(stripped.without_upgrade(UpgradeKind::Ram), stripped);
    }

    #[test]
    fn test_upgrade_order_preserved() {
        let car = ActiveVehicle::new(VehicleKind::Car)
            .with_upgrade(UpgradeKind::RollCage)
            .with_upgrade(UpgradeKind::ArmourPlating)
            .with_upgrade(UpgradeKind::RollCage);
        let kinds: Vec<_> = car.upgrades.iter().map(|u| u.kind).collect();
        assert_eq!(kinds, vec![UpgradeKind::RollCage, UpgradeKind::ArmourPlating]);
    }

    // ── Loading ─────────────────────────────────────────────────────────

    const HANDGUN: &str =
        r#"{"kind":"Handgun","facing":{"type":"crew_fired","direction":"360°"}}"#;

    fn load(kind: &str, weapons: &str, upgrades: &str) -> Result<ActiveVehicle, String> {
        let json = format!(r#"{{"kind":"{kind}","weapons":[{weapons}],"upgrades":[{upgrades}]}}"#);
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }

    #[test]
    fn test_edited_vehicles_validate() {
        let car = ActiveVehicle::new(VehicleKind::Car)
            .with_weapon(WeaponKind::Minigun)
            .with_cycled_facing(1)
            .with_upgrade(UpgradeKind::ExtraCrewmember)
            .with_upgrade(UpgradeKind::ExtraCrewmember)
            .with_upgrade(UpgradeKind::RollCage);
        assert_eq!(car.validate(), Ok(()));
        let json = serde_json::to_string(&car).unwrap();
        assert_eq!(serde_json::from_str::<ActiveVehicle>(&json).unwrap(), car);
    }

    #[test]
    fn test_load_accepts_consistent_loadout() {
        let mg = r#"{"kind":"MachineGun","facing":{"type":"user_selected","direction":"side"}}"#;
        let car = load(
            "Car",
            &format!("{HANDGUN},{mg}"),
            r#"{"kind":"ArmourPlating","amount":2}"#,
        )
        .unwrap();
        assert_eq!(
            car.weapons[1].facing,
            WeaponFacing::UserSelected(ArcDirection::Side)
        );
        assert_eq!(car.upgrade_amount(UpgradeKind::ArmourPlating), 2);
    }

    #[test]
    fn test_load_rejects_bad_upgrade_entries() {
        let cases = [
            (r#"{"kind":"ArmourPlating","amount":0}"#, "amount 0"),
            (r#"{"kind":"RollCage","amount":5}"#, "exceeds its limit of 1"),
            (
                r#"{"kind":"RollCage","amount":1},{"kind":"RollCage","amount":1}"#,
                "listed more than once",
            ),
            // Car crew is 2.
            (r#"{"kind":"ExtraCrewmember","amount":3}"#, "exceeds its limit of 2"),
        ];
        for (upgrades, reason) in cases {
            let err = load("Car", HANDGUN, upgrades).unwrap_err();
            assert!(err.contains("invalid Car loadout"), "{err}");
            assert!(err.contains(reason), "{upgrades}: {err}");
        }
    }

    #[test]
    fn test_load_rejects_missing_default_weapon() {
        let err = load("Bus", "", "").unwrap_err();
        assert!(err.contains("0 copies of default weapon Handgun"), "{err}");
        let err = load("Bus", &format!("{HANDGUN},{HANDGUN}"), "").unwrap_err();
        assert!(err.contains("2 copies of default weapon Handgun"), "{err}");
    }

    #[test]
    fn test_load_rejects_facing_mismatch() {
        let aimed_handgun =
            r#"{"kind":"Handgun","facing":{"type":"user_selected","direction":"front"}}"#;
        let err = load("Car", aimed_handgun, "").unwrap_err();
        assert!(err.contains("Handgun) has a user_selected facing"), "{err}");

        let crewed_mg = r#"{"kind":"MachineGun","facing":{"type":"crew_fired","direction":"360°"}}"#;
        let err = load("Car", &format!("{HANDGUN},{crewed_mg}"), "").unwrap_err();
        assert!(err.contains("Machine Gun) has a crew_fired facing"), "{err}");
    }
}
