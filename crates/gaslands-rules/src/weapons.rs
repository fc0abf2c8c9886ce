//! Weapon catalog and mounted-weapon pricing.
//!
//! Each weapon type has a fixed profile (range, attack dice, build slots,
//! cost). A mounted weapon pairs a type with a [`WeaponFacing`]; the facing
//! only changes its price, never its slot usage.

use serde::{Deserialize, Serialize};

use crate::facing::WeaponFacing;

/// Turret-mounted weapons cost this multiple of their base price.
pub const TURRET_COST_MULTIPLIER: u32 = 3;

/// Firing range category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponRange {
    Short,
    Medium,
    Double,
}

/// Special-rule tags printed on a weapon profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponSpecialRule {
    /// Operated by a crew member; always covers 360° at base price.
    CrewFired,
}

impl WeaponSpecialRule {
    pub fn label(self) -> &'static str {
        match self {
            Self::CrewFired => "Crew fired",
        }
    }
}

/// Static weapon profile.
#[derive(Debug, Clone, Serialize)]
pub struct WeaponSpec {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub range: WeaponRange,
    pub attack_dice: u32,
    pub special_rules: &'static [WeaponSpecialRule],
    pub build_slots: u32,
    /// Price in cans.
    pub cost: u32,
    /// Seeded onto every new vehicle and can never be removed.
    pub is_default: bool,
}

impl WeaponSpec {
    pub fn is_crew_fired(&self) -> bool {
        self.special_rules.contains(&WeaponSpecialRule::CrewFired)
    }
}

// ============================================================================
// WEAPON TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WeaponKind {
    Handgun = 0,
    MachineGun = 1,
    HeavyMachineGun = 2,
    Minigun = 3,
}

impl WeaponKind {
    pub fn spec(&self) -> WeaponSpec {
        match self {
            Self::Handgun => WeaponSpec {
                name: "Handgun",
                abbreviation: "HG",
                range: WeaponRange::Medium,
                attack_dice: 1,
                special_rules: &[WeaponSpecialRule::CrewFired],
                build_slots: 0,
                cost: 0,
                is_default: true,
            },
            Self::MachineGun => WeaponSpec {
                name: "Machine Gun",
                abbreviation: "MG",
                range: WeaponRange::Double,
                attack_dice: 2,
                special_rules: &[],
                build_slots: 1,
                cost: 2,
                is_default: false,
            },
            Self::HeavyMachineGun => WeaponSpec {
                name: "Heavy Machine Gun",
                abbreviation: "HMG",
                range: WeaponRange::Double,
                attack_dice: 3,
                special_rules: &[],
                build_slots: 1,
                cost: 3,
                is_default: false,
            },
            Self::Minigun => WeaponSpec {
                name: "Minigun",
                abbreviation: "MNG",
                range: WeaponRange::Double,
                attack_dice: 4,
                special_rules: &[],
                build_slots: 1,
                cost: 5,
                is_default: false,
            },
        }
    }

    pub fn all() -> &'static [WeaponKind] {
        &[
            Self::Handgun,
            Self::MachineGun,
            Self::HeavyMachineGun,
            Self::Minigun,
        ]
    }
}

/// A weapon mounted on a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWeapon {
    pub kind: WeaponKind,
    pub facing: WeaponFacing,
}

impl ActiveWeapon {
    /// Mount a weapon at its initial facing (front, or 360° if crew fired).
    pub fn mount(kind: WeaponKind) -> Self {
        Self {
            kind,
            facing: WeaponFacing::initial_for(kind),
        }
    }
}

/// Price of a mounted weapon: base cost, tripled when turret-mounted.
pub fn active_weapon_cost(weapon: &ActiveWeapon) -> u32 {
    let base = weapon.kind.spec().cost;
    if weapon.facing.is_turret() {
        base * TURRET_COST_MULTIPLIER
    } else {
        base
    }
}
