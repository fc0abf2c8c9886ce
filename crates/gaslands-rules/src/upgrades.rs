//! Vehicle upgrade catalog and quantity policies.
//!
//! Upgrades consume build slots and cans like weapons, may adjust the
//! vehicle's profile, and carry a quantity policy limiting how many copies a
//! single vehicle may take. Limited upgrades compute their cap from the
//! vehicle each time it is asked for; nothing is cached.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vehicles::ActiveVehicle;

/// Per-vehicle cap rule for a limited upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LimitRule {
    /// At most as many copies as the vehicle's printed crew value.
    BaseCrew,
    /// A flat cap.
    Fixed(u32),
}

impl LimitRule {
    pub fn evaluate(self, vehicle: &ActiveVehicle) -> u32 {
        match self {
            Self::BaseCrew => vehicle.kind.spec().crew,
            Self::Fixed(cap) => cap,
        }
    }
}

/// How many copies of an upgrade one vehicle may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quantity {
    Single,
    Unlimited,
    Limited(LimitRule),
}

impl Quantity {
    pub fn policy(self) -> QuantityPolicy {
        match self {
            Self::Single => QuantityPolicy::Single,
            Self::Unlimited => QuantityPolicy::Unlimited,
            Self::Limited(_) => QuantityPolicy::Limited,
        }
    }
}

/// Tag form of [`Quantity`], as the builder menus label it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityPolicy {
    Single,
    Unlimited,
    Limited,
}

impl QuantityPolicy {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Unlimited => "unlimited",
            Self::Limited => "limited",
        }
    }

    /// Whether an existing entry can be stepped up/down rather than deleted.
    pub fn is_multi(self) -> bool {
        matches!(self, Self::Unlimited | Self::Limited)
    }
}

impl fmt::Display for QuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Profile deltas applied once per copy of an upgrade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatModifiers {
    pub hull: i32,
    pub handling: i32,
    pub max_gear: i32,
    pub crew: i32,
}

impl StatModifiers {
    pub const NONE: Self = Self {
        hull: 0,
        handling: 0,
        max_gear: 0,
        crew: 0,
    };
}

/// Static upgrade profile.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeSpec {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub description: &'static str,
    pub build_slots: u32,
    /// Price in cans, per copy.
    pub cost: u32,
    pub quantity: Quantity,
    pub modifiers: StatModifiers,
}

// ============================================================================
// UPGRADE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UpgradeKind {
    ArmourPlating = 0,
    ExtraCrewmember = 1,
    NitroBooster = 2,
    Ram = 3,
    RollCage = 4,
    TankTracks = 5,
    NuclearEngine = 6,
}

impl UpgradeKind {
    pub fn spec(&self) -> UpgradeSpec {
        match self {
            Self::ArmourPlating => UpgradeSpec {
                name: "Armour Plating",
                abbreviation: "AP",
                description: "+2 Hull per plate.",
                build_slots: 1,
                cost: 4,
                quantity: Quantity::Unlimited,
                modifiers: StatModifiers {
                    hull: 2,
                    ..StatModifiers::NONE
                },
            },
            Self::ExtraCrewmember => UpgradeSpec {
                name: "Extra Crewmember",
                abbreviation: "XC",
                description: "+1 Crew. May not more than double the starting crew.",
                build_slots: 0,
                cost: 4,
                quantity: Quantity::Limited(LimitRule::BaseCrew),
                modifiers: StatModifiers {
                    crew: 1,
                    ..StatModifiers::NONE
                },
            },
            Self::NitroBooster => UpgradeSpec {
                name: "Nitro Booster",
                abbreviation: "NB",
                description: "Once per game, make a long straight forward move at maximum gear.",
                build_slots: 0,
                cost: 6,
                quantity: Quantity::Single,
                modifiers: StatModifiers::NONE,
            },
            Self::Ram => UpgradeSpec {
                name: "Ram",
                abbreviation: "RAM",
                description: "Reinforced ram on one facing. Extra smash attack dice on that facing.",
                build_slots: 1,
                cost: 4,
                quantity: Quantity::Limited(LimitRule::Fixed(3)),
                modifiers: StatModifiers::NONE,
            },
            Self::RollCage => UpgradeSpec {
                name: "Roll Cage",
                abbreviation: "RC",
                description: "May ignore hits from a flip.",
                build_slots: 1,
                cost: 4,
                quantity: Quantity::Single,
                modifiers: StatModifiers::NONE,
            },
            Self::TankTracks => UpgradeSpec {
                name: "Tank Tracks",
                abbreviation: "TT",
                description: "+1 Handling, -1 Max Gear. Ignores rough terrain.",
                build_slots: 1,
                cost: 4,
                quantity: Quantity::Single,
                modifiers: StatModifiers {
                    handling: 1,
                    max_gear: -1,
                    ..StatModifiers::NONE
                },
            },
            Self::NuclearEngine => UpgradeSpec {
                name: "Experimental Nuclear Engine",
                abbreviation: "ENE",
                description: "+2 Max Gear. Explodes spectacularly when wrecked.",
                build_slots: 0,
                cost: 5,
                quantity: Quantity::Single,
                modifiers: StatModifiers {
                    max_gear: 2,
                    ..StatModifiers::NONE
                },
            },
        }
    }

    pub fn all() -> &'static [UpgradeKind] {
        &[
            Self::ArmourPlating,
            Self::ExtraCrewmember,
            Self::NitroBooster,
            Self::Ram,
            Self::RollCage,
            Self::TankTracks,
            Self::NuclearEngine,
        ]
    }
}

/// An upgrade fitted to a vehicle. `amount` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveVehicleUpgrade {
    pub kind: UpgradeKind,
    pub amount: u32,
}

/// Maximum copies of `kind` the vehicle may carry in its current state.
///
/// `None` means no cap. Recomputed on every call.
pub fn quantity_limit(kind: UpgradeKind, vehicle: &ActiveVehicle) -> Option<u32> {
    match kind.spec().quantity {
        Quantity::Single => Some(1),
        Quantity::Unlimited => None,
        Quantity::Limited(rule) => Some(rule.evaluate(vehicle)),
    }
}
