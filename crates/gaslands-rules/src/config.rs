//! Roster-level configuration and warnings.
//!
//! A team is built against a can budget. Going over budget, over the vehicle
//! cap, or over a vehicle's build slots produces a warning for the player;
//! none of these ever block an edit.
//!
//! ```
//! use gaslands_rules::config::{validate_roster, RosterConfig};
//! use gaslands_rules::roster::Roster;
//! use gaslands_rules::vehicles::VehicleKind;
//!
//! let roster = Roster::default().add_vehicle(VehicleKind::Car);
//! assert!(validate_roster(&roster, &RosterConfig::default()).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::roster::Roster;
use crate::stats::{build_slot_capacity, build_slots_in_use};

/// Standard team budget in cans.
pub const DEFAULT_CANS_BUDGET: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub cans_budget: u32,
    /// `None` = no cap on vehicle count.
    pub max_vehicles: Option<u32>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            cans_budget: DEFAULT_CANS_BUDGET,
            max_vehicles: None,
        }
    }
}

/// A roster warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterIssue {
    OverBudget { spent: u32, budget: u32 },
    TooManyVehicles { count: u32, max: u32 },
    BuildSlotsExceeded { index: usize, used: u32, capacity: u32 },
}

/// Collect every warning for a roster.
pub fn validate_roster(roster: &Roster, config: &RosterConfig) -> Vec<RosterIssue> {
    let mut issues = Vec::new();

    let spent = roster.total_cost();
    if spent > config.cans_budget {
        issues.push(RosterIssue::OverBudget {
            spent,
            budget: config.cans_budget,
        });
    }

    let count = roster.len() as u32;
    if let Some(max) = config.max_vehicles {
        if count > max {
            issues.push(RosterIssue::TooManyVehicles { count, max });
        }
    }

    for (index, vehicle) in roster.vehicles().iter().enumerate() {
        let used = build_slots_in_use(vehicle);
        let capacity = build_slot_capacity(vehicle);
        if used > capacity {
            issues.push(RosterIssue::BuildSlotsExceeded {
                index,
                used,
                capacity,
            });
        }
    }

    issues
}
