//! Derived vehicle statistics.
//!
//! Every value is recomputed from the vehicle's current weapons and upgrades;
//! there is no cached aggregate. Profile stats are signed because upgrade
//! modifiers can push them down.

use serde::{Deserialize, Serialize};

use crate::upgrades::StatModifiers;
use crate::vehicles::ActiveVehicle;
use crate::weapons::active_weapon_cost;

/// Total price in cans: base + weapons (turrets tripled) + upgrades × amount.
///
/// Saturates at `u32::MAX` for hand-built vehicles with absurd amounts.
pub fn total_cost(vehicle: &ActiveVehicle) -> u32 {
    let weapons = vehicle
        .weapons
        .iter()
        .map(active_weapon_cost)
        .fold(0, u32::saturating_add);
    let upgrades = vehicle
        .upgrades
        .iter()
        .map(|u| u.kind.spec().cost.saturating_mul(u.amount))
        .fold(0, u32::saturating_add);
    vehicle
        .kind
        .spec()
        .cost
        .saturating_add(weapons)
        .saturating_add(upgrades)
}

pub fn build_slots_in_use(vehicle: &ActiveVehicle) -> u32 {
    let weapons = vehicle
        .weapons
        .iter()
        .map(|w| w.kind.spec().build_slots)
        .fold(0, u32::saturating_add);
    let upgrades = vehicle
        .upgrades
        .iter()
        .map(|u| u.kind.spec().build_slots.saturating_mul(u.amount))
        .fold(0, u32::saturating_add);
    weapons.saturating_add(upgrades)
}

pub fn build_slot_capacity(vehicle: &ActiveVehicle) -> u32 {
    vehicle.kind.spec().build_slots
}

/// More slots used than the vehicle has. A warning, never a block.
pub fn is_over_capacity(vehicle: &ActiveVehicle) -> bool {
    build_slots_in_use(vehicle) > build_slot_capacity(vehicle)
}

fn signed(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Printed stat plus every upgrade's delta, saturating at the `i32` bounds.
fn modified_stat(
    vehicle: &ActiveVehicle,
    base: u32,
    pick: impl Fn(&StatModifiers) -> i32,
) -> i32 {
    vehicle
        .upgrades
        .iter()
        .map(|u| pick(&u.kind.spec().modifiers).saturating_mul(signed(u.amount)))
        .fold(signed(base), i32::saturating_add)
}

pub fn total_hull(vehicle: &ActiveVehicle) -> i32 {
    modified_stat(vehicle, vehicle.kind.spec().hull, |m| m.hull)
}

pub fn total_handling(vehicle: &ActiveVehicle) -> i32 {
    modified_stat(vehicle, vehicle.kind.spec().handling, |m| m.handling)
}

pub fn max_gear(vehicle: &ActiveVehicle) -> i32 {
    modified_stat(vehicle, vehicle.kind.spec().max_gear, |m| m.max_gear)
}

pub fn total_crew(vehicle: &ActiveVehicle) -> i32 {
    modified_stat(vehicle, vehicle.kind.spec().crew, |m| m.crew)
}

/// Every derived value the vehicle card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub cost: u32,
    pub build_slots_in_use: u32,
    pub build_slot_capacity: u32,
    pub over_capacity: bool,
    pub hull: i32,
    pub handling: i32,
    pub max_gear: i32,
    pub crew: i32,
    pub weapon_count: usize,
    /// Distinct upgrade entries, not copies.
    pub upgrade_count: usize,
}

pub fn summarize(vehicle: &ActiveVehicle) -> VehicleSummary {
    VehicleSummary {
        cost: total_cost(vehicle),
        build_slots_in_use: build_slots_in_use(vehicle),
        build_slot_capacity: build_slot_capacity(vehicle),
        over_capacity: is_over_capacity(vehicle),
        hull: total_hull(vehicle),
        handling: total_handling(vehicle),
        max_gear: max_gear(vehicle),
        crew: total_crew(vehicle),
        weapon_count: vehicle.weapons.len(),
        upgrade_count: vehicle.upgrades.len(),
    }
}
