//! Which edits are currently legal on a vehicle.
//!
//! The presentation layer asks these before offering an action; the edit
//! methods on [`ActiveVehicle`] ask them again and refuse anything illegal.

use crate::upgrades::{quantity_limit, Quantity, UpgradeKind};
use crate::vehicles::ActiveVehicle;

/// Whether one more copy of `kind` may be fitted.
pub fn can_add_upgrade(kind: UpgradeKind, vehicle: &ActiveVehicle) -> bool {
    let Some(existing) = vehicle.upgrade(kind) else {
        return true;
    };

    match kind.spec().quantity {
        Quantity::Single => false,
        Quantity::Unlimited => true,
        Quantity::Limited(rule) => existing.amount < rule.evaluate(vehicle),
    }
}

/// Whether an already-fitted upgrade offers a step-up control.
pub fn can_increment_upgrade(kind: UpgradeKind, vehicle: &ActiveVehicle) -> bool {
    vehicle.upgrade(kind).is_some()
        && kind.spec().quantity.policy().is_multi()
        && can_add_upgrade(kind, vehicle)
}

/// Copies of `kind` that may still be fitted. `None` means no cap.
pub fn remaining_upgrade_capacity(kind: UpgradeKind, vehicle: &ActiveVehicle) -> Option<u32> {
    quantity_limit(kind, vehicle).map(|limit| limit.saturating_sub(vehicle.upgrade_amount(kind)))
}

/// Weapon at `index` exists and is not a default weapon.
pub fn can_remove_weapon(vehicle: &ActiveVehicle, index: usize) -> bool {
    vehicle
        .weapons
        .get(index)
        .is_some_and(|w| !w.kind.spec().is_default)
}

/// Weapon at `index` exists, is not crew-fired, and its facing is player-selected.
pub fn can_cycle_facing(vehicle: &ActiveVehicle, index: usize) -> bool {
    vehicle
        .weapons
        .get(index)
        .is_some_and(|w| !w.kind.spec().is_crew_fired() && w.facing.is_cyclable())
}

/// Every catalog upgrade paired with whether it can be added right now.
pub fn upgrade_options(vehicle: &ActiveVehicle) -> Vec<(UpgradeKind, bool)> {
    UpgradeKind::all()
        .iter()
        .map(|&kind| (kind, can_add_upgrade(kind, vehicle)))
        .collect()
}
