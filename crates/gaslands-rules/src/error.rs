//! Errors raised at the boundary where tags, names and stored loadouts enter
//! the rules.
//!
//! These are programmer/data errors: an unknown tag means the caller or the
//! stored data disagrees with the catalog. User-constraint violations (too many
//! upgrades, deleting a default weapon) are never reported here — they are
//! gated by [`crate::eligibility`] and degrade to no-ops.

use thiserror::Error;

/// Unrecognized tag or catalog name, or an inconsistent stored loadout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Facing tag outside `front`/`rear`/`side`/`360°`.
    #[error("unknown weapon facing tag: {0:?}")]
    UnknownFacing(String),

    /// No vehicle type with this name.
    #[error("unknown vehicle type: {0:?}")]
    UnknownVehicle(String),

    /// No weapon type with this name or abbreviation.
    #[error("unknown weapon type: {0:?}")]
    UnknownWeapon(String),

    /// No upgrade type with this name or abbreviation.
    #[error("unknown vehicle upgrade: {0:?}")]
    UnknownUpgrade(String),

    /// Loaded vehicle state that no sequence of legal edits could produce.
    #[error("invalid {vehicle} loadout: {reason}")]
    InvalidLoadout {
        vehicle: &'static str,
        reason: String,
    },
}

/// Result type for tag, catalog and loadout checks.
pub type RulesResult<T> = Result<T, RulesError>;
