//! Pure vehicle-building rules for the Gaslands roster builder.
//!
//! This crate holds the catalog, the legality rules and the stat derivation
//! behind the roster builder, independent of any UI. Functions take plain
//! data and return results; edits return new values instead of mutating, so
//! a presentation layer can recompute and re-render after every change.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Read-only catalog queries and lookup by name |
//! | [`config`] | Roster budget configuration and roster warnings |
//! | [`eligibility`] | Which weapon/upgrade/facing edits are legal right now |
//! | [`error`] | Unknown tag and catalog name errors |
//! | [`facing`] | Arc-of-fire state machine for mounted weapons |
//! | [`roster`] | Ordered vehicle collection with add/duplicate/remove |
//! | [`stats`] | Cost, build slots, hull, handling, gear and crew derivation |
//! | [`upgrades`] | Upgrade catalog, quantity policies and limits |
//! | [`vehicles`] | Vehicle catalog and per-vehicle loadout edits |
//! | [`weapons`] | Weapon catalog and mounted-weapon pricing |

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod facing;
pub mod roster;
pub mod stats;
pub mod upgrades;
pub mod vehicles;
pub mod weapons;

pub use error::{RulesError, RulesResult};
