//! Arc-of-fire state machine for mounted weapons.
//!
//! A vehicle-mounted weapon starts facing front and cycles
//! `front → rear → side → 360° (turret) → front`. A crew-fired weapon is
//! pinned at 360° and never moves.
//!
//! ```
//! use gaslands_rules::facing::{next_facing, ArcDirection, WeaponFacing};
//!
//! let mut facing = WeaponFacing::UserSelected(ArcDirection::Front);
//! for _ in 0..4 {
//!     facing = next_facing(facing);
//! }
//! assert_eq!(facing, WeaponFacing::UserSelected(ArcDirection::Front));
//! ```
//!
//! At the serde boundary a facing is written as its tags,
//! `{"type": "user_selected", "direction": "360°"}`, and read back through
//! [`WeaponFacing::from_tags`], so an unknown tag fails the whole load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::weapons::WeaponKind;

/// Number of user-selectable facings in one full cycle.
pub const FACING_CYCLE_LEN: usize = 4;

/// Direction(s) covered by a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArcDirection {
    Front,
    Rear,
    Side,
    /// 360°.
    Full,
}

impl ArcDirection {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Rear => "rear",
            Self::Side => "side",
            Self::Full => "360°",
        }
    }
}

impl fmt::Display for ArcDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ArcDirection {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(Self::Front),
            "rear" => Ok(Self::Rear),
            "side" => Ok(Self::Side),
            "360°" | "360" => Ok(Self::Full),
            other => Err(RulesError::UnknownFacing(other.to_string())),
        }
    }
}

impl TryFrom<String> for ArcDirection {
    type Error = RulesError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<ArcDirection> for String {
    fn from(direction: ArcDirection) -> Self {
        direction.tag().to_string()
    }
}

/// Facing of a mounted weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FacingTags", into = "FacingTags")]
pub enum WeaponFacing {
    /// Chosen by the player; `Full` here is a turret and costs triple.
    UserSelected(ArcDirection),
    /// Fixed 360° arc of a crew-fired weapon.
    CrewFired,
}

impl WeaponFacing {
    /// Facing a freshly mounted weapon starts at.
    pub fn initial_for(kind: WeaponKind) -> Self {
        if kind.spec().is_crew_fired() {
            Self::CrewFired
        } else {
            Self::UserSelected(ArcDirection::Front)
        }
    }

    pub fn direction(self) -> ArcDirection {
        match self {
            Self::UserSelected(direction) => direction,
            Self::CrewFired => ArcDirection::Full,
        }
    }

    /// True only for a user-selected 360° arc.
    pub fn is_turret(self) -> bool {
        matches!(self, Self::UserSelected(ArcDirection::Full))
    }

    pub fn is_cyclable(self) -> bool {
        matches!(self, Self::UserSelected(_))
    }

    pub fn kind_tag(self) -> &'static str {
        match self {
            Self::UserSelected(_) => "user_selected",
            Self::CrewFired => "crew_fired",
        }
    }

    /// Rebuild a facing from its boundary tags.
    ///
    /// `kind_tag` is `user_selected` or `crew_fired`; a crew-fired facing must
    /// carry the `360°` direction.
    pub fn from_tags(kind_tag: &str, direction_tag: &str) -> Result<Self, RulesError> {
        let direction: ArcDirection = direction_tag.parse()?;
        match kind_tag {
            "user_selected" => Ok(Self::UserSelected(direction)),
            "crew_fired" if direction == ArcDirection::Full => Ok(Self::CrewFired),
            _ => Err(RulesError::UnknownFacing(format!(
                "{kind_tag}/{direction_tag}"
            ))),
        }
    }
}

/// Wire shape of a [`WeaponFacing`].
#[derive(Serialize, Deserialize)]
struct FacingTags {
    #[serde(rename = "type")]
    kind: String,
    direction: String,
}

impl TryFrom<FacingTags> for WeaponFacing {
    type Error = RulesError;

    fn try_from(tags: FacingTags) -> Result<Self, Self::Error> {
        Self::from_tags(&tags.kind, &tags.direction)
    }
}

impl From<WeaponFacing> for FacingTags {
    fn from(facing: WeaponFacing) -> Self {
        Self {
            kind: facing.kind_tag().to_string(),
            direction: facing.direction().tag().to_string(),
        }
    }
}

/// Successor of a facing in the cycle. Crew-fired facings map to themselves.
pub fn next_facing(facing: WeaponFacing) -> WeaponFacing {
    match facing {
        WeaponFacing::UserSelected(direction) => WeaponFacing::UserSelected(match direction {
            ArcDirection::Front => ArcDirection::Rear,
            ArcDirection::Rear => ArcDirection::Side,
            ArcDirection::Side => ArcDirection::Full,
            ArcDirection::Full => ArcDirection::Front,
        }),
        WeaponFacing::CrewFired => WeaponFacing::CrewFired,
    }
}
