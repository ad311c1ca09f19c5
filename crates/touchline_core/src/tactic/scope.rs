//! Organisational scope of a tactic.
//!
//! Scopes form a strict containment hierarchy: a team belongs to an age
//! group, an age group belongs to a club. Narrower scopes inherit tactics
//! from the broader scopes that contain them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Breadth of a scope, ordered broadest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ScopeLevel {
    Club,
    AgeGroup,
    Team,
}

impl ScopeLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Club => "Club",
            Self::AgeGroup => "Age group",
            Self::Team => "Team",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Scope {
    Club { club_id: String },
    AgeGroup { club_id: String, age_group_id: String },
    Team { club_id: String, age_group_id: String, team_id: String },
}

impl Scope {
    pub fn club(club_id: &str) -> Self {
        Self::Club { club_id: club_id.to_string() }
    }

    pub fn age_group(club_id: &str, age_group_id: &str) -> Self {
        Self::AgeGroup { club_id: club_id.to_string(), age_group_id: age_group_id.to_string() }
    }

    pub fn team(club_id: &str, age_group_id: &str, team_id: &str) -> Self {
        Self::Team {
            club_id: club_id.to_string(),
            age_group_id: age_group_id.to_string(),
            team_id: team_id.to_string(),
        }
    }

    pub fn level(&self) -> ScopeLevel {
        match self {
            Self::Club { .. } => ScopeLevel::Club,
            Self::AgeGroup { .. } => ScopeLevel::AgeGroup,
            Self::Team { .. } => ScopeLevel::Team,
        }
    }

    pub fn club_id(&self) -> &str {
        match self {
            Self::Club { club_id }
            | Self::AgeGroup { club_id, .. }
            | Self::Team { club_id, .. } => club_id,
        }
    }

    pub fn age_group_id(&self) -> Option<&str> {
        match self {
            Self::Club { .. } => None,
            Self::AgeGroup { age_group_id, .. } | Self::Team { age_group_id, .. } => {
                Some(age_group_id)
            }
        }
    }

    pub fn team_id(&self) -> Option<&str> {
        match self {
            Self::Team { team_id, .. } => Some(team_id),
            _ => None,
        }
    }

    /// The next broader scope, `None` for a club.
    pub fn parent(&self) -> Option<Scope> {
        match self {
            Self::Club { .. } => None,
            Self::AgeGroup { club_id, .. } => Some(Scope::club(club_id)),
            Self::Team { club_id, age_group_id, .. } => Some(Scope::age_group(club_id, age_group_id)),
        }
    }

    /// True when `other` is this scope or nested inside it.
    pub fn contains(&self, other: &Scope) -> bool {
        if self.level() > other.level() || self.club_id() != other.club_id() {
            return false;
        }
        match self {
            Self::Club { .. } => true,
            Self::AgeGroup { age_group_id, .. } => other.age_group_id() == Some(age_group_id),
            Self::Team { .. } => self == other,
        }
    }

    /// A tactic may only inherit from a parent whose scope contains its own.
    pub fn can_inherit_from(&self, parent: &Scope) -> bool {
        parent.contains(self)
    }

    /// Whether a tactic defined at this scope shows up for a coach working
    /// at `viewer`, either as their own or as inherited.
    pub fn visible_from(&self, viewer: &Scope) -> bool {
        self.contains(viewer)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Club { club_id } => write!(f, "club:{}", club_id),
            Self::AgeGroup { club_id, age_group_id } => {
                write!(f, "age_group:{}/{}", club_id, age_group_id)
            }
            Self::Team { club_id, age_group_id, team_id } => {
                write!(f, "team:{}/{}/{}", club_id, age_group_id, team_id)
            }
        }
    }
}
