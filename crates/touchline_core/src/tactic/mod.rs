// crates/touchline_core/src/tactic/mod.rs
// Tactics: scoped customisations of a formation or of a parent tactic

pub mod scope;

pub use scope::{Scope, ScopeLevel};

use crate::config::OutOfRangePolicy;
use crate::error::{Result, TacticsError};
use crate::formation::{coord_in_range, Direction, Formation};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;
use validator::Validate;

/// Override maps are keyed by position index and iterate in index order.
pub type OverrideMap = BTreeMap<usize, PositionOverride>;

/// Partial override of one position. Absent fields inherit from the layer below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PositionOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl PositionOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// No field set; equivalent to having no override at all
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.direction.is_none()
    }

    pub fn validate(&self, index: usize) -> Result<()> {
        for (axis, value) in [("x", self.x), ("y", self.y)] {
            if let Some(v) = value {
                if !coord_in_range(v) {
                    return Err(TacticsError::InvalidOverride {
                        index,
                        reason: format!("{} = {} is off the pitch", axis, v),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Drops entries that set no field.
pub fn prune_overrides(overrides: &mut OverrideMap) -> usize {
    let before = overrides.len();
    overrides.retain(|_, ov| !ov.is_empty());
    before - overrides.len()
}

/// Checks every key lies in `0..squad_size` and every coordinate is on the pitch.
pub fn validate_override_map(layer: &str, overrides: &OverrideMap, squad_size: usize) -> Result<()> {
    for (&index, ov) in overrides {
        if index >= squad_size {
            return Err(TacticsError::PositionOutOfRange {
                layer: layer.to_string(),
                index,
                squad_size,
            });
        }
        ov.validate(index)?;
    }
    Ok(())
}

/// Tactical note attached to a subset of positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Principle {
    #[serde(default)]
    pub id: String,
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Empty means the principle applies to every position
    #[serde(default)]
    pub positions: BTreeSet<usize>,
}

impl Principle {
    pub fn new(title: &str, description: &str, positions: &[usize]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            positions: positions.iter().copied().collect(),
        }
    }

    pub fn applies_to_all(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn applies_to(&self, index: usize) -> bool {
        self.applies_to_all() || self.positions.contains(&index)
    }

    /// Position indices to highlight on the pitch when this principle is selected
    pub fn highlighted_positions(&self, squad_size: usize) -> Vec<usize> {
        if self.applies_to_all() {
            (0..squad_size).collect()
        } else {
            self.positions.iter().copied().filter(|&i| i < squad_size).collect()
        }
    }
}

/// Optional style tag for a tactic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticalStyle {
    Defensive,
    Balanced,
    Attacking,
    CounterAttack,
    Possession,
    Pressing,
    DirectPlay,
    WingPlay,
}

impl TacticalStyle {
    pub fn description(&self) -> &'static str {
        match self {
            TacticalStyle::Defensive => "Compact shape, protect the box first",
            TacticalStyle::Balanced => "Even split between attack and defence",
            TacticalStyle::Attacking => "Commit numbers forward",
            TacticalStyle::CounterAttack => "Sit in, break quickly on turnovers",
            TacticalStyle::Possession => "Keep the ball, patient build-up",
            TacticalStyle::Pressing => "Win the ball back high up the pitch",
            TacticalStyle::DirectPlay => "Play forward early",
            TacticalStyle::WingPlay => "Stretch the pitch and cross",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Tactic {
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub formation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_tactic_id: Option<String>,
    pub squad_size: usize,
    #[serde(default)]
    pub overrides: OverrideMap,
    #[serde(default)]
    pub principles: Vec<Principle>,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TacticalStyle>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub scope: Scope,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Tactic {
    /// New tactic based directly on a formation
    pub fn new(name: &str, formation: &Formation, scope: Scope) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            formation_id: formation.id.clone(),
            parent_tactic_id: None,
            squad_size: formation.squad_size,
            overrides: OverrideMap::new(),
            principles: Vec::new(),
            summary: String::new(),
            style: None,
            tags: Vec::new(),
            scope,
            created_at: now,
            updated_at: now,
        }
    }

    /// New tactic inheriting from `parent`. The new scope must sit inside the
    /// parent's scope.
    pub fn derive_from(parent: &Tactic, name: &str, scope: Scope) -> Result<Self> {
        let now = Utc::now();
        let tactic = Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            formation_id: parent.formation_id.clone(),
            parent_tactic_id: Some(parent.id.clone()),
            squad_size: parent.squad_size,
            overrides: OverrideMap::new(),
            principles: Vec::new(),
            summary: String::new(),
            style: parent.style,
            tags: Vec::new(),
            scope,
            created_at: now,
            updated_at: now,
        };
        tactic.check_parent_scope(parent)?;
        Ok(tactic)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn with_style(mut self, style: TacticalStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn check_parent_scope(&self, parent: &Tactic) -> Result<()> {
        if self.scope.can_inherit_from(&parent.scope) {
            Ok(())
        } else {
            Err(TacticsError::ScopeViolation {
                tactic_id: self.id.clone(),
                scope: self.scope.to_string(),
                parent_scope: parent.scope.to_string(),
            })
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Sets or replaces the override for one position. An empty override
    /// removes the entry.
    pub fn set_override(&mut self, index: usize, ov: PositionOverride) -> Result<()> {
        if index >= self.squad_size {
            return Err(TacticsError::PositionOutOfRange {
                layer: self.id.clone(),
                index,
                squad_size: self.squad_size,
            });
        }
        ov.validate(index)?;

        if ov.is_empty() {
            self.overrides.remove(&index);
        } else {
            self.overrides.insert(index, ov);
        }
        self.touch();
        Ok(())
    }

    pub fn clear_override(&mut self, index: usize) -> Option<PositionOverride> {
        let removed = self.overrides.remove(&index);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Wholesale replacement on save. Nothing is changed if any entry is invalid.
    pub fn replace_overrides(&mut self, mut overrides: OverrideMap) -> Result<()> {
        validate_override_map(&self.id, &overrides, self.squad_size)?;
        prune_overrides(&mut overrides);
        self.overrides = overrides;
        self.touch();
        Ok(())
    }

    pub fn replace_principles(&mut self, principles: Vec<Principle>) -> Result<()> {
        for principle in &principles {
            self.validate_principle(principle)?;
        }
        self.principles = principles;
        self.touch();
        Ok(())
    }

    fn validate_principle(&self, principle: &Principle) -> Result<()> {
        principle
            .validate()
            .map_err(|e| TacticsError::Validation(format!("principle '{}': {}", principle.title, e)))?;
        if let Some(&index) = principle.positions.iter().find(|&&i| i >= self.squad_size) {
            return Err(TacticsError::PositionOutOfRange {
                layer: format!("{}#principle:{}", self.id, principle.title),
                index,
                squad_size: self.squad_size,
            });
        }
        Ok(())
    }

    pub fn validate_overrides(&self) -> Result<()> {
        validate_override_map(&self.id, &self.overrides, self.squad_size)
    }

    /// Field-level checks that need no other data: name, overrides, principles.
    ///
    /// Under [`OutOfRangePolicy::Ignore`] override keys outside the squad are
    /// kept so resolution can report them; their coordinates are still checked.
    pub fn validate_fields(&self, policy: OutOfRangePolicy) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(TacticsError::Validation("tactic id is empty".to_string()));
        }
        self.validate()
            .map_err(|e| TacticsError::Validation(format!("tactic {}: {}", self.id, e)))?;
        match policy {
            OutOfRangePolicy::Reject => self.validate_overrides()?,
            OutOfRangePolicy::Ignore => {
                for (&index, ov) in &self.overrides {
                    ov.validate(index)?;
                }
            }
        }
        for principle in &self.principles {
            self.validate_principle(principle)?;
        }
        Ok(())
    }

    pub fn principles_for_position(&self, index: usize) -> Vec<&Principle> {
        self.principles.iter().filter(|p| p.applies_to(index)).collect()
    }

    pub fn is_root(&self) -> bool {
        self.parent_tactic_id.is_none()
    }
}
