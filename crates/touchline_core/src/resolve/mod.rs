//! Formation/tactic resolution.
//!
//! A resolution starts from the base formation's positions and folds
//! override layers over them, broadest scope first. Each field (x, y,
//! direction) is taken from the last layer that sets it; untouched fields
//! keep the formation default. Every layer that contributed at least one
//! field to a position is recorded in that position's `overridden_by` list,
//! in application order.
//!
//! Resolution is pure: no I/O, no shared state, fresh output per call.

pub mod chain;
pub mod edit;

pub use chain::{ResolutionInput, ResolvedTactic, TacticResolver, TacticSource};
pub use edit::{overrides_from_edits, PositionEdit};

use crate::config::{OutOfRangePolicy, ResolverConfig};
use crate::error::{Result, TacticsError};
use crate::formation::{Direction, Formation, Position};
use crate::tactic::{OverrideMap, PositionOverride, Tactic};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One labelled override map in resolution order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideLayer {
    /// Provenance label, usually the tactic id
    pub label: String,
    pub overrides: OverrideMap,
    /// Squad size the layer was authored against, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squad_size: Option<usize>,
}

impl OverrideLayer {
    pub fn new(label: &str, overrides: OverrideMap) -> Self {
        Self { label: label.to_string(), overrides, squad_size: None }
    }

    pub fn from_tactic(tactic: &Tactic) -> Self {
        Self {
            label: tactic.id.clone(),
            overrides: tactic.overrides.clone(),
            squad_size: Some(tactic.squad_size),
        }
    }

    pub fn with_override(mut self, index: usize, ov: PositionOverride) -> Self {
        self.overrides.insert(index, ov);
        self
    }
}

/// Final coordinates of one position plus provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedPosition {
    pub index: usize,
    pub code: String,
    pub x: f32,
    pub y: f32,
    pub direction: Option<Direction>,
    /// Coordinates always originate from a formation; tactics only nudge them
    pub source_formation_id: String,
    /// Labels of the layers that set at least one field, in application order
    pub overridden_by: Vec<String>,
}

impl ResolvedPosition {
    pub fn from_base(formation_id: &str, position: &Position) -> Self {
        Self {
            index: position.index,
            code: position.code.clone(),
            x: position.x,
            y: position.y,
            direction: position.direction,
            source_formation_id: formation_id.to_string(),
            overridden_by: Vec::new(),
        }
    }

    pub fn is_overridden(&self) -> bool {
        !self.overridden_by.is_empty()
    }

    /// The narrowest layer that touched this position
    pub fn last_overridden_by(&self) -> Option<&str> {
        self.overridden_by.last().map(String::as_str)
    }

    pub fn was_overridden_by(&self, label: &str) -> bool {
        self.overridden_by.iter().any(|l| l == label)
    }

    /// Partial merge: only present fields are written. Returns whether the
    /// override contributed anything.
    pub fn apply(&mut self, ov: &PositionOverride, label: &str) -> bool {
        let mut contributed = false;
        if let Some(x) = ov.x {
            self.x = x;
            contributed = true;
        }
        if let Some(y) = ov.y {
            self.y = y;
            contributed = true;
        }
        if let Some(direction) = ov.direction {
            self.direction = Some(direction);
            contributed = true;
        }
        if contributed {
            self.overridden_by.push(label.to_string());
        }
        contributed
    }
}

/// Override key skipped under [`OutOfRangePolicy::Ignore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IgnoredOverride {
    pub layer: String,
    pub index: usize,
    pub squad_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFormation {
    pub formation_id: String,
    pub positions: Vec<ResolvedPosition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<IgnoredOverride>,
}

impl ResolvedFormation {
    pub fn fingerprint(&self) -> Result<String> {
        fingerprint_positions(&self.positions)
    }
}

/// SHA-256 over the canonical JSON of the positions
pub fn fingerprint_positions(positions: &[ResolvedPosition]) -> Result<String> {
    let bytes = serde_json::to_vec(positions)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Base positions with no layer applied
pub fn base_positions(formation: &Formation) -> Vec<ResolvedPosition> {
    formation.positions.iter().map(|p| ResolvedPosition::from_base(&formation.id, p)).collect()
}

/// Applies one layer on top of already-resolved positions.
///
/// Keys are checked before anything is written, so a rejected layer leaves
/// `positions` untouched.
pub fn apply_layer(
    positions: &mut [ResolvedPosition],
    layer: &OverrideLayer,
    policy: OutOfRangePolicy,
) -> Result<Vec<IgnoredOverride>> {
    let squad_size = positions.len();

    if let Some(expected) = layer.squad_size {
        if expected != squad_size {
            return Err(TacticsError::SquadSizeMismatch {
                tactic_id: layer.label.clone(),
                expected: squad_size,
                found: expected,
            });
        }
    }

    let mut ignored = Vec::new();
    for (&index, ov) in &layer.overrides {
        if index < squad_size {
            ov.validate(index)?;
            continue;
        }
        match policy {
            OutOfRangePolicy::Reject => {
                return Err(TacticsError::PositionOutOfRange {
                    layer: layer.label.clone(),
                    index,
                    squad_size,
                });
            }
            OutOfRangePolicy::Ignore => {
                tracing::warn!(
                    layer = %layer.label,
                    index,
                    squad_size,
                    "ignoring override for position outside the formation"
                );
                ignored.push(IgnoredOverride { layer: layer.label.clone(), index, squad_size });
            }
        }
    }

    let mut touched = 0usize;
    for (&index, ov) in layer.overrides.range(..squad_size) {
        if positions[index].apply(ov, &layer.label) {
            touched += 1;
        }
    }
    tracing::debug!(layer = %layer.label, touched, "applied override layer");

    Ok(ignored)
}

/// Resolves `formation` under `layers` (broadest first), rejecting
/// out-of-range keys.
pub fn resolve_positions(
    formation: &Formation,
    layers: &[OverrideLayer],
) -> Result<Vec<ResolvedPosition>> {
    Ok(resolve_with(formation, layers, &ResolverConfig::default())?.positions)
}

pub fn resolve_with(
    formation: &Formation,
    layers: &[OverrideLayer],
    config: &ResolverConfig,
) -> Result<ResolvedFormation> {
    formation.validate()?;

    let mut positions = base_positions(formation);
    let mut ignored = Vec::new();
    for layer in layers {
        ignored.extend(apply_layer(&mut positions, layer, config.out_of_range_policy)?);
    }

    Ok(ResolvedFormation { formation_id: formation.id.clone(), positions, ignored })
}
