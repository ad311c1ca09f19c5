//! Turning pitch edits back into overrides.
//!
//! The editor shows the positions a tactic inherits; when a coach drags or
//! rotates a marker, only the fields that now differ from the inherited
//! value are stored as an override.

use super::ResolvedPosition;
use crate::error::{Result, TacticsError};
use crate::formation::Direction;
use crate::tactic::{OverrideMap, PositionOverride};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coordinates closer than this to the inherited value count as unchanged
pub const COORD_TOLERANCE: f32 = 0.01;

/// Where a coach left one marker on the pitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PositionEdit {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl PositionEdit {
    pub fn new(index: usize, x: f32, y: f32) -> Self {
        Self { index, x, y, direction: None }
    }

    pub fn facing(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

fn differs(a: f32, b: f32) -> bool {
    (a - b).abs() > COORD_TOLERANCE
}

/// Minimal override map that turns `inherited` into the edited positions.
///
/// A later edit for the same index replaces an earlier one. A direction of
/// `None` in an edit leaves the inherited direction alone.
pub fn overrides_from_edits(
    inherited: &[ResolvedPosition],
    edits: &[PositionEdit],
) -> Result<OverrideMap> {
    let mut overrides = OverrideMap::new();

    for edit in edits {
        let base = inherited.get(edit.index).filter(|p| p.index == edit.index).ok_or(
            TacticsError::PositionOutOfRange {
                layer: "edit".to_string(),
                index: edit.index,
                squad_size: inherited.len(),
            },
        )?;

        let mut ov = PositionOverride::new();
        if differs(edit.x, base.x) {
            ov.x = Some(edit.x);
        }
        if differs(edit.y, base.y) {
            ov.y = Some(edit.y);
        }
        if let Some(direction) = edit.direction {
            if base.direction != Some(direction) {
                ov.direction = Some(direction);
            }
        }
        ov.validate(edit.index)?;

        if ov.is_empty() {
            overrides.remove(&edit.index);
        } else {
            overrides.insert(edit.index, ov);
        }
    }

    Ok(overrides)
}
