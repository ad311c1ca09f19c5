// crates/touchline_core/src/formation/mod.rs
// Base formations: ordered pitch positions for a given squad size

pub mod catalog;

use crate::error::{Result, TacticsError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pitch coordinates are percentages: x across the width, y along the length
/// (0 = own goal line, 100 = opponent goal line).
pub const COORD_MIN: f32 = 0.0;
pub const COORD_MAX: f32 = 100.0;

pub fn coord_in_range(value: f32) -> bool {
    value.is_finite() && (COORD_MIN..=COORD_MAX).contains(&value)
}

/// Facing direction shown on the pitch diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

impl Direction {
    pub fn all() -> Vec<Direction> {
        vec![
            Self::North,
            Self::NorthEast,
            Self::East,
            Self::SouthEast,
            Self::South,
            Self::SouthWest,
            Self::West,
            Self::NorthWest,
        ]
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }

    /// Bearing in degrees, 0 = towards the opponent goal
    pub fn degrees(&self) -> u16 {
        match self {
            Self::North => 0,
            Self::NorthEast => 45,
            Self::East => 90,
            Self::SouthEast => 135,
            Self::South => 180,
            Self::SouthWest => 225,
            Self::West => 270,
            Self::NorthWest => 315,
        }
    }

    pub fn from_short_name(name: &str) -> Option<Direction> {
        Self::all().into_iter().find(|d| d.short_name().eq_ignore_ascii_case(name.trim()))
    }
}

/// One squad slot within a formation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub index: usize,
    /// Label such as "GK", "LCB", "ST"
    pub code: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl Position {
    pub fn new(index: usize, code: &str, x: f32, y: f32) -> Self {
        Self { index, code: code.to_string(), x, y, direction: None }
    }

    pub fn facing(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Immutable template of pitch positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Formation {
    pub id: String,
    pub name: String,
    pub squad_size: usize,
    pub positions: Vec<Position>,
}

impl Formation {
    pub fn new(id: &str, name: &str, positions: Vec<Position>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            squad_size: positions.len(),
            positions,
        }
    }

    pub fn position(&self, index: usize) -> Option<&Position> {
        self.positions.get(index).filter(|p| p.index == index)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.squad_size
    }

    /// Checks the structural invariants: one position per slot, indices
    /// contiguous from 0 in order, coordinates on the pitch.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| TacticsError::InvalidFormation { id: self.id.clone(), reason };

        if self.id.trim().is_empty() {
            return Err(invalid("formation id is empty".to_string()));
        }
        if self.squad_size == 0 {
            return Err(invalid("squad size must be positive".to_string()));
        }
        if self.positions.len() != self.squad_size {
            return Err(invalid(format!(
                "squad size {} but {} positions",
                self.squad_size,
                self.positions.len()
            )));
        }

        for (expected, pos) in self.positions.iter().enumerate() {
            if pos.index != expected {
                return Err(invalid(format!(
                    "position {} has index {}, expected contiguous ordering",
                    expected, pos.index
                )));
            }
            if !coord_in_range(pos.x) || !coord_in_range(pos.y) {
                return Err(invalid(format!(
                    "position {} coordinates ({}, {}) are off the pitch",
                    pos.index, pos.x, pos.y
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Formation {
        Formation::new(
            "f-3",
            "1-1-1",
            vec![
                Position::new(0, "GK", 50.0, 5.0),
                Position::new(1, "CB", 50.0, 30.0),
                Position::new(2, "ST", 50.0, 80.0).facing(Direction::North),
            ],
        )
    }

    #[test]
    fn test_valid_formation() {
        let formation = small();
        assert!(formation.validate().is_ok());
        assert_eq!(formation.squad_size, 3);
        assert_eq!(formation.position(2).map(|p| p.code.as_str()), Some("ST"));
        assert!(formation.position(3).is_none());
    }

    #[test]
    fn test_non_contiguous_indices_rejected() {
        let mut formation = small();
        formation.positions[1].index = 5;
        let err = formation.validate().unwrap_err();
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn test_squad_size_disagrees_with_positions() {
        let mut formation = small();
        formation.squad_size = 4;
        assert!(formation.validate().is_err());
    }

    #[test]
    fn test_coordinates_off_pitch() {
        let mut formation = small();
        formation.positions[0].y = 101.0;
        assert!(formation.validate().is_err());

        formation.positions[0].y = f32::NAN;
        assert!(formation.validate().is_err());
    }

    #[test]
    fn test_direction_serde_uses_compass_codes() {
        let json = serde_json::to_string(&Direction::NorthWest).unwrap();
        assert_eq!(json, "\"NW\"");
        let parsed: Direction = serde_json::from_str("\"N\"").unwrap();
        assert_eq!(parsed, Direction::North);
        assert_eq!(Direction::from_short_name("se"), Some(Direction::SouthEast));
        assert_eq!(Direction::from_short_name("up"), None);
    }
}
