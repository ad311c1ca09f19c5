// crates/touchline_core/src/formation/catalog.rs
// Seeded formations for the squad sizes used in youth football (5/7/9/11-a-side)

use super::{Direction, Formation, Position};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Built-in formation templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationKind {
    F442,
    F433,
    F4231,
    F352,
    F332,
    F323,
    F231,
    F321,
    F121,
}

impl FormationKind {
    pub fn all() -> Vec<FormationKind> {
        vec![
            Self::F442,
            Self::F433,
            Self::F4231,
            Self::F352,
            Self::F332,
            Self::F323,
            Self::F231,
            Self::F321,
            Self::F121,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::F442 => "11-4-4-2",
            Self::F433 => "11-4-3-3",
            Self::F4231 => "11-4-2-3-1",
            Self::F352 => "11-3-5-2",
            Self::F332 => "9-3-3-2",
            Self::F323 => "9-3-2-3",
            Self::F231 => "7-2-3-1",
            Self::F321 => "7-3-2-1",
            Self::F121 => "5-1-2-1",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::F442 => "4-4-2",
            Self::F433 => "4-3-3",
            Self::F4231 => "4-2-3-1",
            Self::F352 => "3-5-2",
            Self::F332 => "3-3-2",
            Self::F323 => "3-2-3",
            Self::F231 => "2-3-1",
            Self::F321 => "3-2-1",
            Self::F121 => "1-2-1",
        }
    }

    pub fn squad_size(&self) -> usize {
        match self {
            Self::F442 | Self::F433 | Self::F4231 | Self::F352 => 11,
            Self::F332 | Self::F323 => 9,
            Self::F231 | Self::F321 => 7,
            Self::F121 => 5,
        }
    }

    pub fn formation(&self) -> Formation {
        match self {
            Self::F442 => create_442(),
            Self::F433 => create_433(),
            Self::F4231 => create_4231(),
            Self::F352 => create_352(),
            Self::F332 => create_332(),
            Self::F323 => create_323(),
            Self::F231 => create_231(),
            Self::F321 => create_321(),
            Self::F121 => create_121(),
        }
    }
}

static CATALOG: Lazy<Vec<Formation>> =
    Lazy::new(|| FormationKind::all().iter().map(FormationKind::formation).collect());

/// Every seeded formation, 11-a-side first
pub fn all() -> &'static [Formation] {
    &CATALOG
}

pub fn by_id(id: &str) -> Option<&'static Formation> {
    CATALOG.iter().find(|f| f.id == id)
}

pub fn for_squad_size(squad_size: usize) -> Vec<&'static Formation> {
    CATALOG.iter().filter(|f| f.squad_size == squad_size).collect()
}

fn build(kind: FormationKind, positions: Vec<Position>) -> Formation {
    Formation::new(kind.id(), kind.display_name(), positions)
}

fn gk() -> Position {
    Position::new(0, "GK", 50.0, 5.0).facing(Direction::North)
}

// ============================================================================
// 11-a-side
// ============================================================================

/// 4-4-2 flat
fn create_442() -> Formation {
    build(
        FormationKind::F442,
        vec![
            gk(),
            Position::new(1, "LB", 20.0, 20.0),
            Position::new(2, "LCB", 40.0, 20.0),
            Position::new(3, "RCB", 60.0, 20.0),
            Position::new(4, "RB", 80.0, 20.0),
            Position::new(5, "LM", 15.0, 50.0),
            Position::new(6, "LCM", 40.0, 50.0),
            Position::new(7, "RCM", 60.0, 50.0),
            Position::new(8, "RM", 85.0, 50.0),
            Position::new(9, "LS", 40.0, 80.0),
            Position::new(10, "RS", 60.0, 80.0),
        ],
    )
}

/// 4-3-3
fn create_433() -> Formation {
    build(
        FormationKind::F433,
        vec![
            gk(),
            Position::new(1, "LB", 20.0, 20.0),
            Position::new(2, "LCB", 40.0, 20.0),
            Position::new(3, "RCB", 60.0, 20.0),
            Position::new(4, "RB", 80.0, 20.0),
            Position::new(5, "LCM", 35.0, 45.0),
            Position::new(6, "CM", 50.0, 45.0),
            Position::new(7, "RCM", 65.0, 45.0),
            Position::new(8, "LW", 15.0, 80.0),
            Position::new(9, "ST", 50.0, 85.0),
            Position::new(10, "RW", 85.0, 80.0),
        ],
    )
}

/// 4-2-3-1
fn create_4231() -> Formation {
    build(
        FormationKind::F4231,
        vec![
            gk(),
            Position::new(1, "LB", 20.0, 20.0),
            Position::new(2, "LCB", 40.0, 20.0),
            Position::new(3, "RCB", 60.0, 20.0),
            Position::new(4, "RB", 80.0, 20.0),
            Position::new(5, "LDM", 40.0, 38.0),
            Position::new(6, "RDM", 60.0, 38.0),
            Position::new(7, "LAM", 20.0, 65.0),
            Position::new(8, "CAM", 50.0, 65.0),
            Position::new(9, "RAM", 80.0, 65.0),
            Position::new(10, "ST", 50.0, 85.0),
        ],
    )
}

/// 3-5-2 with wing-backs
fn create_352() -> Formation {
    build(
        FormationKind::F352,
        vec![
            gk(),
            Position::new(1, "LCB", 30.0, 20.0),
            Position::new(2, "CB", 50.0, 18.0),
            Position::new(3, "RCB", 70.0, 20.0),
            Position::new(4, "LWB", 10.0, 50.0),
            Position::new(5, "LCM", 35.0, 45.0),
            Position::new(6, "CM", 50.0, 40.0),
            Position::new(7, "RCM", 65.0, 45.0),
            Position::new(8, "RWB", 90.0, 50.0),
            Position::new(9, "LS", 40.0, 80.0),
            Position::new(10, "RS", 60.0, 80.0),
        ],
    )
}

// ============================================================================
// 9-a-side
// ============================================================================

fn create_332() -> Formation {
    build(
        FormationKind::F332,
        vec![
            gk(),
            Position::new(1, "LCB", 25.0, 22.0),
            Position::new(2, "CB", 50.0, 20.0),
            Position::new(3, "RCB", 75.0, 22.0),
            Position::new(4, "LM", 20.0, 50.0),
            Position::new(5, "CM", 50.0, 48.0),
            Position::new(6, "RM", 80.0, 50.0),
            Position::new(7, "LS", 40.0, 78.0),
            Position::new(8, "RS", 60.0, 78.0),
        ],
    )
}

fn create_323() -> Formation {
    build(
        FormationKind::F323,
        vec![
            gk(),
            Position::new(1, "LCB", 25.0, 22.0),
            Position::new(2, "CB", 50.0, 20.0),
            Position::new(3, "RCB", 75.0, 22.0),
            Position::new(4, "LCM", 38.0, 48.0),
            Position::new(5, "RCM", 62.0, 48.0),
            Position::new(6, "LW", 18.0, 75.0),
            Position::new(7, "ST", 50.0, 82.0),
            Position::new(8, "RW", 82.0, 75.0),
        ],
    )
}

// ============================================================================
// 7-a-side
// ============================================================================

fn create_231() -> Formation {
    build(
        FormationKind::F231,
        vec![
            gk(),
            Position::new(1, "LCB", 35.0, 22.0),
            Position::new(2, "RCB", 65.0, 22.0),
            Position::new(3, "LM", 20.0, 50.0),
            Position::new(4, "CM", 50.0, 48.0),
            Position::new(5, "RM", 80.0, 50.0),
            Position::new(6, "ST", 50.0, 80.0),
        ],
    )
}

fn create_321() -> Formation {
    build(
        FormationKind::F321,
        vec![
            gk(),
            Position::new(1, "LB", 25.0, 24.0),
            Position::new(2, "CB", 50.0, 20.0),
            Position::new(3, "RB", 75.0, 24.0),
            Position::new(4, "LCM", 38.0, 52.0),
            Position::new(5, "RCM", 62.0, 52.0),
            Position::new(6, "ST", 50.0, 80.0),
        ],
    )
}

// ============================================================================
// 5-a-side
// ============================================================================

fn create_121() -> Formation {
    build(
        FormationKind::F121,
        vec![
            gk(),
            Position::new(1, "CB", 50.0, 25.0),
            Position::new(2, "LM", 25.0, 50.0),
            Position::new(3, "RM", 75.0, 50.0),
            Position::new(4, "ST", 50.0, 78.0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_catalog_formations_are_valid() {
        assert_eq!(all().len(), FormationKind::all().len());
        for formation in all() {
            assert!(formation.validate().is_ok(), "Formation {} should validate", formation.id);
        }
    }

    #[test]
    fn test_squad_sizes_match_kind() {
        for kind in FormationKind::all() {
            let formation = kind.formation();
            assert_eq!(
                formation.squad_size,
                kind.squad_size(),
                "Formation {} has wrong squad size",
                kind.id()
            );
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = all().iter().map(|f| f.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_lookup() {
        let f442 = by_id("11-4-4-2").expect("4-4-2 is seeded");
        let left_striker = f442.position(9).unwrap();
        assert_eq!(left_striker.code, "LS");
        assert_eq!((left_striker.x, left_striker.y), (40.0, 80.0));

        assert_eq!(for_squad_size(11).len(), 4);
        assert_eq!(for_squad_size(7).len(), 2);
        assert!(for_squad_size(6).is_empty());
        assert!(by_id("11-2-3-5").is_none());
    }
}
