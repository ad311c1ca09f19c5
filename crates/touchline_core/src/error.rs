use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Design-level classification of a [`TacticsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Integrity,
}

impl ErrorKind {
    /// Stable code used by the JSON API
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Integrity => "INTEGRITY_ERROR",
        }
    }
}

#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Formation not found: {id}")]
    FormationNotFound { id: String },

    #[error("Tactic not found: {id}")]
    TacticNotFound { id: String },

    #[error("Parent tactic {parent_id} of {tactic_id} not found")]
    ParentNotFound { tactic_id: String, parent_id: String },

    #[error("Position index {index} in layer '{layer}' is outside 0..{squad_size}")]
    PositionOutOfRange { layer: String, index: usize, squad_size: usize },

    #[error("Squad size mismatch for {tactic_id}: formation has {expected}, tactic has {found}")]
    SquadSizeMismatch { tactic_id: String, expected: usize, found: usize },

    #[error("Invalid formation {id}: {reason}")]
    InvalidFormation { id: String, reason: String },

    #[error("Invalid override for position {index}: {reason}")]
    InvalidOverride { index: usize, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate id: {id}")]
    DuplicateId { id: String },

    #[error("Scope of {tactic_id} ({scope}) cannot inherit from parent scope ({parent_scope})")]
    ScopeViolation { tactic_id: String, scope: String, parent_scope: String },

    #[error("Tactic {tactic_id} uses formation {found} but its parent chain is based on {expected}")]
    FormationMismatch { tactic_id: String, expected: String, found: String },

    #[error("Circular tactic inheritance: {}", cycle_path.join(" -> "))]
    CircularInheritance { cycle_path: Vec<String> },

    #[error("Inheritance chain of {tactic_id} exceeds depth {max_depth}")]
    InheritanceTooDeep { tactic_id: String, max_depth: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TacticsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TacticsError::FormationNotFound { .. }
            | TacticsError::TacticNotFound { .. }
            | TacticsError::ParentNotFound { .. } => ErrorKind::NotFound,

            TacticsError::PositionOutOfRange { .. }
            | TacticsError::SquadSizeMismatch { .. }
            | TacticsError::InvalidFormation { .. }
            | TacticsError::InvalidOverride { .. }
            | TacticsError::Validation(_)
            | TacticsError::DuplicateId { .. }
            | TacticsError::Serialization(_)
            | TacticsError::Yaml(_) => ErrorKind::Validation,

            TacticsError::ScopeViolation { .. }
            | TacticsError::FormationMismatch { .. }
            | TacticsError::CircularInheritance { .. }
            | TacticsError::InheritanceTooDeep { .. } => ErrorKind::Integrity,
        }
    }

    /// Errors the caller can fix by changing the request, as opposed to
    /// stored data that is inconsistent.
    pub fn is_client_error(&self) -> bool {
        match self.kind() {
            ErrorKind::NotFound => true,
            ErrorKind::Validation => true,
            ErrorKind::Integrity => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TacticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = TacticsError::FormationNotFound { id: "f-1".to_string() };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_client_error());

        let err = TacticsError::PositionOutOfRange {
            layer: "t-1".to_string(),
            index: 11,
            squad_size: 11,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Position index 11 in layer 't-1' is outside 0..11");

        let err = TacticsError::CircularInheritance {
            cycle_path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(err.kind(), ErrorKind::Integrity);
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "Circular tactic inheritance: a -> b -> a");
    }

    #[test]
    fn test_json_error_is_validation() {
        let err: TacticsError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.kind().code(), "VALIDATION_ERROR");
    }
}
