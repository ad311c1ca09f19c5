//! # touchline_core - Scoped Formation and Tactic Resolution
//!
//! Coaches define tactics at club, age-group or team scope. A tactic is a
//! formation plus per-position partial overrides, optionally inheriting from
//! a broader-scope parent tactic. This crate resolves such chains into final
//! pitch positions with provenance.
//!
//! ## Features
//! - Field-level override merge, last writer wins, per-position provenance
//! - Recursive resolution of parent tactic chains with integrity checks
//! - Seeded formations for 5/7/9/11-a-side
//! - In-memory tactic library and JSON API for the dashboard backend

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod config;
pub mod error;
pub mod formation;
pub mod library;
pub mod resolve;
pub mod tactic;

// Re-export main API functions
pub use api::{list_tactics_json, resolve_formation_json, resolve_tactic_json};
pub use config::{OutOfRangePolicy, ResolverConfig};
pub use error::{ErrorKind, Result, TacticsError};

pub use formation::{catalog, Direction, Formation, Position};
pub use library::{LibraryFile, TacticLibrary, VisibleTactic};
pub use resolve::{
    apply_layer, resolve_positions, resolve_with, IgnoredOverride, OverrideLayer,
    PositionEdit, ResolvedFormation, ResolvedPosition, ResolvedTactic, TacticResolver,
    TacticSource,
};
pub use tactic::{
    OverrideMap, PositionOverride, Principle, Scope, ScopeLevel, Tactic, TacticalStyle,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
