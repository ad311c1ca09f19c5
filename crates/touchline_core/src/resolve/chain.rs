//! Tactic chain resolution.
//!
//! A tactic may inherit from a parent tactic, which may itself inherit from
//! another, down to a root tactic built directly on a formation. Resolving a
//! tactic first resolves its parent completely, then applies its own
//! overrides on top of the parent's resolved positions.

use super::{
    apply_layer, resolve_with, IgnoredOverride, OverrideLayer, ResolvedFormation, ResolvedPosition,
};
use crate::config::ResolverConfig;
use crate::error::{Result, TacticsError};
use crate::formation::Formation;
use crate::tactic::{Principle, Scope, Tactic};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Storage seam: whatever holds formations and tactics
pub trait TacticSource {
    fn formation(&self, id: &str) -> Option<&Formation>;
    fn tactic(&self, id: &str) -> Option<&Tactic>;
}

/// Formation plus ordered layers (broadest first) for one tactic, with the
/// config of the resolver that built it
#[derive(Debug, Clone)]
pub struct ResolutionInput<'a> {
    pub formation: &'a Formation,
    pub layers: Vec<OverrideLayer>,
    pub config: ResolverConfig,
}

impl ResolutionInput<'_> {
    pub fn resolve(&self) -> Result<Vec<ResolvedPosition>> {
        Ok(self.resolve_with_diagnostics()?.positions)
    }

    /// Like [`resolve`](Self::resolve), keeping keys skipped under the ignore policy
    pub fn resolve_with_diagnostics(&self) -> Result<ResolvedFormation> {
        resolve_with(self.formation, &self.layers, &self.config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTactic {
    pub tactic_id: String,
    pub tactic_name: String,
    pub formation_id: String,
    pub scope: Scope,
    /// Tactic ids from the root ancestor down to this tactic
    pub chain: Vec<String>,
    pub positions: Vec<ResolvedPosition>,
    pub principles: Vec<Principle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<IgnoredOverride>,
}

impl ResolvedTactic {
    pub fn position(&self, index: usize) -> Option<&ResolvedPosition> {
        self.positions.get(index)
    }

    /// Indices customised by the given layer, for "changed at team level" badges
    pub fn overridden_by(&self, label: &str) -> Vec<usize> {
        self.positions.iter().filter(|p| p.was_overridden_by(label)).map(|p| p.index).collect()
    }

    pub fn fingerprint(&self) -> Result<String> {
        super::fingerprint_positions(&self.positions)
    }
}

/// Intermediate result while walking down a chain
struct Partial {
    positions: Vec<ResolvedPosition>,
    ignored: Vec<IgnoredOverride>,
}

pub struct TacticResolver<'a, S: TacticSource + ?Sized> {
    source: &'a S,
    config: ResolverConfig,
}

impl<'a, S: TacticSource + ?Sized> TacticResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source, config: ResolverConfig::default() }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Bare formation, no overrides
    pub fn resolve_formation(&self, formation_id: &str) -> Result<Vec<ResolvedPosition>> {
        let formation = self.formation(formation_id)?;
        Ok(resolve_with(formation, &[], &self.config)?.positions)
    }

    pub fn resolve_tactic(&self, tactic_id: &str) -> Result<ResolvedTactic> {
        let chain = self.chain_for(tactic_id)?;
        let formation = self.base_formation(&chain)?;
        let partial = self.resolve_chain(&chain, formation)?;

        // chain_for never returns an empty chain
        let tactic = chain[chain.len() - 1];
        Ok(ResolvedTactic {
            tactic_id: tactic.id.clone(),
            tactic_name: tactic.name.clone(),
            formation_id: formation.id.clone(),
            scope: tactic.scope.clone(),
            chain: chain.iter().map(|t| t.id.clone()).collect(),
            positions: partial.positions,
            principles: tactic.principles.clone(),
            ignored: partial.ignored,
        })
    }

    /// What a tactic inherits before its own overrides: the resolved parent,
    /// or the bare formation for a root tactic.
    pub fn resolve_inherited(&self, tactic_id: &str) -> Result<Vec<ResolvedPosition>> {
        let chain = self.chain_for(tactic_id)?;
        let formation = self.base_formation(&chain)?;
        let parents = &chain[..chain.len() - 1];
        if parents.is_empty() {
            return Ok(resolve_with(formation, &[], &self.config)?.positions);
        }
        Ok(self.resolve_chain(parents, formation)?.positions)
    }

    /// Flattened view of the chain as ordered layers
    pub fn layers_for(&self, tactic_id: &str) -> Result<ResolutionInput<'a>> {
        let chain = self.chain_for(tactic_id)?;
        let formation = self.base_formation(&chain)?;
        Ok(ResolutionInput {
            formation,
            layers: chain.iter().map(|t| OverrideLayer::from_tactic(t)).collect(),
            config: self.config.clone(),
        })
    }

    /// Recursive step: resolve everything above the last tactic, then apply it.
    fn resolve_chain(&self, chain: &[&Tactic], formation: &Formation) -> Result<Partial> {
        let Some((tactic, parents)) = chain.split_last() else {
            let base = resolve_with(formation, &[], &self.config)?;
            return Ok(Partial { positions: base.positions, ignored: base.ignored });
        };

        let mut partial = self.resolve_chain(parents, formation)?;
        let layer = OverrideLayer::from_tactic(tactic);
        let ignored = apply_layer(&mut partial.positions, &layer, self.config.out_of_range_policy)?;
        partial.ignored.extend(ignored);

        debug!(tactic_id = %tactic.id, depth = chain.len(), "resolved tactic layer");
        Ok(partial)
    }

    fn formation(&self, formation_id: &str) -> Result<&'a Formation> {
        self.source
            .formation(formation_id)
            .ok_or_else(|| TacticsError::FormationNotFound { id: formation_id.to_string() })
    }

    /// Root formation of the chain, with every tactic's squad size checked against it.
    fn base_formation(&self, chain: &[&'a Tactic]) -> Result<&'a Formation> {
        let root = chain
            .first()
            .ok_or_else(|| TacticsError::Validation("empty tactic chain".to_string()))?;
        let formation = self.formation(&root.formation_id)?;

        for tactic in chain {
            if tactic.squad_size != formation.squad_size {
                return Err(TacticsError::SquadSizeMismatch {
                    tactic_id: tactic.id.clone(),
                    expected: formation.squad_size,
                    found: tactic.squad_size,
                });
            }
        }
        Ok(formation)
    }

    /// Tactics from the root ancestor down to `tactic_id`.
    ///
    /// Fails on missing parents, cycles, chains deeper than the configured
    /// limit, scope violations and parents built on another formation.
    pub fn chain_for(&self, tactic_id: &str) -> Result<Vec<&'a Tactic>> {
        let mut current = self
            .source
            .tactic(tactic_id)
            .ok_or_else(|| TacticsError::TacticNotFound { id: tactic_id.to_string() })?;

        let mut chain = vec![current];
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(current.id.as_str());

        while let Some(parent_id) = current.parent_tactic_id.as_deref() {
            if visited.contains(parent_id) {
                let mut cycle_path: Vec<String> = chain.iter().map(|t| t.id.clone()).collect();
                let start = cycle_path.iter().position(|id| id == parent_id).unwrap_or(0);
                cycle_path.drain(..start);
                cycle_path.push(parent_id.to_string());
                return Err(TacticsError::CircularInheritance { cycle_path });
            }

            if chain.len() >= self.config.max_inheritance_depth {
                return Err(TacticsError::InheritanceTooDeep {
                    tactic_id: tactic_id.to_string(),
                    max_depth: self.config.max_inheritance_depth,
                });
            }

            let parent = self.source.tactic(parent_id).ok_or_else(|| {
                TacticsError::ParentNotFound {
                    tactic_id: current.id.clone(),
                    parent_id: parent_id.to_string(),
                }
            })?;

            current.check_parent_scope(parent)?;
            if current.formation_id != parent.formation_id {
                return Err(TacticsError::FormationMismatch {
                    tactic_id: current.id.clone(),
                    expected: parent.formation_id.clone(),
                    found: current.formation_id.clone(),
                });
            }

            visited.insert(parent.id.as_str());
            chain.push(parent);
            current = parent;
        }

        chain.reverse();
        Ok(chain)
    }
}

impl<'a, S: TacticSource + Sync + ?Sized> TacticResolver<'a, S> {
    /// Resolves several tactics in parallel. Results keep the input order.
    pub fn resolve_many(&self, tactic_ids: &[String]) -> Vec<Result<ResolvedTactic>> {
        tactic_ids.par_iter().map(|id| self.resolve_tactic(id)).collect()
    }
}
