//! Resolver configuration.
//!
//! Defaults are used unless `TOUCHLINE_RESOLVER_CONFIG` points at a JSON file.

use crate::error::{Result, TacticsError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

pub const RESOLVER_CONFIG_PATH_ENV: &str = "TOUCHLINE_RESOLVER_CONFIG";

/// What to do with override keys outside `0..squad_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Fail the whole resolution with a validation error
    #[default]
    Reject,
    /// Skip the key, log a warning and report it alongside the result
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub max_inheritance_depth: usize,
    pub out_of_range_policy: OutOfRangePolicy,
    /// Treat override entries with no fields as absent when loading tactics
    pub prune_empty_overrides: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_inheritance_depth: 8,
            out_of_range_policy: OutOfRangePolicy::Reject,
            prune_empty_overrides: true,
        }
    }
}

impl ResolverConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ResolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_inheritance_depth == 0 {
            return Err(TacticsError::Validation(
                "max_inheritance_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TacticsError::Validation(format!(
                "Failed to read resolver config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Loads the file named by `TOUCHLINE_RESOLVER_CONFIG`, or defaults when
    /// the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(RESOLVER_CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        tracing::debug!(path, "loading resolver config from {}", RESOLVER_CONFIG_PATH_ENV);
        Self::from_path(Path::new(path))
    }

    pub fn lenient() -> Self {
        Self { out_of_range_policy: OutOfRangePolicy::Ignore, ..Self::default() }
    }
}
