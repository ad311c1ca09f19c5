//! Touchline CLI helpers
//!
//! Loading and rendering live here so the binary stays a thin clap shell.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use touchline_core::{catalog, ResolverConfig, Scope, TacticLibrary};
use tracing::{debug, info};

/// `--config` wins over `TOUCHLINE_RESOLVER_CONFIG`
pub fn load_config(path: Option<&Path>) -> Result<ResolverConfig> {
    let config = match path {
        Some(path) => ResolverConfig::from_path(path)
            .with_context(|| format!("loading resolver config {}", path.display()))?,
        None => ResolverConfig::from_env().context("loading resolver config from environment")?,
    };
    debug!(?config, "resolver config");
    Ok(config)
}

/// Library file if given, otherwise just the seeded formations
pub fn load_library(path: Option<&Path>, config: ResolverConfig) -> Result<TacticLibrary> {
    match path {
        Some(path) => {
            let library = TacticLibrary::load(path, config)
                .with_context(|| format!("loading tactic library {}", path.display()))?;
            info!(
                formations = library.formation_count(),
                tactics = library.tactic_count(),
                "library loaded"
            );
            Ok(library)
        }
        None => Ok(TacticLibrary::with_catalog().with_config(config)),
    }
}

pub fn scope_from_args(club: &str, age_group: Option<&str>, team: Option<&str>) -> Result<Scope> {
    match (age_group, team) {
        (None, None) => Ok(Scope::club(club)),
        (Some(age_group), None) => Ok(Scope::age_group(club, age_group)),
        (Some(age_group), Some(team)) => Ok(Scope::team(club, age_group, team)),
        (None, Some(_)) => anyhow::bail!("--team requires --age-group"),
    }
}

pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

pub fn resolve_command(library: &TacticLibrary, tactic_id: &str, pretty: bool) -> Result<String> {
    let resolved = library
        .resolver()
        .resolve_tactic(tactic_id)
        .with_context(|| format!("resolving tactic {}", tactic_id))?;
    render(&resolved, pretty)
}

pub fn formation_command(library: &TacticLibrary, formation_id: &str, pretty: bool) -> Result<String> {
    let positions = library
        .resolver()
        .resolve_formation(formation_id)
        .with_context(|| format!("resolving formation {}", formation_id))?;
    render(&positions, pretty)
}

pub fn list_command(library: &TacticLibrary, viewer: &Scope, pretty: bool) -> Result<String> {
    render(&library.tactics_visible_to(viewer), pretty)
}

pub fn formations_command(squad_size: Option<usize>, pretty: bool) -> Result<String> {
    let formations: Vec<_> = match squad_size {
        Some(n) => catalog::for_squad_size(n),
        None => catalog::all().iter().collect(),
    };
    render(&formations, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use touchline_core::{LibraryFile, PositionOverride, Tactic};

    fn write_library(dir: &TempDir) -> std::path::PathBuf {
        let f442 = catalog::by_id("11-4-4-2").unwrap();
        let mut club = Tactic::new("Club 4-4-2", f442, Scope::club("c1")).with_id("club");
        club.set_override(9, PositionOverride::new().with_y(85.0)).unwrap();
        let mut blue = Tactic::derive_from(&club, "Blue", Scope::team("c1", "u12", "blue"))
            .unwrap()
            .with_id("blue");
        blue.set_override(9, PositionOverride::new().with_x(35.0)).unwrap();

        let file = LibraryFile { formations: vec![], tactics: vec![blue, club] };
        let path = dir.path().join("library.json");
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_resolve_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_library(&dir);
        let library = load_library(Some(&path), ResolverConfig::default()).unwrap();

        let out: serde_json::Value =
            serde_json::from_str(&resolve_command(&library, "blue", false).unwrap()).unwrap();
        assert_eq!(out["positions"][9]["x"], 35.0);
        assert_eq!(out["positions"][9]["y"], 85.0);
        assert_eq!(out["positions"][9]["overridden_by"], serde_json::json!(["club", "blue"]));
    }

    #[test]
    fn test_unknown_tactic_is_an_error() {
        let library = load_library(None, ResolverConfig::default()).unwrap();
        assert!(resolve_command(&library, "nope", false).is_err());
    }

    #[test]
    fn test_formation_falls_back_to_catalog() {
        let library = load_library(None, ResolverConfig::default()).unwrap();
        let out: serde_json::Value =
            serde_json::from_str(&formation_command(&library, "7-2-3-1", false).unwrap()).unwrap();
        assert_eq!(out.as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_list_hides_sibling_team() {
        let dir = TempDir::new().unwrap();
        let path = write_library(&dir);
        let library = load_library(Some(&path), ResolverConfig::default()).unwrap();

        let red = scope_from_args("c1", Some("u12"), Some("red")).unwrap();
        let out: serde_json::Value =
            serde_json::from_str(&list_command(&library, &red, false).unwrap()).unwrap();
        let ids: Vec<&str> = out
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["tactic_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["club"]);
    }

    #[test]
    fn test_team_without_age_group_rejected() {
        assert!(scope_from_args("c1", None, Some("blue")).is_err());
    }

    #[test]
    fn test_config_file_takes_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resolver.json");
        fs::write(&path, r#"{"max_inheritance_depth": 3}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.max_inheritance_depth, 3);
        assert!(config.prune_empty_overrides);
    }

    #[test]
    fn test_ignore_policy_reports_skipped_keys() {
        let dir = TempDir::new().unwrap();
        let library_path = dir.path().join("library.yaml");
        fs::write(
            &library_path,
            r#"
tactics:
  - id: nine
    name: Nine shape
    formation_id: 9-3-3-2
    squad_size: 9
    scope: { level: club, club_id: c1 }
    overrides:
      9: { x: 50.0 }
"#,
        )
        .unwrap();
        assert!(load_library(Some(&library_path), ResolverConfig::default()).is_err());

        let config_path = dir.path().join("resolver.json");
        fs::write(&config_path, r#"{"out_of_range_policy": "ignore"}"#).unwrap();
        let config = load_config(Some(&config_path)).unwrap();
        let library = load_library(Some(&library_path), config).unwrap();

        let out: serde_json::Value =
            serde_json::from_str(&resolve_command(&library, "nine", false).unwrap()).unwrap();
        assert_eq!(out["ignored"], serde_json::json!([{ "layer": "nine", "index": 9, "squad_size": 9 }]));
    }

    #[test]
    fn test_formations_by_squad_size() {
        let out: serde_json::Value =
            serde_json::from_str(&formations_command(Some(9), false).unwrap()).unwrap();
        assert_eq!(out.as_array().unwrap().len(), 2);
    }
}
