//! In-memory tactic library.
//!
//! Holds formations and tactics keyed by id and enforces the data-integrity
//! rules on every insert, so anything stored here resolves cleanly. Backs
//! the JSON API and the CLI.

use crate::config::ResolverConfig;
use crate::error::{Result, TacticsError};
use crate::formation::{catalog, Formation};
use crate::resolve::{overrides_from_edits, PositionEdit, TacticResolver, TacticSource};
use crate::tactic::{prune_overrides, Scope, ScopeLevel, Tactic};
use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// On-disk shape of a library file (JSON or YAML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryFile {
    #[serde(default)]
    pub formations: Vec<Formation>,
    #[serde(default)]
    pub tactics: Vec<Tactic>,
}

/// Entry of a tactics list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisibleTactic {
    pub tactic_id: String,
    pub name: String,
    pub formation_id: String,
    pub scope_level: ScopeLevel,
    /// Defined at a broader scope than the viewer's
    pub inherited: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TacticLibrary {
    formations: FxHashMap<String, Formation>,
    tactics: FxHashMap<String, Tactic>,
    config: ResolverConfig,
}

impl TacticSource for TacticLibrary {
    fn formation(&self, id: &str) -> Option<&Formation> {
        self.formations.get(id)
    }

    fn tactic(&self, id: &str) -> Option<&Tactic> {
        self.tactics.get(id)
    }
}

impl TacticLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library pre-seeded with the built-in formations
    pub fn with_catalog() -> Self {
        let mut library = Self::new();
        for formation in catalog::all() {
            library.formations.insert(formation.id.clone(), formation.clone());
        }
        library
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolver(&self) -> TacticResolver<'_, Self> {
        TacticResolver::new(self).with_config(self.config.clone())
    }

    pub fn formation_count(&self) -> usize {
        self.formations.len()
    }

    pub fn tactic_count(&self) -> usize {
        self.tactics.len()
    }

    pub fn get_formation(&self, id: &str) -> Option<&Formation> {
        self.formations.get(id)
    }

    pub fn get_tactic(&self, id: &str) -> Option<&Tactic> {
        self.tactics.get(id)
    }

    /// Formations sorted by id
    pub fn formations(&self) -> Vec<&Formation> {
        let mut list: Vec<&Formation> = self.formations.values().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }

    pub fn add_formation(&mut self, formation: Formation) -> Result<()> {
        formation.validate()?;
        if self.formations.contains_key(&formation.id) {
            return Err(TacticsError::DuplicateId { id: formation.id });
        }
        info!(formation_id = %formation.id, squad_size = formation.squad_size, "formation added");
        self.formations.insert(formation.id.clone(), formation);
        Ok(())
    }

    pub fn add_tactic(&mut self, tactic: Tactic) -> Result<()> {
        if self.tactics.contains_key(&tactic.id) {
            return Err(TacticsError::DuplicateId { id: tactic.id });
        }
        let tactic = self.checked(tactic)?;
        let id = tactic.id.clone();
        let scope = tactic.scope.to_string();
        self.tactics.insert(id.clone(), tactic);

        // Depth limit applies to the whole chain, not just the parent link
        let linked = self.resolver().chain_for(&id).map(|_| ());
        if let Err(e) = linked {
            self.tactics.remove(&id);
            return Err(e);
        }
        info!(tactic_id = %id, scope = %scope, "tactic added");
        Ok(())
    }

    /// Replaces a stored tactic in place. `created_at` is kept from the
    /// stored copy; nothing changes if the new version would break its own
    /// chain or the chain of any tactic derived from it.
    pub fn update_tactic(&mut self, mut tactic: Tactic) -> Result<()> {
        let previous = self
            .tactics
            .get(&tactic.id)
            .cloned()
            .ok_or_else(|| TacticsError::TacticNotFound { id: tactic.id.clone() })?;
        tactic.created_at = previous.created_at;

        let tactic = self.checked(tactic)?;
        let id = tactic.id.clone();
        self.tactics.insert(id.clone(), tactic);

        // A new parent link can close a loop through existing tactics, and a
        // new scope, formation or squad size can strand descendants
        let mut affected = vec![id.clone()];
        affected.extend(self.descendant_ids(&id));
        let resolver = self.resolver();
        let linked = affected.iter().try_for_each(|t| resolver.chain_for(t).map(|_| ()));
        if let Err(e) = linked {
            self.tactics.insert(id, previous);
            return Err(e);
        }
        info!(tactic_id = %id, "tactic updated");
        Ok(())
    }

    /// Stores the minimal overrides for markers the coach moved. Markers not
    /// in `edits` keep their current overrides.
    pub fn apply_position_edits(&mut self, tactic_id: &str, edits: &[PositionEdit]) -> Result<()> {
        let inherited = self.resolver().resolve_inherited(tactic_id)?;
        let edited = overrides_from_edits(&inherited, edits)?;

        let tactic = self
            .tactics
            .get_mut(tactic_id)
            .ok_or_else(|| TacticsError::TacticNotFound { id: tactic_id.to_string() })?;

        let mut overrides = tactic.overrides.clone();
        for edit in edits {
            match edited.get(&edit.index) {
                Some(ov) => overrides.insert(edit.index, *ov),
                None => overrides.remove(&edit.index),
            };
        }
        tactic.replace_overrides(overrides)?;
        info!(tactic_id, edited = edits.len(), "position edits saved");
        Ok(())
    }

    /// Integrity checks shared by insert and update
    fn checked(&self, mut tactic: Tactic) -> Result<Tactic> {
        if self.config.prune_empty_overrides {
            prune_overrides(&mut tactic.overrides);
        }
        tactic.validate_fields(self.config.out_of_range_policy)?;

        let formation = self
            .formations
            .get(&tactic.formation_id)
            .ok_or_else(|| TacticsError::FormationNotFound { id: tactic.formation_id.clone() })?;
        if tactic.squad_size != formation.squad_size {
            return Err(TacticsError::SquadSizeMismatch {
                tactic_id: tactic.id.clone(),
                expected: formation.squad_size,
                found: tactic.squad_size,
            });
        }

        if let Some(parent_id) = tactic.parent_tactic_id.as_deref() {
            if parent_id == tactic.id {
                return Err(TacticsError::CircularInheritance {
                    cycle_path: vec![tactic.id.clone(), tactic.id.clone()],
                });
            }
            let parent = self.tactics.get(parent_id).ok_or_else(|| TacticsError::ParentNotFound {
                tactic_id: tactic.id.clone(),
                parent_id: parent_id.to_string(),
            })?;
            tactic.check_parent_scope(parent)?;
            if parent.formation_id != tactic.formation_id {
                return Err(TacticsError::FormationMismatch {
                    tactic_id: tactic.id.clone(),
                    expected: parent.formation_id.clone(),
                    found: tactic.formation_id.clone(),
                });
            }
        }

        Ok(tactic)
    }

    /// Tactics a coach at `viewer` can pick: their own scope plus every
    /// broader scope containing it. Broadest scope first, then by name.
    pub fn tactics_visible_to(&self, viewer: &Scope) -> Vec<VisibleTactic> {
        let mut visible: Vec<VisibleTactic> = self
            .tactics
            .values()
            .filter(|t| t.scope.visible_from(viewer))
            .map(|t| VisibleTactic {
                tactic_id: t.id.clone(),
                name: t.name.clone(),
                formation_id: t.formation_id.clone(),
                scope_level: t.scope.level(),
                inherited: t.scope != *viewer,
            })
            .collect();
        visible.sort_by(|a, b| {
            a.scope_level
                .cmp(&b.scope_level)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.tactic_id.cmp(&b.tactic_id))
        });
        visible
    }

    /// Direct children of a tactic, sorted by id
    pub fn derived_tactics(&self, tactic_id: &str) -> Vec<&Tactic> {
        let mut children: Vec<&Tactic> = self
            .tactics
            .values()
            .filter(|t| t.parent_tactic_id.as_deref() == Some(tactic_id))
            .collect();
        children.sort_by(|a, b| a.id.cmp(&b.id));
        children
    }

    /// Every tactic below `tactic_id` in the inheritance tree, parents first
    fn descendant_ids(&self, tactic_id: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut queue = vec![tactic_id.to_string()];
        while let Some(current) = queue.pop() {
            for child in self.derived_tactics(&current) {
                if child.id != tactic_id && !found.contains(&child.id) {
                    found.push(child.id.clone());
                    queue.push(child.id.clone());
                }
            }
        }
        found
    }

    // ========================================================================
    // Loading / saving
    // ========================================================================

    /// Builds a library from file contents. Tactics may appear in any order;
    /// parents are inserted before their children.
    pub fn from_file(file: LibraryFile, config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        let mut library = Self::with_catalog().with_config(config);

        for formation in file.formations {
            if catalog::by_id(&formation.id).is_some() {
                library.formations.remove(&formation.id);
            }
            library.add_formation(formation)?;
        }

        let mut pending = file.tactics;
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            for tactic in pending {
                let parent_ready = tactic
                    .parent_tactic_id
                    .as_deref()
                    .map_or(true, |p| library.tactics.contains_key(p));
                if parent_ready {
                    library.add_tactic(tactic)?;
                } else {
                    deferred.push(tactic);
                }
            }

            if deferred.len() == before {
                // Nothing could be placed: a loop among the leftovers or a missing parent
                if let Some(cycle_path) = find_parent_cycle(&deferred) {
                    return Err(TacticsError::CircularInheritance { cycle_path });
                }
                let stuck = deferred.remove(0);
                return Err(library.add_tactic(stuck).err().unwrap_or_else(|| {
                    TacticsError::Validation("unresolvable tactic ordering".to_string())
                }));
            }
            pending = deferred;
        }

        Ok(library)
    }

    pub fn from_json_str(json: &str, config: ResolverConfig) -> Result<Self> {
        let file: LibraryFile = serde_json::from_str(json)?;
        Self::from_file(file, config)
    }

    pub fn from_yaml_str(yaml: &str, config: ResolverConfig) -> Result<Self> {
        let file: LibraryFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file, config)
    }

    /// Loads a `.json`, `.yaml` or `.yml` library file
    pub fn load(path: &Path, config: ResolverConfig) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TacticsError::Validation(format!("Failed to read library '{}': {}", path.display(), e))
        })?;

        let library = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content, config)?,
            _ => Self::from_json_str(&content, config)?,
        };

        log::info!(
            "Tactic library loaded from {} ({} formations, {} tactics)",
            path.display(),
            library.formation_count(),
            library.tactic_count()
        );
        Ok(library)
    }

    /// Library contents sorted by id; built-in formations are left out.
    pub fn to_file(&self) -> LibraryFile {
        let formations = self
            .formations()
            .into_iter()
            .filter(|f| catalog::by_id(&f.id) != Some(*f))
            .cloned()
            .collect();
        let mut tactics: Vec<Tactic> = self.tactics.values().cloned().collect();
        tactics.sort_by(|a, b| a.id.cmp(&b.id));
        LibraryFile { formations, tactics }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }
}

/// Parent loop among `tactics`, as a path starting and ending at the same id
fn find_parent_cycle(tactics: &[Tactic]) -> Option<Vec<String>> {
    let parents: FxHashMap<&str, &str> = tactics
        .iter()
        .filter_map(|t| t.parent_tactic_id.as_deref().map(|p| (t.id.as_str(), p)))
        .collect();

    for tactic in tactics {
        let mut path: Vec<&str> = vec![tactic.id.as_str()];
        let mut current = tactic.id.as_str();
        while let Some(&parent) = parents.get(current) {
            if let Some(start) = path.iter().position(|&id| id == parent) {
                let mut cycle: Vec<String> = path[start..].iter().map(|id| id.to_string()).collect();
                cycle.push(parent.to_string());
                return Some(cycle);
            }
            path.push(parent);
            current = parent;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::{Direction, Position};
    use crate::tactic::PositionOverride;

    fn f442() -> Formation {
        catalog::by_id("11-4-4-2").unwrap().clone()
    }

    fn sample_library() -> TacticLibrary {
        let mut library = TacticLibrary::with_catalog();
        let club = Tactic::new("Club shape", &f442(), Scope::club("c1")).with_id("club");
        let u12 = Tactic::derive_from(&club, "U12 press", Scope::age_group("c1", "u12"))
            .unwrap()
            .with_id("u12");
        let u14 = Tactic::derive_from(&club, "U14 block", Scope::age_group("c1", "u14"))
            .unwrap()
            .with_id("u14");
        let blue = Tactic::derive_from(&u12, "Blues", Scope::team("c1", "u12", "blue"))
            .unwrap()
            .with_id("blue");
        let red = Tactic::derive_from(&u12, "Reds", Scope::team("c1", "u12", "red"))
            .unwrap()
            .with_id("red");
        let other_club = Tactic::new("Rivals", &f442(), Scope::club("c2")).with_id("rivals");

        for tactic in [club, u12, u14, blue, red, other_club] {
            library.add_tactic(tactic).unwrap();
        }
        library
    }

    #[test]
    fn test_visibility_for_team() {
        let library = sample_library();
        let visible = library.tactics_visible_to(&Scope::team("c1", "u12", "blue"));
        let ids: Vec<&str> = visible.iter().map(|v| v.tactic_id.as_str()).collect();
        assert_eq!(ids, vec!["club", "u12", "blue"]);
        assert!(visible[0].inherited);
        assert!(visible[1].inherited);
        assert!(!visible[2].inherited);
    }

    #[test]
    fn test_visibility_for_club() {
        let library = sample_library();
        let visible = library.tactics_visible_to(&Scope::club("c1"));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].tactic_id, "club");
        assert!(!visible[0].inherited);
    }

    #[test]
    fn test_add_tactic_checks() {
        let mut library = sample_library();

        let dup = Tactic::new("Dup", &f442(), Scope::club("c1")).with_id("club");
        assert!(matches!(library.add_tactic(dup), Err(TacticsError::DuplicateId { .. })));

        let mut orphan = Tactic::new("Orphan", &f442(), Scope::club("c1")).with_id("orphan");
        orphan.parent_tactic_id = Some("ghost".to_string());
        assert!(matches!(library.add_tactic(orphan), Err(TacticsError::ParentNotFound { .. })));

        let mut cross_club = Tactic::new("Cross", &f442(), Scope::team("c2", "u12", "x")).with_id("x");
        cross_club.parent_tactic_id = Some("club".to_string());
        assert!(matches!(library.add_tactic(cross_club), Err(TacticsError::ScopeViolation { .. })));

        let mut wrong_size = Tactic::new("Seven", &f442(), Scope::club("c1")).with_id("seven");
        wrong_size.squad_size = 7;
        assert!(matches!(
            library.add_tactic(wrong_size),
            Err(TacticsError::SquadSizeMismatch { .. })
        ));

        let mut unknown_formation = Tactic::new("Nope", &f442(), Scope::club("c1")).with_id("nope");
        unknown_formation.formation_id = "2-3-5".to_string();
        assert!(matches!(
            library.add_tactic(unknown_formation),
            Err(TacticsError::FormationNotFound { .. })
        ));
    }

    #[test]
    fn test_update_rejects_cycle_and_keeps_previous() {
        let mut library = sample_library();
        let mut club = library.get_tactic("club").unwrap().clone();
        club.parent_tactic_id = Some("blue".to_string());
        club.scope = Scope::team("c1", "u12", "blue");

        assert!(library.update_tactic(club).is_err());
        assert!(library.get_tactic("club").unwrap().parent_tactic_id.is_none());
    }

    #[test]
    fn test_update_keeps_created_at() {
        let mut library = sample_library();
        let original = library.get_tactic("blue").unwrap().clone();
        let mut edited = original.clone();
        edited.summary = "Press high".to_string();
        edited.created_at = chrono::Utc::now() + chrono::Duration::days(1);
        library.update_tactic(edited).unwrap();

        let stored = library.get_tactic("blue").unwrap();
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.summary, "Press high");
    }

    #[test]
    fn test_apply_position_edits() {
        let mut library = sample_library();
        let mut u12 = library.get_tactic("u12").unwrap().clone();
        u12.set_override(9, PositionOverride::new().with_y(85.0)).unwrap();
        library.update_tactic(u12).unwrap();

        // Dragging the left striker back to where u12 put it stores nothing
        library
            .apply_position_edits(
                "blue",
                &[
                    PositionEdit::new(9, 40.0, 85.0),
                    PositionEdit::new(1, 20.0, 20.0).facing(Direction::NorthEast),
                ],
            )
            .unwrap();

        let blue = library.get_tactic("blue").unwrap();
        assert!(!blue.overrides.contains_key(&9));
        assert_eq!(blue.overrides[&1], PositionOverride::new().with_direction(Direction::NorthEast));

        let resolved = library.resolver().resolve_tactic("blue").unwrap();
        assert_eq!(resolved.positions[9].y, 85.0);
        assert_eq!(resolved.positions[9].overridden_by, vec!["u12".to_string()]);
        assert_eq!(resolved.positions[1].overridden_by, vec!["blue".to_string()]);
    }

    #[test]
    fn test_from_file_orders_parents_first() {
        let library = sample_library();
        let mut file = library.to_file();
        file.tactics.reverse();

        let reloaded = TacticLibrary::from_file(file, ResolverConfig::default()).unwrap();
        assert_eq!(reloaded.tactic_count(), 6);
        assert!(reloaded.resolver().resolve_tactic("blue").is_ok());
    }

    #[test]
    fn test_from_file_reports_missing_parent() {
        let mut file = sample_library().to_file();
        file.tactics.retain(|t| t.id != "u12");
        let err = TacticLibrary::from_file(file, ResolverConfig::default()).unwrap_err();
        assert!(matches!(err, TacticsError::ParentNotFound { .. }));
    }

    #[test]
    fn test_custom_formation_round_trip() {
        let mut library = TacticLibrary::with_catalog();
        let custom = Formation::new(
            "futsal-diamond",
            "Futsal diamond",
            vec![
                Position::new(0, "GK", 50.0, 5.0),
                Position::new(1, "FIXO", 50.0, 30.0),
                Position::new(2, "LALA", 20.0, 50.0),
                Position::new(3, "RALA", 80.0, 50.0),
                Position::new(4, "PIVO", 50.0, 80.0),
            ],
        );
        library.add_formation(custom.clone()).unwrap();
        assert!(matches!(
            library.add_formation(custom),
            Err(TacticsError::DuplicateId { .. })
        ));

        let json = library.to_json_string().unwrap();
        let reloaded = TacticLibrary::from_json_str(&json, ResolverConfig::default()).unwrap();
        assert!(reloaded.get_formation("futsal-diamond").is_some());
        assert_eq!(reloaded.formation_count(), catalog::all().len() + 1);
    }

    #[test]
    fn test_yaml_library() {
        let yaml = r#"
tactics:
  - id: club
    name: Club shape
    formation_id: 7-2-3-1
    squad_size: 7
    scope: { level: club, club_id: c1 }
  - id: u9
    name: U9 wide
    formation_id: 7-2-3-1
    parent_tactic_id: club
    squad_size: 7
    scope: { level: age_group, club_id: c1, age_group_id: u9 }
    overrides:
      3: { x: 10.0 }
      5: { x: 90.0, direction: NE }
      6: {}
"#;
        let library = TacticLibrary::from_yaml_str(yaml, ResolverConfig::default()).unwrap();
        let u9 = library.get_tactic("u9").unwrap();
        assert_eq!(u9.overrides.len(), 2, "empty override entry is pruned on load");

        let resolved = library.resolver().resolve_tactic("u9").unwrap();
        assert_eq!(resolved.positions[5].x, 90.0);
        assert_eq!(resolved.positions[5].direction, Some(Direction::NorthEast));
    }

    #[test]
    fn test_update_rejected_when_descendant_scope_breaks() {
        let mut library = sample_library();
        let mut u12 = library.get_tactic("u12").unwrap().clone();
        u12.scope = Scope::age_group("c1", "u14");

        let err = library.update_tactic(u12).unwrap_err();
        assert!(matches!(err, TacticsError::ScopeViolation { ref tactic_id, .. } if tactic_id == "blue"));
        assert_eq!(library.get_tactic("u12").unwrap().scope, Scope::age_group("c1", "u12"));
        assert!(library.resolver().resolve_tactic("blue").is_ok());
        assert!(library.resolver().resolve_tactic("red").is_ok());
    }

    #[test]
    fn test_add_tactic_enforces_depth_limit() {
        let config = ResolverConfig { max_inheritance_depth: 2, ..ResolverConfig::default() };
        let mut library = TacticLibrary::with_catalog().with_config(config);
        let club = Tactic::new("Club shape", &f442(), Scope::club("c1")).with_id("club");
        let u12 = Tactic::derive_from(&club, "U12", Scope::age_group("c1", "u12"))
            .unwrap()
            .with_id("u12");
        let blue = Tactic::derive_from(&u12, "Blues", Scope::team("c1", "u12", "blue"))
            .unwrap()
            .with_id("blue");

        library.add_tactic(club).unwrap();
        library.add_tactic(u12).unwrap();
        assert!(matches!(
            library.add_tactic(blue),
            Err(TacticsError::InheritanceTooDeep { max_depth: 2, .. })
        ));
        assert!(library.get_tactic("blue").is_none());
        assert_eq!(library.tactic_count(), 2);
    }

    const SEVEN_A_SIDE_WITH_STRAY_KEY: &str = r#"
tactics:
  - id: club
    name: Club shape
    formation_id: 7-2-3-1
    squad_size: 7
    scope: { level: club, club_id: c1 }
    overrides:
      2: { y: 30.0 }
      7: { x: 50.0 }
"#;

    #[test]
    fn test_out_of_range_key_loads_under_ignore_policy() {
        let err = TacticLibrary::from_yaml_str(SEVEN_A_SIDE_WITH_STRAY_KEY, ResolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, TacticsError::PositionOutOfRange { index: 7, squad_size: 7, .. }));

        let library =
            TacticLibrary::from_yaml_str(SEVEN_A_SIDE_WITH_STRAY_KEY, ResolverConfig::lenient())
                .unwrap();
        let resolved = library.resolver().resolve_tactic("club").unwrap();
        assert_eq!(resolved.positions.len(), 7);
        assert_eq!(resolved.positions[2].y, 30.0);
        assert_eq!(resolved.ignored.len(), 1);
        assert_eq!(resolved.ignored[0].layer, "club");
        assert_eq!(resolved.ignored[0].index, 7);
    }

    #[test]
    fn test_from_file_reports_parent_loop_as_cycle() {
        let yaml = r#"
tactics:
  - id: a
    name: A
    formation_id: 11-4-4-2
    parent_tactic_id: b
    squad_size: 11
    scope: { level: club, club_id: c1 }
  - id: b
    name: B
    formation_id: 11-4-4-2
    parent_tactic_id: a
    squad_size: 11
    scope: { level: club, club_id: c1 }
"#;
        let err = TacticLibrary::from_yaml_str(yaml, ResolverConfig::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Integrity);
        match err {
            TacticsError::CircularInheritance { cycle_path } => {
                assert_eq!(cycle_path, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_derived_tactics() {
        let library = sample_library();
        let children: Vec<&str> =
            library.derived_tactics("u12").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(children, vec!["blue", "red"]);
    }
}
