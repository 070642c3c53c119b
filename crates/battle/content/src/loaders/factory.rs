//! Content factory for building the definitions oracle from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, GlobalBonuses, StaticDefinitions};

use crate::loaders::{
    AbilityLoader, BonusesLoader, BuildingLoader, ConfigLoader, EnemyLoader, HeroLoader,
    LoadResult, StatusLoader,
};
use crate::validate::{invalid_amounts, validate};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── bonuses.toml      (optional)
/// ├── heroes.ron
/// ├── enemies.ron
/// ├── abilities.ron
/// ├── statuses.ron
/// └── buildings.ron     (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("battle.toml"))
    }

    /// Load global bonuses from `bonuses.toml`, or no bonuses if absent.
    pub fn load_bonuses(&self) -> LoadResult<GlobalBonuses> {
        let path = self.data_dir.join("bonuses.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no bonuses file, using none");
            return Ok(GlobalBonuses::default());
        }
        BonusesLoader::load(&path)
    }

    /// Load every catalog into one definitions oracle.
    ///
    /// Duplicate ids within a catalog and non-positive DoT or restore amounts
    /// are errors. References to unknown ids are only warned about: the
    /// engine skips them at runtime.
    pub fn load_definitions(&self) -> LoadResult<StaticDefinitions> {
        let buildings_path = self.data_dir.join("buildings.ron");
        let buildings = if buildings_path.exists() {
            BuildingLoader::load(&buildings_path)?
        } else {
            Vec::new()
        };

        let definitions = StaticDefinitions {
            heroes: keyed(
                "hero",
                HeroLoader::load(&self.data_dir.join("heroes.ron"))?,
                |h| &h.id,
            )?,
            enemies: keyed(
                "enemy",
                EnemyLoader::load(&self.data_dir.join("enemies.ron"))?,
                |e| &e.id,
            )?,
            abilities: keyed(
                "ability",
                AbilityLoader::load(&self.data_dir.join("abilities.ron"))?,
                |a| &a.id,
            )?,
            statuses: keyed(
                "status",
                StatusLoader::load(&self.data_dir.join("statuses.ron"))?,
                |s| &s.id,
            )?,
            buildings,
        };

        let invalid = invalid_amounts(&definitions);
        if !invalid.is_empty() {
            let details: Vec<String> = invalid.iter().map(ToString::to_string).collect();
            anyhow::bail!("Invalid effect amounts: {}", details.join("; "));
        }
        for dangling in validate(&definitions) {
            tracing::warn!("{dangling}");
        }
        tracing::info!(
            heroes = definitions.heroes.len(),
            enemies = definitions.enemies.len(),
            abilities = definitions.abilities.len(),
            statuses = definitions.statuses.len(),
            "content loaded"
        );
        Ok(definitions)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn keyed<T>(
    what: &str,
    items: Vec<T>,
    id: impl Fn(&T) -> &String,
) -> LoadResult<BTreeMap<String, T>> {
    let mut map = BTreeMap::new();
    for item in items {
        let key = id(&item).clone();
        if map.insert(key.clone(), item).is_some() {
            anyhow::bail!("Duplicate {} id '{}'", what, key);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::DefinitionsOracle;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn seed_minimal(dir: &Path) {
        write(dir, "battle.toml", "death_animation_ticks = 2\n");
        write(
            dir,
            "heroes.ron",
            r#"(heroes: [(id: "knight", name: "Knight", base: (max_health: 150.0), abilities: ["cleave"])])"#,
        );
        write(
            dir,
            "enemies.ron",
            r#"(enemies: [(id: "rat", name: "Rat", base: (max_health: 20.0), gold: 3)])"#,
        );
        write(
            dir,
            "abilities.ron",
            r#"(abilities: [(id: "cleave", name: "Cleave", target: AllEnemies, cooldown_ms: 4000, effects: [Damage(multiplier: 0.8)])])"#,
        );
        write(dir, "statuses.ron", "(statuses: [])");
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_complete_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        write(dir.path(), "buildings.ron", r#"(buildings: ["forge", "library"])"#);

        let factory = ContentFactory::new(dir.path());
        let definitions = factory.load_definitions().unwrap();
        assert!(definitions.hero("knight").is_some());
        assert_eq!(definitions.enemy("rat").map(|e| e.gold), Some(3));
        assert_eq!(definitions.buildings(), ["forge", "library"]);

        assert_eq!(factory.load_config().unwrap().death_animation_ticks, 2);
        assert_eq!(factory.load_bonuses().unwrap(), GlobalBonuses::default());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        write(
            dir.path(),
            "enemies.ron",
            r#"(enemies: [
                (id: "rat", name: "Rat", base: (max_health: 20.0)),
                (id: "rat", name: "Big Rat", base: (max_health: 40.0)),
            ])"#,
        );

        let err = ContentFactory::new(dir.path()).load_definitions().unwrap_err();
        assert!(err.to_string().contains("Duplicate enemy id 'rat'"));
    }

    #[test]
    fn negative_dot_damage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        write(
            dir.path(),
            "statuses.ron",
            r#"(statuses: [(id: "rot", name: "Rot", kind: DamageOverTime, duration_ms: 3000, dot: Some((damage: -2.0, interval_ms: 1000)))])"#,
        );

        let err = ContentFactory::new(dir.path()).load_definitions().unwrap_err();
        assert!(err.to_string().contains("status `rot` has invalid dot damage -2"));
    }

    #[test]
    fn missing_catalog_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_definitions().unwrap_err();
        assert!(err.to_string().contains("heroes.ron"));
    }
}
