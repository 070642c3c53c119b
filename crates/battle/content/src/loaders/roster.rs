//! Hero and enemy template loaders.

use std::path::Path;

use battle_core::{EnemyTemplate, HeroTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Hero catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroCatalog {
    pub heroes: Vec<HeroTemplate>,
}

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

pub struct HeroLoader;

impl HeroLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<HeroTemplate>> {
        let catalog: HeroCatalog = parse_ron(path, "hero catalog")?;
        Ok(catalog.heroes)
    }
}

pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates from a RON file.
    ///
    /// Phases are sorted by descending threshold so the engine can fire the
    /// first untriggered one it finds.
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let catalog: EnemyCatalog = parse_ron(path, "enemy catalog")?;
        let mut enemies = catalog.enemies;
        for enemy in &mut enemies {
            enemy
                .phases
                .sort_by(|a, b| b.threshold_pct.total_cmp(&a.threshold_pct));
            for entry in &enemy.loot {
                if entry.min > entry.max {
                    anyhow::bail!(
                        "Enemy '{}' loot '{}' has min {} above max {}",
                        enemy.id,
                        entry.item,
                        entry.min,
                        entry.max
                    );
                }
            }
        }
        Ok(enemies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn enemy_phases_are_sorted_by_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(enemies: [(
                id: "king",
                name: "Slime King",
                base: (max_health: 400.0, attack: 12.0),
                rank: Boss,
                phases: [
                    (threshold_pct: 25.0, effects: [Summon(enemy: "slime", count: 2)]),
                    (threshold_pct: 75.0, effects: [Taunt(duration_ms: 3000)]),
                ],
            )])"#
        )
        .unwrap();

        let enemies = EnemyLoader::load(file.path()).unwrap();
        let thresholds: Vec<f64> = enemies[0].phases.iter().map(|p| p.threshold_pct).collect();
        assert_eq!(thresholds, vec![75.0, 25.0]);
        assert_eq!(enemies[0].base.max_health, 400.0);
        assert_eq!(enemies[0].base.attack_speed, 1.0);
    }

    #[test]
    fn inverted_loot_range_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(enemies: [(
                id: "rat",
                name: "Rat",
                base: (max_health: 20.0),
                loot: [(item: "hide", chance: 0.5, min: 3, max: 1)],
            )])"#
        )
        .unwrap();

        let err = EnemyLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("min 3 above max 1"));
    }

    #[test]
    fn hero_defaults_fill_optional_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(heroes: [(id: "knight", name: "Knight", base: (max_health: 150.0))])"#
        )
        .unwrap();

        let heroes = HeroLoader::load(file.path()).unwrap();
        assert_eq!(heroes[0].exp_to_next_level, HeroTemplate::DEFAULT_EXP_TO_NEXT_LEVEL);
        assert!(heroes[0].abilities.is_empty());
    }
}
