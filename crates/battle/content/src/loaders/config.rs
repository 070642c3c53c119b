//! Battle configuration and global bonus loaders.

use std::path::Path;

use battle_core::{BattleConfig, GlobalBonuses};

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        let config: BattleConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse battle config TOML: {}", e))?;

        if config.spoils_of_war_chance < 0.0 || config.spoils_of_war_chance > 1.0 {
            anyhow::bail!(
                "spoils_of_war_chance must be within [0, 1], got {}",
                config.spoils_of_war_chance
            );
        }
        Ok(config)
    }
}

/// Loader for the economy layer's global bonuses.
pub struct BonusesLoader;

impl BonusesLoader {
    pub fn load(path: &Path) -> LoadResult<GlobalBonuses> {
        let content = read_file(path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bonuses TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "death_animation_ticks = 5\nmax_enemies = 8").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.death_animation_ticks, 5);
        assert_eq!(config.max_enemies, 8);
        assert_eq!(config.log_capacity, BattleConfig::DEFAULT_LOG_CAPACITY);
    }

    #[test]
    fn out_of_range_spoils_chance_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "spoils_of_war_chance = 1.5").unwrap();
        assert!(ConfigLoader::load(file.path()).is_err());
    }

    #[test]
    fn bonuses_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enemy_gold_bonus = 0.25").unwrap();

        let bonuses = BonusesLoader::load(file.path()).unwrap();
        assert_eq!(bonuses.gold_multiplier(), 1.25);
        assert_eq!(bonuses.hero_xp_bonus, 0.0);
    }
}
