//! Runner configuration read from the process environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use battle_core::{BattleRules, HeroLoadout};

/// Which orchestrator variant to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimMode {
    #[default]
    Wave,
    Endless,
}

impl FromStr for SimMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "wave" => Ok(Self::Wave),
            "endless" => Ok(Self::Endless),
            other => Err(format!("unknown battle mode `{other}`")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub seed: u64,
    pub tick_ms: u32,
    /// Hard stop; endless runs otherwise go on until the heroes fall.
    pub max_ticks: u64,
    pub mode: SimMode,
    /// Wave number, or starting rank in endless mode.
    pub level: u32,
    pub heroes: Vec<HeroLoadout>,
    pub enemies: Vec<String>,
    pub invulnerable_heroes: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            seed: 42,
            tick_ms: 100,
            max_ticks: 10_000,
            mode: SimMode::Wave,
            level: 1,
            heroes: vec![HeroLoadout::new("knight", 1), HeroLoadout::new("cleric", 1)],
            enemies: vec!["goblin".into(), "goblin".into(), "slime_king".into()],
            invulnerable_heroes: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Content directory (default: `data`)
    /// - `BATTLE_SEED` - Battle seed (default: 42)
    /// - `BATTLE_TICK_MS` - Tick length in milliseconds (default: 100)
    /// - `BATTLE_MAX_TICKS` - Tick limit (default: 10000)
    /// - `BATTLE_MODE` - `wave` or `endless` (default: wave)
    /// - `BATTLE_WAVE` - Wave number or starting rank (default: 1)
    /// - `BATTLE_HEROES` - `id[:level]` list, comma separated
    /// - `BATTLE_ENEMIES` - Enemy id list, comma separated
    /// - `BATTLE_INVULNERABLE_HEROES` - Heroes ignore damage (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }
        if let Some(tick_ms) = read_env::<u32>("BATTLE_TICK_MS") {
            config.tick_ms = tick_ms.max(1);
        }
        if let Some(max_ticks) = read_env::<u64>("BATTLE_MAX_TICKS") {
            config.max_ticks = max_ticks;
        }
        if let Some(mode) = read_env::<SimMode>("BATTLE_MODE") {
            config.mode = mode;
        }
        if let Some(level) = read_env::<u32>("BATTLE_WAVE") {
            config.level = level.max(1);
        }
        if let Ok(heroes) = env::var("BATTLE_HEROES") {
            config.heroes = parse_heroes(&heroes);
        }
        if let Ok(enemies) = env::var("BATTLE_ENEMIES") {
            config.enemies = parse_list(&enemies);
        }
        if let Some(invulnerable) = read_env_bool("BATTLE_INVULNERABLE_HEROES") {
            config.invulnerable_heroes = invulnerable;
        }

        config
    }

    pub fn rules(&self) -> BattleRules {
        BattleRules {
            invulnerable_heroes: self.invulnerable_heroes,
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `knight:3,cleric` into loadouts; a missing or bad level means 1.
fn parse_heroes(value: &str) -> Vec<HeroLoadout> {
    parse_list(value)
        .into_iter()
        .map(|entry| match entry.split_once(':') {
            Some((id, level)) => HeroLoadout::new(id.trim(), level.trim().parse().unwrap_or(1)),
            None => HeroLoadout::new(entry, 1),
        })
        .collect()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_list_accepts_optional_levels() {
        let heroes = parse_heroes("knight:3, cleric ,mage:x,");
        assert_eq!(
            heroes,
            vec![
                HeroLoadout::new("knight", 3),
                HeroLoadout::new("cleric", 1),
                HeroLoadout::new("mage", 1),
            ]
        );
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Endless".parse::<SimMode>(), Ok(SimMode::Endless));
        assert!("arena".parse::<SimMode>().is_err());
    }
}
