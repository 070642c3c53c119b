//! Headless battle runner.
//!
//! Loads content from `BATTLE_DATA_DIR`, builds a wave or endless bout and
//! advances it until it finishes or the tick limit is reached.
mod config;
mod report;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::{BattleEngine, BattleEnv, PcgRng, setup};

use config::{SimConfig, SimMode};
use report::RewardTotals;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    let factory = ContentFactory::new(&config.data_dir);
    let definitions = factory
        .load_definitions()
        .with_context(|| format!("loading content from {}", config.data_dir.display()))?;
    let battle_config = factory.load_config().context("loading battle.toml")?;
    let bonuses = factory.load_bonuses().context("loading bonuses.toml")?;

    let snapshot = match config.mode {
        SimMode::Wave => setup::start_wave(
            &definitions,
            &battle_config,
            config.seed,
            config.level,
            &config.heroes,
            &config.enemies,
        ),
        SimMode::Endless => setup::start_endless(
            &definitions,
            &battle_config,
            config.seed,
            config.level,
            &config.heroes,
            &config.enemies,
        ),
    };
    if snapshot.heroes().is_empty() {
        anyhow::bail!("no known heroes in the roster");
    }

    let rng = PcgRng;
    let env = BattleEnv::new(&definitions, &bonuses, &rng, &battle_config).with_rules(config.rules());
    let engine = BattleEngine::new(env);
    tracing::info!(seed = config.seed, tick_ms = config.tick_ms, mode = ?config.mode, "battle start");

    let (snapshot, rewards) = engine.run(snapshot, config.tick_ms, config.max_ticks);
    let mut totals = RewardTotals::default();
    for reward in &rewards {
        totals.record(reward);
    }
    if !snapshot.is_finished() {
        tracing::warn!(ticks = snapshot.tick.0, "tick limit reached before the battle ended");
    }

    print!("{}", report::render(&snapshot, &totals, 15));
    Ok(())
}
