//! Tick pipeline.
//!
//! [`BattleEngine::advance`] runs one tick over an owned snapshot:
//!
//! ```text
//! updater → hero resolver → enemy resolver → merge spawns
//!         → event processor → stat recompute → loot & XP
//!         → death animations / pruning → status → fold
//! ```
//!
//! The snapshot moves in and out by value; the engine keeps nothing between
//! calls.
mod events;
mod orchestrator;
mod recompute;
mod resolver;
mod rewards;
mod status;
mod updater;

pub use events::process_events;
pub use recompute::apply_recompute;
pub use resolver::{resolve_enemies, resolve_heroes};
pub use rewards::{LevelUp, distribute_rewards, grant_experience};
pub use status::evaluate;
pub use updater::update_participants;

use crate::config::BattleConfig;
use crate::env::{BattleEnv, DefinitionsOracle, GlobalBonuses, RngOracle};
use crate::state::{BattleSnapshot, DeferredReward};

/// Result of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub snapshot: BattleSnapshot,
    /// Side effects for the economy layer, in the order they occurred.
    pub rewards: Vec<DeferredReward>,
}

/// Advances battles against a fixed environment.
#[derive(Clone, Copy, Debug)]
pub struct BattleEngine<'a> {
    env: BattleEnv<'a>,
}

impl<'a> BattleEngine<'a> {
    pub fn new(env: BattleEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> BattleEnv<'a> {
        self.env
    }

    /// Advances `snapshot` by one tick of `tick_ms` milliseconds.
    ///
    /// A finished battle is returned unchanged with no rewards.
    pub fn advance(&self, snapshot: BattleSnapshot, tick_ms: u32) -> TickOutcome {
        orchestrator::run_tick(self.env, snapshot, tick_ms)
    }

    /// Advances until the battle finishes or `max_ticks` ticks have run.
    pub fn run(
        &self,
        mut snapshot: BattleSnapshot,
        tick_ms: u32,
        max_ticks: u64,
    ) -> (BattleSnapshot, Vec<DeferredReward>) {
        let mut rewards = Vec::new();
        for _ in 0..max_ticks {
            if snapshot.is_finished() {
                break;
            }
            let outcome = self.advance(snapshot, tick_ms);
            rewards.extend(outcome.rewards);
            snapshot = outcome.snapshot;
        }
        (snapshot, rewards)
    }
}

/// Advances one tick with the default configuration and rules.
pub fn advance_tick(
    snapshot: BattleSnapshot,
    tick_ms: u32,
    bonuses: &GlobalBonuses,
    definitions: &dyn DefinitionsOracle,
    rng: &dyn RngOracle,
) -> TickOutcome {
    let config = BattleConfig::default();
    let env = BattleEnv::new(definitions, bonuses, rng, &config);
    BattleEngine::new(env).advance(snapshot, tick_ms)
}
