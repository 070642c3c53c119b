//! Read-only inputs of a tick.
//!
//! Static definitions, economy bonuses and the RNG oracle are owned by the
//! caller. [`BattleEnv`] bundles them with the configuration so the engine can
//! thread a single `Copy` value through every component.
mod bonuses;
mod definitions;
mod rng;

pub use bonuses::GlobalBonuses;
pub use definitions::{
    DefinitionsOracle, DotSpec, EnemyTemplate, HeroTemplate, LootEntry, StaticDefinitions,
    StatusTemplate,
};
pub use rng::{PcgRng, RngOracle, RollStream, compute_seed};

use crate::config::{BattleConfig, BattleRules};

/// Aggregates everything the engine reads but never mutates.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    pub definitions: &'a dyn DefinitionsOracle,
    pub bonuses: &'a GlobalBonuses,
    pub rng: &'a dyn RngOracle,
    pub config: &'a BattleConfig,
    pub rules: BattleRules,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        definitions: &'a dyn DefinitionsOracle,
        bonuses: &'a GlobalBonuses,
        rng: &'a dyn RngOracle,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            definitions,
            bonuses,
            rng,
            config,
            rules: BattleRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: BattleRules) -> Self {
        self.rules = rules;
        self
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("bonuses", self.bonuses)
            .field("config", self.config)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
