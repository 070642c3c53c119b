//! Deterministic tick-based auto-battler simulation.
//!
//! `battle-core` owns the combat rules: stat derivation, status effects,
//! abilities, the attack-event pipeline, rewards and terminal-state checks.
//! A battle is a [`BattleSnapshot`] that the caller moves through
//! [`engine::BattleEngine::advance`] once per tick; static content, global
//! bonuses and randomness arrive through the oracles in [`env`], so the same
//! snapshot, seed and tick lengths always replay to the same outcome.
pub mod ability;
pub mod combat;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod setup;
pub mod state;
pub mod stats;

pub use ability::{
    AbilityDefinition, AbilityEffect, AbilityTrigger, ChannelSpec, ClassBehavior,
    PhaseDefinition, TargetScope,
};
pub use config::{BattleConfig, BattleRules};
pub use engine::{BattleEngine, TickOutcome, advance_tick};
pub use env::{
    BattleEnv, DefinitionsOracle, DotSpec, EnemyTemplate, GlobalBonuses, HeroTemplate, LootEntry,
    PcgRng, RngOracle, StaticDefinitions, StatusTemplate, compute_seed,
};
pub use error::{BattleError, BattleIssue, DefinitionKind, ErrorSeverity};
pub use setup::{HeroLoadout, spawn_enemy, spawn_hero, start_endless, start_wave};
pub use state::{
    AttackEvent, BattleLog, BattleMode, BattleSnapshot, BattleStatus, Battlefield, ChannelFlags,
    ChannelingState, Combatant, CombatantId, CombatantKind, DeferredReward, EnemyRank,
    EnemyState, EventMeta, EventPayload, HeroState, RewardLedger, Side, StatusEffect, StatusKind,
    Tick,
};
pub use stats::{BaseStats, CalculatedStats, ModifierMode, StatKind, StatModifier};
