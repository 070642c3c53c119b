//! Battle state: combatants, their effects, attack events and the snapshot
//! that owns them.
//!
//! Everything here is plain data plus invariant-preserving helpers; the
//! behaviour that mutates it per tick lives in [`crate::engine`].
mod channel;
mod combatant;
mod common;
mod event;
mod rewards;
mod snapshot;
mod status;

pub use channel::{ChannelFlags, ChannelProgress, ChannelingState};
pub use combatant::{Combatant, CombatantKind, EnemyRank, EnemyState, HeroState};
pub use common::{CombatantId, Side, Tick};
pub use event::{AttackEvent, EventMeta, EventPayload};
pub use rewards::{DeferredReward, RewardLedger};
pub use snapshot::{BattleLog, BattleMode, BattleSnapshot, BattleStatus, Battlefield};
pub use status::{
    DotTick, StatusApplication, StatusEffect, StatusEffects, StatusKind, TemporaryBuff,
    TemporaryBuffs,
};
