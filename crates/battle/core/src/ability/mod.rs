//! Static ability data.
//!
//! Abilities are closed variants resolved once at load time. The engine never
//! dispatches on ability ids; it only looks the id up and runs the typed
//! [`AbilityEffect`]s it finds.

use crate::state::ChannelFlags;
use crate::stats::StatModifier;

/// When an ability fires.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityTrigger {
    /// Chosen by the action resolver when off cooldown and affordable.
    #[default]
    Active,
    /// Rolled independently on every hit the owner lands.
    OnHit { chance: f64 },
    /// Rolled by the participant updater once per interval.
    Aura { interval_ms: u32, chance: f64 },
}

/// Who an ability's effects land on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetScope {
    /// The preferred or taunting opponent, otherwise a random one.
    #[default]
    Single,
    AllEnemies,
    RandomEnemy,
    /// Every living ally including the caster.
    AllAllies,
    /// The living ally with the lowest health percentage.
    LowestHealthAlly,
    Caster,
}

/// Multi-tick behaviour started by [`AbilityEffect::TriggerChannel`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelSpec {
    pub duration_ms: u32,
    pub tick_interval_ms: Option<u32>,
    pub on_tick: Vec<AbilityEffect>,
    pub on_complete: Vec<AbilityEffect>,
    pub on_interrupt: Vec<AbilityEffect>,
    pub flags: ChannelFlags,
}

/// A single typed effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Hit each target for `attack × multiplier − defense`.
    Damage { multiplier: f64 },
    /// Heal each target for `attack × power`.
    Heal { power: f64 },
    RestoreShield { amount: f64 },
    /// Applied directly; mana never travels through attack events.
    RestoreMana { amount: f64 },
    /// Apply a status template by id.
    ApplyStatus { status: String },
    BuffStats {
        name: String,
        modifier: StatModifier,
        duration_ms: u32,
    },
    /// The caster draws enemy basic attacks for the duration.
    Taunt { duration_ms: u32 },
    /// Spawn `count` units of an enemy template beside the caster.
    Summon { enemy: String, count: u32 },
    /// Replace the caster with another enemy template.
    Transform { into: String },
    TriggerChannel(ChannelSpec),
}

impl AbilityEffect {
    pub fn is_damage(&self) -> bool {
        matches!(self, Self::Damage { .. })
    }
}

/// Static definition of an ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger: AbilityTrigger,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetScope,
    /// Mana paid by heroes; enemies cast for free.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_ms: u32,
    pub effects: Vec<AbilityEffect>,
}

impl AbilityDefinition {
    /// The channel this ability starts, if any.
    pub fn channel(&self) -> Option<&ChannelSpec> {
        self.effects.iter().find_map(|effect| match effect {
            AbilityEffect::TriggerChannel(spec) => Some(spec),
            _ => None,
        })
    }

    pub fn deals_damage(&self) -> bool {
        self.effects.iter().any(AbilityEffect::is_damage)
    }
}

/// One-time effect an enemy gains when its health drops to `threshold_pct`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseDefinition {
    /// Health percentage (0–100) at or below which the phase fires.
    pub threshold_pct: f64,
    #[cfg_attr(feature = "serde", serde(default = "phase_target"))]
    pub target: TargetScope,
    pub effects: Vec<AbilityEffect>,
}

#[cfg(feature = "serde")]
fn phase_target() -> TargetScope {
    TargetScope::Caster
}

/// Class routine a hero runs when no ability is ready.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassBehavior {
    #[default]
    None,
    /// Heals the most wounded ally below `threshold_pct` health, otherwise
    /// attacks at `weak_attack` damage multiplier.
    Healer {
        heal_power: f64,
        threshold_pct: f64,
        weak_attack: f64,
    },
    /// Restores shield to the ally with the lowest shield ratio below
    /// `threshold`.
    Warden { amount: f64, threshold: f64 },
}
