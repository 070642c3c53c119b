//! Combatant model shared by heroes and enemies.

use std::collections::BTreeMap;

use crate::ability::ClassBehavior;
use crate::state::{
    ChannelingState, CombatantId, Side, StatusApplication, StatusEffect, StatusEffects,
    StatusKind, TemporaryBuffs,
};
use crate::stats::{BaseStats, CalculatedStats};

/// Hero-only progression state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroState {
    pub level: u32,
    pub experience: u64,
    pub exp_to_next_level: u64,
    pub skill_points: u32,
    pub behavior: ClassBehavior,
}

/// Enemy tier, used for loot multipliers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyRank {
    #[default]
    Normal,
    Elite,
    Boss,
}

/// Enemy-only battle state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub rank: EnemyRank,
    /// One flag per template phase; a triggered phase never fires again.
    pub phases_triggered: Vec<bool>,
    /// Multiplier applied to the next batch of minions this instance summons.
    pub summon_strength: f64,
    /// Remaining death-animation ticks once defeated.
    pub death_ticks: Option<u32>,
    /// Loot and XP for this instance were already distributed.
    pub defeat_recorded: bool,
    /// Replaced by another unit (transform); leaves without rewards.
    pub retired: bool,
}

impl EnemyState {
    pub fn new(rank: EnemyRank, phase_count: usize) -> Self {
        Self {
            rank,
            phases_triggered: vec![false; phase_count],
            summon_strength: 1.0,
            death_ticks: None,
            defeat_recorded: false,
            retired: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    Hero(HeroState),
    Enemy(EnemyState),
}

/// A hero or enemy participating in a battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    /// Stable static-definition id (template).
    pub definition_id: String,
    pub name: String,
    pub kind: CombatantKind,
    pub base: BaseStats,
    /// Level (heroes) or difficulty (enemies) multiplier applied to `base`.
    pub scale: f64,
    pub stats: CalculatedStats,
    pub health: f64,
    pub mana: f64,
    pub shield: f64,
    pub status_effects: StatusEffects,
    pub buffs: TemporaryBuffs,
    /// Ability id to remaining cooldown in milliseconds.
    pub cooldowns: BTreeMap<String, u32>,
    pub attack_cooldown_ms: u32,
    /// Milliseconds until the shield may recharge again.
    pub shield_delay_ms: u32,
    /// Aura ability id to milliseconds until its next proc roll.
    pub aura_timers: BTreeMap<String, u32>,
    pub taunt_ms: u32,
    pub channeling: Option<ChannelingState>,
    pub abilities: Vec<String>,
}

impl Combatant {
    /// Creates a combatant at full health, mana and shield.
    pub fn new(
        id: CombatantId,
        definition_id: impl Into<String>,
        name: impl Into<String>,
        kind: CombatantKind,
        base: BaseStats,
        scale: f64,
        default_crit_damage: f64,
    ) -> Self {
        let stats = CalculatedStats::compute(&base, scale, default_crit_damage, std::iter::empty());
        Self {
            id,
            definition_id: definition_id.into(),
            name: name.into(),
            kind,
            health: stats.max_health,
            mana: stats.max_mana,
            shield: stats.max_shield,
            base,
            scale,
            stats,
            status_effects: StatusEffects::empty(),
            buffs: TemporaryBuffs::default(),
            cooldowns: BTreeMap::new(),
            attack_cooldown_ms: 0,
            shield_delay_ms: 0,
            aura_timers: BTreeMap::new(),
            taunt_ms: 0,
            channeling: None,
            abilities: Vec::new(),
        }
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = String>) -> Self {
        self.abilities = abilities.into_iter().collect();
        self
    }

    pub fn side(&self) -> Side {
        match self.kind {
            CombatantKind::Hero(_) => Side::Hero,
            CombatantKind::Enemy(_) => Side::Enemy,
        }
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, CombatantKind::Hero(_))
    }

    pub fn hero(&self) -> Option<&HeroState> {
        match &self.kind {
            CombatantKind::Hero(hero) => Some(hero),
            CombatantKind::Enemy(_) => None,
        }
    }

    pub fn hero_mut(&mut self) -> Option<&mut HeroState> {
        match &mut self.kind {
            CombatantKind::Hero(hero) => Some(hero),
            CombatantKind::Enemy(_) => None,
        }
    }

    pub fn enemy(&self) -> Option<&EnemyState> {
        match &self.kind {
            CombatantKind::Enemy(enemy) => Some(enemy),
            CombatantKind::Hero(_) => None,
        }
    }

    pub fn enemy_mut(&mut self) -> Option<&mut EnemyState> {
        match &mut self.kind {
            CombatantKind::Enemy(enemy) => Some(enemy),
            CombatantKind::Hero(_) => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0 && !self.is_retired()
    }

    pub fn is_dying(&self) -> bool {
        self.enemy().is_some_and(|e| e.death_ticks.is_some())
    }

    pub fn is_retired(&self) -> bool {
        self.enemy().is_some_and(|e| e.retired)
    }

    pub fn is_stunned(&self) -> bool {
        self.status_effects.is_stunned()
    }

    pub fn is_taunting(&self) -> bool {
        self.taunt_ms > 0
    }

    /// Alive, not stunned and not locked by a channel.
    pub fn can_act(&self) -> bool {
        self.is_alive()
            && !self.is_stunned()
            && !self.channeling.as_ref().is_some_and(|c| c.blocks_actions())
    }

    pub fn attack_ready(&self) -> bool {
        self.attack_cooldown_ms == 0
    }

    pub fn health_pct(&self) -> f64 {
        if self.stats.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.stats.max_health * 100.0
        }
    }

    pub fn shield_ratio(&self) -> f64 {
        if self.stats.max_shield <= 0.0 {
            1.0
        } else {
            self.shield / self.stats.max_shield
        }
    }

    pub fn cooldown(&self, ability_id: &str) -> u32 {
        self.cooldowns.get(ability_id).copied().unwrap_or(0)
    }

    /// Applies a status effect.
    ///
    /// A stun landing on a channeling combatant ends the channel immediately;
    /// the interrupted channel is returned so the caller can run its
    /// interrupt effects in the same tick.
    pub fn apply_status(
        &mut self,
        effect: StatusEffect,
    ) -> (StatusApplication, Option<ChannelingState>) {
        let stuns = effect.kind == StatusKind::Stun;
        let applied = self.status_effects.apply(effect);
        let interrupted = if stuns && applied != StatusApplication::Rejected {
            self.channeling.take()
        } else {
            None
        };
        (applied, interrupted)
    }

    /// Rebuilds calculated stats from base, scale and active modifiers.
    ///
    /// Current health and mana keep the percentage they had before the
    /// change; shield is clamped to the new maximum.
    pub fn recompute_stats(&mut self, default_crit_damage: f64) {
        let health_ratio = ratio(self.health, self.stats.max_health);
        let mana_ratio = ratio(self.mana, self.stats.max_mana);

        self.stats = CalculatedStats::compute(
            &self.base,
            self.scale,
            default_crit_damage,
            self.status_effects.modifiers().chain(self.buffs.modifiers()),
        );

        self.health = health_ratio * self.stats.max_health;
        self.mana = mana_ratio * self.stats.max_mana;
        self.clamp_resources();
    }

    /// Enforces `0 ≤ value ≤ max` for health, mana and shield.
    pub fn clamp_resources(&mut self) {
        self.health = self.health.clamp(0.0, self.stats.max_health);
        self.mana = self.mana.clamp(0.0, self.stats.max_mana);
        self.shield = self.shield.clamp(0.0, self.stats.max_shield);
    }
}

fn ratio(current: f64, max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        (current / max).clamp(0.0, 1.0)
    }
}
