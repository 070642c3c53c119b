//! Status effects and temporary buffs carried by a combatant.
//!
//! # Millisecond durations
//!
//! Durations are remaining milliseconds rather than expiry ticks so the
//! simulation does not care how long a tick is. An effect is removed in the
//! tick its remaining duration reaches zero and never ticks again.
//!
//! # Stacking
//!
//! At most one instance per `(name, kind)` is active; reapplying refreshes
//! duration and value. Damage-over-time instances are additionally keyed by
//! source, so two casters poisoning the same target stack independently.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::{CombatantId, Tick};
use crate::stats::StatModifier;

/// Broad classification of a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Positive stat modifier.
    Buff,
    /// Negative stat modifier.
    Debuff,
    /// Cannot act; interrupts channels when it lands.
    Stun,
    /// Periodic damage independent of the attack cadence.
    DamageOverTime,
}

/// Periodic damage carried by a `DamageOverTime` effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DotTick {
    pub damage: f64,
    pub interval_ms: u32,
    /// Milliseconds until the next tick. May go negative transiently while
    /// the updater carries overflow into the next interval.
    pub countdown_ms: i64,
}

impl DotTick {
    pub fn new(damage: f64, interval_ms: u32) -> Self {
        Self {
            damage,
            interval_ms: interval_ms.max(1),
            countdown_ms: i64::from(interval_ms.max(1)),
        }
    }

    /// Advances the countdown by `elapsed_ms` and returns how many ticks fired.
    ///
    /// Overflow carries into the next interval (`countdown += interval`) so a
    /// tick duration that does not divide the interval does not drift.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.countdown_ms -= i64::from(elapsed_ms);
        let mut fired = 0;
        while self.countdown_ms <= 0 {
            fired += 1;
            self.countdown_ms += i64::from(self.interval_ms);
        }
        fired
    }
}

/// A single active status effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    /// Static template this instance was created from.
    pub template_id: String,
    pub name: String,
    pub kind: StatusKind,
    pub remaining_ms: u32,
    pub modifier: Option<StatModifier>,
    pub dot: Option<DotTick>,
    pub source: CombatantId,
    pub applied_at: Tick,
}

impl StatusEffect {
    fn same_slot(&self, other: &StatusEffect) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && (self.kind != StatusKind::DamageOverTime || self.source == other.source)
    }

    /// True for buffs/debuffs whose removal changes calculated stats.
    pub fn affects_stats(&self) -> bool {
        matches!(self.kind, StatusKind::Buff | StatusKind::Debuff) && self.modifier.is_some()
    }
}

/// Result of applying a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusApplication {
    Added,
    Refreshed,
    /// No room left; the effect was dropped.
    Rejected,
}

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Adds an effect, refreshing an existing instance in the same slot.
    pub fn apply(&mut self, effect: StatusEffect) -> StatusApplication {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.same_slot(&effect)) {
            existing.remaining_ms = effect.remaining_ms;
            existing.modifier = effect.modifier;
            existing.source = effect.source;
            existing.applied_at = effect.applied_at;
            if let (Some(current), Some(fresh)) = (existing.dot.as_mut(), effect.dot) {
                // Keep the running countdown so refreshing does not skip a tick.
                current.damage = fresh.damage;
                current.interval_ms = fresh.interval_ms;
            }
            return StatusApplication::Refreshed;
        }

        match self.effects.try_push(effect) {
            Ok(()) => StatusApplication::Added,
            Err(_) => StatusApplication::Rejected,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.effects.iter().any(|e| e.kind == StatusKind::Stun)
    }

    pub fn has(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e.name == name)
    }

    /// Stat modifiers contributed by active buffs and debuffs.
    pub fn modifiers(&self) -> impl Iterator<Item = &StatModifier> + '_ {
        self.effects
            .iter()
            .filter(|e| matches!(e.kind, StatusKind::Buff | StatusKind::Debuff))
            .filter_map(|e| e.modifier.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    /// Removes and returns every effect whose remaining duration is zero.
    pub fn take_expired(&mut self) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        let mut index = 0;
        while index < self.effects.len() {
            if self.effects[index].remaining_ms == 0 {
                expired.push(self.effects.remove(index));
            } else {
                index += 1;
            }
        }
        expired
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// A named stat modifier with a lifetime, separate from status effects.
///
/// Phase buffs and `BuffStats` ability effects land here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporaryBuff {
    pub name: String,
    pub modifier: StatModifier,
    pub remaining_ms: u32,
    pub source: CombatantId,
}

/// Temporary buffs on a combatant, refreshed by name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporaryBuffs {
    buffs: ArrayVec<TemporaryBuff, { BattleConfig::MAX_TEMPORARY_BUFFS }>,
}

impl TemporaryBuffs {
    pub fn apply(&mut self, buff: TemporaryBuff) -> StatusApplication {
        if let Some(existing) = self.buffs.iter_mut().find(|b| b.name == buff.name) {
            *existing = buff;
            return StatusApplication::Refreshed;
        }
        match self.buffs.try_push(buff) {
            Ok(()) => StatusApplication::Added,
            Err(_) => StatusApplication::Rejected,
        }
    }

    /// Decrements every buff and returns how many expired.
    pub fn decay(&mut self, elapsed_ms: u32) -> usize {
        for buff in self.buffs.iter_mut() {
            buff.remaining_ms = buff.remaining_ms.saturating_sub(elapsed_ms);
        }
        let before = self.buffs.len();
        self.buffs.retain(|b| b.remaining_ms > 0);
        before - self.buffs.len()
    }

    pub fn modifiers(&self) -> impl Iterator<Item = &StatModifier> + '_ {
        self.buffs.iter().map(|b| &b.modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemporaryBuff> {
        self.buffs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;

    fn effect(name: &str, kind: StatusKind, source: u32, remaining_ms: u32) -> StatusEffect {
        StatusEffect {
            template_id: name.to_string(),
            name: name.to_string(),
            kind,
            remaining_ms,
            modifier: None,
            dot: (kind == StatusKind::DamageOverTime).then(|| DotTick::new(5.0, 1000)),
            source: CombatantId(source),
            applied_at: Tick::ZERO,
        }
    }

    #[test]
    fn reapplication_refreshes_instead_of_stacking() {
        let mut effects = StatusEffects::empty();
        assert_eq!(
            effects.apply(effect("slow", StatusKind::Debuff, 1, 1000)),
            StatusApplication::Added
        );
        assert_eq!(
            effects.apply(effect("slow", StatusKind::Debuff, 2, 3000)),
            StatusApplication::Refreshed
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.iter().next().map(|e| e.remaining_ms), Some(3000));
    }

    #[test]
    fn dots_from_distinct_sources_stack() {
        let mut effects = StatusEffects::empty();
        effects.apply(effect("poison", StatusKind::DamageOverTime, 1, 3000));
        effects.apply(effect("poison", StatusKind::DamageOverTime, 2, 3000));
        effects.apply(effect("poison", StatusKind::DamageOverTime, 1, 3000));
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn dot_countdown_carries_overflow() {
        let mut dot = DotTick::new(5.0, 1000);
        assert_eq!(dot.advance(700), 0);
        assert_eq!(dot.advance(700), 1);
        assert_eq!(dot.countdown_ms, 600);
        assert_eq!(dot.advance(600), 1);
    }

    #[test]
    fn only_buffs_and_debuffs_contribute_modifiers() {
        let mut effects = StatusEffects::empty();
        let mut buff = effect("rage", StatusKind::Buff, 1, 1000);
        buff.modifier = Some(StatModifier::percent(StatKind::Attack, 20.0));
        let mut stun = effect("bash", StatusKind::Stun, 1, 1000);
        stun.modifier = Some(StatModifier::flat(StatKind::Defense, -5.0));
        effects.apply(buff);
        effects.apply(stun);
        assert_eq!(effects.modifiers().count(), 1);
        assert!(effects.is_stunned());
    }

    #[test]
    fn temporary_buffs_expire_after_decay() {
        let mut buffs = TemporaryBuffs::default();
        buffs.apply(TemporaryBuff {
            name: "enrage".into(),
            modifier: StatModifier::percent(StatKind::Attack, 50.0),
            remaining_ms: 1500,
            source: CombatantId(3),
        });
        assert_eq!(buffs.decay(1000), 0);
        assert_eq!(buffs.decay(1000), 1);
        assert!(buffs.is_empty());
    }
}
