//! Participant updater: per-tick passive state.
//!
//! For every living combatant, in roster order:
//!
//! 1. status effects decay; DoT countdowns emit synthetic damage events
//! 2. channels progress and fire their interval and completion effects
//! 3. temporary buffs and taunts decay
//! 4. health, mana and shield regenerate
//! 5. attack and ability cooldowns count down
//! 6. aura passives roll
//!
//! Stun interruption happens when the stun lands (see
//! [`Combatant::apply_status`]), so a stunned channel never progresses here.
//! Effects that need the whole battlefield (on-expire, channel ticks, auras)
//! are collected first and applied after the per-combatant pass.

use crate::ability::{AbilityEffect, AbilityTrigger, TargetScope};
use crate::effect::{Cast, TickContext, apply_effects, select_targets};
use crate::error::{BattleIssue, DefinitionKind};
use crate::state::{Battlefield, Combatant, CombatantId, EventMeta, EventPayload};

enum PendingTargets {
    Fixed(Vec<CombatantId>),
    Scope(TargetScope),
}

struct PendingCast<'d> {
    caster: CombatantId,
    ability: Option<&'d str>,
    effects: &'d [AbilityEffect],
    targets: PendingTargets,
}

pub fn update_participants(ctx: &mut TickContext<'_>, field: &mut Battlefield) {
    let mut pending = Vec::new();
    let ids: Vec<CombatantId> = field.iter().map(|c| c.id).collect();

    for id in ids {
        let Some(unit) = field.get_mut(id) else {
            continue;
        };
        if let Some(ticks) = unit.enemy_mut().and_then(|e| e.death_ticks.as_mut()) {
            *ticks = ticks.saturating_sub(1);
            continue;
        }
        if !unit.is_alive() {
            continue;
        }

        tick_status_effects(ctx, unit, &mut pending);
        advance_channel(ctx, unit, &mut pending);
        decay_buffs(ctx, unit);
        regenerate(unit, ctx.tick_ms);
        tick_cooldowns(unit, ctx.tick_ms);
        roll_auras(ctx, unit, &mut pending);
    }

    for cast in pending {
        let targets = match cast.targets {
            PendingTargets::Fixed(ids) => ids,
            PendingTargets::Scope(scope) => {
                let Some(caster) = field.get(cast.caster).filter(|c| c.is_alive()) else {
                    continue;
                };
                select_targets(scope, caster, field, ctx.preferred_target, &mut ctx.rolls)
            }
        };
        let batch = Cast {
            caster: cast.caster,
            ability: cast.ability,
            effects: cast.effects,
        };
        apply_effects(ctx, field, &batch, &targets);
    }
}

fn tick_status_effects<'d>(
    ctx: &mut TickContext<'d>,
    unit: &mut Combatant,
    pending: &mut Vec<PendingCast<'d>>,
) {
    let id = unit.id;
    let elapsed = ctx.tick_ms;

    for effect in unit.status_effects.iter_mut() {
        // Never tick past the effect's own lifetime.
        let step = elapsed.min(effect.remaining_ms);
        if let Some(dot) = effect.dot.as_mut() {
            for _ in 0..dot.advance(step) {
                ctx.push_event(
                    effect.source,
                    id,
                    EventPayload::Damage {
                        amount: dot.damage,
                        critical: false,
                    },
                    EventMeta {
                        special: false,
                        ability: Some(effect.name.clone()),
                        damage_over_time: true,
                    },
                );
            }
        }
        effect.remaining_ms -= step;
    }

    let definitions = ctx.definitions();
    for expired in unit.status_effects.take_expired() {
        if expired.affects_stats() {
            ctx.mark_recompute(id);
        }
        ctx.log(format!("{} wears off {}", expired.name, unit.name));

        let Some(template) = definitions.status(&expired.template_id) else {
            continue;
        };
        if !template.on_expire.is_empty() {
            pending.push(PendingCast {
                caster: id,
                ability: None,
                effects: &template.on_expire,
                targets: PendingTargets::Fixed(vec![id]),
            });
        }
    }
}

fn advance_channel<'d>(
    ctx: &mut TickContext<'d>,
    unit: &mut Combatant,
    pending: &mut Vec<PendingCast<'d>>,
) {
    if unit.is_stunned() {
        return;
    }
    let Some(channel) = unit.channeling.as_mut() else {
        return;
    };
    let progress = channel.advance(ctx.tick_ms);

    let definitions = ctx.definitions();
    let Some(ability) = definitions.ability(&channel.ability_id) else {
        ctx.report(BattleIssue::missing(
            DefinitionKind::Ability,
            channel.ability_id.as_str(),
        ));
        unit.channeling = None;
        return;
    };
    let Some(spec) = ability.channel() else {
        unit.channeling = None;
        return;
    };

    for _ in 0..progress.ticks {
        pending.push(PendingCast {
            caster: unit.id,
            ability: Some(ability.id.as_str()),
            effects: &spec.on_tick,
            targets: PendingTargets::Fixed(channel.targets.clone()),
        });
    }

    if progress.completed {
        let targets = std::mem::take(&mut channel.targets);
        unit.channeling = None;
        unit.cooldowns.insert(ability.id.clone(), ability.cooldown_ms);
        ctx.log(format!("{} completes {}", unit.name, ability.name));
        pending.push(PendingCast {
            caster: unit.id,
            ability: Some(ability.id.as_str()),
            effects: &spec.on_complete,
            targets: PendingTargets::Fixed(targets),
        });
    }
}

fn decay_buffs(ctx: &mut TickContext<'_>, unit: &mut Combatant) {
    if unit.buffs.decay(ctx.tick_ms) > 0 {
        ctx.mark_recompute(unit.id);
    }
    unit.taunt_ms = unit.taunt_ms.saturating_sub(ctx.tick_ms);
}

fn regenerate(unit: &mut Combatant, tick_ms: u32) {
    let seconds = f64::from(tick_ms) / 1000.0;
    unit.health = (unit.health + unit.stats.health_regen * seconds).min(unit.stats.max_health);
    if unit.is_hero() {
        unit.mana = (unit.mana + unit.stats.mana_regen * seconds).min(unit.stats.max_mana);
    }
    if unit.shield_delay_ms > 0 {
        unit.shield_delay_ms = unit.shield_delay_ms.saturating_sub(tick_ms);
    } else {
        unit.shield =
            (unit.shield + unit.stats.shield_recharge * seconds).min(unit.stats.max_shield);
    }
}

fn tick_cooldowns(unit: &mut Combatant, tick_ms: u32) {
    unit.attack_cooldown_ms = unit.attack_cooldown_ms.saturating_sub(tick_ms);
    for remaining in unit.cooldowns.values_mut() {
        *remaining = remaining.saturating_sub(tick_ms);
    }
    unit.cooldowns.retain(|_, remaining| *remaining > 0);
}

fn roll_auras<'d>(
    ctx: &mut TickContext<'d>,
    unit: &mut Combatant,
    pending: &mut Vec<PendingCast<'d>>,
) {
    let definitions = ctx.definitions();
    for ability_id in &unit.abilities {
        let Some(ability) = definitions.ability(ability_id) else {
            ctx.report(BattleIssue::missing(DefinitionKind::Ability, ability_id.as_str()));
            continue;
        };
        let AbilityTrigger::Aura { interval_ms, chance } = ability.trigger else {
            continue;
        };
        let interval_ms = interval_ms.max(1);
        let timer = unit
            .aura_timers
            .entry(ability.id.clone())
            .or_insert(interval_ms);
        *timer = timer.saturating_sub(ctx.tick_ms);
        if *timer > 0 {
            continue;
        }
        *timer = interval_ms;

        if ctx.rolls.chance(unit.id, chance) {
            ctx.log(format!("{}'s {} pulses", unit.name, ability.name));
            pending.push(PendingCast {
                caster: unit.id,
                ability: Some(ability.id.as_str()),
                effects: &ability.effects,
                targets: PendingTargets::Scope(ability.target),
            });
        }
    }
}
