//! Runs typed ability effects against the battlefield.
//!
//! Health and shield changes are never applied here directly: they become
//! attack events for the event processor. Everything else (statuses, buffs,
//! mana, taunts, channels, spawns) lands immediately.

use crate::ability::AbilityEffect;
use crate::combat::{Offense, roll_hit};
use crate::effect::TickContext;
use crate::env::StatusTemplate;
use crate::error::{BattleIssue, DefinitionKind};
use crate::setup::spawn_enemy;
use crate::state::{
    Battlefield, ChannelingState, Combatant, CombatantId, DotTick, EventMeta, EventPayload, Side,
    StatusApplication, StatusEffect, TemporaryBuff,
};
use crate::stats::StatModifier;

/// A batch of effects cast by one combatant.
#[derive(Clone, Copy, Debug)]
pub struct Cast<'d> {
    pub caster: CombatantId,
    /// Owning ability; `None` for phase and status-expiry effects.
    pub ability: Option<&'d str>,
    pub effects: &'d [AbilityEffect],
}

/// Caster numbers captured before any effect mutates the field.
#[derive(Clone, Debug)]
struct CasterView {
    id: CombatantId,
    name: String,
    side: Side,
    offense: Offense,
}

impl CasterView {
    fn of(caster: &Combatant) -> Self {
        Self {
            id: caster.id,
            name: caster.name.clone(),
            side: caster.side(),
            offense: Offense {
                attack: caster.stats.attack,
                crit_chance: caster.stats.crit_chance,
                crit_damage: caster.stats.crit_damage,
            },
        }
    }
}

pub fn apply_effects(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    cast: &Cast<'_>,
    targets: &[CombatantId],
) {
    let Some(caster) = field.get(cast.caster).map(CasterView::of) else {
        ctx.report(BattleIssue::InvalidTarget { id: cast.caster });
        return;
    };
    for effect in cast.effects {
        apply_effect(ctx, field, &caster, cast.ability, effect, targets);
    }
}

fn meta(ability: Option<&str>) -> EventMeta {
    EventMeta {
        special: ability.is_some(),
        ability: ability.map(str::to_string),
        damage_over_time: false,
    }
}

fn living<'f>(field: &'f Battlefield, id: CombatantId) -> Option<&'f Combatant> {
    field.get(id).filter(|c| c.is_alive())
}

fn apply_effect(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    caster: &CasterView,
    ability: Option<&str>,
    effect: &AbilityEffect,
    targets: &[CombatantId],
) {
    match effect {
        AbilityEffect::Damage { multiplier } => {
            for &target in targets {
                let Some(defense) = living(field, target).map(|c| c.stats.defense) else {
                    continue;
                };
                let hit = roll_hit(&mut ctx.rolls, caster.id, caster.offense, *multiplier, defense);
                ctx.push_event(
                    caster.id,
                    target,
                    EventPayload::Damage {
                        amount: hit.amount,
                        critical: hit.critical,
                    },
                    meta(ability),
                );
            }
        }
        AbilityEffect::Heal { power } => {
            let amount = (caster.offense.attack * power).floor().max(0.0);
            for &target in targets {
                ctx.push_event(caster.id, target, EventPayload::Heal { amount }, meta(ability));
            }
        }
        AbilityEffect::RestoreShield { amount } => {
            for &target in targets {
                ctx.push_event(
                    caster.id,
                    target,
                    EventPayload::ShieldRestore { amount: *amount },
                    meta(ability),
                );
            }
        }
        AbilityEffect::RestoreMana { amount } => {
            for &target in targets {
                if let Some(unit) = field.get_mut(target).filter(|c| c.is_alive()) {
                    unit.mana = (unit.mana + amount).min(unit.stats.max_mana);
                }
            }
        }
        AbilityEffect::ApplyStatus { status } => {
            let Some(template) = ctx.definitions().status(status) else {
                ctx.report(BattleIssue::missing(DefinitionKind::Status, status.as_str()));
                return;
            };
            for &target in targets {
                apply_status(ctx, field, caster.id, template, target);
            }
        }
        AbilityEffect::BuffStats {
            name,
            modifier,
            duration_ms,
        } => {
            for &target in targets {
                apply_buff(ctx, field, caster.id, name, *modifier, *duration_ms, target);
            }
        }
        AbilityEffect::Taunt { duration_ms } => {
            if let Some(unit) = field.get_mut(caster.id) {
                unit.taunt_ms = unit.taunt_ms.max(*duration_ms);
                ctx.log(format!("{} taunts the enemy", unit.name));
            }
        }
        AbilityEffect::Summon { enemy, count } => summon(ctx, field, caster, enemy, *count),
        AbilityEffect::Transform { into } => transform(ctx, field, caster, into),
        AbilityEffect::TriggerChannel(spec) => {
            let Some(ability_id) = ability else {
                tracing::debug!(caster = %caster.id, "channel without an owning ability ignored");
                return;
            };
            let Some(unit) = field.get_mut(caster.id) else {
                return;
            };
            if unit.channeling.is_some() {
                return;
            }
            unit.channeling = Some(ChannelingState {
                ability_id: ability_id.to_string(),
                owner: caster.id,
                total_ms: spec.duration_ms,
                elapsed_ms: 0,
                tick_interval_ms: spec.tick_interval_ms,
                since_tick_ms: 0,
                targets: targets.to_vec(),
                flags: spec.flags,
            });
            ctx.log(format!("{} begins channeling {ability_id}", caster.name));
        }
    }
}

fn apply_status(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    source: CombatantId,
    template: &StatusTemplate,
    target: CombatantId,
) {
    let Some(unit) = field.get_mut(target).filter(|c| c.is_alive()) else {
        return;
    };
    let effect = StatusEffect {
        template_id: template.id.clone(),
        name: template.name.clone(),
        kind: template.kind,
        remaining_ms: template.duration_ms,
        modifier: template.modifier,
        dot: template.dot.map(|dot| DotTick::new(dot.damage, dot.interval_ms)),
        source,
        applied_at: ctx.tick,
    };
    let affects_stats = effect.affects_stats();
    let (applied, interrupted) = unit.apply_status(effect);
    match applied {
        StatusApplication::Added => {
            ctx.log(format!("{} is afflicted by {}", unit.name, template.name))
        }
        StatusApplication::Refreshed => {
            ctx.log(format!("{} on {} is refreshed", template.name, unit.name))
        }
        StatusApplication::Rejected => {
            tracing::debug!(unit = %unit.id, status = %template.id, "status slots full");
            return;
        }
    }
    if affects_stats {
        ctx.mark_recompute(target);
    }
    if let Some(channel) = interrupted {
        interrupt_channel(ctx, field, channel);
    }
}

/// Ends a channel cut short by a stun: interrupt effects run now and the
/// ability goes on its full cooldown.
pub fn interrupt_channel(ctx: &mut TickContext<'_>, field: &mut Battlefield, channel: ChannelingState) {
    let owner_name = field
        .get(channel.owner)
        .map(|c| c.name.clone())
        .unwrap_or_default();
    ctx.log(format!("{owner_name}'s {} is interrupted", channel.ability_id));

    let Some(ability) = ctx.definitions().ability(&channel.ability_id) else {
        ctx.report(BattleIssue::missing(DefinitionKind::Ability, channel.ability_id.as_str()));
        return;
    };
    if let Some(owner) = field.get_mut(channel.owner) {
        owner.cooldowns.insert(ability.id.clone(), ability.cooldown_ms);
    }
    if let Some(spec) = ability.channel() {
        let cast = Cast {
            caster: channel.owner,
            ability: Some(ability.id.as_str()),
            effects: &spec.on_interrupt,
        };
        apply_effects(ctx, field, &cast, &channel.targets);
    }
}

fn apply_buff(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    source: CombatantId,
    name: &str,
    modifier: StatModifier,
    duration_ms: u32,
    target: CombatantId,
) {
    let Some(unit) = field.get_mut(target).filter(|c| c.is_alive()) else {
        return;
    };
    let applied = unit.buffs.apply(TemporaryBuff {
        name: name.to_string(),
        modifier,
        remaining_ms: duration_ms,
        source,
    });
    if applied != StatusApplication::Rejected {
        ctx.log(format!("{} gains {name}", unit.name));
        ctx.mark_recompute(target);
    }
}

fn summon(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    caster: &CasterView,
    enemy_id: &str,
    count: u32,
) {
    if caster.side != Side::Enemy {
        tracing::debug!(caster = %caster.id, "only enemies summon");
        return;
    }
    let Some(template) = ctx.definitions().enemy(enemy_id) else {
        ctx.report(BattleIssue::missing(DefinitionKind::Enemy, enemy_id));
        return;
    };
    let config = ctx.config();
    let strength = field
        .get(caster.id)
        .and_then(Combatant::enemy)
        .map_or(1.0, |e| e.summon_strength);
    let scale = ctx.enemy_scale * strength;

    let mut summoned = 0;
    for _ in 0..count {
        if field.enemies.len() + ctx.spawned.len() >= config.max_enemies {
            break;
        }
        let id = ctx.allocate_id();
        ctx.spawned.push(spawn_enemy(template, id, scale, config));
        summoned += 1;
    }
    if summoned == 0 {
        return;
    }

    if let Some(state) = field.get_mut(caster.id).and_then(Combatant::enemy_mut) {
        state.summon_strength = config.next_summon_strength(strength);
    }
    ctx.log(format!("{} summons {summoned} {}", caster.name, template.name));
}

fn transform(ctx: &mut TickContext<'_>, field: &mut Battlefield, caster: &CasterView, into: &str) {
    if caster.side != Side::Enemy {
        return;
    }
    let Some(template) = ctx.definitions().enemy(into) else {
        ctx.report(BattleIssue::missing(DefinitionKind::Enemy, into));
        return;
    };
    let Some(state) = field.get_mut(caster.id).and_then(Combatant::enemy_mut) else {
        return;
    };
    state.retired = true;

    let id = ctx.allocate_id();
    let replacement = spawn_enemy(template, id, ctx.enemy_scale, ctx.config());
    ctx.log(format!("{} grows into {}", caster.name, replacement.name));
    ctx.spawned.push(replacement);
}
