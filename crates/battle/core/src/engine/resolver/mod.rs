//! Action resolvers.
//!
//! Each eligible actor (alive, not stunned, not locked by a channel) takes at
//! most one action per tick, in priority order:
//!
//! 1. the first ready `Active` ability it can pay for and that has targets
//! 2. a class routine (heroes only)
//! 3. a basic attack
//!
//! Abilities only wait on their own cooldown; the last two wait on the
//! basic-attack cooldown. Whatever fires resets the basic-attack cooldown to
//! `1000 / attack_speed`.
mod enemy;
mod hero;

pub use enemy::resolve_enemies;
pub use hero::resolve_heroes;

use crate::ability::{AbilityTrigger, TargetScope};
use crate::combat::{Offense, roll_hit};
use crate::effect::{Cast, TickContext, apply_effects, select_targets, single_opponent};
use crate::error::{BattleIssue, DefinitionKind};
use crate::state::{Battlefield, Combatant, CombatantId, EventMeta, EventPayload};

/// Whether casting draws on the actor's mana pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ManaRule {
    Pays,
    Free,
}

/// Tries the actor's active abilities in declaration order.
///
/// Returns `true` if one fired.
pub(crate) fn try_abilities(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    id: CombatantId,
    mana: ManaRule,
) -> bool {
    let definitions = ctx.definitions();
    let Some(ability_ids) = field.get(id).map(|c| c.abilities.clone()) else {
        return false;
    };

    for ability_id in &ability_ids {
        let Some(ability) = definitions.ability(ability_id) else {
            ctx.report(BattleIssue::missing(DefinitionKind::Ability, ability_id.as_str()));
            continue;
        };
        if ability.trigger != AbilityTrigger::Active {
            continue;
        }
        let Some(actor) = field.get(id) else {
            return false;
        };
        if actor.cooldown(&ability.id) > 0 {
            continue;
        }
        if ability.channel().is_some() && actor.channeling.is_some() {
            continue;
        }
        if mana == ManaRule::Pays && ability.mana_cost > actor.mana {
            ctx.report(BattleIssue::ResourceInsufficient {
                ability: ability.id.clone(),
                needed: ability.mana_cost,
                available: actor.mana,
            });
            continue;
        }

        let targets = select_targets(
            ability.target,
            actor,
            field,
            ctx.preferred_target,
            &mut ctx.rolls,
        );
        if targets.is_empty() {
            continue;
        }

        if let Some(actor) = field.get_mut(id) {
            if mana == ManaRule::Pays {
                actor.mana -= ability.mana_cost;
            }
            // Channels start their cooldown when they end.
            if ability.channel().is_none() {
                actor.cooldowns.insert(ability.id.clone(), ability.cooldown_ms);
            }
            ctx.log(format!("{} uses {}", actor.name, ability.name));
        }
        tracing::debug!(actor = %id, ability = %ability.id, targets = targets.len(), "ability fired");

        let cast = Cast {
            caster: id,
            ability: Some(ability.id.as_str()),
            effects: &ability.effects,
        };
        apply_effects(ctx, field, &cast, &targets);
        if ability.deals_damage() {
            roll_on_hit(ctx, field, id, &targets);
        }
        return true;
    }
    false
}

/// Basic attack against the actor's single-target choice.
///
/// Returns `false` when there is nobody to hit.
pub(crate) fn basic_attack(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    id: CombatantId,
    multiplier: f64,
) -> bool {
    let Some(actor) = field.get(id) else {
        return false;
    };
    let Some(target) = single_opponent(actor, field, ctx.preferred_target, &mut ctx.rolls) else {
        return false;
    };
    let Some(defense) = field.get(target).map(|c| c.stats.defense) else {
        return false;
    };
    let offense = Offense {
        attack: actor.stats.attack,
        crit_chance: actor.stats.crit_chance,
        crit_damage: actor.stats.crit_damage,
    };
    let hit = roll_hit(&mut ctx.rolls, id, offense, multiplier, defense);
    ctx.push_event(
        id,
        target,
        EventPayload::Damage {
            amount: hit.amount,
            critical: hit.critical,
        },
        EventMeta::default(),
    );
    roll_on_hit(ctx, field, id, &[target]);
    true
}

/// Rolls every on-hit passive of `id` once per target hit.
pub(crate) fn roll_on_hit(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    id: CombatantId,
    hit_targets: &[CombatantId],
) {
    let definitions = ctx.definitions();
    let Some(ability_ids) = field.get(id).map(|c| c.abilities.clone()) else {
        return;
    };

    for ability_id in &ability_ids {
        let Some(ability) = definitions.ability(ability_id) else {
            continue;
        };
        let AbilityTrigger::OnHit { chance } = ability.trigger else {
            continue;
        };
        for &target in hit_targets {
            if !ctx.rolls.chance(id, chance) {
                continue;
            }
            let targets = match ability.target {
                TargetScope::Single | TargetScope::RandomEnemy => vec![target],
                scope => {
                    let Some(actor) = field.get(id) else {
                        return;
                    };
                    select_targets(scope, actor, field, ctx.preferred_target, &mut ctx.rolls)
                }
            };
            ctx.log(format!("{} procs", ability.name));
            let cast = Cast {
                caster: id,
                ability: Some(ability.id.as_str()),
                effects: &ability.effects,
            };
            apply_effects(ctx, field, &cast, &targets);
        }
    }
}

/// Resets the basic-attack cooldown after any action.
pub(crate) fn finish_action(field: &mut Battlefield, id: CombatantId) {
    if let Some(actor) = field.get_mut(id) {
        actor.attack_cooldown_ms = actor.stats.attack_interval_ms();
    }
}

pub(crate) fn eligible(field: &Battlefield, id: CombatantId) -> bool {
    field.get(id).is_some_and(Combatant::can_act)
}

pub(crate) fn attack_ready(field: &Battlefield, id: CombatantId) -> bool {
    field.get(id).is_some_and(Combatant::attack_ready)
}
