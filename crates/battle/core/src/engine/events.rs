//! Event processor.
//!
//! Applies the tick's attack events strictly in sequence order: later events
//! see the state earlier ones left behind. Events appended while processing
//! (for example by a phase effect) are handled in the same pass.

use crate::combat::absorb_damage;
use crate::effect::{Cast, TickContext, apply_effects, select_targets};
use crate::error::{BattleIssue, DefinitionKind};
use crate::state::{AttackEvent, Battlefield, CombatantId, EventPayload};

pub fn process_events(ctx: &mut TickContext<'_>, field: &mut Battlefield) {
    while let Some(event) = ctx.events.pop_front() {
        if apply_event(ctx, field, &event) {
            ctx.processed.push(event);
        }
    }
}

/// Applies one event; returns `false` if it was dropped.
fn apply_event(ctx: &mut TickContext<'_>, field: &mut Battlefield, event: &AttackEvent) -> bool {
    let attacker = field
        .get(event.attacker)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Something".to_string());
    let invulnerable = ctx.env.rules.invulnerable_heroes;

    // Events never revive or further damage a defeated combatant.
    let Some(target) = field.get_mut(event.target).filter(|c| c.is_alive()) else {
        ctx.report(BattleIssue::InvalidTarget { id: event.target });
        return false;
    };

    match event.payload {
        EventPayload::Heal { amount } => {
            let before = target.health;
            target.health = (target.health + amount).min(target.stats.max_health);
            ctx.log(format!(
                "{attacker} heals {} for {:.0}",
                target.name,
                target.health - before
            ));
        }
        EventPayload::ShieldRestore { amount } => {
            let before = target.shield;
            target.shield = (target.shield + amount).min(target.stats.max_shield);
            ctx.log(format!(
                "{attacker} restores {:.0} shield to {}",
                target.shield - before,
                target.name
            ));
        }
        EventPayload::Damage { amount, critical } => {
            if invulnerable && target.is_hero() {
                ctx.log(format!("{} is unharmed", target.name));
                return true;
            }

            let split = absorb_damage(amount, &mut target.shield, &mut target.health);
            if split.landed() {
                target.shield_delay_ms = target.stats.shield_delay_ms;
            }

            let line = if event.meta.damage_over_time {
                let source = event.meta.ability.as_deref().unwrap_or("an effect");
                format!("{} takes {amount:.0} from {source}", target.name)
            } else {
                let crit = if critical { " (critical)" } else { "" };
                format!("{attacker} hits {} for {amount:.0}{crit}", target.name)
            };
            ctx.log(line);
            if split.absorbed > 0.0 {
                ctx.log(format!("{} absorbs {:.0}", target.name, split.absorbed));
            }

            if target.health <= 0.0 {
                ctx.log(format!("{} is defeated", target.name));
            } else if !target.is_hero() {
                let id = target.id;
                check_phases(ctx, field, id);
            }
        }
    }
    true
}

/// Fires the first untriggered phase whose threshold the enemy is at or
/// below. Each phase fires at most once per instance.
fn check_phases(ctx: &mut TickContext<'_>, field: &mut Battlefield, id: CombatantId) {
    let definitions = ctx.definitions();
    let Some(enemy) = field.get(id) else {
        return;
    };
    let Some(state) = enemy.enemy() else {
        return;
    };
    if state.phases_triggered.is_empty() {
        return;
    }
    let Some(template) = definitions.enemy(&enemy.definition_id) else {
        ctx.report(BattleIssue::missing(
            DefinitionKind::Enemy,
            enemy.definition_id.as_str(),
        ));
        return;
    };

    let health_pct = enemy.health_pct();
    let next = template.phases.iter().enumerate().find(|(index, phase)| {
        !state.phases_triggered.get(*index).copied().unwrap_or(true)
            && phase.threshold_pct >= health_pct
    });
    let Some((index, phase)) = next else {
        return;
    };

    let targets = select_targets(phase.target, enemy, field, None, &mut ctx.rolls);
    ctx.log(format!("{} enters phase {}", enemy.name, index + 1));
    tracing::debug!(enemy = %id, phase = index, health_pct, "phase triggered");

    if let Some(flag) = field
        .get_mut(id)
        .and_then(|c| c.enemy_mut())
        .and_then(|e| e.phases_triggered.get_mut(index))
    {
        *flag = true;
    }

    let cast = Cast {
        caster: id,
        ability: None,
        effects: &phase.effects,
    };
    apply_effects(ctx, field, &cast, &targets);
}
