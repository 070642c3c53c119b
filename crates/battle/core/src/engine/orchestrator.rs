//! Fixed per-tick sequence and the wave/endless fold.

use crate::config::BattleConfig;
use crate::effect::TickContext;
use crate::env::BattleEnv;
use crate::setup::spawn_lineup;
use crate::state::{BattleMode, BattleSnapshot, BattleStatus, Battlefield, RewardLedger};

use super::TickOutcome;
use super::events::process_events;
use super::recompute::apply_recompute;
use super::resolver::{resolve_enemies, resolve_heroes};
use super::rewards::distribute_rewards;
use super::status::evaluate;
use super::updater::update_participants;

pub(super) fn run_tick(env: BattleEnv<'_>, mut snapshot: BattleSnapshot, tick_ms: u32) -> TickOutcome {
    if snapshot.status.is_terminal() {
        return TickOutcome {
            snapshot,
            rewards: Vec::new(),
        };
    }

    let mut ctx = TickContext::new(env, &snapshot, tick_ms);
    let _span = tracing::debug_span!("tick", tick = ctx.tick.0).entered();

    update_participants(&mut ctx, &mut snapshot.field);
    resolve_heroes(&mut ctx, &mut snapshot.field);
    resolve_enemies(&mut ctx, &mut snapshot.field);
    merge_spawned(&mut ctx, &mut snapshot.field);

    process_events(&mut ctx, &mut snapshot.field);
    merge_spawned(&mut ctx, &mut snapshot.field);
    apply_recompute(&mut ctx, &mut snapshot.field);

    let difficulty = snapshot.mode.difficulty(env.config);
    distribute_rewards(
        &mut ctx,
        &mut snapshot.field,
        &mut snapshot.bout,
        &mut snapshot.known_enemy_types,
        difficulty,
    );
    apply_recompute(&mut ctx, &mut snapshot.field);
    settle_defeated(&mut snapshot.field, env.config);

    let status = evaluate(&snapshot.field);
    ctx.store_counters(&mut snapshot);
    snapshot.tick = ctx.tick;
    conclude(&mut ctx, &mut snapshot, status);

    fold(ctx, snapshot)
}

fn merge_spawned(ctx: &mut TickContext<'_>, field: &mut Battlefield) {
    for unit in std::mem::take(&mut ctx.spawned) {
        field.insert(unit);
    }
}

/// Starts death animations for newly defeated enemies and prunes those whose
/// animation finished, along with retired (transformed) ones.
fn settle_defeated(field: &mut Battlefield, config: &BattleConfig) {
    for enemy in field.enemies.iter_mut().filter(|c| c.health <= 0.0) {
        if let Some(state) = enemy.enemy_mut() {
            if state.death_ticks.is_none() && !state.retired {
                state.death_ticks = Some(config.death_animation_ticks);
            }
        }
    }
    field.enemies.retain(|c| {
        c.enemy()
            .is_none_or(|e| !e.retired && e.death_ticks != Some(0))
    });
}

fn conclude(ctx: &mut TickContext<'_>, snapshot: &mut BattleSnapshot, status: BattleStatus) {
    match status {
        BattleStatus::Fighting => {}
        BattleStatus::Victory if matches!(snapshot.mode, BattleMode::Endless { .. }) => {
            advance_rank(ctx, snapshot);
        }
        BattleStatus::Victory | BattleStatus::Defeat => {
            if status == BattleStatus::Victory {
                snapshot.bout.bouts_cleared += 1;
            }
            snapshot.session.absorb(&snapshot.bout);
            snapshot.status = status;
            ctx.log(format!("{status}!"));
            tracing::info!(
                tick = ctx.tick.0,
                %status,
                defeated = snapshot.bout.defeated,
                experience = snapshot.bout.experience,
                "bout finished"
            );
        }
    }
}

/// Endless mode: fold the cleared bout, bump the rank and respawn the lineup.
/// Heroes carry over untouched.
fn advance_rank(ctx: &mut TickContext<'_>, snapshot: &mut BattleSnapshot) {
    let config = ctx.config();
    let BattleMode::Endless { rank, lineup } = &mut snapshot.mode else {
        return;
    };
    let cleared = *rank;
    *rank += 1;
    let lineup = lineup.clone();

    snapshot.bout.bouts_cleared += 1;
    snapshot.session.absorb(&snapshot.bout);
    snapshot.bout = RewardLedger::default();

    let scale = snapshot.mode.enemy_scale(config);
    let (enemies, problems) = spawn_lineup(
        ctx.definitions(),
        config,
        &lineup,
        scale,
        &mut snapshot.next_instance_id,
    );
    for line in problems {
        ctx.log(line);
    }

    if enemies.is_empty() {
        // Nothing left to fight: the session ends on this clear.
        snapshot.status = BattleStatus::Victory;
        ctx.log("Victory!");
        return;
    }
    snapshot.field.enemies.extend(enemies);
    ctx.log(format!("Rank {cleared} cleared, rank {} begins", cleared + 1));
    tracing::info!(tick = ctx.tick.0, rank = cleared + 1, "endless rank advanced");
}

fn fold(ctx: TickContext<'_>, mut snapshot: BattleSnapshot) -> TickOutcome {
    let config = ctx.config();
    snapshot.log.extend(ctx.log);
    snapshot.log.truncate(config.log_capacity);

    snapshot.recent_events.extend(ctx.processed);
    while snapshot.recent_events.len() > config.event_history {
        snapshot.recent_events.pop_front();
    }

    TickOutcome {
        snapshot,
        rewards: ctx.rewards,
    }
}
