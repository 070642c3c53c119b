//! Loot and experience for enemies defeated this tick.

use std::collections::BTreeSet;

use crate::config::BattleConfig;
use crate::effect::TickContext;
use crate::env::EnemyTemplate;
use crate::error::{BattleIssue, DefinitionKind};
use crate::state::{
    Battlefield, CombatantId, DeferredReward, EnemyRank, HeroState, RewardLedger, Side,
};

/// Levels reached by one experience grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

impl LevelUp {
    pub fn gained(&self) -> u32 {
        self.to - self.from
    }

    /// How many levels in `(from, to]` are multiples of `interval`.
    pub fn milestones(&self, interval: u32) -> u32 {
        if interval == 0 {
            return 0;
        }
        self.to / interval - self.from / interval
    }
}

/// Adds experience and runs the level-up cascade.
///
/// While experience covers the current requirement it is subtracted, the
/// level goes up and one skill point is granted. The requirement itself grows
/// by `exp_growth` per level once the cascade is done.
pub fn grant_experience(hero: &mut HeroState, amount: u64, config: &BattleConfig) -> LevelUp {
    let from = hero.level;
    hero.experience += amount;

    let requirement = hero.exp_to_next_level;
    if requirement > 0 {
        while hero.experience >= requirement {
            hero.experience -= requirement;
            hero.level += 1;
            hero.skill_points += 1;
        }
    }

    let gained = hero.level - from;
    if gained > 0 {
        let growth = config.exp_growth.powi(gained as i32);
        hero.exp_to_next_level = ((requirement as f64) * growth).round().max(1.0) as u64;
    }
    LevelUp {
        from,
        to: hero.level,
    }
}

fn rank_multiplier(rank: EnemyRank, config: &BattleConfig) -> f64 {
    match rank {
        EnemyRank::Normal => 1.0,
        EnemyRank::Elite => config.elite_reward_multiplier,
        EnemyRank::Boss => config.boss_reward_multiplier,
    }
}

fn scaled(amount: u64, factor: f64) -> u64 {
    ((amount as f64) * factor).round().max(0.0) as u64
}

/// Distributes rewards for every enemy that reached zero health and has not
/// been recorded yet.
///
/// Loot lands in `bout`; side effects for the economy layer are pushed to
/// `ctx.rewards`.
pub fn distribute_rewards(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    bout: &mut RewardLedger,
    known_enemy_types: &mut BTreeSet<String>,
    difficulty: f64,
) {
    let defeated: Vec<(CombatantId, String)> = field
        .enemies
        .iter_mut()
        .filter(|c| c.health <= 0.0)
        .filter_map(|c| {
            let state = c.enemy_mut()?;
            if state.defeat_recorded || state.retired {
                return None;
            }
            state.defeat_recorded = true;
            Some((c.id, c.definition_id.clone()))
        })
        .collect();

    for (id, definition_id) in defeated {
        bout.defeated += 1;
        let Some(template) = ctx.definitions().enemy(&definition_id) else {
            ctx.report(BattleIssue::missing(DefinitionKind::Enemy, definition_id.as_str()));
            continue;
        };
        reward_defeat(ctx, field, bout, known_enemy_types, difficulty, id, template);
    }
}

fn reward_defeat(
    ctx: &mut TickContext<'_>,
    field: &mut Battlefield,
    bout: &mut RewardLedger,
    known_enemy_types: &mut BTreeSet<String>,
    difficulty: f64,
    id: CombatantId,
    template: &EnemyTemplate,
) {
    let config = ctx.config();
    let bonuses = *ctx.env.bonuses;
    let factor = difficulty * rank_multiplier(template.rank, config);

    let gold = scaled(template.gold, factor * bonuses.gold_multiplier());
    bout.add_loot("gold", gold);
    for entry in &template.loot {
        if !ctx.rolls.chance(id, entry.chance) {
            continue;
        }
        let quantity = ctx.rolls.range(id, entry.min, entry.max.max(entry.min));
        let amount = scaled(u64::from(quantity), factor);
        bout.add_loot(&entry.item, amount);
        if amount > 0 {
            ctx.log(format!("{} dropped {amount} {}", template.name, entry.item));
        }
    }

    let experience = scaled(template.experience, factor * bonuses.xp_multiplier());
    bout.experience += experience;
    if experience > 0 {
        ctx.rewards.push(DeferredReward::RunExperience { amount: experience });
    }

    if known_enemy_types.insert(template.id.clone()) && config.first_kill_account_exp > 0 {
        ctx.log(format!("First victory over {}!", template.name));
        ctx.rewards.push(DeferredReward::AccountExperience {
            amount: config.first_kill_account_exp,
            enemy_type: template.id.clone(),
        });
    }

    if ctx.rolls.chance(id, config.spoils_of_war_chance) {
        let buildings = ctx.definitions().buildings();
        if let Some(index) = ctx.rolls.pick(id, buildings.len()) {
            let building = buildings[index].clone();
            ctx.log(format!("Spoils of war: {building} gains a level"));
            ctx.rewards.push(DeferredReward::BuildingLevelUp { building });
        }
    }

    split_experience(ctx, field, experience);
}

/// Splits experience evenly (integer floor) across living heroes.
fn split_experience(ctx: &mut TickContext<'_>, field: &mut Battlefield, experience: u64) {
    let config = ctx.config();
    let living = field.ids(Side::Hero);
    let living: Vec<CombatantId> = living
        .into_iter()
        .filter(|id| field.get(*id).is_some_and(|c| c.is_alive()))
        .collect();
    if living.is_empty() {
        return;
    }
    let share = experience / living.len() as u64;

    let mut shared_points = 0;
    for id in living {
        let Some(unit) = field.get_mut(id) else {
            continue;
        };
        let name = unit.name.clone();
        let Some(hero) = unit.hero_mut() else {
            continue;
        };
        let level_up = grant_experience(hero, share, config);
        if level_up.gained() > 0 {
            shared_points += level_up.milestones(config.shared_skill_point_interval);
            ctx.log(format!("{name} reaches level {}", level_up.to));
            ctx.mark_recompute(id);
        }
    }
    if shared_points > 0 {
        ctx.rewards.push(DeferredReward::SharedSkillPoints {
            amount: shared_points,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::ClassBehavior;

    fn hero(experience: u64, exp_to_next_level: u64) -> HeroState {
        HeroState {
            level: 1,
            experience,
            exp_to_next_level,
            skill_points: 0,
            behavior: ClassBehavior::None,
        }
    }

    #[test]
    fn banked_experience_cascades_without_new_grant() {
        let config = BattleConfig::default();
        let mut state = hero(250, 100);
        let level_up = grant_experience(&mut state, 0, &config);
        assert_eq!(level_up.gained(), 2);
        assert_eq!(state.level, 3);
        assert_eq!(state.experience, 50);
        assert_eq!(state.skill_points, 2);
    }

    #[test]
    fn requirement_grows_after_cascade() {
        let config = BattleConfig::default();
        let mut state = hero(0, 100);
        grant_experience(&mut state, 100, &config);
        assert_eq!(state.exp_to_next_level, 115);
    }

    #[test]
    fn milestones_count_multiples_crossed() {
        let level_up = LevelUp { from: 9, to: 21 };
        assert_eq!(level_up.milestones(10), 2);
        assert_eq!(level_up.milestones(0), 0);
    }
}
