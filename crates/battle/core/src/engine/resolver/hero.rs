use crate::ability::ClassBehavior;
use crate::effect::{TickContext, lowest_health_ally};
use crate::state::{Battlefield, CombatantId, EventMeta, EventPayload, Side};

use super::{ManaRule, attack_ready, basic_attack, eligible, finish_action, try_abilities};

/// Resolves one action for every eligible hero, in roster order.
pub fn resolve_heroes(ctx: &mut TickContext<'_>, field: &mut Battlefield) {
    for id in field.ids(Side::Hero) {
        if !eligible(field, id) {
            continue;
        }
        let acted = try_abilities(ctx, field, id, ManaRule::Pays)
            || (attack_ready(field, id)
                && (class_routine(ctx, field, id) || basic_attack(ctx, field, id, 1.0)));
        if acted {
            finish_action(field, id);
        }
    }
}

fn class_routine(ctx: &mut TickContext<'_>, field: &mut Battlefield, id: CombatantId) -> bool {
    let Some(hero) = field.get(id) else {
        return false;
    };
    let behavior = hero.hero().map(|h| h.behavior).unwrap_or_default();

    match behavior {
        ClassBehavior::None => false,
        ClassBehavior::Healer {
            heal_power,
            threshold_pct,
            weak_attack,
        } => {
            let wounded = lowest_health_ally(hero, field)
                .filter(|ally| field.get(*ally).is_some_and(|c| c.health_pct() < threshold_pct));
            match wounded {
                Some(ally) => {
                    let amount = (hero.stats.attack * heal_power).floor().max(0.0);
                    ctx.push_event(id, ally, EventPayload::Heal { amount }, EventMeta::default());
                    true
                }
                None => basic_attack(ctx, field, id, weak_attack),
            }
        }
        ClassBehavior::Warden { amount, threshold } => {
            let target = field
                .living(Side::Hero)
                .filter(|c| c.stats.max_shield > 0.0 && c.shield_ratio() < threshold)
                .min_by(|a, b| a.shield_ratio().total_cmp(&b.shield_ratio()))
                .map(|c| c.id);
            let Some(ally) = target else {
                return false;
            };
            ctx.push_event(
                id,
                ally,
                EventPayload::ShieldRestore { amount },
                EventMeta::default(),
            );
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDefinition, AbilityEffect, AbilityTrigger, TargetScope};
    use crate::config::BattleConfig;
    use crate::env::{BattleEnv, GlobalBonuses, PcgRng, StaticDefinitions};
    use crate::state::{
        BattleMode, BattleSnapshot, Combatant, CombatantKind, EnemyRank, EnemyState, HeroState,
    };
    use crate::stats::BaseStats;

    fn hero(id: u32, behavior: ClassBehavior) -> Combatant {
        Combatant::new(
            CombatantId(id),
            "cleric",
            "Cleric",
            CombatantKind::Hero(HeroState {
                level: 1,
                experience: 0,
                exp_to_next_level: 100,
                skill_points: 0,
                behavior,
            }),
            BaseStats {
                attack: 20.0,
                ..BaseStats::default()
            },
            1.0,
            1.5,
        )
    }

    fn enemy(id: u32) -> Combatant {
        Combatant::new(
            CombatantId(id),
            "rat",
            "Rat",
            CombatantKind::Enemy(EnemyState::new(EnemyRank::Normal, 0)),
            BaseStats::default(),
            1.0,
            1.5,
        )
    }

    fn resolve(field: &mut Battlefield) -> Vec<crate::state::AttackEvent> {
        resolve_with(&StaticDefinitions::new(), field)
    }

    fn resolve_with(
        defs: &StaticDefinitions,
        field: &mut Battlefield,
    ) -> Vec<crate::state::AttackEvent> {
        let bonuses = GlobalBonuses::default();
        let config = BattleConfig::default();
        let rng = PcgRng;
        let env = BattleEnv::new(defs, &bonuses, &rng, &config);
        let snapshot = BattleSnapshot::new(BattleMode::Wave { wave: 1 }, 3, field.clone());
        let mut ctx = TickContext::new(env, &snapshot, 100);
        resolve_heroes(&mut ctx, field);
        ctx.events.into_iter().collect()
    }

    #[test]
    fn healer_tends_wounded_ally_before_attacking() {
        let healer = ClassBehavior::Healer {
            heal_power: 1.5,
            threshold_pct: 50.0,
            weak_attack: 0.5,
        };
        let mut wounded = hero(1, ClassBehavior::None);
        wounded.health = 30.0;
        wounded.attack_cooldown_ms = 500;
        let mut field = Battlefield::new(vec![hero(0, healer), wounded], vec![enemy(2)]);

        let events = resolve(&mut field);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, CombatantId(1));
        assert_eq!(events[0].payload, EventPayload::Heal { amount: 30.0 });
        assert_eq!(field.heroes[0].attack_cooldown_ms, 1000);
    }

    #[test]
    fn healer_falls_back_to_weak_attack() {
        let healer = ClassBehavior::Healer {
            heal_power: 1.5,
            threshold_pct: 50.0,
            weak_attack: 0.5,
        };
        let mut field = Battlefield::new(vec![hero(0, healer)], vec![enemy(2)]);
        let events = resolve(&mut field);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].payload,
            EventPayload::Damage {
                amount: 10.0,
                critical: false
            }
        );
    }

    #[test]
    fn heroes_on_cooldown_do_not_act() {
        let mut busy = hero(0, ClassBehavior::None);
        busy.attack_cooldown_ms = 200;
        let mut field = Battlefield::new(vec![busy], vec![enemy(2)]);
        assert!(resolve(&mut field).is_empty());
    }

    #[test]
    fn ready_ability_ignores_basic_attack_cooldown() {
        let defs = StaticDefinitions::new().with_ability(AbilityDefinition {
            id: "zap".into(),
            name: "Zap".into(),
            trigger: AbilityTrigger::Active,
            target: TargetScope::Single,
            mana_cost: 0.0,
            cooldown_ms: 100,
            effects: vec![AbilityEffect::Damage { multiplier: 1.0 }],
        });
        let mut caster = hero(0, ClassBehavior::None).with_abilities(["zap".to_string()]);
        caster.attack_cooldown_ms = 900;
        let mut field = Battlefield::new(vec![caster], vec![enemy(2)]);

        let events = resolve_with(&defs, &mut field);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].payload,
            EventPayload::Damage {
                amount: 20.0,
                critical: false
            }
        );
        assert_eq!(field.heroes[0].cooldown("zap"), 100);
        assert_eq!(field.heroes[0].attack_cooldown_ms, 1000);
    }

    #[test]
    fn class_routine_waits_for_basic_attack_cooldown() {
        let mut warden = hero(
            0,
            ClassBehavior::Warden {
                amount: 10.0,
                threshold: 0.5,
            },
        );
        warden.attack_cooldown_ms = 400;
        let mut cracked = hero(1, ClassBehavior::None);
        cracked.stats.max_shield = 40.0;
        cracked.attack_cooldown_ms = 400;
        let mut field = Battlefield::new(vec![warden, cracked], vec![enemy(2)]);
        assert!(resolve(&mut field).is_empty());
    }

    #[test]
    fn warden_restores_the_most_depleted_shield() {
        let warden = ClassBehavior::Warden {
            amount: 15.0,
            threshold: 0.5,
        };
        let mut half = hero(1, ClassBehavior::None);
        half.stats.max_shield = 40.0;
        half.shield = 16.0;
        half.attack_cooldown_ms = 400;
        let mut empty = hero(2, ClassBehavior::None);
        empty.stats.max_shield = 40.0;
        empty.attack_cooldown_ms = 400;
        let mut field = Battlefield::new(vec![hero(0, warden), half, empty], vec![enemy(3)]);

        let events = resolve(&mut field);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, CombatantId(2));
        assert_eq!(events[0].payload, EventPayload::ShieldRestore { amount: 15.0 });
    }
}
