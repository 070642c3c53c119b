//! Target selection for abilities and basic attacks.

use crate::ability::TargetScope;
use crate::env::RollStream;
use crate::state::{Battlefield, Combatant, CombatantId};

/// Picks the opponent a single-target action lands on.
///
/// Heroes honour the player's preferred enemy unless some enemy is taunting;
/// enemies go for a taunting hero. Everyone else picks at random.
pub fn single_opponent(
    caster: &Combatant,
    field: &Battlefield,
    preferred: Option<CombatantId>,
    rolls: &mut RollStream<'_>,
) -> Option<CombatantId> {
    let opponents: Vec<&Combatant> = field.living(caster.side().opponent()).collect();
    if opponents.is_empty() {
        return None;
    }

    if let Some(taunting) = opponents.iter().find(|c| c.is_taunting()) {
        return Some(taunting.id);
    }

    if caster.is_hero() {
        if let Some(id) = preferred.filter(|id| opponents.iter().any(|c| c.id == *id)) {
            return Some(id);
        }
    }

    let index = rolls.pick(caster.id, opponents.len())?;
    Some(opponents[index].id)
}

/// Living ally with the lowest health percentage, first in roster order on ties.
pub fn lowest_health_ally(caster: &Combatant, field: &Battlefield) -> Option<CombatantId> {
    field
        .living(caster.side())
        .min_by(|a, b| a.health_pct().total_cmp(&b.health_pct()))
        .map(|c| c.id)
}

/// Resolves a target scope into concrete ids.
///
/// An empty result means the action has nothing to land on and should not
/// fire.
pub fn select_targets(
    scope: TargetScope,
    caster: &Combatant,
    field: &Battlefield,
    preferred: Option<CombatantId>,
    rolls: &mut RollStream<'_>,
) -> Vec<CombatantId> {
    match scope {
        TargetScope::Single => single_opponent(caster, field, preferred, rolls)
            .into_iter()
            .collect(),
        TargetScope::AllEnemies => field
            .living(caster.side().opponent())
            .map(|c| c.id)
            .collect(),
        TargetScope::RandomEnemy => {
            let opponents: Vec<CombatantId> = field
                .living(caster.side().opponent())
                .map(|c| c.id)
                .collect();
            rolls
                .pick(caster.id, opponents.len())
                .map(|index| opponents[index])
                .into_iter()
                .collect()
        }
        TargetScope::AllAllies => field.living(caster.side()).map(|c| c.id).collect(),
        TargetScope::LowestHealthAlly => lowest_health_ally(caster, field).into_iter().collect(),
        TargetScope::Caster => vec![caster.id],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{CombatantKind, EnemyRank, EnemyState, HeroState, Tick};
    use crate::stats::BaseStats;

    fn hero(id: u32) -> Combatant {
        Combatant::new(
            CombatantId(id),
            "knight",
            "Knight",
            CombatantKind::Hero(HeroState {
                level: 1,
                experience: 0,
                exp_to_next_level: 100,
                skill_points: 0,
                behavior: Default::default(),
            }),
            BaseStats::default(),
            1.0,
            1.5,
        )
    }

    fn enemy(id: u32) -> Combatant {
        Combatant::new(
            CombatantId(id),
            "goblin",
            "Goblin",
            CombatantKind::Enemy(EnemyState::new(EnemyRank::Normal, 0)),
            BaseStats::default(),
            1.0,
            1.5,
        )
    }

    #[test]
    fn taunt_overrides_preferred_target() {
        let mut taunter = enemy(3);
        taunter.taunt_ms = 1000;
        let field = Battlefield::new(vec![hero(0)], vec![enemy(2), taunter]);
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, 1, Tick(1));
        let target = single_opponent(&field.heroes[0], &field, Some(CombatantId(2)), &mut rolls);
        assert_eq!(target, Some(CombatantId(3)));
    }

    #[test]
    fn heroes_honour_living_preferred_target() {
        let field = Battlefield::new(vec![hero(0)], vec![enemy(2), enemy(3)]);
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, 1, Tick(1));
        let target = single_opponent(&field.heroes[0], &field, Some(CombatantId(3)), &mut rolls);
        assert_eq!(target, Some(CombatantId(3)));
    }

    #[test]
    fn lowest_health_ally_uses_percentage() {
        let mut wounded = hero(1);
        wounded.health = 40.0;
        let field = Battlefield::new(vec![hero(0), wounded], vec![enemy(2)]);
        assert_eq!(
            lowest_health_ally(&field.heroes[0], &field),
            Some(CombatantId(1))
        );
    }

    #[test]
    fn no_living_opponents_yields_no_targets() {
        let mut dead = enemy(2);
        dead.health = 0.0;
        let field = Battlefield::new(vec![hero(0)], vec![dead]);
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, 1, Tick(1));
        assert!(
            select_targets(TargetScope::AllEnemies, &field.heroes[0], &field, None, &mut rolls)
                .is_empty()
        );
    }
}
