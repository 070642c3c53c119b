//! Damage formula and critical rolls.

use crate::env::RollStream;
use crate::state::CombatantId;

/// Attacker numbers needed to resolve one hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offense {
    pub attack: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
}

/// A resolved hit before it is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub amount: f64,
    pub critical: bool,
}

/// Computes raw damage for a single hit.
///
/// # Formula
///
/// ```text
/// damage = max(1, floor(attack × multiplier − defense))
/// if critical:
///     damage = floor(damage × crit_damage)
/// ```
pub fn calculate_damage(attack: f64, multiplier: f64, defense: f64, crit: Option<f64>) -> f64 {
    let base = (attack * multiplier - defense).floor().max(1.0);
    match crit {
        Some(crit_damage) => (base * crit_damage).floor().max(1.0),
        None => base,
    }
}

/// Rolls a crit for `attacker` and resolves the hit against `defense`.
pub fn roll_hit(
    rolls: &mut RollStream<'_>,
    attacker: CombatantId,
    offense: Offense,
    multiplier: f64,
    defense: f64,
) -> Hit {
    let critical = rolls.chance(attacker, offense.crit_chance);
    let amount = calculate_damage(
        offense.attack,
        multiplier,
        defense,
        critical.then_some(offense.crit_damage),
    );
    Hit { amount, critical }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::Tick;

    #[test]
    fn damage_is_floored_and_at_least_one() {
        assert_eq!(calculate_damage(50.0, 1.0, 10.0, None), 40.0);
        assert_eq!(calculate_damage(12.7, 1.0, 2.0, None), 10.0);
        assert_eq!(calculate_damage(5.0, 1.0, 100.0, None), 1.0);
    }

    #[test]
    fn crit_multiplies_after_defense() {
        assert_eq!(calculate_damage(50.0, 1.0, 10.0, Some(1.5)), 60.0);
    }

    #[test]
    fn zero_crit_chance_never_crits() {
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, 5, Tick(1));
        let offense = Offense {
            attack: 20.0,
            crit_chance: 0.0,
            crit_damage: 2.0,
        };
        for _ in 0..32 {
            assert!(!roll_hit(&mut rolls, CombatantId(1), offense, 1.0, 0.0).critical);
        }
    }
}
