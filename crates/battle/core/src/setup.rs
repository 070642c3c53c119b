//! Bout construction from static templates.
//!
//! Unknown template ids are skipped with a warning and a battle-log line,
//! the same way the engine treats missing definitions mid-fight.

use crate::config::BattleConfig;
use crate::env::{DefinitionsOracle, EnemyTemplate, HeroTemplate};
use crate::error::{BattleIssue, DefinitionKind};
use crate::state::{
    BattleMode, BattleSnapshot, Battlefield, Combatant, CombatantId, CombatantKind, EnemyState,
    HeroState,
};

/// A hero to bring into a bout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroLoadout {
    pub id: String,
    pub level: u32,
}

impl HeroLoadout {
    pub fn new(id: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            level: level.max(1),
        }
    }
}

pub fn spawn_hero(
    template: &HeroTemplate,
    id: CombatantId,
    level: u32,
    config: &BattleConfig,
) -> Combatant {
    let level = level.max(1);
    let hero = HeroState {
        level,
        experience: 0,
        exp_to_next_level: template.exp_to_next_level,
        skill_points: 0,
        behavior: template.behavior,
    };
    Combatant::new(
        id,
        template.id.as_str(),
        template.name.as_str(),
        CombatantKind::Hero(hero),
        template.base.clone(),
        config.hero_scale(level),
        config.default_crit_damage,
    )
    .with_abilities(template.abilities.iter().cloned())
}

pub fn spawn_enemy(
    template: &EnemyTemplate,
    id: CombatantId,
    scale: f64,
    config: &BattleConfig,
) -> Combatant {
    Combatant::new(
        id,
        template.id.as_str(),
        template.name.as_str(),
        CombatantKind::Enemy(EnemyState::new(template.rank, template.phases.len())),
        template.base.clone(),
        scale,
        config.default_crit_damage,
    )
    .with_abilities(template.abilities.iter().cloned())
}

/// Spawns `lineup` at `scale`, allocating ids from `next_id`.
///
/// Returns the spawned enemies and one log line per unknown id.
pub fn spawn_lineup(
    definitions: &dyn DefinitionsOracle,
    config: &BattleConfig,
    lineup: &[String],
    scale: f64,
    next_id: &mut u32,
) -> (Vec<Combatant>, Vec<String>) {
    let mut enemies = Vec::with_capacity(lineup.len());
    let mut problems = Vec::new();
    for enemy_id in lineup {
        let Some(template) = definitions.enemy(enemy_id) else {
            let issue = BattleIssue::missing(DefinitionKind::Enemy, enemy_id.as_str());
            tracing::warn!("{issue}");
            problems.push(issue.to_string());
            continue;
        };
        enemies.push(spawn_enemy(template, CombatantId(*next_id), scale, config));
        *next_id += 1;
    }
    (enemies, problems)
}

fn spawn_bout(
    definitions: &dyn DefinitionsOracle,
    config: &BattleConfig,
    mode: BattleMode,
    seed: u64,
    heroes: &[HeroLoadout],
    enemies: &[String],
) -> BattleSnapshot {
    let mut next_id = 0;
    let mut problems = Vec::new();

    let mut roster = Vec::with_capacity(heroes.len());
    for loadout in heroes {
        let Some(template) = definitions.hero(&loadout.id) else {
            let issue = BattleIssue::missing(DefinitionKind::Hero, loadout.id.as_str());
            tracing::warn!("{issue}");
            problems.push(issue.to_string());
            continue;
        };
        roster.push(spawn_hero(template, CombatantId(next_id), loadout.level, config));
        next_id += 1;
    }

    let scale = mode.enemy_scale(config);
    let (foes, lineup_problems) = spawn_lineup(definitions, config, enemies, scale, &mut next_id);
    problems.extend(lineup_problems);

    let mut snapshot = BattleSnapshot::new(mode, seed, Battlefield::new(roster, foes));
    snapshot.next_instance_id = next_id;
    snapshot.log.extend(problems);
    tracing::info!(
        heroes = snapshot.field.heroes.len(),
        enemies = snapshot.field.enemies.len(),
        level = snapshot.mode.level(),
        "bout ready"
    );
    snapshot
}

/// Builds a wave bout. Enemies scale linearly with `wave`.
pub fn start_wave(
    definitions: &dyn DefinitionsOracle,
    config: &BattleConfig,
    seed: u64,
    wave: u32,
    heroes: &[HeroLoadout],
    enemies: &[String],
) -> BattleSnapshot {
    let mode = BattleMode::Wave { wave: wave.max(1) };
    spawn_bout(definitions, config, mode, seed, heroes, enemies)
}

/// Builds an endless bout starting at `rank`. The same lineup respawns one
/// rank higher every time it is cleared.
pub fn start_endless(
    definitions: &dyn DefinitionsOracle,
    config: &BattleConfig,
    seed: u64,
    rank: u32,
    heroes: &[HeroLoadout],
    lineup: &[String],
) -> BattleSnapshot {
    let mode = BattleMode::Endless {
        rank: rank.max(1),
        lineup: lineup.to_vec(),
    };
    spawn_bout(definitions, config, mode, seed, heroes, lineup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticDefinitions;
    use crate::stats::BaseStats;

    fn definitions() -> StaticDefinitions {
        StaticDefinitions::new()
            .with_hero(HeroTemplate {
                id: "knight".into(),
                name: "Knight".into(),
                base: BaseStats::default(),
                abilities: Vec::new(),
                behavior: Default::default(),
                exp_to_next_level: 100,
            })
            .with_enemy(EnemyTemplate {
                id: "rat".into(),
                name: "Rat".into(),
                base: BaseStats {
                    max_health: 20.0,
                    ..BaseStats::default()
                },
                rank: Default::default(),
                abilities: Vec::new(),
                gold: 1,
                experience: 5,
                loot: Vec::new(),
                phases: Vec::new(),
            })
    }

    #[test]
    fn wave_scales_enemies_and_allocates_unique_ids() {
        let defs = definitions();
        let config = BattleConfig::default();
        let snapshot = start_wave(
            &defs,
            &config,
            7,
            3,
            &[HeroLoadout::new("knight", 1)],
            &["rat".to_string(), "rat".to_string()],
        );
        assert_eq!(snapshot.heroes().len(), 1);
        assert_eq!(snapshot.enemies().len(), 2);
        assert_eq!(snapshot.enemies()[1].id, CombatantId(2));
        assert_eq!(snapshot.next_instance_id, 3);
        let expected = 20.0 * (1.0 + 2.0 * config.wave_stat_growth);
        assert!((snapshot.enemies()[0].stats.max_health - expected).abs() < 1e-9);
    }

    #[test]
    fn unknown_templates_are_logged_and_skipped() {
        let defs = definitions();
        let config = BattleConfig::default();
        let snapshot = start_wave(
            &defs,
            &config,
            7,
            1,
            &[HeroLoadout::new("ghost", 1)],
            &["rat".to_string(), "dragon".to_string()],
        );
        assert!(snapshot.heroes().is_empty());
        assert_eq!(snapshot.enemies().len(), 1);
        assert_eq!(snapshot.log.len(), 2);
    }
}
