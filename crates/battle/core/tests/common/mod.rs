#![allow(dead_code)]

use battle_core::{
    AbilityDefinition, AbilityEffect, AbilityTrigger, BaseStats, BattleConfig, BattleEngine,
    BattleEnv, BattleSnapshot, ChannelFlags, ChannelSpec, ClassBehavior, DotSpec, EnemyRank,
    EnemyTemplate, GlobalBonuses, HeroLoadout, HeroTemplate, LootEntry, PcgRng, PhaseDefinition,
    StaticDefinitions, StatKind, StatModifier, StatusKind, StatusTemplate, TargetScope,
    TickOutcome,
};

/// Owns everything an engine borrows.
pub struct World {
    pub definitions: StaticDefinitions,
    pub bonuses: GlobalBonuses,
    pub config: BattleConfig,
    pub rng: PcgRng,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(BattleConfig::default())
    }

    pub fn with_config(config: BattleConfig) -> Self {
        Self {
            definitions: definitions(),
            bonuses: GlobalBonuses::default(),
            config,
            rng: PcgRng,
        }
    }

    pub fn engine(&self) -> BattleEngine<'_> {
        BattleEngine::new(BattleEnv::new(
            &self.definitions,
            &self.bonuses,
            &self.rng,
            &self.config,
        ))
    }

    pub fn wave(&self, wave: u32, heroes: &[(&str, u32)], enemies: &[&str]) -> BattleSnapshot {
        battle_core::start_wave(
            &self.definitions,
            &self.config,
            42,
            wave,
            &loadouts(heroes),
            &ids(enemies),
        )
    }

    pub fn endless(&self, rank: u32, heroes: &[(&str, u32)], lineup: &[&str]) -> BattleSnapshot {
        battle_core::start_endless(
            &self.definitions,
            &self.config,
            42,
            rank,
            &loadouts(heroes),
            &ids(lineup),
        )
    }

    /// Runs `count` ticks, returning the final outcome of the last one.
    pub fn run(&self, mut snapshot: BattleSnapshot, tick_ms: u32, count: usize) -> TickOutcome {
        let engine = self.engine();
        let mut rewards = Vec::new();
        for _ in 0..count {
            let outcome = engine.advance(snapshot, tick_ms);
            rewards.extend(outcome.rewards);
            snapshot = outcome.snapshot;
        }
        TickOutcome { snapshot, rewards }
    }
}

fn loadouts(heroes: &[(&str, u32)]) -> Vec<HeroLoadout> {
    heroes
        .iter()
        .map(|(id, level)| HeroLoadout::new(*id, *level))
        .collect()
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn hero(id: &str, name: &str, base: BaseStats, abilities: &[&str]) -> HeroTemplate {
    HeroTemplate {
        id: id.into(),
        name: name.into(),
        base,
        abilities: ids(abilities),
        behavior: Default::default(),
        exp_to_next_level: 100,
    }
}

fn enemy(id: &str, name: &str, base: BaseStats, gold: u64, experience: u64) -> EnemyTemplate {
    EnemyTemplate {
        id: id.into(),
        name: name.into(),
        base,
        rank: EnemyRank::Normal,
        abilities: Vec::new(),
        gold,
        experience,
        loot: Vec::new(),
        phases: Vec::new(),
    }
}

fn ability(
    id: &str,
    name: &str,
    trigger: AbilityTrigger,
    target: TargetScope,
    cooldown_ms: u32,
    effects: Vec<AbilityEffect>,
) -> AbilityDefinition {
    AbilityDefinition {
        id: id.into(),
        name: name.into(),
        trigger,
        target,
        mana_cost: 0.0,
        cooldown_ms,
        effects,
    }
}

fn status(id: &str, name: &str, kind: StatusKind, duration_ms: u32) -> StatusTemplate {
    StatusTemplate {
        id: id.into(),
        name: name.into(),
        kind,
        duration_ms,
        modifier: None,
        dot: None,
        on_expire: Vec::new(),
    }
}

fn stats(max_health: f64, attack: f64) -> BaseStats {
    BaseStats {
        max_health,
        attack,
        ..BaseStats::default()
    }
}

/// Content used across the scenario tests.
///
/// Every unit has zero crit chance unless noted, so hits are exact.
pub fn definitions() -> StaticDefinitions {
    let mut rat = enemy("rat", "Rat", stats(20.0, 5.0), 10, 40);
    rat.loot.push(LootEntry {
        item: "hide".into(),
        chance: 1.0,
        min: 2,
        max: 2,
    });

    let mut warlord = enemy("warlord", "Warlord", stats(100.0, 10.0), 50, 10);
    warlord.phases.push(PhaseDefinition {
        threshold_pct: 50.0,
        target: TargetScope::Caster,
        effects: vec![AbilityEffect::BuffStats {
            name: "Enrage".into(),
            modifier: StatModifier::percent(StatKind::Attack, 50.0),
            duration_ms: 10_000,
        }],
    });

    let mut brute = enemy(
        "brute",
        "Brute",
        BaseStats {
            max_health: 150.0,
            attack: 12.0,
            crit_chance: 0.3,
            health_regen: 2.0,
            ..BaseStats::default()
        },
        5,
        5,
    );
    brute.rank = EnemyRank::Elite;

    let mut jailer = enemy("jailer", "Jailer", stats(500.0, 1.0), 0, 0);
    jailer.abilities.push("bash".into());

    let mut king = enemy("king", "King", stats(100.0, 0.0), 0, 0);
    king.phases.push(PhaseDefinition {
        threshold_pct: 50.0,
        target: TargetScope::Caster,
        effects: vec![AbilityEffect::Summon {
            enemy: "dummy".into(),
            count: 2,
        }],
    });

    let mut necromancer = enemy("necromancer", "Necromancer", stats(1000.0, 0.0), 0, 0);
    necromancer.abilities.push("raise".into());

    let mut egg = enemy("egg", "Egg", stats(200.0, 0.0), 99, 99);
    egg.abilities.push("incubate".into());

    let mut sentinel = hero("sentinel", "Sentinel", stats(100.0, 10.0), &[]);
    sentinel.behavior = ClassBehavior::Warden {
        amount: 10.0,
        threshold: 0.5,
    };

    let mut poison = status("poison", "Poison", StatusKind::DamageOverTime, 3000);
    poison.dot = Some(DotSpec {
        damage: 5.0,
        interval_ms: 1000,
    });

    let mut hatching = status("hatching", "Hatching", StatusKind::Buff, 2000);
    hatching.on_expire.push(AbilityEffect::Transform {
        into: "wall".into(),
    });

    StaticDefinitions::new()
        .with_hero(hero(
            "knight",
            "Knight",
            BaseStats {
                max_health: 200.0,
                attack: 30.0,
                max_shield: 30.0,
                shield_recharge: 5.0,
                shield_delay_ms: 2000,
                ..BaseStats::default()
            },
            &[],
        ))
        .with_hero(hero(
            "mage",
            "Mage",
            BaseStats {
                max_health: 120.0,
                max_mana: 100.0,
                mana_regen: 5.0,
                attack: 20.0,
                ..BaseStats::default()
            },
            &["blizzard"],
        ))
        .with_hero(hero("forgetful", "Forgetful", stats(100.0, 10.0), &["ghost_bolt"]))
        .with_hero(hero("squire", "Squire", stats(100.0, 20.0), &[]))
        .with_hero(hero("duelist", "Duelist", stats(100.0, 30.0), &["zap"]))
        .with_hero(hero("warlock", "Warlock", stats(100.0, 20.0), &["drain"]))
        .with_hero(hero(
            "bard",
            "Bard",
            BaseStats {
                max_mana: 50.0,
                ..stats(100.0, 10.0)
            },
            &["anthem", "dirge"],
        ))
        .with_hero(hero("rogue", "Rogue", stats(100.0, 10.0), &["venom", "flurry"]))
        .with_hero(sentinel)
        .with_enemy(rat)
        .with_enemy(warlord)
        .with_enemy(brute)
        .with_enemy(jailer)
        .with_enemy(enemy("ogre", "Ogre", stats(20.0, 0.0), 0, 250))
        .with_enemy(enemy("dummy", "Dummy", stats(100.0, 0.0), 0, 0))
        .with_enemy(enemy("wall", "Wall", stats(1000.0, 20.0), 0, 0))
        .with_enemy(king)
        .with_enemy(necromancer)
        .with_enemy(egg)
        .with_ability(AbilityDefinition {
            id: "blizzard".into(),
            name: "Blizzard".into(),
            trigger: AbilityTrigger::Active,
            target: TargetScope::AllEnemies,
            mana_cost: 0.0,
            cooldown_ms: 8000,
            effects: vec![AbilityEffect::TriggerChannel(ChannelSpec {
                duration_ms: 3000,
                tick_interval_ms: Some(1000),
                on_tick: vec![AbilityEffect::Damage { multiplier: 0.5 }],
                on_interrupt: vec![AbilityEffect::Damage { multiplier: 2.0 }],
                ..ChannelSpec::default()
            })],
        })
        .with_ability(AbilityDefinition {
            id: "bash".into(),
            name: "Shield Bash".into(),
            trigger: AbilityTrigger::Active,
            target: TargetScope::Single,
            mana_cost: 0.0,
            cooldown_ms: 10_000,
            effects: vec![AbilityEffect::ApplyStatus {
                status: "stun".into(),
            }],
        })
        .with_ability(ability(
            "zap",
            "Zap",
            AbilityTrigger::Active,
            TargetScope::Single,
            100,
            vec![AbilityEffect::Damage { multiplier: 1.0 }],
        ))
        .with_ability(ability(
            "drain",
            "Drain",
            AbilityTrigger::Active,
            TargetScope::Single,
            5000,
            vec![AbilityEffect::TriggerChannel(ChannelSpec {
                duration_ms: 3000,
                tick_interval_ms: Some(1000),
                on_tick: vec![AbilityEffect::Damage { multiplier: 0.5 }],
                on_complete: vec![AbilityEffect::Damage { multiplier: 2.0 }],
                flags: ChannelFlags::BLOCKS_ACTIONS,
                ..ChannelSpec::default()
            })],
        ))
        .with_ability(ability(
            "anthem",
            "Anthem",
            AbilityTrigger::Aura {
                interval_ms: 2000,
                chance: 1.0,
            },
            TargetScope::Caster,
            0,
            vec![AbilityEffect::RestoreMana { amount: 10.0 }],
        ))
        .with_ability(ability(
            "dirge",
            "Dirge",
            AbilityTrigger::Aura {
                interval_ms: 2000,
                chance: 0.0,
            },
            TargetScope::Caster,
            0,
            vec![AbilityEffect::RestoreMana { amount: 10.0 }],
        ))
        .with_ability(ability(
            "venom",
            "Venom",
            AbilityTrigger::OnHit { chance: 1.0 },
            TargetScope::Single,
            0,
            vec![AbilityEffect::ApplyStatus {
                status: "poison".into(),
            }],
        ))
        .with_ability(ability(
            "flurry",
            "Flurry",
            AbilityTrigger::OnHit { chance: 1.0 },
            TargetScope::Single,
            0,
            vec![AbilityEffect::Damage { multiplier: 0.5 }],
        ))
        .with_ability(ability(
            "raise",
            "Raise Dead",
            AbilityTrigger::Active,
            TargetScope::Caster,
            1000,
            vec![AbilityEffect::Summon {
                enemy: "dummy".into(),
                count: 2,
            }],
        ))
        .with_ability(ability(
            "incubate",
            "Incubate",
            AbilityTrigger::Active,
            TargetScope::Caster,
            60_000,
            vec![AbilityEffect::ApplyStatus {
                status: "hatching".into(),
            }],
        ))
        .with_status(status("stun", "Stun", StatusKind::Stun, 2000))
        .with_status(poison)
        .with_status(hatching)
}

/// Number of log lines containing `needle`.
pub fn log_count(snapshot: &BattleSnapshot, needle: &str) -> usize {
    snapshot.log.lines().filter(|line| line.contains(needle)).count()
}
