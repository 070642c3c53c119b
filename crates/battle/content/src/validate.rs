//! Cross-catalog content checks.
//!
//! The engine tolerates unknown ids at runtime (it logs and skips them), so
//! dangling references are reported rather than rejected. Callers decide
//! whether a non-empty report is fatal.
//!
//! Effect amounts are different: a negative or non-finite DoT or restore
//! value would corrupt pools mid-battle, so [`invalid_amounts`] is meant to
//! fail loading.

use std::fmt;

use battle_core::{AbilityEffect, DefinitionKind, StaticDefinitions};

/// Definition that holds a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Owner {
    Hero(String),
    Enemy(String),
    Ability(String),
    Status(String),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Hero(id) => write!(f, "hero `{id}`"),
            Owner::Enemy(id) => write!(f, "enemy `{id}`"),
            Owner::Ability(id) => write!(f, "ability `{id}`"),
            Owner::Status(id) => write!(f, "status `{id}`"),
        }
    }
}

/// A reference to an id no catalog defines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingReference {
    pub owner: Owner,
    pub kind: DefinitionKind,
    pub id: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} references unknown {} `{}`", self.owner, self.kind, self.id)
    }
}

/// An effect amount outside the range the engine applies.
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidAmount {
    pub owner: Owner,
    pub field: &'static str,
    pub value: f64,
}

impl fmt::Display for InvalidAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has invalid {} {} (must be positive)",
            self.owner, self.field, self.value
        )
    }
}

/// Returns every DoT damage and restore amount that is not a positive,
/// finite number.
pub fn invalid_amounts(definitions: &StaticDefinitions) -> Vec<InvalidAmount> {
    let mut invalid = Vec::new();
    for enemy in definitions.enemies.values() {
        let owner = Owner::Enemy(enemy.id.clone());
        for phase in &enemy.phases {
            check_effects(&mut invalid, &owner, &phase.effects);
        }
    }
    for ability in definitions.abilities.values() {
        check_effects(&mut invalid, &Owner::Ability(ability.id.clone()), &ability.effects);
    }
    for status in definitions.statuses.values() {
        let owner = Owner::Status(status.id.clone());
        if let Some(dot) = status.dot {
            check_amount(&mut invalid, &owner, "dot damage", dot.damage);
        }
        check_effects(&mut invalid, &owner, &status.on_expire);
    }
    invalid
}

fn check_amount(
    invalid: &mut Vec<InvalidAmount>,
    owner: &Owner,
    field: &'static str,
    value: f64,
) {
    if !(value.is_finite() && value > 0.0) {
        invalid.push(InvalidAmount {
            owner: owner.clone(),
            field,
            value,
        });
    }
}

fn check_effects(invalid: &mut Vec<InvalidAmount>, owner: &Owner, effects: &[AbilityEffect]) {
    for effect in effects {
        match effect {
            AbilityEffect::RestoreShield { amount } => {
                check_amount(invalid, owner, "shield restore", *amount);
            }
            AbilityEffect::RestoreMana { amount } => {
                check_amount(invalid, owner, "mana restore", *amount);
            }
            AbilityEffect::TriggerChannel(spec) => {
                check_effects(invalid, owner, &spec.on_tick);
                check_effects(invalid, owner, &spec.on_complete);
                check_effects(invalid, owner, &spec.on_interrupt);
            }
            _ => {}
        }
    }
}

/// Returns every reference that does not resolve, in catalog order.
pub fn validate(definitions: &StaticDefinitions) -> Vec<DanglingReference> {
    let mut report = Report {
        definitions,
        dangling: Vec::new(),
    };

    for hero in definitions.heroes.values() {
        let owner = Owner::Hero(hero.id.clone());
        for ability in &hero.abilities {
            report.ability(&owner, ability);
        }
    }
    for enemy in definitions.enemies.values() {
        let owner = Owner::Enemy(enemy.id.clone());
        for ability in &enemy.abilities {
            report.ability(&owner, ability);
        }
        for phase in &enemy.phases {
            report.effects(&owner, &phase.effects);
        }
    }
    for ability in definitions.abilities.values() {
        report.effects(&Owner::Ability(ability.id.clone()), &ability.effects);
    }
    for status in definitions.statuses.values() {
        report.effects(&Owner::Status(status.id.clone()), &status.on_expire);
    }

    report.dangling
}

struct Report<'a> {
    definitions: &'a StaticDefinitions,
    dangling: Vec<DanglingReference>,
}

impl Report<'_> {
    fn push(&mut self, owner: &Owner, kind: DefinitionKind, id: &str) {
        self.dangling.push(DanglingReference {
            owner: owner.clone(),
            kind,
            id: id.to_string(),
        });
    }

    fn ability(&mut self, owner: &Owner, id: &str) {
        if !self.definitions.abilities.contains_key(id) {
            self.push(owner, DefinitionKind::Ability, id);
        }
    }

    fn enemy(&mut self, owner: &Owner, id: &str) {
        if !self.definitions.enemies.contains_key(id) {
            self.push(owner, DefinitionKind::Enemy, id);
        }
    }

    fn effects(&mut self, owner: &Owner, effects: &[AbilityEffect]) {
        for effect in effects {
            match effect {
                AbilityEffect::ApplyStatus { status } => {
                    if !self.definitions.statuses.contains_key(status) {
                        self.push(owner, DefinitionKind::Status, status);
                    }
                }
                AbilityEffect::Summon { enemy, .. } => self.enemy(owner, enemy),
                AbilityEffect::Transform { into } => self.enemy(owner, into),
                AbilityEffect::TriggerChannel(spec) => {
                    self.effects(owner, &spec.on_tick);
                    self.effects(owner, &spec.on_complete);
                    self.effects(owner, &spec.on_interrupt);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        AbilityDefinition, BaseStats, ChannelSpec, DotSpec, EnemyTemplate, HeroTemplate,
        PhaseDefinition, StatusKind, StatusTemplate, TargetScope,
    };

    fn enemy(id: &str) -> EnemyTemplate {
        EnemyTemplate {
            id: id.into(),
            name: id.into(),
            base: BaseStats::default(),
            rank: Default::default(),
            abilities: Vec::new(),
            gold: 0,
            experience: 0,
            loot: Vec::new(),
            phases: Vec::new(),
        }
    }

    #[test]
    fn complete_content_has_no_dangling_references() {
        let mut slime = enemy("slime");
        slime.phases.push(PhaseDefinition {
            threshold_pct: 50.0,
            target: TargetScope::Caster,
            effects: vec![AbilityEffect::Summon {
                enemy: "slime".into(),
                count: 2,
            }],
        });
        let definitions = StaticDefinitions::new().with_enemy(slime);
        assert!(validate(&definitions).is_empty());
    }

    #[test]
    fn nested_channel_effects_are_checked() {
        let definitions = StaticDefinitions::new()
            .with_hero(HeroTemplate {
                id: "mage".into(),
                name: "Mage".into(),
                base: BaseStats::default(),
                abilities: vec!["frost".into(), "missing".into()],
                behavior: Default::default(),
                exp_to_next_level: 100,
            })
            .with_ability(AbilityDefinition {
                id: "frost".into(),
                name: "Frost".into(),
                trigger: Default::default(),
                target: TargetScope::AllEnemies,
                mana_cost: 10.0,
                cooldown_ms: 5000,
                effects: vec![AbilityEffect::TriggerChannel(ChannelSpec {
                    duration_ms: 2000,
                    on_complete: vec![AbilityEffect::ApplyStatus {
                        status: "chill".into(),
                    }],
                    ..ChannelSpec::default()
                })],
            });

        let dangling = validate(&definitions);
        assert_eq!(dangling.len(), 2);
        assert_eq!(
            dangling[0].to_string(),
            "hero `mage` references unknown ability `missing`"
        );
        assert_eq!(dangling[1].kind, DefinitionKind::Status);
        assert_eq!(dangling[1].owner, Owner::Ability("frost".into()));
    }

    #[test]
    fn non_positive_amounts_are_flagged() {
        let definitions = StaticDefinitions::new()
            .with_status(StatusTemplate {
                id: "rot".into(),
                name: "Rot".into(),
                kind: StatusKind::DamageOverTime,
                duration_ms: 3000,
                modifier: None,
                dot: Some(DotSpec {
                    damage: -4.0,
                    interval_ms: 1000,
                }),
                on_expire: Vec::new(),
            })
            .with_ability(AbilityDefinition {
                id: "bulwark".into(),
                name: "Bulwark".into(),
                trigger: Default::default(),
                target: TargetScope::AllAllies,
                mana_cost: 0.0,
                cooldown_ms: 5000,
                effects: vec![AbilityEffect::TriggerChannel(ChannelSpec {
                    duration_ms: 2000,
                    on_complete: vec![
                        AbilityEffect::RestoreShield { amount: f64::NAN },
                        AbilityEffect::RestoreShield { amount: 20.0 },
                    ],
                    ..ChannelSpec::default()
                })],
            });

        let invalid = invalid_amounts(&definitions);
        assert_eq!(invalid.len(), 2);
        assert_eq!(invalid[0].owner, Owner::Ability("bulwark".into()));
        assert_eq!(invalid[0].field, "shield restore");
        assert_eq!(
            invalid[1].to_string(),
            "status `rot` has invalid dot damage -4 (must be positive)"
        );
    }
}
