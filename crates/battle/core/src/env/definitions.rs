//! Static definition tables and the oracle the engine reads them through.

use std::collections::BTreeMap;

use crate::ability::{AbilityDefinition, AbilityEffect, ClassBehavior, PhaseDefinition};
use crate::state::{EnemyRank, StatusKind};
use crate::stats::{BaseStats, StatModifier};

/// Hero template keyed by a stable id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroTemplate {
    pub id: String,
    pub name: String,
    pub base: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: ClassBehavior,
    /// Experience needed to go from level 1 to level 2.
    #[cfg_attr(feature = "serde", serde(default = "default_exp_to_next_level"))]
    pub exp_to_next_level: u64,
}

#[cfg(feature = "serde")]
fn default_exp_to_next_level() -> u64 {
    HeroTemplate::DEFAULT_EXP_TO_NEXT_LEVEL
}

impl HeroTemplate {
    pub const DEFAULT_EXP_TO_NEXT_LEVEL: u64 = 100;
}

/// One loot-table row: `chance` to drop between `min` and `max` of `item`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: String,
    pub chance: f64,
    pub min: u32,
    pub max: u32,
}

/// Enemy template keyed by a stable id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub base: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rank: EnemyRank,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    /// Base gold dropped on defeat, before difficulty and bonuses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<LootEntry>,
    /// Ordered by descending threshold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phases: Vec<PhaseDefinition>,
}

/// Periodic damage parameters of a status template.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DotSpec {
    pub damage: f64,
    pub interval_ms: u32,
}

/// Status-effect template keyed by a stable id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTemplate {
    pub id: String,
    pub name: String,
    pub kind: StatusKind,
    pub duration_ms: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier: Option<StatModifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dot: Option<DotSpec>,
    /// Effects run on the carrier when the status runs out (not on stun
    /// interruption or death).
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_expire: Vec<AbilityEffect>,
}

/// Read-only lookup of static definitions by id.
///
/// Lookups return `None` for unknown ids; the engine logs and skips instead
/// of failing the tick.
pub trait DefinitionsOracle: Send + Sync {
    fn hero(&self, id: &str) -> Option<&HeroTemplate>;

    fn enemy(&self, id: &str) -> Option<&EnemyTemplate>;

    fn ability(&self, id: &str) -> Option<&AbilityDefinition>;

    fn status(&self, id: &str) -> Option<&StatusTemplate>;

    /// Building ids eligible for the spoils-of-war level-up.
    fn buildings(&self) -> &[String];
}

/// In-memory definitions backed by ordered maps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticDefinitions {
    pub heroes: BTreeMap<String, HeroTemplate>,
    pub enemies: BTreeMap<String, EnemyTemplate>,
    pub abilities: BTreeMap<String, AbilityDefinition>,
    pub statuses: BTreeMap<String, StatusTemplate>,
    pub buildings: Vec<String>,
}

impl StaticDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hero(mut self, template: HeroTemplate) -> Self {
        self.heroes.insert(template.id.clone(), template);
        self
    }

    pub fn with_enemy(mut self, template: EnemyTemplate) -> Self {
        self.enemies.insert(template.id.clone(), template);
        self
    }

    pub fn with_ability(mut self, ability: AbilityDefinition) -> Self {
        self.abilities.insert(ability.id.clone(), ability);
        self
    }

    pub fn with_status(mut self, template: StatusTemplate) -> Self {
        self.statuses.insert(template.id.clone(), template);
        self
    }

    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.buildings.push(building.into());
        self
    }
}

impl DefinitionsOracle for StaticDefinitions {
    fn hero(&self, id: &str) -> Option<&HeroTemplate> {
        self.heroes.get(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    fn ability(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }

    fn status(&self, id: &str) -> Option<&StatusTemplate> {
        self.statuses.get(id)
    }

    fn buildings(&self) -> &[String] {
        &self.buildings
    }
}
