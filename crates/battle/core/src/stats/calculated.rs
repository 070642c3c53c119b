//! Base and calculated combatant stats.
//!
//! Base values come from static templates and are never mutated during a
//! bout. Calculated values are derived from them with:
//!
//! ```text
//! scaled   = base × scale            (level or difficulty scaling)
//! final    = BonusStack(modifiers).apply(scaled)
//! ```
//!
//! Only pools and offensive/defensive numbers scale; rates such as attack
//! speed and crit chance are taken as-is.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::bonus::{Bonus, BonusStack, StatBounds};

/// Identifies one calculated stat.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    MaxHealth,
    MaxMana,
    Attack,
    Defense,
    AttackSpeed,
    CritChance,
    CritDamage,
    HealthRegen,
    ManaRegen,
    MaxShield,
    ShieldRecharge,
    ShieldDelay,
}

/// How a modifier value combines with the stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierMode {
    /// Added to the scaled base value.
    Flat,
    /// Percentage-additive with every other percent modifier on the stat.
    Percent,
}

/// A stat change carried by buffs, debuffs and phase effects.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub mode: ModifierMode,
    pub value: f64,
}

impl StatModifier {
    pub const fn flat(stat: StatKind, value: f64) -> Self {
        Self {
            stat,
            mode: ModifierMode::Flat,
            value,
        }
    }

    pub const fn percent(stat: StatKind, value: f64) -> Self {
        Self {
            stat,
            mode: ModifierMode::Percent,
            value,
        }
    }

    fn as_bonus(&self) -> Bonus {
        match self.mode {
            ModifierMode::Flat => Bonus::flat(self.value),
            ModifierMode::Percent => Bonus::increased(self.value),
        }
    }
}

/// Template stats, before scaling and modifiers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub max_health: f64,
    pub max_mana: f64,
    pub attack: f64,
    pub defense: f64,
    /// Basic attacks per second.
    pub attack_speed: f64,
    /// Probability in `[0, 1]`.
    pub crit_chance: f64,
    /// Crit multiplier; the configured default applies when unset.
    pub crit_damage: Option<f64>,
    /// Per second.
    pub health_regen: f64,
    /// Per second.
    pub mana_regen: f64,
    pub max_shield: f64,
    /// Shield points per second once the delay has elapsed.
    pub shield_recharge: f64,
    /// Milliseconds without being hit before the shield recharges.
    pub shield_delay_ms: u32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_mana: 0.0,
            attack: 10.0,
            defense: 0.0,
            attack_speed: 1.0,
            crit_chance: 0.0,
            crit_damage: None,
            health_regen: 0.0,
            mana_regen: 0.0,
            max_shield: 0.0,
            shield_recharge: 0.0,
            shield_delay_ms: 0,
        }
    }
}

/// Stats actually used by resolvers and the event processor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatedStats {
    pub max_health: f64,
    pub max_mana: f64,
    pub attack: f64,
    pub defense: f64,
    pub attack_speed: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub health_regen: f64,
    pub mana_regen: f64,
    pub max_shield: f64,
    pub shield_recharge: f64,
    pub shield_delay_ms: u32,
}

impl CalculatedStats {
    /// Builds calculated stats from a template, a scale factor and the
    /// modifiers currently active on the combatant.
    pub fn compute<'m>(
        base: &BaseStats,
        scale: f64,
        default_crit_damage: f64,
        modifiers: impl IntoIterator<Item = &'m StatModifier>,
    ) -> Self {
        let mut stacks: [BonusStack; 12] = Default::default();
        for modifier in modifiers {
            stacks[modifier.stat as usize].add(modifier.as_bonus());
        }
        let stat = |kind: StatKind, value: f64, bounds: StatBounds| {
            stacks[kind as usize].apply(value, bounds.min, bounds.max)
        };

        Self {
            max_health: stat(
                StatKind::MaxHealth,
                base.max_health * scale,
                StatBounds::POOL,
            ),
            max_mana: stat(StatKind::MaxMana, base.max_mana, StatBounds::NON_NEGATIVE),
            attack: stat(
                StatKind::Attack,
                base.attack * scale,
                StatBounds::NON_NEGATIVE,
            ),
            defense: stat(
                StatKind::Defense,
                base.defense * scale,
                StatBounds::NON_NEGATIVE,
            ),
            attack_speed: stat(
                StatKind::AttackSpeed,
                base.attack_speed,
                StatBounds::ATTACK_SPEED,
            ),
            crit_chance: stat(StatKind::CritChance, base.crit_chance, StatBounds::CHANCE),
            crit_damage: stat(
                StatKind::CritDamage,
                base.crit_damage.unwrap_or(default_crit_damage),
                StatBounds::CRIT_MULTIPLIER,
            ),
            health_regen: stat(
                StatKind::HealthRegen,
                base.health_regen * scale,
                StatBounds::NON_NEGATIVE,
            ),
            mana_regen: stat(
                StatKind::ManaRegen,
                base.mana_regen,
                StatBounds::NON_NEGATIVE,
            ),
            max_shield: stat(
                StatKind::MaxShield,
                base.max_shield * scale,
                StatBounds::NON_NEGATIVE,
            ),
            shield_recharge: stat(
                StatKind::ShieldRecharge,
                base.shield_recharge * scale,
                StatBounds::NON_NEGATIVE,
            ),
            shield_delay_ms: stat(
                StatKind::ShieldDelay,
                f64::from(base.shield_delay_ms),
                StatBounds::NON_NEGATIVE,
            )
            .round() as u32,
        }
    }

    /// Milliseconds between two actions at the current attack speed.
    pub fn attack_interval_ms(&self) -> u32 {
        (1000.0 / self.attack_speed).round() as u32
    }
}
