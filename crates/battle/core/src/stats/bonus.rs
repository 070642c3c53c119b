//! Bonus application for calculated stats.
//!
//! Every stat is rebuilt from its scaled base value through the same stack:
//! `Flat → %Inc → Clamp`. Status effects, temporary buffs and phase buffs
//! all contribute to the stack; nothing mutates a calculated stat in place.

/// A single bonus that can be applied to a stat value.
///
/// - **Flat**: additive bonus applied first (e.g. +5 attack from a buff)
/// - **Increased**: percentage increase, summed with other increases and
///   then multiplied once (e.g. +20% attack speed)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(f64),

    /// Percentage increase stored as whole percent (20.0 = +20%).
    /// Negative values are reductions.
    Increased(f64),
}

impl Bonus {
    /// Create a flat bonus
    pub fn flat(value: f64) -> Self {
        Bonus::Flat(value)
    }

    /// Create a percentage increase bonus (20.0 = +20%)
    pub fn increased(percent: f64) -> Self {
        Bonus::Increased(percent)
    }
}

/// A collection of bonuses that will be applied in the correct order.
///
/// # Example
/// ```
/// # use battle_core::stats::bonus::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5.0));        // +5
/// stack.add(Bonus::increased(20.0));  // +20%
/// stack.add(Bonus::increased(30.0));  // +30% (summed)
///
/// // (10 + 5) × 1.5
/// assert_eq!(stack.apply(10.0, 0.0, 100.0), 22.5);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    /// Create a new empty bonus stack
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    /// Add a bonus to the stack
    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Add multiple bonuses at once
    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Apply all bonuses to a base value with clamping.
    ///
    /// ```text
    /// result = clamp((base + flat_sum) × (1 + inc_sum/100), min, max)
    /// ```
    pub fn apply(&self, base: f64, min: f64, max: f64) -> f64 {
        let flat_sum: f64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum();

        let inc_sum: f64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(p) => Some(*p),
                _ => None,
            })
            .sum();

        let value = (base + flat_sum) * (1.0 + inc_sum / 100.0);
        value.clamp(min, max)
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// Get the number of bonuses in the stack
    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

/// Lower/upper clamp for a stat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatBounds {
    pub min: f64,
    pub max: f64,
}

impl StatBounds {
    pub const NON_NEGATIVE: Self = Self {
        min: 0.0,
        max: f64::MAX,
    };
    /// Max health never drops below one point.
    pub const POOL: Self = Self {
        min: 1.0,
        max: f64::MAX,
    };
    pub const ATTACK_SPEED: Self = Self {
        min: 0.1,
        max: 20.0,
    };
    pub const CHANCE: Self = Self { min: 0.0, max: 1.0 };
    pub const CRIT_MULTIPLIER: Self = Self {
        min: 1.0,
        max: 10.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_returns_base() {
        let stack = BonusStack::new();
        assert_eq!(stack.apply(42.0, 0.0, 100.0), 42.0);
    }

    #[test]
    fn flat_applies_before_percent() {
        let mut stack = BonusStack::new();
        stack.add(Bonus::increased(100.0));
        stack.add(Bonus::flat(10.0));
        assert_eq!(stack.apply(10.0, 0.0, 1000.0), 40.0);
    }

    #[test]
    fn negative_percent_reduces_and_clamps() {
        let mut stack = BonusStack::new();
        stack.add(Bonus::increased(-150.0));
        assert_eq!(stack.apply(10.0, 0.0, 100.0), 0.0);
    }
}
