/// Numeric modifiers owned by the economy layer.
///
/// Values are fractions (`0.1` = +10%). The battle core only reads them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobalBonuses {
    pub enemy_gold_bonus: f64,
    pub hero_xp_bonus: f64,
    /// Consumed by recruitment outside the battle; carried for completeness.
    pub recruitment_cost_reduction: f64,
}

impl GlobalBonuses {
    pub fn gold_multiplier(&self) -> f64 {
        1.0 + self.enemy_gold_bonus
    }

    pub fn xp_multiplier(&self) -> f64 {
        1.0 + self.hero_xp_bonus
    }
}
