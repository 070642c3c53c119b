/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Battle log lines kept in the snapshot.
    pub log_capacity: usize,
    /// Attack events kept in the snapshot.
    pub event_history: usize,
    /// Ticks a defeated enemy stays in the roster before it is pruned.
    pub death_animation_ticks: u32,
    /// Crit multiplier for combatants whose template leaves it unset.
    pub default_crit_damage: f64,
    /// Chance per defeated enemy that a building gains a level.
    pub spoils_of_war_chance: f64,
    /// Account experience for the first-ever defeat of an enemy type.
    pub first_kill_account_exp: u64,
    /// Factor applied to the level requirement after a level-up cascade.
    pub exp_growth: f64,
    /// Hero stat scale gained per level above 1.
    pub hero_level_growth: f64,
    /// Every N-th hero level grants one shared skill point.
    pub shared_skill_point_interval: u32,
    /// Enemy stat growth per wave (linear).
    pub wave_stat_growth: f64,
    /// Enemy stat growth per endless rank (exponential base).
    pub rank_stat_growth: f64,
    /// Loot/experience growth per wave.
    pub wave_reward_growth: f64,
    /// Loot/experience growth per endless rank.
    pub rank_reward_growth: f64,
    pub elite_reward_multiplier: f64,
    pub boss_reward_multiplier: f64,
    /// Multiplier applied to an enemy's summon strength after each summon.
    pub summon_strength_growth: f64,
    /// Upper bound for summon strength; unbounded when `None`.
    pub summon_strength_cap: Option<f64>,
    /// Enemy roster size above which summons are skipped.
    pub max_enemies: usize,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 16;
    pub const MAX_TEMPORARY_BUFFS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LOG_CAPACITY: usize = 50;
    pub const DEFAULT_EVENT_HISTORY: usize = 20;
    pub const DEFAULT_DEATH_ANIMATION_TICKS: u32 = 3;
    pub const DEFAULT_CRIT_DAMAGE: f64 = 1.5;
    pub const DEFAULT_SPOILS_OF_WAR_CHANCE: f64 = 0.05;

    pub fn new() -> Self {
        Self {
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            event_history: Self::DEFAULT_EVENT_HISTORY,
            death_animation_ticks: Self::DEFAULT_DEATH_ANIMATION_TICKS,
            default_crit_damage: Self::DEFAULT_CRIT_DAMAGE,
            spoils_of_war_chance: Self::DEFAULT_SPOILS_OF_WAR_CHANCE,
            first_kill_account_exp: 25,
            exp_growth: 1.15,
            hero_level_growth: 0.1,
            shared_skill_point_interval: 10,
            wave_stat_growth: 0.12,
            rank_stat_growth: 1.15,
            wave_reward_growth: 0.1,
            rank_reward_growth: 0.15,
            elite_reward_multiplier: 2.0,
            boss_reward_multiplier: 5.0,
            summon_strength_growth: 1.25,
            summon_strength_cap: None,
            max_enemies: 24,
        }
    }

    pub fn with_death_animation_ticks(mut self, ticks: u32) -> Self {
        self.death_animation_ticks = ticks;
        self
    }

    pub fn with_spoils_of_war_chance(mut self, chance: f64) -> Self {
        self.spoils_of_war_chance = chance;
        self
    }

    /// Hero stat scale at `level`.
    pub fn hero_scale(&self, level: u32) -> f64 {
        1.0 + f64::from(level.saturating_sub(1)) * self.hero_level_growth
    }

    /// Summon strength after one more summon, honouring the cap.
    pub fn next_summon_strength(&self, current: f64) -> f64 {
        let next = current * self.summon_strength_growth;
        match self.summon_strength_cap {
            Some(cap) => next.min(cap),
            None => next,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit rule switches threaded through the tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRules {
    /// Heroes take no damage (debug "god mode").
    pub invulnerable_heroes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summon_strength_respects_cap() {
        let mut config = BattleConfig::default();
        assert_eq!(config.next_summon_strength(1.0), 1.25);
        config.summon_strength_cap = Some(1.5);
        assert_eq!(config.next_summon_strength(1.25), 1.5);
    }

    #[test]
    fn hero_scale_grows_per_level() {
        let config = BattleConfig::default();
        assert_eq!(config.hero_scale(1), 1.0);
        assert!((config.hero_scale(3) - 1.2).abs() < 1e-9);
    }
}
