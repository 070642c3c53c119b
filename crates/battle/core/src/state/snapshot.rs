//! Battle snapshot owned by the caller between ticks.

use std::collections::{BTreeSet, VecDeque};

use crate::config::BattleConfig;
use crate::state::{AttackEvent, Combatant, CombatantId, RewardLedger, Side, Tick};

/// Terminal-state classification of a bout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleStatus {
    #[default]
    Fighting,
    Victory,
    Defeat,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Fighting)
    }
}

/// Orchestrator variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleMode {
    /// A single wave; enemies scale linearly with the wave number.
    Wave { wave: u32 },
    /// Escalating ranks; clearing a rank immediately respawns `lineup` one
    /// rank higher while the heroes carry over.
    Endless { rank: u32, lineup: Vec<String> },
}

impl BattleMode {
    /// Wave number or rank, whichever drives difficulty.
    pub fn level(&self) -> u32 {
        match self {
            Self::Wave { wave } => *wave,
            Self::Endless { rank, .. } => *rank,
        }
    }

    /// Stat multiplier for enemies spawned at the current level.
    pub fn enemy_scale(&self, config: &BattleConfig) -> f64 {
        match self {
            Self::Wave { wave } => {
                1.0 + f64::from(wave.saturating_sub(1)) * config.wave_stat_growth
            }
            Self::Endless { rank, .. } => config
                .rank_stat_growth
                .powi(rank.saturating_sub(1) as i32),
        }
    }

    /// Loot and experience multiplier at the current level.
    pub fn difficulty(&self, config: &BattleConfig) -> f64 {
        let level = f64::from(self.level().saturating_sub(1));
        match self {
            Self::Wave { .. } => 1.0 + level * config.wave_reward_growth,
            Self::Endless { .. } => 1.0 + level * config.rank_reward_growth,
        }
    }
}

/// Bounded battle log keeping the most recent lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    lines: VecDeque<String>,
}

impl BattleLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    /// Drops the oldest lines until at most `capacity` remain.
    pub fn truncate(&mut self, capacity: usize) {
        while self.lines.len() > capacity {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Both rosters of a battle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battlefield {
    pub heroes: Vec<Combatant>,
    pub enemies: Vec<Combatant>,
}

impl Battlefield {
    pub fn new(heroes: Vec<Combatant>, enemies: Vec<Combatant>) -> Self {
        Self { heroes, enemies }
    }

    pub fn roster(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Hero => &self.heroes,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Vec<Combatant> {
        match side {
            Side::Hero => &mut self.heroes,
            Side::Enemy => &mut self.enemies,
        }
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.heroes
            .iter()
            .chain(self.enemies.iter())
            .find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.heroes
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.heroes.iter().chain(self.enemies.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.heroes.iter_mut().chain(self.enemies.iter_mut())
    }

    /// Ids of one roster in roster order.
    pub fn ids(&self, side: Side) -> Vec<CombatantId> {
        self.roster(side).iter().map(|c| c.id).collect()
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.roster(side).iter().filter(|c| c.is_alive())
    }

    pub fn any_alive(&self, side: Side) -> bool {
        self.roster(side).iter().any(Combatant::is_alive)
    }

    /// Adds a combatant to the roster matching its side.
    pub fn insert(&mut self, combatant: Combatant) {
        let side = combatant.side();
        self.roster_mut(side).push(combatant);
    }
}

/// Complete state of a bout between ticks.
///
/// Created when a bout starts, advanced once per tick by the engine, and
/// folded into permanent player state by the caller when the bout or the
/// session ends.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub mode: BattleMode,
    pub tick: Tick,
    /// Base seed for every roll in this battle.
    pub seed: u64,
    pub field: Battlefield,
    pub log: BattleLog,
    pub recent_events: VecDeque<AttackEvent>,
    /// Rewards of the current bout.
    pub bout: RewardLedger,
    /// Rewards accumulated across bouts of the session.
    pub session: RewardLedger,
    pub status: BattleStatus,
    /// Player-selected enemy, honoured by the hero resolver while alive.
    pub preferred_target: Option<CombatantId>,
    /// Enemy types the account has defeated before this battle.
    pub known_enemy_types: BTreeSet<String>,
    pub next_instance_id: u32,
    pub next_event_sequence: u64,
}

impl BattleSnapshot {
    pub fn new(mode: BattleMode, seed: u64, field: Battlefield) -> Self {
        let next_instance_id = field.iter().map(|c| c.id.0 + 1).max().unwrap_or(0);
        Self {
            mode,
            tick: Tick::ZERO,
            seed,
            field,
            log: BattleLog::default(),
            recent_events: VecDeque::new(),
            bout: RewardLedger::default(),
            session: RewardLedger::default(),
            status: BattleStatus::Fighting,
            preferred_target: None,
            known_enemy_types: BTreeSet::new(),
            next_instance_id,
            next_event_sequence: 0,
        }
    }

    pub fn with_preferred_target(mut self, target: Option<CombatantId>) -> Self {
        self.preferred_target = target;
        self
    }

    pub fn with_known_enemy_types(mut self, types: impl IntoIterator<Item = String>) -> Self {
        self.known_enemy_types = types.into_iter().collect();
        self
    }

    pub fn heroes(&self) -> &[Combatant] {
        &self.field.heroes
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.field.enemies
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.field.get(id)
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_truncates_oldest_lines() {
        let mut log = BattleLog::default();
        for i in 0..5 {
            log.push(format!("line {i}"));
        }
        log.truncate(3);
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn wave_scaling_is_linear_and_rank_scaling_exponential() {
        let config = BattleConfig::default();
        let wave = BattleMode::Wave { wave: 3 };
        let rank = BattleMode::Endless {
            rank: 3,
            lineup: Vec::new(),
        };
        assert!((wave.enemy_scale(&config) - (1.0 + 2.0 * config.wave_stat_growth)).abs() < 1e-9);
        assert!((rank.enemy_scale(&config) - config.rank_stat_growth.powi(2)).abs() < 1e-9);
    }
}
