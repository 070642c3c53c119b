//! Plain-text battle summary.

use std::collections::BTreeMap;
use std::fmt::Write;

use battle_core::{BattleSnapshot, Combatant, DeferredReward};

/// Totals of the deferred rewards emitted over a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RewardTotals {
    pub run_experience: u64,
    pub account_experience: u64,
    pub shared_skill_points: u32,
    pub building_levels: BTreeMap<String, u32>,
}

impl RewardTotals {
    pub fn record(&mut self, reward: &DeferredReward) {
        match reward {
            DeferredReward::RunExperience { amount } => self.run_experience += amount,
            DeferredReward::AccountExperience { amount, .. } => self.account_experience += amount,
            DeferredReward::SharedSkillPoints { amount } => self.shared_skill_points += amount,
            DeferredReward::BuildingLevelUp { building } => {
                *self.building_levels.entry(building.clone()).or_insert(0) += 1;
            }
        }
    }
}

fn unit_line(out: &mut String, unit: &Combatant) {
    let level = unit
        .hero()
        .map(|h| format!(" L{}", h.level))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "  {}{level}: {:.0}/{:.0} hp, {:.0} shield",
        unit.name, unit.health, unit.stats.max_health, unit.shield
    );
}

pub fn render(snapshot: &BattleSnapshot, totals: &RewardTotals, tail: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} after {} ticks (level {})",
        snapshot.status,
        snapshot.tick.0,
        snapshot.mode.level()
    );

    let _ = writeln!(out, "Heroes:");
    for unit in snapshot.heroes() {
        unit_line(&mut out, unit);
    }
    if !snapshot.enemies().is_empty() {
        let _ = writeln!(out, "Enemies:");
        for unit in snapshot.enemies() {
            unit_line(&mut out, unit);
        }
    }

    let mut ledger = snapshot.session.clone();
    if !snapshot.is_finished() {
        ledger.absorb(&snapshot.bout);
    }
    let _ = writeln!(
        out,
        "Defeated {} enemies, cleared {} bouts, {} experience",
        ledger.defeated, ledger.bouts_cleared, ledger.experience
    );
    for (item, amount) in &ledger.loot {
        let _ = writeln!(out, "  {item}: {amount}");
    }
    if totals.account_experience > 0 {
        let _ = writeln!(out, "Account experience: {}", totals.account_experience);
    }
    if totals.shared_skill_points > 0 {
        let _ = writeln!(out, "Shared skill points: {}", totals.shared_skill_points);
    }
    for (building, levels) in &totals.building_levels {
        let _ = writeln!(out, "Spoils of war: {building} +{levels}");
    }

    let lines: Vec<&str> = snapshot.log.lines().collect();
    let start = lines.len().saturating_sub(tail);
    if start < lines.len() {
        let _ = writeln!(out, "Log:");
        for line in &lines[start..] {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}
