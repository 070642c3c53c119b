use std::collections::BTreeMap;

/// Accumulated loot and experience for a bout or a whole session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardLedger {
    /// Item or currency id to amount.
    pub loot: BTreeMap<String, u64>,
    pub experience: u64,
    pub defeated: u32,
    pub bouts_cleared: u32,
}

impl RewardLedger {
    pub fn add_loot(&mut self, item: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        *self.loot.entry(item.to_string()).or_insert(0) += amount;
    }

    pub fn loot(&self, item: &str) -> u64 {
        self.loot.get(item).copied().unwrap_or(0)
    }

    /// Adds everything in `other` to this ledger.
    pub fn absorb(&mut self, other: &RewardLedger) {
        for (item, amount) in &other.loot {
            self.add_loot(item, *amount);
        }
        self.experience += other.experience;
        self.defeated += other.defeated;
        self.bouts_cleared += other.bouts_cleared;
    }

    pub fn is_empty(&self) -> bool {
        self.loot.is_empty() && self.experience == 0 && self.defeated == 0
    }
}

/// Side-effect request for the surrounding game-state layer.
///
/// The core never writes persistent player state; it only describes what
/// should be granted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeferredReward {
    /// One-off account experience for the first-ever defeat of an enemy type.
    AccountExperience { amount: u64, enemy_type: String },
    /// Experience counted towards the current run.
    RunExperience { amount: u64 },
    /// Skill points shared by the whole roster.
    SharedSkillPoints { amount: u32 },
    /// "Spoils of war": a building gains one level.
    BuildingLevelUp { building: String },
}
