use bitflags::bitflags;

use crate::state::CombatantId;

bitflags! {
    /// What an active channel prevents its owner from doing.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ChannelFlags: u8 {
        const BLOCKS_MOVEMENT = 0b0000_0001;
        const BLOCKS_ACTIONS = 0b0000_0010;
    }
}

/// A multi-tick ability in progress.
///
/// Only one channel may be active per combatant. The channel is destroyed on
/// completion or when a stun lands on its owner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelingState {
    pub ability_id: String,
    pub owner: CombatantId,
    pub total_ms: u32,
    pub elapsed_ms: u32,
    /// Interval for mid-channel effects, if the ability has any.
    pub tick_interval_ms: Option<u32>,
    pub since_tick_ms: u32,
    /// Targets chosen when the channel started.
    pub targets: Vec<CombatantId>,
    pub flags: ChannelFlags,
}

/// Outcome of advancing a channel by one simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelProgress {
    /// Number of mid-channel ticks that fired.
    pub ticks: u32,
    pub completed: bool,
}

impl ChannelingState {
    pub fn blocks_actions(&self) -> bool {
        self.flags.contains(ChannelFlags::BLOCKS_ACTIONS)
    }

    pub fn blocks_movement(&self) -> bool {
        self.flags.contains(ChannelFlags::BLOCKS_MOVEMENT)
    }

    /// Advances progress, carrying overflow between mid-channel ticks.
    ///
    /// Ticks never fire beyond the channel's total duration.
    pub fn advance(&mut self, elapsed_ms: u32) -> ChannelProgress {
        let step = elapsed_ms.min(self.total_ms.saturating_sub(self.elapsed_ms));
        self.elapsed_ms += step;

        let mut ticks = 0;
        if let Some(interval) = self.tick_interval_ms.filter(|i| *i > 0) {
            self.since_tick_ms += step;
            while self.since_tick_ms >= interval {
                self.since_tick_ms -= interval;
                ticks += 1;
            }
        }

        ChannelProgress {
            ticks,
            completed: self.elapsed_ms >= self.total_ms,
        }
    }

    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            1.0
        } else {
            f64::from(self.elapsed_ms) / f64::from(self.total_ms)
        }
    }
}
