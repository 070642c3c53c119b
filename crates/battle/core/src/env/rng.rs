//! Deterministic random number generation.
//!
//! Every roll in a tick is derived from `(battle seed, tick, actor, counter)`
//! so replaying a battle with the same seed reproduces it exactly. There is no
//! ambient random source anywhere in the pipeline.

use crate::state::{CombatantId, Tick};

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Value in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }
}

/// PCG-XSH-RR: 32-bit output from 64-bit LCG state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes roll coordinates into a single seed (SplitMix64/FxHash constants).
pub fn compute_seed(battle_seed: u64, tick: u64, actor: u32, counter: u32) -> u64 {
    let mut hash = battle_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(counter).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Per-tick sequence of rolls over an injected [`RngOracle`].
///
/// The counter advances on every consumed roll, so two rolls by the same
/// actor in the same tick are independent while the whole stream stays
/// reproducible.
pub struct RollStream<'a> {
    rng: &'a dyn RngOracle,
    seed: u64,
    tick: Tick,
    counter: u32,
}

impl<'a> RollStream<'a> {
    pub fn new(rng: &'a dyn RngOracle, seed: u64, tick: Tick) -> Self {
        Self {
            rng,
            seed,
            tick,
            counter: 0,
        }
    }

    fn next_seed(&mut self, actor: CombatantId) -> u64 {
        let seed = compute_seed(self.seed, self.tick.0, actor.0, self.counter);
        self.counter = self.counter.wrapping_add(1);
        seed
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit(&mut self, actor: CombatantId) -> f64 {
        let seed = self.next_seed(actor);
        f64::from(self.rng.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }

    /// Bernoulli trial. Certain outcomes do not consume a roll.
    pub fn chance(&mut self, actor: CombatantId, probability: f64) -> bool {
        if probability >= 1.0 {
            return true;
        }
        if probability <= 0.0 {
            return false;
        }
        self.unit(actor) < probability
    }

    pub fn range(&mut self, actor: CombatantId, min: u32, max: u32) -> u32 {
        let seed = self.next_seed(actor);
        self.rng.range(seed, min, max)
    }

    /// Index into a collection of `len` elements; `None` when empty.
    pub fn pick(&mut self, actor: CombatantId, len: usize) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            _ => {
                let last = u32::try_from(len - 1).unwrap_or(u32::MAX);
                Some(self.range(actor, 0, last) as usize)
            }
        }
    }

    pub fn rolls_consumed(&self) -> u32 {
        self.counter
    }
}
