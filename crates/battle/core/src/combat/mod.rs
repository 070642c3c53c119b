//! Pure combat arithmetic.
//!
//! - `calculate_damage`: `max(1, floor(attack × multiplier − defense))` with crit
//! - `roll_hit`: crit roll plus damage for one attacker/defender pair
//! - `absorb_damage`: shield-then-health split
pub mod absorb;
pub mod damage;

pub use absorb::{Absorption, absorb_damage};
pub use damage::{Hit, Offense, calculate_damage, roll_hit};
