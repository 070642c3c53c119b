//! Stat system.
//!
//! ```text
//! [ BaseStats (template) ] × scale
//!      ↓
//! [ BonusStack per stat ]   ← status effect / temporary buff modifiers
//!      ↓
//! [ CalculatedStats ]
//! ```
//!
//! Calculated stats are recomputed only when a modifier appears or expires
//! (the orchestrator's recompute pass); current health and mana are rescaled
//! to keep their percentage across the change.

pub mod bonus;
pub mod calculated;

pub use bonus::{Bonus, BonusStack, StatBounds};
pub use calculated::{BaseStats, CalculatedStats, ModifierMode, StatKind, StatModifier};
