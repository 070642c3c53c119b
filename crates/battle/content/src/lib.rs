//! Data-driven battle content.
//!
//! Static definitions live in RON catalogs and tunables in TOML files:
//! - hero and enemy templates
//! - abilities and status-effect templates
//! - spoils-of-war building ids
//! - battle configuration and global bonuses
//!
//! Content is handed to the engine through [`battle_core::StaticDefinitions`]
//! and never appears in battle snapshots.

pub mod validate;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use validate::{DanglingReference, InvalidAmount, Owner, invalid_amounts, validate};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, BonusesLoader, BuildingLoader, ConfigLoader, ContentFactory, EnemyLoader,
    HeroLoader, LoadResult, StatusLoader,
};
