//! Content loaders for reading battle data from files.
//!
//! Catalogs are RON, tunables are TOML. Every loader returns
//! [`LoadResult`] with the offending path in the error message.

pub mod abilities;
pub mod buildings;
pub mod config;
pub mod factory;
pub mod roster;

pub use abilities::{AbilityLoader, StatusLoader};
pub use buildings::BuildingLoader;
pub use config::{BonusesLoader, ConfigLoader};
pub use factory::ContentFactory;
pub use roster::{EnemyLoader, HeroLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming `what` and the path on failure.
pub(crate) fn parse_ron<T>(path: &Path, what: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON {}: {}", what, path.display(), e))
}
