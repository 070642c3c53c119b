//! Spoils-of-war building list.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Building ids a defeat may level up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingCatalog {
    pub buildings: Vec<String>,
}

pub struct BuildingLoader;

impl BuildingLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<String>> {
        let catalog: BuildingCatalog = parse_ron(path, "building catalog")?;
        Ok(catalog.buildings)
    }
}
