//! Ability and status-effect catalog loaders.

use std::path::Path;

use battle_core::{AbilityDefinition, StatusTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDefinition>,
}

/// Status catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub statuses: Vec<StatusTemplate>,
}

pub struct AbilityLoader;

impl AbilityLoader {
    /// Load abilities from a RON file.
    ///
    /// An ability may start at most one channel.
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let catalog: AbilityCatalog = parse_ron(path, "ability catalog")?;
        for ability in &catalog.abilities {
            let channels = ability
                .effects
                .iter()
                .filter(|e| matches!(e, battle_core::AbilityEffect::TriggerChannel(_)))
                .count();
            if channels > 1 {
                anyhow::bail!("Ability '{}' starts {} channels", ability.id, channels);
            }
        }
        Ok(catalog.abilities)
    }
}

pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusTemplate>> {
        let catalog: StatusCatalog = parse_ron(path, "status catalog")?;
        Ok(catalog.statuses)
    }
}
