//! Companion species loader.

use std::path::Path;

use duel_core::{AbilityOracle, CompanionRoster, CompanionSpecies, ItemOracle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Companion file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionFile {
    pub companions: Vec<CompanionSpecies>,
}

/// Loader for companion species from RON files.
pub struct CompanionLoader;

impl CompanionLoader {
    /// Load species and check every ability and weapon they reference.
    pub fn load(
        path: &Path,
        abilities: &dyn AbilityOracle,
        items: &dyn ItemOracle,
    ) -> LoadResult<CompanionRoster> {
        let content = read_file(path)?;
        Self::parse(&content, abilities, items)
    }

    pub fn parse(
        content: &str,
        abilities: &dyn AbilityOracle,
        items: &dyn ItemOracle,
    ) -> LoadResult<CompanionRoster> {
        let file: CompanionFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse companion RON: {}", e))?;

        let mut roster = CompanionRoster::new();
        for species in file.companions {
            species
                .validate(abilities, items)
                .map_err(|e| anyhow::anyhow!("Invalid companion: {}", e))?;
            roster
                .insert(species)
                .map_err(|e| anyhow::anyhow!("Invalid companion: {}", e))?;
        }
        tracing::debug!(species = roster.len(), "companion roster loaded");
        Ok(roster)
    }
}
