//! Ability family loader.

use std::path::Path;

use duel_core::{AbilityCatalog, AbilityFamily};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityFile {
    pub families: Vec<AbilityFamily>,
}

/// Loader for ability families from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load and expand every family in a RON file into one catalog.
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AbilityCatalog> {
        let file: AbilityFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        let catalog = AbilityCatalog::from_families(&file.families)
            .map_err(|e| anyhow::anyhow!("Invalid ability catalog: {}", e))?;
        tracing::debug!(
            families = file.families.len(),
            abilities = catalog.len(),
            "ability catalog loaded"
        );
        Ok(catalog)
    }
}
