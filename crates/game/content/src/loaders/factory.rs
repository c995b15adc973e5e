//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use duel_core::{AbilityCatalog, CombatConfig, CompanionRoster};

use crate::items::ItemCatalog;
use crate::loaders::{AbilityLoader, CompanionLoader, ConfigLoader, ItemLoader, LoadResult};

/// Every catalog a duel front end needs.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: CombatConfig,
    pub abilities: AbilityCatalog,
    pub items: ItemCatalog,
    pub companions: CompanionRoster,
}

/// Content factory that loads all duel content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── items.ron
/// └── companions.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tuning from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load and expand ability families from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalog> {
        let path = self.data_dir.join("abilities.ron");
        AbilityLoader::load(&path)
    }

    /// Load item definitions from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load companion species from `companions.ron`, validated against the
    /// given catalogs.
    pub fn load_companions(
        &self,
        abilities: &AbilityCatalog,
        items: &ItemCatalog,
    ) -> LoadResult<CompanionRoster> {
        let path = self.data_dir.join("companions.ron");
        CompanionLoader::load(&path, abilities, items)
    }

    /// Load every file in dependency order.
    pub fn load_all(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let abilities = self.load_abilities()?;
        let items = self.load_items()?;
        let companions = self.load_companions(&abilities, &items)?;
        tracing::info!(
            data_dir = %self.data_dir.display(),
            abilities = abilities.len(),
            items = items.len(),
            companions = companions.len(),
            "content loaded"
        );
        Ok(Content {
            config,
            abilities,
            items,
            companions,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
