//! Item catalog loader.

use std::path::Path;

use duel_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::items::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Item file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFile {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item definitions from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an [`ItemFile`]. Duplicate keys are an error.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let file: ItemFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut catalog = ItemCatalog::new();
        for item in file.items {
            let key = item.key.clone();
            if catalog.add_definition(item).is_some() {
                anyhow::bail!("Duplicate item key `{}`", key);
            }
        }
        tracing::debug!(items = catalog.len(), "item catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{ItemEffect, ItemKey, ItemOracle};

    #[test]
    fn parses_effects_and_armor() {
        let catalog = ItemLoader::parse(
            r#"(items: [
                (
                    key: "bark_plate",
                    name: "Bark Plate",
                    slot: Armor,
                    armor: 4,
                    effects: [Thorns(damage: 2)],
                ),
            ])"#,
        )
        .unwrap();
        let plate = catalog.definition(&ItemKey::from("bark_plate")).unwrap();
        assert_eq!(plate.armor, 4);
        assert_eq!(plate.effects, vec![ItemEffect::Thorns { damage: 2 }]);
    }

    #[test]
    fn duplicate_keys_fail() {
        let err = ItemLoader::parse(
            r#"(items: [
                (key: "fang", name: "Fang", slot: Weapon),
                (key: "fang", name: "Fang", slot: Weapon),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("fang"));
    }
}
