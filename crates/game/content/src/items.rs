//! In-memory [`duel_core::ItemOracle`].
use std::collections::HashMap;

use duel_core::{ItemDefinition, ItemKey, ItemOracle};

/// Item definitions by key.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    definitions: HashMap<ItemKey, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, returning the one it replaced.
    pub fn add_definition(&mut self, def: ItemDefinition) -> Option<ItemDefinition> {
        self.definitions.insert(def.key.clone(), def)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.values()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, key: &ItemKey) -> Option<&ItemDefinition> {
        self.definitions.get(key)
    }
}
