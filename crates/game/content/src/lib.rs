//! Data-driven duel content and its loaders.
//!
//! This crate reads RON/TOML data files into the catalogs `duel-core`
//! consumes:
//! - Ability families, expanded into tiered definitions (RON)
//! - Item definitions (RON)
//! - Companion species (RON)
//! - Combat tuning (TOML)
//!
//! Content is looked up through oracles and never stored in battle state.

pub mod items;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use items::ItemCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, CompanionLoader, Content, ConfigLoader, ContentFactory, ItemLoader, LoadResult,
};
