//! Content loaders for reading duel data from files.
//!
//! Each loader turns one RON/TOML file into a `duel-core` catalog.
//! [`ContentFactory`] ties them to a data directory.

pub mod ability;
pub mod companion;
pub mod config;
pub mod factory;
pub mod item;

pub use ability::AbilityLoader;
pub use companion::CompanionLoader;
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use item::ItemLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
