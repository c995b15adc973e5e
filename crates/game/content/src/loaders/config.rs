//! Combat configuration loader.

use std::path::Path;

use duel_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("dex_dodge_scale = 0.005\ncon_health_scale = 8\n").unwrap();
        assert_eq!(config.dex_dodge_scale, 0.005);
        assert_eq!(config.con_health_scale, 8);
        assert_eq!(config.luck_crit_scale, CombatConfig::DEFAULT_LUCK_CRIT_SCALE);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(ConfigLoader::parse("dex_dodge_scale = \"fast\"").is_err());
    }
}
