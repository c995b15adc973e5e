//! The ability catalog and the family rows it is built from.
//!
//! Content is written as families: one shared header (name, icon, class,
//! targets, scaling) and up to five tier rows. Expanding a family yields one
//! [`AbilityDefinition`] per tier with key `"<family>_<n>"` and a Roman
//! numeral suffix on the name.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::CombatConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::ScalingAttributes;

use super::definition::{AbilityClass, AbilityDefinition, AbilityKey};
use super::shape::AbilityShape;
use super::targeting::TargetSelector;

/// Read-only access to ability definitions.
pub trait AbilityOracle {
    fn ability(&self, key: &AbilityKey) -> Option<&AbilityDefinition>;

    fn contains(&self, key: &AbilityKey) -> bool {
        self.ability(key).is_some()
    }
}

/// Errors raised while building a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("ability family `{family}` has {count} tiers (expected 1..={max})")]
    TierCount {
        family: String,
        count: usize,
        max: usize,
    },

    #[error("duplicate ability key `{0}`")]
    DuplicateKey(AbilityKey),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TierCount { .. } => "CATALOG_TIER_COUNT",
            Self::DuplicateKey(_) => "CATALOG_DUPLICATE_KEY",
        }
    }
}

/// One tier row of a family.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityTier {
    pub mana_cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Overrides the family selector for this tier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub targets: Option<TargetSelector>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub shape: AbilityShape,
}

/// Shared header plus tier rows, as written in content files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityFamily {
    /// Key prefix, e.g. `"gore"`.
    pub family: String,
    /// Base display name, e.g. `"Gore"`.
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: AbilityClass,
    pub targets: TargetSelector,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: ScalingAttributes,
    pub tiers: Vec<AbilityTier>,
}

const NUMERALS: [&str; CombatConfig::MAX_TIERS] = ["I", "II", "III", "IV", "V"];

impl AbilityFamily {
    /// One definition per tier, in tier order.
    pub fn expand(&self) -> Result<Vec<AbilityDefinition>, CatalogError> {
        let count = self.tiers.len();
        if count == 0 || count > CombatConfig::MAX_TIERS {
            return Err(CatalogError::TierCount {
                family: self.family.clone(),
                count,
                max: CombatConfig::MAX_TIERS,
            });
        }

        let definitions = self
            .tiers
            .iter()
            .zip(NUMERALS)
            .enumerate()
            .map(|(i, (tier, numeral))| AbilityDefinition {
                key: AbilityKey::tiered(&self.family, i + 1),
                name: format!("{} {numeral}", self.name),
                icon: self.icon.clone(),
                class: self.class,
                mana_cost: tier.mana_cost,
                cooldown: tier.cooldown,
                targets: tier.targets.unwrap_or(self.targets),
                scaling: self.scaling,
                description: tier.description.clone(),
                shape: tier.shape.clone(),
            })
            .collect();
        Ok(definitions)
    }
}

/// All ability definitions, by key.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    abilities: BTreeMap<AbilityKey, AbilityDefinition>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand every family into a catalog.
    pub fn from_families<'a>(
        families: impl IntoIterator<Item = &'a AbilityFamily>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for family in families {
            for definition in family.expand()? {
                catalog.insert(definition)?;
            }
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, definition: AbilityDefinition) -> Result<(), CatalogError> {
        if self.abilities.contains_key(&definition.key) {
            return Err(CatalogError::DuplicateKey(definition.key));
        }
        self.abilities.insert(definition.key.clone(), definition);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Definitions in key order.
    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.values()
    }
}

impl AbilityOracle for AbilityCatalog {
    fn ability(&self, key: &AbilityKey) -> Option<&AbilityDefinition> {
        self.abilities.get(key)
    }
}
