use std::fmt;

use crate::stats::ScalingAttributes;

use super::shape::AbilityShape;
use super::targeting::TargetSelector;

/// Stable identifier of an ability in the catalog, e.g. `"gore_3"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityKey(String);

impl AbilityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key of tier `tier` (1-based) of an ability family.
    pub fn tiered(family: &str, tier: usize) -> Self {
        Self(format!("{family}_{tier}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AbilityKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag for gameplay logic and UI grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityClass {
    #[default]
    Offensive,
    Defensive,
    Utility,
}

/// Complete, immutable description of one ability tier.
///
/// Abilities hold no per-battle state: mana and cooldowns are tracked on the
/// combatant. Two abilities with the same key are the same ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub key: AbilityKey,
    /// Display name, e.g. "Gore III".
    pub name: String,
    pub icon: String,
    pub class: AbilityClass,
    pub mana_cost: i32,
    /// Owner turns before the ability can be used again.
    pub cooldown: u32,
    pub targets: TargetSelector,
    /// Attributes whose value adds to damage dealt by this ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: ScalingAttributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub shape: AbilityShape,
}

impl AbilityDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>, shape: AbilityShape) -> Self {
        Self {
            key: AbilityKey::new(key),
            name: name.into(),
            icon: String::new(),
            class: AbilityClass::default(),
            mana_cost: 0,
            cooldown: 0,
            targets: TargetSelector::Enemies(1),
            scaling: ScalingAttributes::empty(),
            description: String::new(),
            shape,
        }
    }

    pub fn with_targets(mut self, targets: TargetSelector) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_scaling(mut self, scaling: ScalingAttributes) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_cost(mut self, mana_cost: i32, cooldown: u32) -> Self {
        self.mana_cost = mana_cost;
        self.cooldown = cooldown;
        self
    }
}
