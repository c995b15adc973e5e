//! Equippable items and the effects they contribute to combat.
//!
//! Items are pure data: a key, a display name, a slot and a list of
//! [`ItemEffect`]s. The resolution pipeline reads passive effects through
//! [`ItemEffectTotals`] and runs hook effects at fixed points (see
//! [`crate::combat::hooks`]).

mod effect;
mod totals;

pub use effect::{ItemEffect, ItemHook};
pub use totals::ItemEffectTotals;

use std::fmt;

/// Stable identifier of an item definition in content data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Equipment slot an item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSlot {
    Weapon,
    Armor,
    Trinket,
}

/// Item definition loaded from content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub key: ItemKey,
    pub name: String,
    pub slot: ItemSlot,
    /// Armor granted while equipped (added to max armor).
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<ItemEffect>,
}

impl ItemDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>, slot: ItemSlot) -> Self {
        Self {
            key: ItemKey::new(key),
            name: name.into(),
            slot,
            armor: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Lookup of item definitions by key.
pub trait ItemOracle {
    fn definition(&self, key: &ItemKey) -> Option<&ItemDefinition>;
}
