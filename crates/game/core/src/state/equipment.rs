//! Equipment worn by a combatant.
//!
//! Equipment holds full item definitions rather than handles: the pipeline
//! reads item effects on every hit and combatants are short-lived battle
//! values, so there is no shared inventory to point into.

use crate::item::{ItemDefinition, ItemEffect, ItemEffectTotals, ItemHook, ItemSlot};
use crate::stats::AttributeBonuses;

/// Equipment state for a combatant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<ItemDefinition>,
    pub armor: Option<ItemDefinition>,
    pub trinket: Option<ItemDefinition>,
}

impl Equipment {
    /// Creates empty equipment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Equips an item in its slot, returning whatever was there before.
    pub fn equip(&mut self, item: ItemDefinition) -> Option<ItemDefinition> {
        let slot = match item.slot {
            ItemSlot::Weapon => &mut self.weapon,
            ItemSlot::Armor => &mut self.armor,
            ItemSlot::Trinket => &mut self.trinket,
        };
        slot.replace(item)
    }

    /// All equipped items.
    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        [&self.weapon, &self.armor, &self.trinket]
            .into_iter()
            .flatten()
    }

    /// Every effect across every equipped item.
    pub fn effects(&self) -> impl Iterator<Item = &ItemEffect> {
        self.items().flat_map(|item| item.effects.iter())
    }

    /// Effects that run at the given hook point.
    pub fn hooks(&self, hook: ItemHook) -> impl Iterator<Item = &ItemEffect> {
        self.effects().filter(move |e| e.hook() == hook)
    }

    pub fn totals(&self) -> ItemEffectTotals {
        ItemEffectTotals::from_effects(self.effects())
    }

    /// Armor granted by all equipped items.
    pub fn armor_bonus(&self) -> i32 {
        self.items().map(|item| item.armor).sum()
    }

    pub fn collect_attribute_bonuses(&self, bonuses: &mut AttributeBonuses) {
        ItemEffectTotals::collect_attribute_bonuses(self.effects(), bonuses);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equip_replaces_slot() {
        let mut equipment = Equipment::empty();
        let fang = ItemDefinition::new("fang", "Fang", ItemSlot::Weapon);
        let claw = ItemDefinition::new("claw", "Claw", ItemSlot::Weapon)
            .with_effect(ItemEffect::LifeSteal { percent: 0.1 });

        assert!(equipment.equip(fang.clone()).is_none());
        assert_eq!(equipment.equip(claw), Some(fang));
        assert_eq!(equipment.hooks(ItemHook::OnSuccessfulAbilityUsed).count(), 1);
        assert_eq!(equipment.hooks(ItemHook::OnDamaged).count(), 0);
    }

    #[test]
    fn armor_bonus_sums_items() {
        let mut equipment = Equipment::empty();
        equipment.equip(ItemDefinition::new("mail", "Mail", ItemSlot::Armor).with_armor(6));
        equipment.equip(ItemDefinition::new("ring", "Ring", ItemSlot::Trinket).with_armor(2));
        assert_eq!(equipment.armor_bonus(), 8);
    }
}
