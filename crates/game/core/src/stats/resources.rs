//! Resource pools: HP, mana and armor.
//!
//! Maximums are recomputed from combined attributes (see
//! [`crate::state::Combatant::recompute_derived`]); current values are stored
//! and always clamped to their maximum.
//!
//! Damage is absorbed by armor before it reaches HP. HP may drop to zero or
//! below (defeat) unless the combatant is Undying, in which case it stops at 1.

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Health points.
    Hp,
    /// Mana, spent on abilities.
    Mana,
    /// Armor, absorbs damage before HP.
    Armor,
}

impl ResourceKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Mana => "mana",
            Self::Armor => "armor",
        }
    }
}

/// How a hit was split between armor and HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageTaken {
    pub armor_lost: i32,
    pub hp_lost: i32,
}

impl DamageTaken {
    /// Total damage that actually landed (armor + HP).
    pub const fn total(&self) -> i32 {
        self.armor_lost + self.hp_lost
    }
}

/// Current and maximum resource values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub armor: i32,
    pub max_armor: i32,
}

impl Resources {
    /// Resources filled to their maximums.
    pub const fn full(max_hp: i32, max_mana: i32, max_armor: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            mana: max_mana,
            max_mana,
            armor: max_armor,
            max_armor,
        }
    }

    pub const fn get(&self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Hp => self.hp,
            ResourceKind::Mana => self.mana,
            ResourceKind::Armor => self.armor,
        }
    }

    pub const fn max(&self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Hp => self.max_hp,
            ResourceKind::Mana => self.max_mana,
            ResourceKind::Armor => self.max_armor,
        }
    }

    #[inline]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Apply already-mitigated damage: armor first, the remainder to HP.
    pub fn take_damage(&mut self, amount: i32, undying: bool) -> DamageTaken {
        let amount = amount.max(0);
        let armor_lost = amount.min(self.armor.max(0));
        self.armor -= armor_lost;
        let hp_lost = self.take_hp_damage(amount - armor_lost, undying);
        DamageTaken {
            armor_lost,
            hp_lost,
        }
    }

    /// Damage that bypasses armor (poison, bleeding, resource steals).
    ///
    /// Returns the HP actually lost.
    pub fn take_hp_damage(&mut self, amount: i32, undying: bool) -> i32 {
        let amount = amount.max(0);
        let before = self.hp;
        let mut after = before - amount;
        if undying && after < 1 {
            after = before.min(1);
        }
        self.hp = after;
        (before - after).max(0)
    }

    /// Restore HP up to the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.restore(ResourceKind::Hp, amount)
    }

    pub fn restore_armor(&mut self, amount: i32) -> i32 {
        self.restore(ResourceKind::Armor, amount)
    }

    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        self.restore(ResourceKind::Mana, amount)
    }

    /// Restore a resource up to its maximum. Returns the amount restored.
    pub fn restore(&mut self, kind: ResourceKind, amount: i32) -> i32 {
        let current = self.get(kind);
        let actual = amount.max(0).min((self.max(kind) - current).max(0));
        self.set(kind, current + actual);
        actual
    }

    /// Remove up to `amount` of a resource, never below zero.
    ///
    /// HP drains respect the Undying floor. Returns the amount removed.
    pub fn drain(&mut self, kind: ResourceKind, amount: i32, undying: bool) -> i32 {
        match kind {
            ResourceKind::Hp => self.take_hp_damage(amount.min(self.hp.max(0)), undying),
            ResourceKind::Mana | ResourceKind::Armor => {
                let current = self.get(kind);
                let actual = amount.max(0).min(current.max(0));
                self.set(kind, current - actual);
                actual
            }
        }
    }

    /// Spend mana if enough is available.
    pub fn spend_mana(&mut self, amount: i32) -> bool {
        if self.mana < amount {
            return false;
        }
        self.mana -= amount.max(0);
        true
    }

    /// Clamp every current value to its maximum.
    pub fn clamp_to_max(&mut self) {
        self.hp = self.hp.min(self.max_hp);
        self.mana = self.mana.min(self.max_mana);
        self.armor = self.armor.min(self.max_armor);
    }

    fn set(&mut self, kind: ResourceKind, value: i32) {
        match kind {
            ResourceKind::Hp => self.hp = value,
            ResourceKind::Mana => self.mana = value,
            ResourceKind::Armor => self.armor = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_absorbs_before_hp() {
        let mut res = Resources::full(50, 10, 8);
        let taken = res.take_damage(5, false);
        assert_eq!(taken, DamageTaken { armor_lost: 5, hp_lost: 0 });
        assert_eq!(res.hp, 50);
        assert_eq!(res.armor, 3);

        let taken = res.take_damage(10, false);
        assert_eq!(taken, DamageTaken { armor_lost: 3, hp_lost: 7 });
        assert_eq!(res.hp, 43);
        assert_eq!(res.armor, 0);
    }

    #[test]
    fn hp_may_drop_below_zero_without_undying() {
        let mut res = Resources::full(10, 0, 0);
        let taken = res.take_damage(25, false);
        assert_eq!(taken.hp_lost, 25);
        assert_eq!(res.hp, -15);
        assert!(!res.is_alive());
    }

    #[test]
    fn undying_floors_hp_at_one() {
        let mut res = Resources::full(10, 0, 0);
        let taken = res.take_damage(25, true);
        assert_eq!(res.hp, 1);
        assert_eq!(taken.hp_lost, 9);
    }

    #[test]
    fn restore_caps_at_max() {
        let mut res = Resources::full(10, 10, 10);
        res.hp = 4;
        assert_eq!(res.heal(100), 6);
        assert_eq!(res.hp, 10);
        assert_eq!(res.restore_armor(3), 0);
    }

    #[test]
    fn drain_never_goes_negative() {
        let mut res = Resources::full(10, 4, 2);
        assert_eq!(res.drain(ResourceKind::Mana, 9, false), 4);
        assert_eq!(res.mana, 0);
        assert_eq!(res.drain(ResourceKind::Hp, 30, false), 10);
        assert_eq!(res.hp, 0);
    }

    #[test]
    fn spend_mana_requires_balance() {
        let mut res = Resources::full(10, 5, 0);
        assert!(!res.spend_mana(6));
        assert!(res.spend_mana(5));
        assert_eq!(res.mana, 0);
    }
}
