//! Attribute bonuses from status effects and equipment.
//!
//! Bonuses never overwrite base attributes. They are summed per attribute and
//! folded in every time combined attributes are requested.

use strum::IntoEnumIterator;

use super::attributes::{Attribute, Attributes};

/// Combined attributes never leave this range; debuffs stop at zero.
pub const ATTRIBUTE_BOUNDS: (i32, i32) = (0, 999);

/// Flat per-attribute bonus totals. Negative values are debuffs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttributeBonuses {
    totals: Attributes,
}

impl AttributeBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attr: Attribute, value: i32) {
        let current = self.totals.get(attr);
        self.totals.set(attr, current.saturating_add(value));
    }

    pub fn total(&self, attr: Attribute) -> i32 {
        self.totals.get(attr)
    }

    /// `base` plus every bonus, clamped to [`ATTRIBUTE_BOUNDS`].
    pub fn apply(&self, base: &Attributes) -> Attributes {
        let (min, max) = ATTRIBUTE_BOUNDS;
        let mut combined = *base;
        for attr in Attribute::iter() {
            let value = base.get(attr).saturating_add(self.total(attr));
            combined.set(attr, value.clamp(min, max));
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonuses_sum_per_attribute() {
        let mut bonuses = AttributeBonuses::new();
        bonuses.add(Attribute::Strength, 4);
        bonuses.add(Attribute::Strength, -1);
        let combined = bonuses.apply(&Attributes::new(6, 2, 0, 0, 0));
        assert_eq!(combined.strength, 9);
        assert_eq!(combined.dexterity, 2);
    }

    #[test]
    fn debuffs_floor_at_zero() {
        let mut bonuses = AttributeBonuses::new();
        bonuses.add(Attribute::Dexterity, -50);
        let combined = bonuses.apply(&Attributes::new(5, 5, 5, 5, 5));
        assert_eq!(combined.dexterity, 0);
        assert_eq!(combined.strength, 5);
    }
}
