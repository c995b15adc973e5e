use strum::IntoEnumIterator;

use crate::stats::{Attribute, Attributes};

/// Integer stat progression: `min(base + level * multiplier / divisor, cap)`.
///
/// Division floors. RON: `(base: 2, multiplier: 1, divisor: 2, cap: Some(20))`;
/// every field has a default, so `(base: 5)` is a flat 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelFormula {
    pub base: i32,
    pub multiplier: i32,
    pub divisor: i32,
    pub cap: Option<i32>,
}

impl Default for LevelFormula {
    fn default() -> Self {
        Self::flat(0)
    }
}

impl LevelFormula {
    pub const fn flat(base: i32) -> Self {
        Self {
            base,
            multiplier: 0,
            divisor: 1,
            cap: None,
        }
    }

    /// `base + level / divisor`.
    pub const fn per_levels(base: i32, divisor: i32) -> Self {
        Self {
            base,
            multiplier: 1,
            divisor,
            cap: None,
        }
    }

    pub const fn with_cap(mut self, cap: i32) -> Self {
        self.cap = Some(cap);
        self
    }

    pub fn evaluate(&self, level: u32) -> i32 {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        let grown = self.base + level.saturating_mul(self.multiplier) / self.divisor.max(1);
        match self.cap {
            Some(cap) => grown.min(cap),
            None => grown,
        }
    }
}

/// One [`LevelFormula`] per attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttributeFormulas {
    pub strength: LevelFormula,
    pub dexterity: LevelFormula,
    pub constitution: LevelFormula,
    pub intelligence: LevelFormula,
    pub luck: LevelFormula,
}

impl AttributeFormulas {
    pub const fn get(&self, attr: Attribute) -> &LevelFormula {
        match attr {
            Attribute::Strength => &self.strength,
            Attribute::Dexterity => &self.dexterity,
            Attribute::Constitution => &self.constitution,
            Attribute::Intelligence => &self.intelligence,
            Attribute::Luck => &self.luck,
        }
    }

    pub fn evaluate(&self, level: u32) -> Attributes {
        let mut attrs = Attributes::default();
        for attr in Attribute::iter() {
            attrs.set(attr, self.get(attr).evaluate(level).max(0));
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_division_and_cap() {
        let f = LevelFormula {
            base: 2,
            multiplier: 3,
            divisor: 4,
            cap: Some(20),
        };
        assert_eq!(f.evaluate(1), 2);
        assert_eq!(f.evaluate(10), 9);
        assert_eq!(f.evaluate(50), 20);
    }

    #[test]
    fn zero_divisor_is_treated_as_one() {
        let f = LevelFormula {
            divisor: 0,
            ..LevelFormula::per_levels(1, 1)
        };
        assert_eq!(f.evaluate(7), 8);
    }

    #[test]
    fn attribute_formulas_evaluate_each_attribute() {
        let formulas = AttributeFormulas {
            strength: LevelFormula::per_levels(1, 2),
            luck: LevelFormula::flat(3),
            ..AttributeFormulas::default()
        };
        assert_eq!(formulas.evaluate(10), Attributes::new(6, 0, 0, 0, 3));
    }
}
