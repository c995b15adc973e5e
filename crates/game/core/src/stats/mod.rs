//! Combatant stat system.
//!
//! # Architecture
//!
//! ```text
//! [ Base Attributes ]  (stored)
//!      ↓  status effects + equipment (flat bonuses)
//! [ Combined Attributes ]  (recomputed on demand)
//!      ↓
//! [ Derived Maximums ]  max HP from CON, max mana from INT
//!      ↓
//! [ Resources ]  current HP / mana / armor (stored, clamped to maximums)
//! ```

pub mod attributes;
pub mod bonus;
pub mod counters;
pub mod resources;

pub use attributes::{Attribute, Attributes, ScalingAttributes};
pub use bonus::{ATTRIBUTE_BOUNDS, AttributeBonuses};
pub use counters::CombatStats;
pub use resources::{DamageTaken, ResourceKind, Resources};

/// Ceiling of `percent * base`, the rounding used for every
/// percentage-derived amount (damage, heals, restores, steals).
///
/// The product is snapped to 1e-9 first so values like `0.1 * 30` land on
/// `3` instead of `4`.
pub fn percent_of(percent: f64, base: i32) -> i32 {
    ceil_amount(percent * f64::from(base))
}

/// Ceiling of a fractional amount, snapped as in [`percent_of`].
pub fn ceil_amount(value: f64) -> i32 {
    let snapped = (value * 1e9).round() / 1e9;
    snapped.ceil() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn percent_of_rounds_up() {
        assert_eq!(percent_of(0.25, 10), 3);
        assert_eq!(percent_of(0.1, 30), 3);
        assert_eq!(percent_of(0.01, 1), 1);
        assert_eq!(percent_of(0.0, 50), 0);
    }

    proptest! {
        #[test]
        fn percent_of_is_ceiling(percent in 0.0f64..2.0, base in 0i32..10_000) {
            let exact = percent * f64::from(base);
            let result = f64::from(percent_of(percent, base));
            prop_assert!(result >= exact - 1e-6);
            prop_assert!(result < exact + 1.0);
        }
    }
}
