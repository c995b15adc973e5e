//! Nominal damage calculation.
//!
//! # Formula
//!
//! ```text
//! damage  = base
//!         + ceil(base * stacking)                      stacking damage by (caster, ability)
//!         + Σ clamp(ceil(base * scale * attr), 0, base) per scaling attribute
//! damage *= marks_by_caster + 1
//! damage  = ceil(damage * max(0, 1 + buffs - debuffs + item conditionals))
//! damage  = ceil(damage * crit_multiplier)             on crit only
//! damage += flat item bonuses (each ceil(pct * HP value))
//! ```
//!
//! Everything here is pure; the rolls happen in the pipeline.

use crate::config::CombatConfig;
use crate::item::ItemEffectTotals;
use crate::stats::{Attributes, Resources, ScalingAttributes, ceil_amount, percent_of};

/// Contribution of one scaling attribute, capped at doubling the base.
pub fn attribute_bonus(base: i32, value: i32, scale: f64) -> i32 {
    ceil_amount(f64::from(base) * scale * f64::from(value)).clamp(0, base.max(0))
}

/// Summed bonus from every attribute in `scaling`.
pub fn scaling_bonus(
    base: i32,
    attributes: &Attributes,
    scaling: ScalingAttributes,
    config: &CombatConfig,
) -> i32 {
    scaling
        .attributes()
        .map(|attr| attribute_bonus(base, attributes.get(attr), config.attribute_damage_scale(attr)))
        .sum()
}

/// Target conditions that enable item percent bonuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetFlags {
    pub poisoned: bool,
    pub bleeding: bool,
    pub legendary: bool,
}

/// Percent multiplier: `1 + status delta + item conditionals`, floored at 0.
///
/// Each item category applies once when its condition holds, however many
/// stacks the target carries.
pub fn percent_multiplier(status_delta: f64, items: &ItemEffectTotals, target: TargetFlags) -> f64 {
    let mut multiplier = 1.0 + status_delta;
    if target.poisoned {
        multiplier += items.poisoned_target_dmg;
    }
    if target.bleeding {
        multiplier += items.bleeding_target_dmg;
    }
    if target.legendary {
        multiplier += items.legendary_target_dmg;
    }
    multiplier.max(0.0)
}

/// Flat bonus damage from HP-percent item effects.
pub fn flat_item_bonus(items: &ItemEffectTotals, caster: &Resources, target: &Resources) -> i32 {
    percent_of(items.self_max_hp_dmg, caster.max_hp)
        + percent_of(items.self_remaining_hp_dmg, caster.hp.max(0))
        + percent_of(items.target_max_hp_dmg, target.max_hp)
        + percent_of(items.target_remaining_hp_dmg, target.hp.max(0))
}

/// Inputs for one target's nominal damage, after the rolls.
#[derive(Clone, Copy, Debug)]
pub struct DamageInput<'a> {
    pub base: i32,
    /// Summed stacking damage fraction from this caster and ability.
    pub stacking: f64,
    /// Marks the target carries from this caster.
    pub marks: u32,
    pub attributes: &'a Attributes,
    pub scaling: ScalingAttributes,
    pub multiplier: f64,
    /// Crit multiplier when the crit roll succeeded.
    pub crit: Option<f64>,
    pub flat_bonus: i32,
}

/// Every intermediate value, kept for trace logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageBreakdown {
    pub base: i32,
    pub stacking_bonus: i32,
    pub attribute_bonus: i32,
    pub after_marks: i32,
    pub after_multiplier: i32,
    pub after_crit: i32,
    pub flat_bonus: i32,
    /// Nominal damage before hooks and mitigation.
    pub total: i32,
}

pub fn nominal_damage(input: &DamageInput<'_>, config: &CombatConfig) -> DamageBreakdown {
    let base = input.base.max(0);
    let stacking_bonus = ceil_amount(f64::from(base) * input.stacking).max(0);
    let attribute_bonus = scaling_bonus(base, input.attributes, input.scaling, config);

    let after_marks = (base + stacking_bonus + attribute_bonus).saturating_mul(input.marks as i32 + 1);
    let after_multiplier = ceil_amount(f64::from(after_marks) * input.multiplier);
    let after_crit = match input.crit {
        Some(multiplier) => ceil_amount(f64::from(after_multiplier) * multiplier),
        None => after_multiplier,
    };
    let total = (after_crit + input.flat_bonus).max(0);

    DamageBreakdown {
        base,
        stacking_bonus,
        attribute_bonus,
        after_marks,
        after_multiplier,
        after_crit,
        flat_bonus: input.flat_bonus,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(base: i32, attributes: &Attributes) -> DamageInput<'_> {
        DamageInput {
            base,
            stacking: 0.0,
            marks: 0,
            attributes,
            scaling: ScalingAttributes::empty(),
            multiplier: 1.0,
            crit: None,
            flat_bonus: 0,
        }
    }

    #[test]
    fn attribute_bonus_caps_at_base() {
        assert_eq!(attribute_bonus(4, 10, 0.025), 1);
        assert_eq!(attribute_bonus(4, 1_000, 0.025), 4);
        assert_eq!(attribute_bonus(4, -10, 0.025), 0);
    }

    #[test]
    fn strength_scaling_matches_formula() {
        let config = CombatConfig::default();
        let attrs = Attributes::new(10, 0, 0, 0, 0);
        for base in [2, 3] {
            let mut i = input(base, &attrs);
            i.scaling = ScalingAttributes::STRENGTH;
            let expected = base + ((f64::from(base) * 0.025 * 10.0).ceil() as i32).min(base);
            assert_eq!(nominal_damage(&i, &config).total, expected);
        }
    }

    #[test]
    fn marks_multiply_after_additive_terms() {
        let config = CombatConfig::default();
        let attrs = Attributes::default();
        let mut i = input(10, &attrs);
        i.stacking = 0.25;
        i.marks = 2;
        // (10 + ceil(2.5)) * 3
        assert_eq!(nominal_damage(&i, &config).total, 39);
    }

    #[test]
    fn multiplier_then_crit_then_flat() {
        let config = CombatConfig::default();
        let attrs = Attributes::default();
        let mut i = input(10, &attrs);
        i.multiplier = 1.15;
        i.crit = Some(1.5);
        i.flat_bonus = 2;
        let b = nominal_damage(&i, &config);
        assert_eq!(b.after_multiplier, 12);
        assert_eq!(b.after_crit, 18);
        assert_eq!(b.total, 20);
    }

    #[test]
    fn conditional_item_bonus_applies_once() {
        let items = ItemEffectTotals {
            poisoned_target_dmg: 0.2,
            bleeding_target_dmg: 0.5,
            ..ItemEffectTotals::default()
        };
        let flags = TargetFlags {
            poisoned: true,
            ..TargetFlags::default()
        };
        assert!((percent_multiplier(0.1, &items, flags) - 1.3).abs() < 1e-9);
        assert_eq!(percent_multiplier(-3.0, &items, flags), 0.0);
    }

    #[test]
    fn flat_bonus_rounds_each_term_up() {
        let items = ItemEffectTotals {
            self_max_hp_dmg: 0.01,
            target_remaining_hp_dmg: 0.05,
            ..ItemEffectTotals::default()
        };
        let caster = Resources::full(50, 0, 0);
        let target = Resources::full(30, 0, 0);
        // ceil(0.5) + ceil(1.5)
        assert_eq!(flat_item_bonus(&items, &caster, &target), 3);
    }
}
