use super::ItemEffect;
use crate::stats::AttributeBonuses;

/// Passive item effects summed per category.
///
/// Each category is summed across every equipped item, then applied once by
/// the pipeline regardless of how many matching status stacks the target has.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemEffectTotals {
    pub crit_dmg_boost: f64,
    pub crit_dmg_reduction: f64,
    pub poisoned_target_dmg: f64,
    pub bleeding_target_dmg: f64,
    pub legendary_target_dmg: f64,
    pub self_max_hp_dmg: f64,
    pub self_remaining_hp_dmg: f64,
    pub target_max_hp_dmg: f64,
    pub target_remaining_hp_dmg: f64,
    pub damage_reduction: f64,
    pub status_resist: f64,
}

impl ItemEffectTotals {
    pub fn from_effects<'a>(effects: impl IntoIterator<Item = &'a ItemEffect>) -> Self {
        let mut totals = Self::default();
        for effect in effects {
            match *effect {
                ItemEffect::CritDmgBoost { percent } => totals.crit_dmg_boost += percent,
                ItemEffect::CritDmgReduction { percent } => totals.crit_dmg_reduction += percent,
                ItemEffect::PoisonedTargetDmg { percent } => {
                    totals.poisoned_target_dmg += percent
                }
                ItemEffect::BleedingTargetDmg { percent } => {
                    totals.bleeding_target_dmg += percent
                }
                ItemEffect::LegendaryTargetDmg { percent } => {
                    totals.legendary_target_dmg += percent
                }
                ItemEffect::SelfMaxHpDmg { percent } => totals.self_max_hp_dmg += percent,
                ItemEffect::SelfRemainingHpDmg { percent } => {
                    totals.self_remaining_hp_dmg += percent
                }
                ItemEffect::TargetMaxHpDmg { percent } => totals.target_max_hp_dmg += percent,
                ItemEffect::TargetRemainingHpDmg { percent } => {
                    totals.target_remaining_hp_dmg += percent
                }
                ItemEffect::DamageReduction { percent } => totals.damage_reduction += percent,
                ItemEffect::StatusResist { percent } => totals.status_resist += percent,
                _ => {}
            }
        }
        totals
    }

    /// Adds attribute bonuses from items to `bonuses`.
    pub fn collect_attribute_bonuses<'a>(
        effects: impl IntoIterator<Item = &'a ItemEffect>,
        bonuses: &mut AttributeBonuses,
    ) {
        for effect in effects {
            if let ItemEffect::AttributeBonus { attr, value } = *effect {
                bonuses.add(attr, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_each_category_across_items() {
        let effects = [
            ItemEffect::PoisonedTargetDmg { percent: 0.1 },
            ItemEffect::PoisonedTargetDmg { percent: 0.05 },
            ItemEffect::LifeSteal { percent: 0.5 },
            ItemEffect::DamageReduction { percent: 0.2 },
        ];
        let totals = ItemEffectTotals::from_effects(&effects);
        assert!((totals.poisoned_target_dmg - 0.15).abs() < 1e-9);
        assert!((totals.damage_reduction - 0.2).abs() < 1e-9);
        assert_eq!(totals.crit_dmg_boost, 0.0);
    }
}
