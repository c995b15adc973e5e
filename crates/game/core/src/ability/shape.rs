//! Ability shapes: the handful of evaluators every catalog row feeds into.
//!
//! Tiers of the same family differ only in the numbers inside their shape.

use crate::stats::{Attribute, Attributes, ResourceKind, Resources, ceil_amount, percent_of};

use super::status_spec::StatusSpec;

// ============================================================================
// Damage ranges
// ============================================================================

/// Inclusive base damage range. `min == max` is a fixed amount.
///
/// RON: `(2, 3)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(i32, i32)", into = "(i32, i32)"))]
pub struct DamageRange {
    pub min: i32,
    pub max: i32,
}

impl DamageRange {
    /// Creates a range, swapping the bounds if given in the wrong order.
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub const fn fixed(amount: i32) -> Self {
        Self {
            min: amount,
            max: amount,
        }
    }

    pub const fn is_fixed(&self) -> bool {
        self.min == self.max
    }
}

impl From<(i32, i32)> for DamageRange {
    fn from((a, b): (i32, i32)) -> Self {
        Self::new(a, b)
    }
}

impl From<DamageRange> for (i32, i32) {
    fn from(range: DamageRange) -> Self {
        (range.min, range.max)
    }
}

/// A condition on the target that swaps in a different damage range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetCondition {
    Poisoned,
    Bleeding,
    /// Carries at least one Mark placed by the caster.
    MarkedByCaster,
    Legendary,
}

/// Damage range used instead of the base range when `when` holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalRange {
    pub when: TargetCondition,
    pub range: DamageRange,
}

// ============================================================================
// Special damage formulas
// ============================================================================

/// Damage computed from the caster instead of rolled from a range.
///
/// The result is ceilinged and used as a fixed range, so it still goes
/// through attribute scaling, multipliers and mitigation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageFormula {
    /// `percent` of a combined caster attribute, plus `flat`.
    CasterAttribute {
        attr: Attribute,
        percent: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        flat: i32,
    },

    /// `percent` of the caster's max HP, plus `flat`.
    CasterMaxHp {
        percent: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        flat: i32,
    },

    /// `percent` of the HP the caster is missing, plus `flat`.
    CasterMissingHp {
        percent: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        flat: i32,
    },
}

impl DamageFormula {
    pub fn evaluate(&self, attributes: &Attributes, resources: &Resources) -> DamageRange {
        let amount = match *self {
            Self::CasterAttribute { attr, percent, flat } => {
                ceil_amount(percent * f64::from(attributes.get(attr))) + flat
            }
            Self::CasterMaxHp { percent, flat } => percent_of(percent, resources.max_hp) + flat,
            Self::CasterMissingHp { percent, flat } => {
                percent_of(percent, (resources.max_hp - resources.hp).max(0)) + flat
            }
        };
        DamageRange::fixed(amount.max(0))
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// What an ability does once its targets are resolved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityShape {
    /// Rolled damage through the full pipeline, then optional status effects.
    Damage {
        range: DamageRange,
        #[cfg_attr(feature = "serde", serde(default))]
        bonus: Option<ConditionalRange>,
        #[cfg_attr(feature = "serde", serde(default))]
        effects: Vec<StatusSpec>,
    },

    /// Formula damage through the full pipeline.
    FormulaDamage {
        formula: DamageFormula,
        #[cfg_attr(feature = "serde", serde(default))]
        effects: Vec<StatusSpec>,
    },

    /// Status effects only; targets may still dodge and resist.
    Debuff { effects: Vec<StatusSpec> },

    /// Status effects on the caster. Never dodged or resisted.
    SelfBuff { effects: Vec<StatusSpec> },

    /// Heal the caster for a share of max HP.
    HealSelf { percent: f64 },

    /// Restore a share of the caster's max armor.
    RestoreArmor { percent: f64 },

    /// Restore a share of the caster's max mana.
    RestoreMana { percent: f64 },

    /// Take a share of each target's current resource and give it to the caster.
    Steal { resource: ResourceKind, percent: f64 },
}

impl AbilityShape {
    /// Status effect templates carried by this shape.
    pub fn effects(&self) -> &[StatusSpec] {
        match self {
            Self::Damage { effects, .. }
            | Self::FormulaDamage { effects, .. }
            | Self::Debuff { effects }
            | Self::SelfBuff { effects } => effects,
            Self::HealSelf { .. }
            | Self::RestoreArmor { .. }
            | Self::RestoreMana { .. }
            | Self::Steal { .. } => &[],
        }
    }

    /// Returns true if the shape acts on the caster alone, whatever the selector.
    pub const fn is_self_targeted(&self) -> bool {
        matches!(
            self,
            Self::SelfBuff { .. }
                | Self::HealSelf { .. }
                | Self::RestoreArmor { .. }
                | Self::RestoreMana { .. }
        )
    }
}
