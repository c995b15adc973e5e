use crate::stats::Attribute;

/// When an item effect participates in ability resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemHook {
    /// Always-on totals read by the damage formula.
    Passive,
    /// Wearer's ability landed on a target; runs before damage is finalized.
    OnSuccessfulAbilityUsed,
    /// Wearer is the target of an ability that was not dodged.
    OnAbilityUsedAgainst,
    /// Wearer lost armor or HP to an ability.
    OnDamaged,
}

/// A single effect carried by an item.
///
/// Percent payloads are fractions (`0.1` = 10%).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    // ========================================================================
    // Passive totals
    // ========================================================================
    AttributeBonus { attr: Attribute, value: i32 },
    CritDmgBoost { percent: f64 },
    CritDmgReduction { percent: f64 },
    /// Bonus damage against a poisoned target.
    PoisonedTargetDmg { percent: f64 },
    /// Bonus damage against a bleeding target.
    BleedingTargetDmg { percent: f64 },
    /// Bonus damage against a legendary target.
    LegendaryTargetDmg { percent: f64 },
    /// Flat bonus damage equal to a share of the wearer's max HP.
    SelfMaxHpDmg { percent: f64 },
    SelfRemainingHpDmg { percent: f64 },
    TargetMaxHpDmg { percent: f64 },
    TargetRemainingHpDmg { percent: f64 },
    DamageReduction { percent: f64 },
    StatusResist { percent: f64 },

    // ========================================================================
    // On successful ability used
    // ========================================================================
    /// Extra damage when the target is below `threshold` of its max HP.
    LowHpExecute { threshold: f64, percent: f64 },
    /// Heal for a share of the damage dealt.
    LifeSteal { percent: f64 },
    /// Restore mana for a share of the damage dealt.
    ManaSiphon { percent: f64 },

    // ========================================================================
    // On ability used against
    // ========================================================================
    /// Chance to reduce an incoming hit.
    Parry { chance: f64, percent: f64 },
    /// Flat damage back at the attacker.
    Thorns { damage: i32 },

    // ========================================================================
    // On damaged
    // ========================================================================
    /// Restore armor equal to a share of the damage taken.
    ArmorOnDamaged { percent: f64 },
    ManaOnDamaged { amount: i32 },
}

impl ItemEffect {
    pub const fn hook(&self) -> ItemHook {
        match self {
            Self::LowHpExecute { .. } | Self::LifeSteal { .. } | Self::ManaSiphon { .. } => {
                ItemHook::OnSuccessfulAbilityUsed
            }
            Self::Parry { .. } | Self::Thorns { .. } => ItemHook::OnAbilityUsedAgainst,
            Self::ArmorOnDamaged { .. } | Self::ManaOnDamaged { .. } => ItemHook::OnDamaged,
            _ => ItemHook::Passive,
        }
    }
}
