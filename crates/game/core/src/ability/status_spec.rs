//! Status effect templates carried by ability definitions.

use crate::state::{CombatantId, StatusEffect, StatusEffectKind};
use crate::stats::Attribute;

use super::definition::AbilityKey;

/// A status effect before it has an owner.
///
/// Attributed kinds (`Marked`, `StackingDamage`) get their caster and
/// ability only when instantiated, so a template can never carry a wrong
/// owner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusTemplate {
    AttributeBuff { attr: Attribute, value: i32 },
    AttributeDebuff { attr: Attribute, value: i32 },
    Poisoned { damage: i32 },
    Bleeding { damage: i32 },
    Regenerating { amount: i32 },
    Marked,
    StackingDamage { value: f64 },
    TurnSkipChance { chance: f64 },
    DmgBuff { percent: f64 },
    DmgDebuff { percent: f64 },
    DmgReduction { percent: f64 },
    DmgVulnerability { percent: f64 },
    DmgReflect { percent: f64 },
    CritDmgBuff { percent: f64 },
    Undying,
    ResistanceBuff { percent: f64 },
}

/// A template plus its duration in owner turns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSpec {
    pub effect: StatusTemplate,
    pub turns: u32,
}

impl StatusSpec {
    pub fn new(effect: StatusTemplate, turns: u32) -> Self {
        Self { effect, turns }
    }

    /// Build the concrete effect for `caster` using `ability`.
    pub fn instantiate(&self, caster: CombatantId, ability: &AbilityKey, source: &str) -> StatusEffect {
        let kind = match self.effect {
            StatusTemplate::AttributeBuff { attr, value } => StatusEffectKind::AttributeBuff { attr, value },
            StatusTemplate::AttributeDebuff { attr, value } => {
                StatusEffectKind::AttributeDebuff { attr, value }
            }
            StatusTemplate::Poisoned { damage } => StatusEffectKind::Poisoned { damage },
            StatusTemplate::Bleeding { damage } => StatusEffectKind::Bleeding { damage },
            StatusTemplate::Regenerating { amount } => StatusEffectKind::Regenerating { amount },
            StatusTemplate::Marked => StatusEffectKind::Marked { caster },
            StatusTemplate::StackingDamage { value } => StatusEffectKind::StackingDamage {
                caster,
                ability: ability.clone(),
                value,
            },
            StatusTemplate::TurnSkipChance { chance } => StatusEffectKind::TurnSkipChance { chance },
            StatusTemplate::DmgBuff { percent } => StatusEffectKind::DmgBuff { percent },
            StatusTemplate::DmgDebuff { percent } => StatusEffectKind::DmgDebuff { percent },
            StatusTemplate::DmgReduction { percent } => StatusEffectKind::DmgReduction { percent },
            StatusTemplate::DmgVulnerability { percent } => {
                StatusEffectKind::DmgVulnerability { percent }
            }
            StatusTemplate::DmgReflect { percent } => StatusEffectKind::DmgReflect { percent },
            StatusTemplate::CritDmgBuff { percent } => StatusEffectKind::CritDmgBuff { percent },
            StatusTemplate::Undying => StatusEffectKind::Undying,
            StatusTemplate::ResistanceBuff { percent } => StatusEffectKind::ResistanceBuff { percent },
        };
        StatusEffect::new(kind, self.turns, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributed_templates_take_the_caster() {
        let key = AbilityKey::from("expose_2");
        let spec = StatusSpec::new(StatusTemplate::StackingDamage { value: 0.15 }, 3);
        let effect = spec.instantiate(CombatantId(9), &key, "Expose II");

        assert_eq!(effect.turns_remaining, 3);
        assert_eq!(effect.source, "Expose II");
        assert_eq!(
            effect.kind,
            StatusEffectKind::StackingDamage {
                caster: CombatantId(9),
                ability: key,
                value: 0.15,
            }
        );
    }
}
