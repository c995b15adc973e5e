//! Status effect system for combatants.
//!
//! Status effects are timed modifiers attached to a combatant. Each one
//! carries `turns_remaining`, which is decremented once at the end of the
//! owner's turn; the effect is removed when it reaches zero. No effect is
//! permanent: keeping one alive means reapplying it.
//!
//! # Attribution
//!
//! Marks and stacking-damage debuffs record the [`CombatantId`] of the caster
//! that applied them. Only the same caster benefits from them, which the
//! aggregate queries below enforce by filtering on that id.

use arrayvec::ArrayVec;
use strum::{Display, EnumDiscriminants};

use crate::ability::AbilityKey;
use crate::config::CombatConfig;
use crate::state::CombatantId;
use crate::stats::{Attribute, AttributeBonuses};

/// Types of status effects and their payloads.
///
/// Percent payloads are fractions (`0.2` = 20%).
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(StatusKey), derive(Hash, Display))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Attribute modifiers
    // ========================================================================
    /// Flat increase to one attribute.
    AttributeBuff { attr: Attribute, value: i32 },

    /// Flat decrease to one attribute.
    AttributeDebuff { attr: Attribute, value: i32 },

    // ========================================================================
    // Damage over time / healing over time
    // ========================================================================
    /// HP loss at the start of each turn.
    Poisoned { damage: i32 },

    /// HP loss at the start of each turn.
    Bleeding { damage: i32 },

    /// HP recovery at the start of each turn.
    Regenerating { amount: i32 },

    // ========================================================================
    // Attributed debuffs
    // ========================================================================
    /// Each Mark from the attacker multiplies its damage by `marks + 1`.
    Marked { caster: CombatantId },

    /// Extra damage, as a fraction of base, for one (caster, ability) pair.
    StackingDamage {
        caster: CombatantId,
        ability: AbilityKey,
        value: f64,
    },

    // ========================================================================
    // Control
    // ========================================================================
    /// Chance to lose the turn.
    TurnSkipChance { chance: f64 },

    // ========================================================================
    // Damage modifiers
    // ========================================================================
    DmgBuff { percent: f64 },
    DmgDebuff { percent: f64 },
    DmgReduction { percent: f64 },
    DmgVulnerability { percent: f64 },
    /// Returns a share of incoming nominal damage to the attacker.
    DmgReflect { percent: f64 },
    CritDmgBuff { percent: f64 },

    // ========================================================================
    // Survival
    // ========================================================================
    /// HP cannot drop below 1.
    Undying,

    /// Extra chance to resist newly applied effects.
    ResistanceBuff { percent: f64 },
}

impl StatusEffectKind {
    /// The kind tag, without payload.
    pub fn key(&self) -> StatusKey {
        StatusKey::from(self)
    }

    /// Short human-readable description used in narrative text.
    pub fn describe(&self) -> String {
        match self {
            Self::AttributeBuff { attr, value } => format!("+{value} {}", attr.short()),
            Self::AttributeDebuff { attr, value } => format!("-{value} {}", attr.short()),
            Self::Poisoned { damage } => format!("Poisoned ({damage}/turn)"),
            Self::Bleeding { damage } => format!("Bleeding ({damage}/turn)"),
            Self::Regenerating { amount } => format!("Regenerating ({amount}/turn)"),
            Self::Marked { .. } => "Marked".to_string(),
            Self::StackingDamage { value, .. } => format!("Exposed (+{})", pct(*value)),
            Self::TurnSkipChance { chance } => format!("Dazed ({} skip)", pct(*chance)),
            Self::DmgBuff { percent } => format!("+{} damage", pct(*percent)),
            Self::DmgDebuff { percent } => format!("-{} damage", pct(*percent)),
            Self::DmgReduction { percent } => format!("{} damage reduction", pct(*percent)),
            Self::DmgVulnerability { percent } => format!("{} vulnerability", pct(*percent)),
            Self::DmgReflect { percent } => format!("{} reflect", pct(*percent)),
            Self::CritDmgBuff { percent } => format!("+{} crit damage", pct(*percent)),
            Self::Undying => "Undying".to_string(),
            Self::ResistanceBuff { percent } => format!("+{} resistance", pct(*percent)),
        }
    }
}

fn pct(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// A single status effect with its remaining lifetime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Owner turns left before removal. Always at least 1 while stored.
    pub turns_remaining: u32,
    /// Display name of whatever applied the effect (ability or item).
    pub source: String,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, turns: u32, source: impl Into<String>) -> Self {
        Self {
            kind,
            turns_remaining: turns.max(1),
            source: source.into(),
        }
    }

    pub fn key(&self) -> StatusKey {
        self.kind.key()
    }
}

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Appends an effect. Stacks of the same kind are kept side by side.
    ///
    /// Returns `false` (and drops the effect) when the list is full.
    pub fn push(&mut self, effect: StatusEffect) -> bool {
        match self.effects.try_push(effect) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    effect = %err.element().key(),
                    "status effect list full, dropping effect"
                );
                false
            }
        }
    }

    /// Decrements every effect once and removes the ones that ran out.
    ///
    /// Returns the expired effects in their original order.
    pub fn tick(&mut self) -> Vec<StatusEffect> {
        for effect in self.effects.iter_mut() {
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
        }

        let mut expired = Vec::new();
        let mut kept = ArrayVec::new();
        for effect in self.effects.drain(..) {
            if effect.turns_remaining == 0 {
                expired.push(effect);
            } else {
                kept.push(effect);
            }
        }
        self.effects = kept;
        expired
    }

    pub fn has(&self, key: StatusKey) -> bool {
        self.effects.iter().any(|e| e.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    // ========================================================================
    // Aggregates used by the resolution pipeline
    // ========================================================================

    fn sum(&self, f: impl Fn(&StatusEffectKind) -> Option<f64>) -> f64 {
        self.effects.iter().filter_map(|e| f(&e.kind)).sum()
    }

    /// Net percent damage reduction (reductions minus vulnerabilities), unclamped.
    pub fn damage_reduction(&self) -> f64 {
        self.sum(|k| match k {
            StatusEffectKind::DmgReduction { percent } => Some(*percent),
            StatusEffectKind::DmgVulnerability { percent } => Some(-*percent),
            _ => None,
        })
    }

    /// Net outgoing damage multiplier delta (buffs minus debuffs).
    pub fn damage_multiplier_delta(&self) -> f64 {
        self.sum(|k| match k {
            StatusEffectKind::DmgBuff { percent } => Some(*percent),
            StatusEffectKind::DmgDebuff { percent } => Some(-*percent),
            _ => None,
        })
    }

    pub fn reflect_percent(&self) -> f64 {
        self.sum(|k| match k {
            StatusEffectKind::DmgReflect { percent } => Some(*percent),
            _ => None,
        })
    }

    pub fn resist_bonus(&self) -> f64 {
        self.sum(|k| match k {
            StatusEffectKind::ResistanceBuff { percent } => Some(*percent),
            _ => None,
        })
    }

    pub fn crit_damage_bonus(&self) -> f64 {
        self.sum(|k| match k {
            StatusEffectKind::CritDmgBuff { percent } => Some(*percent),
            _ => None,
        })
    }

    /// The strongest active turn-skip chance.
    pub fn turn_skip_chance(&self) -> f64 {
        self.effects
            .iter()
            .filter_map(|e| match e.kind {
                StatusEffectKind::TurnSkipChance { chance } => Some(chance),
                _ => None,
            })
            .fold(0.0, f64::max)
    }

    /// Number of Marks placed by `caster`.
    pub fn marks_by(&self, caster: CombatantId) -> u32 {
        self.effects
            .iter()
            .filter(|e| matches!(e.kind, StatusEffectKind::Marked { caster: c } if c == caster))
            .count() as u32
    }

    /// Summed stacking damage placed by `caster` with `ability`.
    pub fn stacking_damage(&self, caster: CombatantId, ability: &AbilityKey) -> f64 {
        self.sum(|k| match k {
            StatusEffectKind::StackingDamage {
                caster: c,
                ability: a,
                value,
            } if *c == caster && a == ability => Some(*value),
            _ => None,
        })
    }

    pub fn is_undying(&self) -> bool {
        self.has(StatusKey::Undying)
    }

    /// Total poison and bleed damage due at the start of a turn.
    pub fn damage_over_time(&self) -> (i32, i32) {
        self.effects
            .iter()
            .fold((0, 0), |(poison, bleed), e| match e.kind {
                StatusEffectKind::Poisoned { damage } => (poison + damage, bleed),
                StatusEffectKind::Bleeding { damage } => (poison, bleed + damage),
                _ => (poison, bleed),
            })
    }

    pub fn regeneration(&self) -> i32 {
        self.effects
            .iter()
            .filter_map(|e| match e.kind {
                StatusEffectKind::Regenerating { amount } => Some(amount),
                _ => None,
            })
            .sum()
    }

    /// Adds every attribute buff/debuff to `bonuses` as a flat bonus.
    pub fn collect_attribute_bonuses(&self, bonuses: &mut AttributeBonuses) {
        for effect in &self.effects {
            match effect.kind {
                StatusEffectKind::AttributeBuff { attr, value } => {
                    bonuses.add(attr, value)
                }
                StatusEffectKind::AttributeDebuff { attr, value } => {
                    bonuses.add(attr, -value)
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(kind: StatusEffectKind, turns: u32) -> StatusEffect {
        StatusEffect::new(kind, turns, "test")
    }

    #[test]
    fn tick_decrements_and_prunes() {
        let mut effects = StatusEffects::empty();
        effects.push(effect(StatusEffectKind::Undying, 1));
        effects.push(effect(StatusEffectKind::Poisoned { damage: 2 }, 2));

        let expired = effects.tick();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].key(), StatusKey::Undying);
        assert_eq!(effects.len(), 1);

        let expired = effects.tick();
        assert_eq!(expired[0].key(), StatusKey::Poisoned);
        assert!(effects.is_empty());
    }

    #[test]
    fn zero_turn_effects_still_last_one_turn() {
        let e = StatusEffect::new(StatusEffectKind::Undying, 0, "test");
        assert_eq!(e.turns_remaining, 1);
    }

    #[test]
    fn marks_only_count_for_their_caster() {
        let mut effects = StatusEffects::empty();
        effects.push(effect(StatusEffectKind::Marked { caster: CombatantId(1) }, 3));
        effects.push(effect(StatusEffectKind::Marked { caster: CombatantId(1) }, 3));
        effects.push(effect(StatusEffectKind::Marked { caster: CombatantId(2) }, 3));

        assert_eq!(effects.marks_by(CombatantId(1)), 2);
        assert_eq!(effects.marks_by(CombatantId(2)), 1);
        assert_eq!(effects.marks_by(CombatantId(3)), 0);
    }

    #[test]
    fn stacking_damage_keyed_by_caster_and_ability() {
        let gore = AbilityKey::from("gore_1");
        let bite = AbilityKey::from("bite_1");
        let mut effects = StatusEffects::empty();
        effects.push(effect(
            StatusEffectKind::StackingDamage {
                caster: CombatantId(1),
                ability: gore.clone(),
                value: 0.1,
            },
            3,
        ));
        effects.push(effect(
            StatusEffectKind::StackingDamage {
                caster: CombatantId(1),
                ability: gore.clone(),
                value: 0.1,
            },
            3,
        ));

        assert!((effects.stacking_damage(CombatantId(1), &gore) - 0.2).abs() < 1e-9);
        assert_eq!(effects.stacking_damage(CombatantId(2), &gore), 0.0);
        assert_eq!(effects.stacking_damage(CombatantId(1), &bite), 0.0);
    }

    #[test]
    fn reduction_nets_out_vulnerability() {
        let mut effects = StatusEffects::empty();
        effects.push(effect(StatusEffectKind::DmgReduction { percent: 0.3 }, 2));
        effects.push(effect(StatusEffectKind::DmgVulnerability { percent: 0.1 }, 2));
        assert!((effects.damage_reduction() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn push_rejects_when_full() {
        let mut effects = StatusEffects::empty();
        for _ in 0..CombatConfig::MAX_STATUS_EFFECTS {
            assert!(effects.push(effect(StatusEffectKind::Undying, 1)));
        }
        assert!(!effects.push(effect(StatusEffectKind::Undying, 1)));
    }
}
