//! Item effect hooks run during resolution.
//!
//! Order per target: caster `OnSuccessfulAbilityUsed` (nominal damage is
//! final after it) → target `OnAbilityUsedAgainst` → mitigation → target
//! `OnDamaged` (only when damage landed). Parries shrink what reaches
//! mitigation, never the nominal that reflection reads.

use crate::item::{ItemEffect, ItemHook};
use crate::state::Combatant;
use crate::stats::percent_of;

use super::narrative;
use super::rng::CombatRng;

/// Caster-side hook results for one target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CasterHooks {
    /// Damage after execute bonuses.
    pub damage: i32,
    /// Share of actual damage to heal the caster for.
    pub lifesteal: f64,
    /// Share of actual damage to restore as caster mana.
    pub mana_siphon: f64,
    pub narrative: Vec<String>,
}

/// Run the caster's on-successful-ability-used effects against `target`.
pub fn on_successful_ability_used(
    effects: &[ItemEffect],
    target: &Combatant,
    damage: i32,
    index: usize,
) -> CasterHooks {
    let mut out = CasterHooks {
        damage,
        ..CasterHooks::default()
    };
    for effect in effects {
        match *effect {
            ItemEffect::LowHpExecute { threshold, percent } => {
                let limit = threshold * f64::from(target.resources.max_hp);
                if f64::from(target.resources.hp) < limit {
                    let bonus = percent_of(percent, out.damage);
                    out.damage += bonus;
                    out.narrative.push(narrative::execute(index, bonus));
                }
            }
            ItemEffect::LifeSteal { percent } => out.lifesteal += percent,
            ItemEffect::ManaSiphon { percent } => out.mana_siphon += percent,
            _ => {}
        }
    }
    out
}

/// Target-side hook results before mitigation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetHooks {
    /// Damage after parries.
    pub damage: i32,
    /// Flat damage returned to the caster.
    pub thorns: i32,
    pub narrative: Vec<String>,
}

/// Run the target's on-ability-used-against effects.
pub fn on_ability_used_against(
    target: &Combatant,
    damage: i32,
    rng: &mut (impl CombatRng + ?Sized),
    index: usize,
) -> TargetHooks {
    let mut out = TargetHooks {
        damage,
        ..TargetHooks::default()
    };
    for effect in target.equipment.hooks(ItemHook::OnAbilityUsedAgainst) {
        match *effect {
            ItemEffect::Parry { chance, percent } => {
                if rng.chance(chance) {
                    let blocked = percent_of(percent, out.damage).min(out.damage);
                    out.damage -= blocked;
                    out.narrative.push(narrative::parry(index, blocked));
                }
            }
            ItemEffect::Thorns { damage } => out.thorns += damage.max(0),
            _ => {}
        }
    }
    out
}

/// Run the target's on-damaged effects after `actual` damage landed.
pub fn on_damaged(target: &mut Combatant, actual: i32, index: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if actual <= 0 {
        return lines;
    }
    let effects: Vec<ItemEffect> = target.equipment.hooks(ItemHook::OnDamaged).cloned().collect();
    for effect in effects {
        match effect {
            ItemEffect::ArmorOnDamaged { percent } => {
                let restored = target.resources.restore_armor(percent_of(percent, actual));
                if restored > 0 {
                    lines.push(narrative::restored(&narrative::target(index), restored, "armor"));
                }
            }
            ItemEffect::ManaOnDamaged { amount } => {
                let restored = target.resources.restore_mana(amount);
                if restored > 0 {
                    lines.push(narrative::restored(&narrative::target(index), restored, "mana"));
                }
            }
            _ => {}
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::item::{ItemDefinition, ItemSlot};
    use crate::state::{CombatantId, Team};
    use crate::stats::Attributes;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn target(config: &CombatConfig) -> Combatant {
        Combatant::new(CombatantId(2), "Target", Team::Right, Attributes::default())
            .with_base_resources(40, 10, 10, config)
    }

    #[test]
    fn execute_only_below_threshold() {
        let config = CombatConfig::default();
        let mut t = target(&config);
        let effects = [ItemEffect::LowHpExecute {
            threshold: 0.5,
            percent: 0.5,
        }];

        assert_eq!(on_successful_ability_used(&effects, &t, 10, 1).damage, 10);
        t.resources.hp = 19;
        let hooks = on_successful_ability_used(&effects, &t, 10, 1);
        assert_eq!(hooks.damage, 15);
        assert_eq!(hooks.narrative.len(), 1);
    }

    #[test]
    fn certain_parry_and_thorns() {
        let config = CombatConfig::default();
        let mut t = target(&config);
        t.equip(
            ItemDefinition::new("buckler", "Buckler", ItemSlot::Armor)
                .with_effect(ItemEffect::Parry {
                    chance: 1.0,
                    percent: 0.25,
                })
                .with_effect(ItemEffect::Thorns { damage: 3 }),
            &config,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let hooks = on_ability_used_against(&t, 10, &mut rng, 1);
        assert_eq!(hooks.damage, 7);
        assert_eq!(hooks.thorns, 3);
    }

    #[test]
    fn on_damaged_skips_zero_damage() {
        let config = CombatConfig::default();
        let mut t = target(&config);
        t.equip(
            ItemDefinition::new("plate", "Plate", ItemSlot::Armor)
                .with_effect(ItemEffect::ManaOnDamaged { amount: 4 }),
            &config,
        );
        t.resources.mana = 0;
        assert!(on_damaged(&mut t, 0, 1).is_empty());
        assert_eq!(t.resources.mana, 0);
        assert_eq!(on_damaged(&mut t, 5, 1).len(), 1);
        assert_eq!(t.resources.mana, 4);
    }
}
