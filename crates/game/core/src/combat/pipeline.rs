//! Per-target ability resolution.
//!
//! ## Execution Flow
//!
//! 1. Capture a [`CasterSnapshot`] (combined attributes, resources, buffs,
//!    item totals and hooks) before touching any target
//! 2. For each resolved target, in order:
//!    - dodge roll (ends this target on success)
//!    - crit roll, base damage roll, nominal damage ([`super::damage`])
//!    - caster `OnSuccessfulAbilityUsed` hooks, target `OnAbilityUsedAgainst` hooks
//!    - mitigation: percent reduction, armor, HP ([`super::mitigation`])
//!    - target `OnDamaged` hooks when damage landed
//!    - status effect templates, each subject to the target's resist chance
//!    - recompute the target's derived stats
//! 3. After each target, apply the [`CasterFeedback`] (damage dealt, reflect
//!    and thorns, lifesteal, mana siphon, stolen resources) to the caster
//!
//! The snapshot/feedback split lets a caster appear in its own target list
//! (`Everyone`) without holding two borrows of the same combatant.

use crate::ability::{
    AbilityDefinition, AbilityKey, AbilityShape, ConditionalRange, DamageRange, StatusSpec,
    TargetCondition,
};
use crate::config::CombatConfig;
use crate::item::{ItemEffect, ItemEffectTotals, ItemHook};
use crate::state::{Combatant, CombatantId, StatusApplication, StatusKey};
use crate::stats::{Attributes, DamageTaken, ResourceKind, Resources, ScalingAttributes, percent_of};

use super::damage::{DamageInput, TargetFlags, flat_item_bonus, nominal_damage, percent_multiplier};
use super::hit::{crit_multiplier, roll_crit, roll_dodge};
use super::mitigation::mitigate_and_apply;
use super::result::AbilityResult;
use super::rng::CombatRng;
use super::{hooks, narrative};

// ============================================================================
// Attack description
// ============================================================================

/// Base damage for one ability use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    pub range: DamageRange,
    /// Range used instead of `range` against targets meeting its condition.
    pub bonus: Option<ConditionalRange>,
}

impl DamageRoll {
    pub const fn fixed(amount: i32) -> Self {
        Self {
            range: DamageRange::fixed(amount),
            bonus: None,
        }
    }

    /// The range that applies to `target` when attacked by `caster`.
    pub fn range_against(&self, target: &Combatant, caster: CombatantId) -> DamageRange {
        match self.bonus {
            Some(bonus) if condition_holds(bonus.when, target, caster) => bonus.range,
            _ => self.range,
        }
    }
}

fn condition_holds(condition: TargetCondition, target: &Combatant, caster: CombatantId) -> bool {
    match condition {
        TargetCondition::Poisoned => target.status_effects.has(StatusKey::Poisoned),
        TargetCondition::Bleeding => target.status_effects.has(StatusKey::Bleeding),
        TargetCondition::MarkedByCaster => target.status_effects.marks_by(caster) > 0,
        TargetCondition::Legendary => target.legendary,
    }
}

/// What lands on each target that fails to dodge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Payload {
    Damage(DamageRoll),
    /// Status effects only.
    StatusOnly,
    /// Take `percent` of the target's current `resource` and give it to the caster.
    Steal { resource: ResourceKind, percent: f64 },
}

/// Everything the pipeline needs to know about the ability being used.
#[derive(Clone, Debug)]
pub struct Attack<'a> {
    pub ability: &'a AbilityKey,
    /// Display name, recorded as the source of applied effects.
    pub name: &'a str,
    pub scaling: ScalingAttributes,
    pub payload: Payload,
    pub effects: &'a [StatusSpec],
}

impl<'a> Attack<'a> {
    /// Build the attack for `definition` used by `caster`.
    ///
    /// Formula damage is evaluated here, once, from the caster's current
    /// state. Returns `None` for shapes that only touch the caster.
    pub fn from_definition(definition: &'a AbilityDefinition, caster: &Combatant) -> Option<Self> {
        let payload = match &definition.shape {
            AbilityShape::Damage { range, bonus, .. } => Payload::Damage(DamageRoll {
                range: *range,
                bonus: *bonus,
            }),
            AbilityShape::FormulaDamage { formula, .. } => Payload::Damage(DamageRoll {
                range: formula.evaluate(&caster.combined_attributes(), &caster.resources),
                bonus: None,
            }),
            AbilityShape::Debuff { .. } => Payload::StatusOnly,
            AbilityShape::Steal { resource, percent } => Payload::Steal {
                resource: *resource,
                percent: *percent,
            },
            AbilityShape::SelfBuff { .. }
            | AbilityShape::HealSelf { .. }
            | AbilityShape::RestoreArmor { .. }
            | AbilityShape::RestoreMana { .. } => return None,
        };
        Some(Self {
            ability: &definition.key,
            name: &definition.name,
            scaling: definition.scaling,
            payload,
            effects: definition.shape.effects(),
        })
    }
}

// ============================================================================
// Caster snapshot and feedback
// ============================================================================

/// Caster state read by every target step, captured once per use.
#[derive(Clone, Debug)]
pub struct CasterSnapshot {
    pub id: CombatantId,
    pub attributes: Attributes,
    pub resources: Resources,
    /// DmgBuff minus DmgDebuff.
    pub damage_delta: f64,
    /// CritDmgBuff effects plus CritDmgBoost items.
    pub crit_boost: f64,
    pub items: ItemEffectTotals,
    /// On-successful-ability-used item effects.
    pub hooks: Vec<ItemEffect>,
}

impl CasterSnapshot {
    pub fn capture(caster: &Combatant) -> Self {
        let items = caster.equipment.totals();
        Self {
            id: caster.id,
            attributes: caster.combined_attributes(),
            resources: caster.resources.clone(),
            damage_delta: caster.status_effects.damage_multiplier_delta(),
            crit_boost: caster.status_effects.crit_damage_bonus() + items.crit_dmg_boost,
            items,
            hooks: caster
                .equipment
                .hooks(ItemHook::OnSuccessfulAbilityUsed)
                .cloned()
                .collect(),
        }
    }
}

/// Caster-side consequences of one target step, applied after the step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CasterFeedback {
    /// Damage that landed on the target.
    pub dealt: i32,
    pub crit: bool,
    /// Nominal damage coming back (reflect plus thorns).
    pub incoming: i32,
    pub lifesteal: i32,
    pub mana_siphon: i32,
    pub stolen: Option<(ResourceKind, i32)>,
}

/// What applying a [`CasterFeedback`] did to the caster.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedbackReport {
    pub reflected: DamageTaken,
    pub lines: Vec<String>,
}

impl CasterFeedback {
    /// Apply to `caster`. Reflected damage goes through the caster's own
    /// mitigation and is never reflected again. A caster it kills gains
    /// nothing from lifesteal, siphons or steals.
    pub fn apply(self, caster: &mut Combatant, config: &CombatConfig) -> FeedbackReport {
        let mut report = FeedbackReport::default();
        caster.battle_stats.damage_dealt += i64::from(self.dealt);
        if self.crit {
            caster.battle_stats.crits += 1;
        }

        if self.incoming > 0 {
            let mitigated = mitigate_and_apply(caster, self.incoming, config);
            report.reflected = mitigated.taken;
            report.lines.push(narrative::reflected(mitigated.taken));
        }
        if !caster.is_alive() {
            return report;
        }

        if self.lifesteal > 0 {
            let healed = caster.resources.heal(self.lifesteal);
            caster.battle_stats.healing_done += i64::from(healed);
            if healed > 0 {
                report.lines.push(narrative::restored(narrative::CASTER, healed, "HP"));
            }
        }

        if self.mana_siphon > 0 {
            let restored = caster.resources.restore_mana(self.mana_siphon);
            if restored > 0 {
                report.lines.push(narrative::restored(narrative::CASTER, restored, "mana"));
            }
        }

        if let Some((resource, amount)) = self.stolen {
            let gained = caster.resources.restore(resource, amount);
            if resource == ResourceKind::Hp {
                caster.battle_stats.healing_done += i64::from(gained);
            }
        }
        report
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve `attack` from `combatants[caster]` against each index in
/// `targets`, in order. `targets[k - 1]` is narrative placeholder `{k}`.
///
/// Indices must come from the battle's own validation; unknown indices are
/// skipped.
pub fn resolve(
    attack: &Attack<'_>,
    combatants: &mut [Combatant],
    caster: usize,
    targets: &[usize],
    rng: &mut (impl CombatRng + ?Sized),
    config: &CombatConfig,
) -> Vec<AbilityResult> {
    let Some(snapshot) = combatants.get(caster).map(CasterSnapshot::capture) else {
        return Vec::new();
    };

    let mut results = Vec::with_capacity(targets.len());
    for (i, &target_index) in targets.iter().enumerate() {
        let Some(target) = combatants.get_mut(target_index) else {
            continue;
        };
        let (mut result, feedback) = resolve_target(attack, &snapshot, target, i + 1, rng, config);

        if let Some(caster) = combatants.get_mut(caster) {
            let report = feedback.apply(caster, config);
            result.reflected = report.reflected;
            for line in report.lines {
                result.push_line(line);
            }
        }

        tracing::debug!(
            ability = %attack.ability,
            caster = %snapshot.id,
            target = %result.target,
            dodged = result.dodged,
            crit = result.crit,
            nominal = result.nominal,
            actual = result.actual(),
            "target resolved"
        );
        results.push(result);
    }
    results
}

/// Resolve one target. Mutates only `target`; caster changes come back as
/// [`CasterFeedback`].
pub fn resolve_target(
    attack: &Attack<'_>,
    caster: &CasterSnapshot,
    target: &mut Combatant,
    index: usize,
    rng: &mut (impl CombatRng + ?Sized),
    config: &CombatConfig,
) -> (AbilityResult, CasterFeedback) {
    let mut result = AbilityResult::new(target.id);
    let mut feedback = CasterFeedback::default();

    let dexterity = target.combined_attributes().dexterity;
    if roll_dodge(rng, dexterity, config) {
        target.battle_stats.dodges += 1;
        result.dodged = true;
        result.push_line(narrative::dodged(index));
        return (result, feedback);
    }

    match attack.payload {
        Payload::Damage(roll) => {
            apply_damage(attack, caster, target, index, roll, rng, config, &mut result, &mut feedback)
        }
        Payload::StatusOnly => {}
        Payload::Steal { resource, percent } => {
            let available = target.resources.get(resource).max(0);
            let undying = target.is_undying();
            let drained = target.resources.drain(resource, percent_of(percent, available), undying);
            match resource {
                ResourceKind::Hp => {
                    result.taken.hp_lost = drained;
                    target.battle_stats.damage_taken += i64::from(drained);
                    feedback.dealt = drained;
                }
                ResourceKind::Armor => result.taken.armor_lost = drained,
                ResourceKind::Mana => {}
            }
            feedback.stolen = Some((resource, drained));
            result.push_line(narrative::stole(index, drained, resource.label()));
        }
    }

    apply_effects(attack, caster.id, target, index, rng, config, &mut result);
    target.recompute_derived(config);
    (result, feedback)
}

#[allow(clippy::too_many_arguments)]
fn apply_damage(
    attack: &Attack<'_>,
    caster: &CasterSnapshot,
    target: &mut Combatant,
    index: usize,
    roll: DamageRoll,
    rng: &mut (impl CombatRng + ?Sized),
    config: &CombatConfig,
    result: &mut AbilityResult,
    feedback: &mut CasterFeedback,
) {
    let crit = roll_crit(rng, caster.attributes.luck, config);
    let range = roll.range_against(target, caster.id);
    let base = rng.range_inclusive(range.min, range.max);

    let target_items = target.equipment.totals();
    let flags = TargetFlags {
        poisoned: target.status_effects.has(StatusKey::Poisoned),
        bleeding: target.status_effects.has(StatusKey::Bleeding),
        legendary: target.legendary,
    };
    let input = DamageInput {
        base,
        stacking: target.status_effects.stacking_damage(caster.id, attack.ability),
        marks: target.status_effects.marks_by(caster.id),
        attributes: &caster.attributes,
        scaling: attack.scaling,
        multiplier: percent_multiplier(caster.damage_delta, &caster.items, flags),
        crit: crit.then(|| crit_multiplier(caster.crit_boost, target_items.crit_dmg_reduction, config)),
        flat_bonus: flat_item_bonus(&caster.items, &caster.resources, &target.resources),
    };
    let breakdown = nominal_damage(&input, config);
    tracing::trace!(?breakdown, target = %target.id, "nominal damage");

    // Nominal is final once the caster's hooks have run. Parries only cut
    // what reaches mitigation; reflection still reads the nominal.
    let caster_hooks = hooks::on_successful_ability_used(&caster.hooks, target, breakdown.total, index);
    let nominal = caster_hooks.damage;
    let reflect_percent = target.status_effects.reflect_percent();
    let target_hooks = hooks::on_ability_used_against(target, nominal, rng, index);
    let parried = nominal - target_hooks.damage;

    let mitigated = mitigate_and_apply(target, target_hooks.damage, config);
    target.battle_stats.damage_blocked_or_reduced += i64::from(parried);
    let actual = mitigated.actual();

    result.crit = crit;
    result.nominal = nominal;
    result.taken = mitigated.taken;
    if crit {
        result.push_line(narrative::critical());
    }
    for line in caster_hooks.narrative.iter().chain(&target_hooks.narrative) {
        result.push_line(line);
    }
    result.push_line(narrative::damage(&narrative::target(index), mitigated.taken));
    for line in hooks::on_damaged(target, actual, index) {
        result.push_line(line);
    }

    feedback.dealt = actual;
    feedback.crit = crit;
    feedback.lifesteal = percent_of(caster_hooks.lifesteal, actual);
    feedback.mana_siphon = percent_of(caster_hooks.mana_siphon, actual);
    feedback.incoming = percent_of(reflect_percent, nominal) + target_hooks.thorns;
}

fn apply_effects(
    attack: &Attack<'_>,
    caster: CombatantId,
    target: &mut Combatant,
    index: usize,
    rng: &mut (impl CombatRng + ?Sized),
    config: &CombatConfig,
    result: &mut AbilityResult,
) {
    for spec in attack.effects {
        let effect = spec.instantiate(caster, attack.ability, attack.name);
        let key = effect.key();
        let description = effect.kind.describe();
        match target.add_status_effect_with_resist(effect, rng, config) {
            StatusApplication::Applied => {
                result.effects_applied.push(key);
                result.push_line(narrative::status_applied(index, &description));
            }
            StatusApplication::Resisted => {
                result.effects_resisted.push(key);
                result.push_line(narrative::status_resisted(index, &description));
            }
            StatusApplication::Dropped => {}
        }
    }
}

// ============================================================================
// Caster-only shapes
// ============================================================================

/// Resolve a shape that only touches the caster. Returns narrative lines.
///
/// Self buffs skip resist rolls. Percent restores round up.
pub fn resolve_self(
    definition: &AbilityDefinition,
    caster: &mut Combatant,
    config: &CombatConfig,
) -> Vec<String> {
    let mut lines = Vec::new();
    match &definition.shape {
        AbilityShape::SelfBuff { effects } => {
            for spec in effects {
                let effect = spec.instantiate(caster.id, &definition.key, &definition.name);
                let description = effect.kind.describe();
                if caster.add_status_effect(effect, config) {
                    lines.push(narrative::status_gained(&description));
                }
            }
        }
        AbilityShape::HealSelf { percent } => {
            let healed = caster.resources.heal(percent_of(*percent, caster.resources.max_hp));
            caster.battle_stats.healing_done += i64::from(healed);
            lines.push(narrative::restored(narrative::CASTER, healed, "HP"));
        }
        AbilityShape::RestoreArmor { percent } => {
            let amount = percent_of(*percent, caster.resources.max_armor);
            let restored = caster.resources.restore_armor(amount);
            lines.push(narrative::restored(narrative::CASTER, restored, "armor"));
        }
        AbilityShape::RestoreMana { percent } => {
            let amount = percent_of(*percent, caster.resources.max_mana);
            let restored = caster.resources.restore_mana(amount);
            lines.push(narrative::restored(narrative::CASTER, restored, "mana"));
        }
        AbilityShape::Damage { .. }
        | AbilityShape::FormulaDamage { .. }
        | AbilityShape::Debuff { .. }
        | AbilityShape::Steal { .. } => {}
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{StatusTemplate, TargetSelector};
    use crate::state::{StatusEffect, StatusEffectKind, Team};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fighter(id: u32, attrs: Attributes, config: &CombatConfig) -> Combatant {
        Combatant::new(CombatantId(id), format!("F{id}"), Team::Left, attrs)
            .with_base_resources(100, 20, 0, config)
    }

    fn fixed_attack<'a>(key: &'a AbilityKey, amount: i32, effects: &'a [StatusSpec]) -> Attack<'a> {
        Attack {
            ability: key,
            name: "Test",
            scaling: ScalingAttributes::empty(),
            payload: Payload::Damage(DamageRoll::fixed(amount)),
            effects,
        }
    }

    #[test]
    fn fixed_damage_lands_in_full_without_mitigation() {
        let config = CombatConfig::default();
        let key = AbilityKey::from("jab_1");
        let attack = fixed_attack(&key, 7, &[]);
        let mut combatants = vec![
            fighter(1, Attributes::default(), &config),
            fighter(2, Attributes::default(), &config),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let results = resolve(&attack, &mut combatants, 0, &[1], &mut rng, &config);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].nominal, 7);
        assert_eq!(results[0].actual(), 7);
        assert_eq!(combatants[1].resources.hp, 93);
        assert_eq!(combatants[0].battle_stats.damage_dealt, 7);
        assert_eq!(combatants[1].battle_stats.damage_taken, 7);
    }

    #[test]
    fn conditional_range_applies_to_poisoned_targets() {
        let config = CombatConfig::default();
        let mut target = fighter(2, Attributes::default(), &config);
        let roll = DamageRoll {
            range: DamageRange::new(1, 2),
            bonus: Some(ConditionalRange {
                when: TargetCondition::Poisoned,
                range: DamageRange::fixed(4),
            }),
        };
        assert_eq!(roll.range_against(&target, CombatantId(1)), DamageRange::new(1, 2));
        target.add_status_effect(
            StatusEffect::new(StatusEffectKind::Poisoned { damage: 1 }, 2, "Venom"),
            &config,
        );
        assert_eq!(roll.range_against(&target, CombatantId(1)), DamageRange::fixed(4));
    }

    #[test]
    fn marked_templates_take_the_attacker() {
        let config = CombatConfig::default();
        let key = AbilityKey::from("hunt_1");
        let effects = [StatusSpec::new(StatusTemplate::Marked, 3)];
        let attack = Attack {
            payload: Payload::StatusOnly,
            ..fixed_attack(&key, 0, &effects)
        };
        let mut combatants = vec![
            fighter(1, Attributes::default(), &config),
            fighter(2, Attributes::default(), &config),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let results = resolve(&attack, &mut combatants, 0, &[1], &mut rng, &config);
        assert_eq!(results[0].effects_applied, vec![StatusKey::Marked]);
        assert_eq!(combatants[1].status_effects.marks_by(CombatantId(1)), 1);
        assert_eq!(combatants[1].resources.hp, 100);
    }

    #[test]
    fn mana_steal_rounds_up_and_transfers() {
        let config = CombatConfig::default();
        let key = AbilityKey::from("siphon_1");
        let attack = Attack {
            payload: Payload::Steal {
                resource: ResourceKind::Mana,
                percent: 0.25,
            },
            ..fixed_attack(&key, 0, &[])
        };
        let mut combatants = vec![
            fighter(1, Attributes::default(), &config),
            fighter(2, Attributes::default(), &config),
        ];
        combatants[0].resources.mana = 0;
        combatants[1].resources.mana = 10;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        resolve(&attack, &mut combatants, 0, &[1], &mut rng, &config);
        assert_eq!(combatants[1].resources.mana, 7);
        assert_eq!(combatants[0].resources.mana, 3);
    }

    #[test]
    fn self_shapes_round_up() {
        let config = CombatConfig::default();
        let mut caster = fighter(1, Attributes::default(), &config);
        caster.resources.hp = 50;
        let heal = AbilityDefinition::new("mend_1", "Mend I", AbilityShape::HealSelf { percent: 0.125 })
            .with_targets(TargetSelector::SelfOnly);
        resolve_self(&heal, &mut caster, &config);
        // ceil(0.125 * 100)
        assert_eq!(caster.resources.hp, 63);
        assert_eq!(caster.battle_stats.healing_done, 13);
    }

    #[test]
    fn formula_damage_is_evaluated_from_caster() {
        let config = CombatConfig::default();
        let caster = fighter(1, Attributes::new(0, 0, 10, 0, 0), &config);
        let definition = AbilityDefinition::new(
            "slam_1",
            "Slam I",
            AbilityShape::FormulaDamage {
                formula: crate::ability::DamageFormula::CasterAttribute {
                    attr: crate::stats::Attribute::Constitution,
                    percent: 0.25,
                    flat: 1,
                },
                effects: Vec::new(),
            },
        );
        let attack = Attack::from_definition(&definition, &caster).unwrap();
        assert_eq!(attack.payload, Payload::Damage(DamageRoll::fixed(4)));
    }
}
