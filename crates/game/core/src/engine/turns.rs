//! Start- and end-of-turn upkeep.

use crate::combat::CombatRng;
use crate::combat::narrative::{self, CASTER};
use crate::config::CombatConfig;
use crate::state::{Combatant, CombatantId, StatusEffect};

/// What happened to a combatant at the start of its turn.
///
/// Narrative lines use `{0}` for the combatant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnReport {
    pub combatant: CombatantId,
    /// HP lost to poison.
    pub poison: i32,
    /// HP lost to bleeding.
    pub bleed: i32,
    pub regenerated: i32,
    /// The combatant loses this turn.
    pub skipped: bool,
    /// Damage over time brought the combatant to 0 HP or below.
    pub defeated: bool,
    pub lines: Vec<String>,
}

/// Poison and bleed (HP only, Undying floor), regeneration, then the
/// turn-skip roll.
pub(super) fn start_turn(
    combatant: &mut Combatant,
    rng: &mut (impl CombatRng + ?Sized),
) -> TurnReport {
    let mut report = TurnReport {
        combatant: combatant.id,
        ..TurnReport::default()
    };

    let (poison, bleed) = combatant.status_effects.damage_over_time();
    let undying = combatant.is_undying();
    report.poison = combatant.resources.take_hp_damage(poison, undying);
    report.bleed = combatant.resources.take_hp_damage(bleed, undying);
    let lost = report.poison + report.bleed;
    combatant.battle_stats.damage_taken += i64::from(lost);
    if report.poison > 0 {
        report.lines.push(format!("{CASTER} took {} poison damage.", report.poison));
    }
    if report.bleed > 0 {
        report.lines.push(format!("{CASTER} bled for {} damage.", report.bleed));
    }

    if !combatant.is_alive() {
        report.defeated = true;
        report.lines.push(format!("{CASTER} was defeated."));
        return report;
    }

    let regen = combatant.status_effects.regeneration();
    if regen > 0 {
        report.regenerated = combatant.resources.heal(regen);
        combatant.battle_stats.healing_done += i64::from(report.regenerated);
        if report.regenerated > 0 {
            report.lines.push(narrative::restored(CASTER, report.regenerated, "HP"));
        }
    }

    let skip = combatant.status_effects.turn_skip_chance();
    if skip > 0.0 && rng.chance(skip) {
        report.skipped = true;
        report.lines.push(format!("{CASTER} is dazed and loses the turn."));
    }
    report
}

/// Tick status effects and cooldowns, then regenerate mana.
///
/// Returns the effects that expired.
pub(super) fn end_turn(combatant: &mut Combatant, config: &CombatConfig) -> Vec<StatusEffect> {
    let expired = combatant.tick_status_effects(config);
    combatant.tick_cooldowns();
    combatant.resources.restore_mana(config.mana_regen_per_turn);
    expired
}
