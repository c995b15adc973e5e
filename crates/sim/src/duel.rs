//! A headless duel loop with a first-usable-ability policy.
//!
//! Each round every living combatant, in battle order, runs
//! `start_turn` → at most one ability → `end_turn`. The battle ends when
//! one team has no living combatants or the round limit is reached.

use anyhow::Result;
use duel_core::{
    AbilityDefinition, AbilityOracle, AbilityOutcome, AbilityShape, Battle, CombatRng, Combatant,
    CombatantId, Team,
};

use crate::render::render;

/// Rendered narrative plus the result.
#[derive(Clone, Debug, Default)]
pub struct DuelLog {
    pub lines: Vec<String>,
    pub winner: Option<Team>,
    pub rounds: u32,
}

/// Play `battle` until it is over or `max_rounds` have passed.
pub fn run(
    battle: &mut Battle,
    abilities: &(impl AbilityOracle + ?Sized),
    rng: &mut (impl CombatRng + ?Sized),
    max_rounds: u32,
) -> Result<DuelLog> {
    let mut log = DuelLog::default();
    let order: Vec<CombatantId> = battle.combatants().iter().map(|c| c.id).collect();

    while !battle.is_over() && log.rounds < max_rounds {
        log.rounds += 1;
        log.lines.push(format!("-- Round {} --", log.rounds));
        for &id in &order {
            if battle.is_over() {
                break;
            }
            if battle.combatant(id).is_some_and(Combatant::is_alive) {
                take_turn(battle, id, abilities, rng, &mut log)?;
            }
        }
    }

    log.winner = battle.winner();
    tracing::info!(rounds = log.rounds, winner = ?log.winner, "duel finished");
    Ok(log)
}

fn take_turn(
    battle: &mut Battle,
    id: CombatantId,
    abilities: &(impl AbilityOracle + ?Sized),
    rng: &mut (impl CombatRng + ?Sized),
    log: &mut DuelLog,
) -> Result<()> {
    let name = display_name(battle, id);
    let report = battle.start_turn(id, rng)?;
    log.lines
        .extend(report.lines.iter().map(|line| render(line, &[&name])));
    if report.defeated || battle.is_over() {
        return Ok(());
    }

    if !report.skipped {
        match choose(battle, id, abilities, rng)? {
            Some(outcome) => render_outcome(battle, &outcome, log),
            None => log.lines.push(format!("{name} waits.")),
        }
    }

    battle.end_turn(id)?;
    Ok(())
}

/// Use the first ability in loadout order that is ready and worth using.
fn choose(
    battle: &mut Battle,
    id: CombatantId,
    abilities: &(impl AbilityOracle + ?Sized),
    rng: &mut (impl CombatRng + ?Sized),
) -> Result<Option<AbilityOutcome>> {
    let Some(caster) = battle.combatant(id) else {
        return Ok(None);
    };
    let candidates: Vec<&AbilityDefinition> = caster
        .abilities
        .iter()
        .filter_map(|key| abilities.ability(key))
        .filter(|def| is_ready(caster, def) && worth_using(caster, def))
        .collect();

    for definition in candidates {
        let targets = pick_targets(battle, id, definition);
        if definition.targets.requires_choice() && targets.is_empty() {
            continue;
        }
        match battle.use_ability(id, definition, &targets, rng) {
            Ok(outcome) => return Ok(Some(outcome)),
            Err(err) => {
                tracing::warn!(caster = %id, ability = %definition.key, %err, "ability rejected");
            }
        }
    }
    Ok(None)
}

fn is_ready(caster: &Combatant, definition: &AbilityDefinition) -> bool {
    caster.cooldown_remaining(&definition.key) == 0 && caster.resources.mana >= definition.mana_cost
}

/// Restores are skipped while the pool they fill is already full.
fn worth_using(caster: &Combatant, definition: &AbilityDefinition) -> bool {
    let r = &caster.resources;
    match definition.shape {
        AbilityShape::HealSelf { .. } => r.hp < r.max_hp,
        AbilityShape::RestoreArmor { .. } => r.armor < r.max_armor,
        AbilityShape::RestoreMana { .. } => r.mana < r.max_mana,
        _ => true,
    }
}

/// For `Enemies(n)`, the first `n` living opponents in battle order.
fn pick_targets(battle: &Battle, id: CombatantId, definition: &AbilityDefinition) -> Vec<CombatantId> {
    let duel_core::TargetSelector::Enemies(max) = definition.targets else {
        return Vec::new();
    };
    let Some(team) = battle.combatant(id).map(|c| c.team) else {
        return Vec::new();
    };
    battle
        .combatants()
        .iter()
        .filter(|c| c.team == team.opponent() && c.is_alive())
        .take(max as usize)
        .map(|c| c.id)
        .collect()
}

fn display_name(battle: &Battle, id: CombatantId) -> String {
    battle
        .combatant(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn render_outcome(battle: &Battle, outcome: &AbilityOutcome, log: &mut DuelLog) {
    let names: Vec<String> = std::iter::once(outcome.caster)
        .chain(outcome.targets.iter().copied())
        .map(|id| display_name(battle, id))
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    for line in outcome.narrative().lines() {
        log.lines.push(render(line, &names));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{
        AbilityCatalog, AbilityKey, Attributes, CombatConfig, DamageRange, TargetSelector,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> AbilityCatalog {
        let mut catalog = AbilityCatalog::new();
        // A full pool of mana per Mend; regen refills it in five turns.
        let mend = AbilityDefinition::new("mend_1", "Mend I", AbilityShape::HealSelf { percent: 0.1 })
            .with_targets(TargetSelector::SelfOnly)
            .with_cost(10, 4);
        catalog.insert(mend).unwrap();
        catalog
            .insert(AbilityDefinition::new(
                "jab_1",
                "Jab I",
                AbilityShape::Damage {
                    range: DamageRange::new(5, 8),
                    bonus: None,
                    effects: Vec::new(),
                },
            ))
            .unwrap();
        catalog
    }

    fn battle() -> Battle {
        let config = CombatConfig::default();
        let fighter = |id: u32, team: Team| {
            Combatant::new(CombatantId(id), format!("Fighter {id}"), team, Attributes::new(2, 4, 2, 0, 2))
                .with_base_resources(30, 10, 0, &config)
                .with_abilities(["mend_1", "jab_1"].map(AbilityKey::from))
        };
        Battle::new(vec![fighter(1, Team::Left), fighter(2, Team::Right)], config)
    }

    fn play(seed: u64) -> DuelLog {
        let mut battle = battle();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        run(&mut battle, &catalog(), &mut rng, 100).unwrap()
    }

    #[test]
    fn duel_ends_with_a_winner() {
        let log = play(7);
        assert!(log.winner.is_some());
        // 40 HP against at least 20 damage per Mend cycle of 4 HP.
        assert!(log.rounds <= 30, "rounds {}", log.rounds);
        assert!(log.lines.iter().any(|l| l.contains("used Mend I!")));
        assert!(log.lines.iter().any(|l| l.starts_with("Fighter 1 used Jab I!")));
        assert!(log.lines.iter().all(|l| !l.contains("{0}")));
    }

    #[test]
    fn same_seed_same_duel() {
        assert_eq!(play(99).lines, play(99).lines);
    }

    #[test]
    fn full_hp_skips_heal() {
        let battle = battle();
        let caster = battle.combatant(CombatantId(1)).unwrap();
        let catalog = catalog();
        let mend = catalog.ability(&AbilityKey::from("mend_1")).unwrap();
        assert!(!worth_using(caster, mend));
    }
}
