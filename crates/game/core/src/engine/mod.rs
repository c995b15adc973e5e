//! Battle state and the ability-use boundary.
//!
//! [`Battle`] owns every combatant for the length of one fight. It is the
//! only entry point that validates input: once [`Battle::use_ability`] has
//! checked the caster, cooldown, mana and targets, resolution runs through
//! the infallible [`crate::combat`] pipeline.
//!
//! Turns are driven by the caller: `start_turn` → zero or one ability use →
//! `end_turn`. There is no scheduler; one battle resolves one ability at a
//! time.

mod errors;
mod turns;

pub use errors::BattleError;
pub use turns::TurnReport;

use crate::ability::{AbilityDefinition, AbilityKey, AbilityOracle, TargetSelector};
use crate::combat::{self, AbilityOutcome, Attack, CombatRng, narrative};
use crate::config::CombatConfig;
use crate::state::{Combatant, CombatantId, StatusEffect, StatusEffects, Team};

/// One fight between two teams.
#[derive(Clone, Debug)]
pub struct Battle {
    combatants: Vec<Combatant>,
    turn: u32,
    config: CombatConfig,
    over: bool,
}

impl Battle {
    /// Start a battle. Battle order is the order of `combatants`.
    pub fn new(combatants: Vec<Combatant>, config: CombatConfig) -> Self {
        tracing::info!(
            combatants = combatants.len(),
            names = ?combatants.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "battle started"
        );
        let mut battle = Self {
            combatants,
            turn: 0,
            config,
            over: false,
        };
        battle.over = battle.winner().is_some();
        battle
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// The team that still has living combatants once the other has none.
    pub fn winner(&self) -> Option<Team> {
        let alive = |team: Team| self.combatants.iter().any(|c| c.team == team && c.is_alive());
        match (alive(Team::Left), alive(Team::Right)) {
            (true, false) => Some(Team::Left),
            (false, true) => Some(Team::Right),
            _ => None,
        }
    }

    fn index_of(&self, id: CombatantId) -> Result<usize, BattleError> {
        self.combatants
            .iter()
            .position(|c| c.id == id)
            .ok_or(BattleError::CombatantNotFound(id))
    }

    fn living_index_of(&self, id: CombatantId) -> Result<usize, BattleError> {
        let index = self.index_of(id)?;
        if !self.combatants[index].is_alive() {
            return Err(BattleError::CombatantDefeated(id));
        }
        Ok(index)
    }

    // ========================================================================
    // Abilities
    // ========================================================================

    /// Look up `key` in `oracle` and use it.
    pub fn use_ability_by_key(
        &mut self,
        caster: CombatantId,
        key: &AbilityKey,
        oracle: &(impl AbilityOracle + ?Sized),
        targets: &[CombatantId],
        rng: &mut (impl CombatRng + ?Sized),
    ) -> Result<AbilityOutcome, BattleError> {
        let definition = oracle.ability(key).ok_or_else(|| BattleError::AbilityNotKnown {
            combatant: caster,
            ability: key.clone(),
        })?;
        self.use_ability(caster, definition, targets, rng)
    }

    /// Validate and resolve one ability use.
    ///
    /// `targets` is only read for `Enemies(n)` selectors; every other
    /// selector resolves its own targets.
    pub fn use_ability(
        &mut self,
        caster: CombatantId,
        ability: &AbilityDefinition,
        targets: &[CombatantId],
        rng: &mut (impl CombatRng + ?Sized),
    ) -> Result<AbilityOutcome, BattleError> {
        if self.over {
            return Err(BattleError::BattleOver);
        }
        let caster_index = self.living_index_of(caster)?;
        self.check_ready(caster_index, ability)?;
        let target_indices = if ability.shape.is_self_targeted() {
            vec![caster_index]
        } else {
            self.resolve_targets(caster_index, ability.targets, targets)?
        };

        let config = self.config.clone();
        let caster_state = &mut self.combatants[caster_index];
        caster_state.resources.spend_mana(ability.mana_cost);
        caster_state.start_cooldown(&ability.key, ability.cooldown);
        caster_state.battle_stats.abilities_used += 1;

        tracing::debug!(
            caster = %caster,
            ability = %ability.key,
            targets = target_indices.len(),
            turn = self.turn,
            "ability used"
        );

        let mut outcome = AbilityOutcome::new(caster, ability.key.clone());
        outcome.caster_lines.push(narrative::used(&ability.name));
        outcome.targets = target_indices
            .iter()
            .map(|&i| self.combatants[i].id)
            .collect();

        match Attack::from_definition(ability, &self.combatants[caster_index]) {
            Some(attack) => {
                outcome.results = combat::resolve(
                    &attack,
                    &mut self.combatants,
                    caster_index,
                    &target_indices,
                    rng,
                    &config,
                );
            }
            None => {
                let lines = combat::resolve_self(ability, &mut self.combatants[caster_index], &config);
                outcome.caster_lines.extend(lines);
            }
        }

        self.update_over();
        Ok(outcome)
    }

    fn check_ready(&self, caster_index: usize, ability: &AbilityDefinition) -> Result<(), BattleError> {
        let caster = &self.combatants[caster_index];
        if !caster.knows(&ability.key) {
            return Err(BattleError::AbilityNotKnown {
                combatant: caster.id,
                ability: ability.key.clone(),
            });
        }
        let turns = caster.cooldown_remaining(&ability.key);
        if turns > 0 {
            return Err(BattleError::OnCooldown {
                ability: ability.key.clone(),
                turns,
            });
        }
        if caster.resources.mana < ability.mana_cost {
            return Err(BattleError::InsufficientMana {
                required: ability.mana_cost,
                available: caster.resources.mana,
            });
        }
        Ok(())
    }

    /// Turn a selector (and, for `Enemies(n)`, the caller's choice) into
    /// combatant indices in resolution order.
    fn resolve_targets(
        &self,
        caster_index: usize,
        selector: TargetSelector,
        requested: &[CombatantId],
    ) -> Result<Vec<usize>, BattleError> {
        let caster = &self.combatants[caster_index];
        let enemy = caster.team.opponent();
        let living = self.combatants.iter().enumerate().filter(|(_, c)| c.is_alive());

        match selector {
            TargetSelector::SelfOnly => Ok(vec![caster_index]),
            TargetSelector::AllEnemies => Ok(living
                .filter(|(_, c)| c.team == enemy)
                .map(|(i, _)| i)
                .collect()),
            TargetSelector::Everyone => Ok(living.map(|(i, _)| i).collect()),
            TargetSelector::Enemies(max) => {
                if requested.is_empty() || requested.len() > max as usize {
                    return Err(BattleError::InvalidTargetCount {
                        requested: requested.len(),
                        max,
                    });
                }
                let mut indices = Vec::with_capacity(requested.len());
                for &id in requested {
                    let index = self.index_of(id)?;
                    let target = &self.combatants[index];
                    if target.team != enemy || !target.is_alive() || indices.contains(&index) {
                        return Err(BattleError::InvalidTarget(id));
                    }
                    indices.push(index);
                }
                Ok(indices)
            }
        }
    }

    // ========================================================================
    // Turns
    // ========================================================================

    /// Start-of-turn upkeep for `id`: damage over time, regeneration and the
    /// turn-skip roll.
    pub fn start_turn(
        &mut self,
        id: CombatantId,
        rng: &mut (impl CombatRng + ?Sized),
    ) -> Result<TurnReport, BattleError> {
        if self.over {
            return Err(BattleError::BattleOver);
        }
        let index = self.living_index_of(id)?;
        let report = turns::start_turn(&mut self.combatants[index], rng);
        tracing::debug!(
            combatant = %id,
            poison = report.poison,
            bleed = report.bleed,
            skipped = report.skipped,
            "turn started"
        );
        self.update_over();
        Ok(report)
    }

    /// End-of-turn upkeep for `id`: status effects and cooldowns tick, mana
    /// regenerates, the turn counter advances. Returns expired effects.
    pub fn end_turn(&mut self, id: CombatantId) -> Result<Vec<StatusEffect>, BattleError> {
        let index = self.index_of(id)?;
        let expired = turns::end_turn(&mut self.combatants[index], &self.config);
        self.turn += 1;
        Ok(expired)
    }

    fn update_over(&mut self) {
        if self.over {
            return;
        }
        if let Some(team) = self.winner() {
            self.over = true;
            tracing::info!(?team, turn = self.turn, "battle over");
        }
    }

    /// End the battle: clear status effects, fold battle counters into
    /// lifetime counters and hand the combatants back.
    pub fn finish(self) -> Vec<Combatant> {
        let config = self.config;
        let mut combatants = self.combatants;
        for combatant in &mut combatants {
            combatant.status_effects = StatusEffects::empty();
            combatant.recompute_derived(&config);
            combatant.finish_battle();
        }
        tracing::info!(turns = self.turn, "battle finished");
        combatants
    }
}
