//! Errors surfaced when a caller asks the battle to do something invalid.

use crate::ability::AbilityKey;
use crate::error::{ErrorSeverity, GameError};
use crate::state::CombatantId;

/// Errors that can occur when using an ability or advancing a turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// No combatant with this id takes part in the battle.
    #[error("combatant {0} not found")]
    CombatantNotFound(CombatantId),

    /// The combatant is at 0 HP or below.
    #[error("combatant {0} is defeated")]
    CombatantDefeated(CombatantId),

    /// The caster does not have the ability in its loadout.
    #[error("combatant {combatant} does not know `{ability}`")]
    AbilityNotKnown {
        combatant: CombatantId,
        ability: AbilityKey,
    },

    #[error("`{ability}` is on cooldown for {turns} more turn(s)")]
    OnCooldown { ability: AbilityKey, turns: u32 },

    #[error("not enough mana: need {required}, have {available}")]
    InsufficientMana { required: i32, available: i32 },

    /// Too many or too few targets for the ability's selector.
    #[error("expected 1..={max} targets, got {requested}")]
    InvalidTargetCount { requested: usize, max: u32 },

    /// Target exists but may not be chosen (ally, defeated, duplicate).
    #[error("combatant {0} is not a valid target")]
    InvalidTarget(CombatantId),

    /// One team has no living combatants left.
    #[error("the battle is over")]
    BattleOver,
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        use BattleError::*;
        match self {
            CombatantNotFound(_) | AbilityNotKnown { .. } => ErrorSeverity::Validation,
            InvalidTargetCount { .. } | InvalidTarget(_) => ErrorSeverity::Validation,
            CombatantDefeated(_) | BattleOver => ErrorSeverity::Validation,
            OnCooldown { .. } | InsufficientMana { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            CombatantNotFound(_) => "BATTLE_COMBATANT_NOT_FOUND",
            CombatantDefeated(_) => "BATTLE_COMBATANT_DEFEATED",
            AbilityNotKnown { .. } => "BATTLE_ABILITY_NOT_KNOWN",
            OnCooldown { .. } => "BATTLE_ON_COOLDOWN",
            InsufficientMana { .. } => "BATTLE_INSUFFICIENT_MANA",
            InvalidTargetCount { .. } => "BATTLE_INVALID_TARGET_COUNT",
            InvalidTarget(_) => "BATTLE_INVALID_TARGET",
            BattleOver => "BATTLE_OVER",
        }
    }
}
