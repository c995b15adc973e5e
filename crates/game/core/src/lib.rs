//! Deterministic duel rules shared by every front end.
//!
//! `duel-core` defines combatants, status effects, item effects, ability
//! definitions and the per-target resolution pipeline. Abilities and
//! companions are data; all behavior lives in a handful of evaluators.
//! Every battle mutation flows through [`engine::Battle`], and randomness
//! enters only through [`combat::CombatRng`].
pub mod ability;
pub mod combat;
pub mod companion;
pub mod config;
pub mod engine;
pub mod error;
pub mod item;
pub mod state;
pub mod stats;

pub use ability::{
    AbilityCatalog, AbilityClass, AbilityDefinition, AbilityFamily, AbilityKey, AbilityOracle,
    AbilityShape, AbilityTier, DamageFormula, DamageRange, StatusSpec, StatusTemplate,
    TargetSelector,
};
pub use combat::{AbilityOutcome, AbilityResult, CombatRng};
pub use companion::{CompanionError, CompanionRoster, CompanionSpecies, LevelFormula};
pub use config::CombatConfig;
pub use engine::{Battle, BattleError, TurnReport};
pub use error::{ErrorSeverity, GameError};
pub use item::{ItemDefinition, ItemEffect, ItemKey, ItemOracle, ItemSlot};
pub use state::{
    Combatant, CombatantId, CombatantKind, StatusEffect, StatusEffectKind, StatusKey, Team,
};
pub use stats::{Attribute, Attributes, CombatStats, ResourceKind, Resources, ScalingAttributes};
