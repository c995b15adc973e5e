//! Battle participant state.
//!
//! This module owns the data structures that describe combatants, their
//! status effects and their equipment. The battle engine mutates them; the
//! resolution pipeline reads and updates them one target at a time.

mod combatant;
mod common;
mod equipment;
pub mod status;

pub use combatant::{Combatant, StatusApplication};
pub use common::{CombatantId, CombatantKind, Team};
pub use equipment::Equipment;
pub use status::{StatusEffect, StatusEffectKind, StatusEffects, StatusKey};
