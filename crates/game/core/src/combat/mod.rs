//! Ability resolution.
//!
//! This module turns an ability use into per-target results. The damage
//! formula, mitigation and rolls are pure functions; [`pipeline`] strings
//! them together and is the only place that mutates combatants.
//!
//! # Architecture
//!
//! - [`hit`]: dodge and crit rolls
//! - [`damage`]: nominal damage from base roll, attributes, marks and buffs
//! - [`hooks`]: item effects at fixed points of the pipeline
//! - [`mitigation`]: percent reduction, then armor, then HP
//! - [`pipeline`]: per-target orchestration and caster feedback
//! - [`narrative`]: `{0}`/`{k}` text templates

pub mod damage;
pub mod hit;
pub mod hooks;
pub mod mitigation;
pub mod narrative;
pub mod pipeline;
pub mod result;
mod rng;

pub use damage::{DamageBreakdown, DamageInput, nominal_damage};
pub use mitigation::{Mitigated, mitigate_and_apply};
pub use pipeline::{Attack, CasterFeedback, CasterSnapshot, DamageRoll, Payload, resolve, resolve_self};
pub use result::{AbilityOutcome, AbilityResult};
pub use rng::CombatRng;
