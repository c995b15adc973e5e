//! Ability definitions as data.
//!
//! Every ability is a row: cost, cooldown, target selector, scaling
//! attributes and an [`AbilityShape`] that says which evaluator runs it.
//! Behavior lives in [`crate::combat`] and [`crate::engine`]; nothing here
//! holds per-battle state.

mod catalog;
mod definition;
mod shape;
mod status_spec;
mod targeting;

pub use catalog::{AbilityCatalog, AbilityFamily, AbilityOracle, AbilityTier, CatalogError};
pub use definition::{AbilityClass, AbilityDefinition, AbilityKey};
pub use shape::{AbilityShape, ConditionalRange, DamageFormula, DamageRange, TargetCondition};
pub use status_spec::{StatusSpec, StatusTemplate};
pub use targeting::{InvalidTargetCount, TargetSelector};
