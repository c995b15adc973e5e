//! Shared error classification.
//!
//! Resolution never fails; it is arithmetic over state the battle has already
//! validated. Errors come from the boundaries: using an ability
//! ([`crate::engine::BattleError`]), building a catalog
//! ([`crate::ability::CatalogError`]) and building companions
//! ([`crate::companion::CompanionError`]).

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Try again later or pick another ability (cooldown, mana).
    Recoverable,

    /// The request or the content is wrong; retrying unchanged fails again.
    Validation,

    /// State the engine should never reach.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Implemented by every duel-core error enum.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and front ends.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
