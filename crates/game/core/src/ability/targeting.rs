//! Target selection for abilities.
//!
//! Content files write the selector as a single signed count:
//! - `0`: the caster (self buffs, heals, restores)
//! - `1..N`: up to N chosen enemies
//! - `-1`: every living enemy
//! - `-2`: every living combatant, the caster included

use thiserror::Error;

/// How an ability selects its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i32", into = "i32"))]
pub enum TargetSelector {
    /// The caster only.
    SelfOnly,

    /// Between 1 and `n` enemies chosen by the caller.
    Enemies(u32),

    /// Every living enemy.
    AllEnemies,

    /// Every living combatant in battle order, the caster included once.
    Everyone,
}

/// A target count outside the supported encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid target count {0} (expected -2, -1, 0 or a positive count)")]
pub struct InvalidTargetCount(pub i32);

impl TargetSelector {
    pub const fn from_count(count: i32) -> Result<Self, InvalidTargetCount> {
        match count {
            0 => Ok(Self::SelfOnly),
            -1 => Ok(Self::AllEnemies),
            -2 => Ok(Self::Everyone),
            n if n > 0 => Ok(Self::Enemies(n as u32)),
            n => Err(InvalidTargetCount(n)),
        }
    }

    pub const fn as_count(&self) -> i32 {
        match self {
            Self::SelfOnly => 0,
            Self::Enemies(n) => *n as i32,
            Self::AllEnemies => -1,
            Self::Everyone => -2,
        }
    }

    /// Returns true if the caller picks the targets.
    pub const fn requires_choice(&self) -> bool {
        matches!(self, Self::Enemies(_))
    }
}

impl TryFrom<i32> for TargetSelector {
    type Error = InvalidTargetCount;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        Self::from_count(count)
    }
}

impl From<TargetSelector> for i32 {
    fn from(selector: TargetSelector) -> Self {
        selector.as_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_map_to_selectors() {
        assert_eq!(TargetSelector::from_count(0), Ok(TargetSelector::SelfOnly));
        assert_eq!(TargetSelector::from_count(3), Ok(TargetSelector::Enemies(3)));
        assert_eq!(TargetSelector::from_count(-1), Ok(TargetSelector::AllEnemies));
        assert_eq!(TargetSelector::from_count(-2), Ok(TargetSelector::Everyone));
        assert_eq!(TargetSelector::from_count(-3), Err(InvalidTargetCount(-3)));
    }

    #[test]
    fn as_count_inverts_from_count() {
        for count in [-2, -1, 0, 1, 4] {
            let selector = TargetSelector::from_count(count).unwrap();
            assert_eq!(selector.as_count(), count);
        }
    }
}
