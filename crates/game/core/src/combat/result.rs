//! Resolution results.

use crate::ability::AbilityKey;
use crate::state::{CombatantId, StatusKey};
use crate::stats::DamageTaken;

/// Outcome of an ability against one target.
///
/// Built fresh for every use and never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbilityResult {
    pub target: CombatantId,
    pub dodged: bool,
    pub crit: bool,
    /// Damage before mitigation.
    pub nominal: i32,
    /// Where mitigated damage landed on the target.
    pub taken: DamageTaken,
    /// Damage that came back to the caster (reflect plus thorns).
    pub reflected: DamageTaken,
    pub effects_applied: Vec<StatusKey>,
    pub effects_resisted: Vec<StatusKey>,
    /// Narrative template for this target.
    pub narrative: String,
}

impl AbilityResult {
    pub fn new(target: CombatantId) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Damage that actually landed on the target.
    pub const fn actual(&self) -> i32 {
        self.taken.total()
    }

    pub(crate) fn push_line(&mut self, line: impl AsRef<str>) {
        if !self.narrative.is_empty() {
            self.narrative.push(' ');
        }
        self.narrative.push_str(line.as_ref());
    }
}

/// Outcome of one ability use.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityOutcome {
    pub caster: CombatantId,
    pub ability: AbilityKey,
    /// Resolved targets in placeholder order: `targets[k - 1]` is `{k}`.
    pub targets: Vec<CombatantId>,
    /// One entry per target, in the same order.
    pub results: Vec<AbilityResult>,
    /// Lines about the caster alone (buffs, heals, restores).
    pub caster_lines: Vec<String>,
}

impl AbilityOutcome {
    pub fn new(caster: CombatantId, ability: AbilityKey) -> Self {
        Self {
            caster,
            ability,
            targets: Vec::new(),
            results: Vec::new(),
            caster_lines: Vec::new(),
        }
    }

    /// Full narrative template: caster lines first, then each target in order.
    pub fn narrative(&self) -> String {
        self.caster_lines
            .iter()
            .map(String::as_str)
            .chain(self.results.iter().map(|r| r.narrative.as_str()))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
