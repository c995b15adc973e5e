//! Per-battle and lifetime statistics counters.

use core::ops::AddAssign;

/// Bookkeeping counters updated by the resolution pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    /// Damage this combatant landed on others (post-mitigation).
    pub damage_dealt: i64,
    /// Damage this combatant received (post-mitigation).
    pub damage_taken: i64,
    /// Nominal damage removed by percent reduction or soaked by armor.
    pub damage_blocked_or_reduced: i64,
    pub healing_done: i64,
    pub abilities_used: u32,
    pub dodges: u32,
    pub crits: u32,
    pub effects_applied: u32,
    pub effects_resisted: u32,
}

impl AddAssign for CombatStats {
    fn add_assign(&mut self, rhs: Self) {
        self.damage_dealt += rhs.damage_dealt;
        self.damage_taken += rhs.damage_taken;
        self.damage_blocked_or_reduced += rhs.damage_blocked_or_reduced;
        self.healing_done += rhs.healing_done;
        self.abilities_used += rhs.abilities_used;
        self.dodges += rhs.dodges;
        self.crits += rhs.crits;
        self.effects_applied += rhs.effects_applied;
        self.effects_resisted += rhs.effects_resisted;
    }
}
