//! Percent reduction and armor absorption.

use crate::config::CombatConfig;
use crate::state::Combatant;
use crate::stats::{DamageTaken, ceil_amount};

/// Result of pushing nominal damage through a combatant's mitigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mitigated {
    /// Damage before mitigation.
    pub nominal: i32,
    /// Damage after percent reduction, before armor.
    pub reduced: i32,
    /// Where the reduced damage landed.
    pub taken: DamageTaken,
}

impl Mitigated {
    /// Damage that actually landed on armor or HP.
    pub const fn actual(&self) -> i32 {
        self.taken.total()
    }

    /// Nominal damage removed by percent reduction or soaked by armor.
    pub fn blocked_or_reduced(&self) -> i32 {
        (self.nominal - self.reduced).max(0) + self.taken.armor_lost
    }
}

/// `ceil(nominal * (1 - reduction))`, never negative.
pub fn reduce(nominal: i32, reduction: f64) -> i32 {
    ceil_amount(f64::from(nominal.max(0)) * (1.0 - reduction)).max(0)
}

/// Apply `nominal` damage to `target`: percent reduction, then armor, then HP.
///
/// Updates the target's `damage_taken` and `damage_blocked_or_reduced`
/// counters. The caller credits `damage_dealt` to whoever caused it.
pub fn mitigate_and_apply(target: &mut Combatant, nominal: i32, config: &CombatConfig) -> Mitigated {
    let reduction = target.damage_reduction(config);
    let reduced = reduce(nominal, reduction);
    let undying = target.is_undying();
    let taken = target.resources.take_damage(reduced, undying);

    let result = Mitigated {
        nominal: nominal.max(0),
        reduced,
        taken,
    };
    target.battle_stats.damage_taken += i64::from(result.actual());
    target.battle_stats.damage_blocked_or_reduced += i64::from(result.blocked_or_reduced());

    tracing::trace!(
        target = %target.id,
        nominal,
        reduction,
        reduced,
        armor_lost = taken.armor_lost,
        hp_lost = taken.hp_lost,
        "mitigated"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatantId, StatusEffect, StatusEffectKind, Team};
    use crate::stats::Attributes;

    fn dummy(armor: i32, config: &CombatConfig) -> Combatant {
        Combatant::new(CombatantId(2), "Dummy", Team::Right, Attributes::default())
            .with_base_resources(30, 0, armor, config)
    }

    #[test]
    fn reduction_rounds_up() {
        assert_eq!(reduce(10, 0.25), 8);
        assert_eq!(reduce(10, 0.85), 2);
        assert_eq!(reduce(10, -0.5), 15);
    }

    #[test]
    fn armor_soaks_first_and_counts_as_blocked() {
        let config = CombatConfig::default();
        let mut target = dummy(4, &config);
        let m = mitigate_and_apply(&mut target, 10, &config);
        assert_eq!(m.taken.armor_lost, 4);
        assert_eq!(m.taken.hp_lost, 6);
        assert_eq!(target.resources.hp, 24);
        assert_eq!(target.battle_stats.damage_taken, 10);
        assert_eq!(target.battle_stats.damage_blocked_or_reduced, 4);
    }

    #[test]
    fn reduction_is_clamped_to_config_maximum() {
        let config = CombatConfig::default();
        let mut target = dummy(0, &config);
        target.add_status_effect(
            StatusEffect::new(StatusEffectKind::DmgReduction { percent: 2.0 }, 2, "Shell"),
            &config,
        );
        let m = mitigate_and_apply(&mut target, 20, &config);
        // 85% cap: ceil(20 * 0.15)
        assert_eq!(m.reduced, 3);
        assert_eq!(m.blocked_or_reduced(), 17);
    }
}
