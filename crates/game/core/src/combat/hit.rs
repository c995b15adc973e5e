//! Dodge and critical hit rolls.

use crate::config::CombatConfig;

use super::rng::CombatRng;

/// Dodge chance granted by `dexterity`.
pub fn dodge_chance(dexterity: i32, config: &CombatConfig) -> f64 {
    f64::from(dexterity) * config.dex_dodge_scale
}

/// Crit chance granted by `luck`.
pub fn crit_chance(luck: i32, config: &CombatConfig) -> f64 {
    f64::from(luck) * config.luck_crit_scale
}

/// Roll whether a target with `dexterity` dodges. Always draws once.
pub fn roll_dodge(rng: &mut (impl CombatRng + ?Sized), dexterity: i32, config: &CombatConfig) -> bool {
    rng.next_unit() < dodge_chance(dexterity, config)
}

/// Roll whether a caster with `luck` lands a crit. Always draws once.
pub fn roll_crit(rng: &mut (impl CombatRng + ?Sized), luck: i32, config: &CombatConfig) -> bool {
    rng.next_unit() < crit_chance(luck, config)
}

/// Crit damage multiplier, never below 1x.
///
/// `boost` is the caster's item and status crit bonuses; `reduction` is the
/// target's item crit damage reduction.
pub fn crit_multiplier(boost: f64, reduction: f64, config: &CombatConfig) -> f64 {
    (config.luck_crit_dmg_boost + boost - reduction).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn zero_dexterity_never_dodges() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!((0..1_000).all(|_| !roll_dodge(&mut rng, 0, &config)));
    }

    #[test]
    fn crit_multiplier_floors_at_one() {
        let config = CombatConfig::default();
        assert_eq!(crit_multiplier(0.0, 5.0, &config), 1.0);
        assert!((crit_multiplier(0.5, 0.25, &config) - 1.75).abs() < 1e-9);
    }
}
