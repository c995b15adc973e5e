//! Narrative templates.
//!
//! Fragments use positional placeholders: `{0}` is the caster and `{k}` the
//! k-th resolved target (1-based). Only templates are built here; front ends
//! substitute display names when rendering.

use crate::stats::DamageTaken;

pub const CASTER: &str = "{0}";

/// Placeholder for the target at 1-based `index`.
pub fn target(index: usize) -> String {
    format!("{{{index}}}")
}

pub fn used(ability: &str) -> String {
    format!("{CASTER} used {ability}!")
}

pub fn dodged(index: usize) -> String {
    format!("{} dodged.", target(index))
}

pub fn critical() -> &'static str {
    "Critical hit!"
}

/// How a hit landed. Reports the armor delta when armor soaked all of it.
pub fn damage(who: &str, taken: DamageTaken) -> String {
    match (taken.hp_lost, taken.armor_lost) {
        (0, 0) => format!("{who} took no damage."),
        (0, armor) => format!("{who} lost {armor} armor."),
        (hp, 0) => format!("{who} took {hp} damage."),
        (hp, armor) => format!("{who} took {hp} damage and lost {armor} armor."),
    }
}

pub fn reflected(taken: DamageTaken) -> String {
    match (taken.hp_lost, taken.armor_lost) {
        (0, 0) => format!("{CASTER} shrugged off the reflected damage."),
        _ => format!("Reflected! {}", damage(CASTER, taken)),
    }
}

pub fn status_applied(index: usize, description: &str) -> String {
    format!("{} is now {description}.", target(index))
}

pub fn status_resisted(index: usize, description: &str) -> String {
    format!("{} resisted {description}.", target(index))
}

pub fn status_gained(description: &str) -> String {
    format!("{CASTER} gained {description}.")
}

pub fn restored(who: &str, amount: i32, resource: &str) -> String {
    format!("{who} restored {amount} {resource}.")
}

pub fn stole(index: usize, amount: i32, resource: &str) -> String {
    format!("{CASTER} stole {amount} {resource} from {}.", target(index))
}

pub fn execute(index: usize, bonus: i32) -> String {
    format!("{} is vulnerable! +{bonus} damage.", target(index))
}

pub fn parry(index: usize, blocked: i32) -> String {
    format!("{} parried {blocked} damage.", target(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_positional() {
        assert_eq!(target(2), "{2}");
        assert_eq!(dodged(1), "{1} dodged.");
    }

    #[test]
    fn fully_absorbed_hit_reports_armor() {
        let taken = DamageTaken {
            armor_lost: 5,
            hp_lost: 0,
        };
        assert_eq!(damage("{1}", taken), "{1} lost 5 armor.");
    }
}
