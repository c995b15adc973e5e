//! Base attributes.
//!
//! The five attributes are the only stored stats. Everything else (dodge and
//! crit chance, attribute damage scaling, max HP and mana) derives from their
//! combined values.

use bitflags::bitflags;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The five core attributes of a combatant.
///
/// - **Strength**: physical damage scaling
/// - **Dexterity**: dodge chance, finesse damage scaling
/// - **Constitution**: maximum HP
/// - **Intelligence**: maximum mana, spell damage scaling
/// - **Luck**: crit chance, luck damage scaling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Luck,
}

impl Attribute {
    /// Three-letter abbreviation used in narrative text.
    pub const fn short(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Luck => "LUCK",
        }
    }
}

/// Attribute values for a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub luck: i32,
}

impl Attributes {
    pub const fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        luck: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            luck,
        }
    }

    pub const fn get(&self, attr: Attribute) -> i32 {
        match attr {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Luck => self.luck,
        }
    }

    pub fn set(&mut self, attr: Attribute, value: i32) {
        match attr {
            Attribute::Strength => self.strength = value,
            Attribute::Dexterity => self.dexterity = value,
            Attribute::Constitution => self.constitution = value,
            Attribute::Intelligence => self.intelligence = value,
            Attribute::Luck => self.luck = value,
        }
    }

    /// Iterates `(attribute, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::iter().map(move |attr| (attr, self.get(attr)))
    }
}

bitflags! {
    /// Attributes whose value adds to an ability's damage.
    ///
    /// In RON data this is written as a flag string, e.g. `"STRENGTH | LUCK"`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ScalingAttributes: u8 {
        const STRENGTH = 1;
        const DEXTERITY = 1 << 1;
        const INTELLIGENCE = 1 << 2;
        const LUCK = 1 << 3;
    }
}

impl Default for ScalingAttributes {
    fn default() -> Self {
        Self::empty()
    }
}

impl ScalingAttributes {
    /// The attributes selected by this set, in a fixed order.
    pub fn attributes(self) -> impl Iterator<Item = Attribute> {
        [
            (Self::STRENGTH, Attribute::Strength),
            (Self::DEXTERITY, Attribute::Dexterity),
            (Self::INTELLIGENCE, Attribute::Intelligence),
            (Self::LUCK, Attribute::Luck),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, attr)| attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_set_lists_selected_attributes() {
        let set = ScalingAttributes::STRENGTH | ScalingAttributes::LUCK;
        let attrs: Vec<_> = set.attributes().collect();
        assert_eq!(attrs, vec![Attribute::Strength, Attribute::Luck]);
        assert_eq!(ScalingAttributes::default().attributes().count(), 0);
    }

    #[test]
    fn attribute_parses_case_insensitively() {
        assert_eq!("luck".parse::<Attribute>(), Ok(Attribute::Luck));
        assert_eq!(Attribute::Constitution.to_string(), "Constitution");
    }

    #[test]
    fn get_and_set_round_trip_every_attribute() {
        let mut attrs = Attributes::default();
        for (i, attr) in Attribute::iter().enumerate() {
            attrs.set(attr, i as i32 + 1);
        }
        assert_eq!(attrs, Attributes::new(1, 2, 3, 4, 5));
        assert_eq!(attrs.iter().map(|(_, v)| v).sum::<i32>(), 15);
    }
}
