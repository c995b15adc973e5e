//! Companion NPCs as data.
//!
//! A species is a table row: attribute and resource progressions, the weapon
//! it carries and which abilities it knows at each level threshold. Building
//! a companion at a level evaluates the row; nothing else is species-specific.

mod formula;

pub use formula::{AttributeFormulas, LevelFormula};

use std::collections::BTreeMap;

use thiserror::Error;

use crate::ability::{AbilityKey, AbilityOracle};
use crate::config::CombatConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::item::{ItemKey, ItemOracle};
use crate::state::{Combatant, CombatantId, CombatantKind, Team};

/// Errors raised while validating or building a companion.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompanionError {
    #[error("species `{species}` loadout at level {level} has {count} abilities (max {max})")]
    LoadoutTooLarge {
        species: String,
        level: u32,
        count: usize,
        max: usize,
    },

    #[error("species `{species}` references unknown ability `{ability}`")]
    UnknownAbility { species: String, ability: AbilityKey },

    #[error("species `{species}` references unknown item `{item}`")]
    UnknownItem { species: String, item: ItemKey },

    #[error("duplicate companion species `{0}`")]
    DuplicateSpecies(String),
}

impl GameError for CompanionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LoadoutTooLarge { .. } => "COMPANION_LOADOUT_TOO_LARGE",
            Self::UnknownAbility { .. } => "COMPANION_UNKNOWN_ABILITY",
            Self::UnknownItem { .. } => "COMPANION_UNKNOWN_ITEM",
            Self::DuplicateSpecies(_) => "COMPANION_DUPLICATE_SPECIES",
        }
    }
}

/// Abilities known from `level` onward, until a higher threshold replaces them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    pub level: u32,
    pub abilities: Vec<AbilityKey>,
}

/// One companion species.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanionSpecies {
    pub key: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<ItemKey>,
    pub attributes: AttributeFormulas,
    pub base_hp: LevelFormula,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_mana: LevelFormula,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_armor: i32,
    /// Level thresholds, any order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub loadouts: Vec<Loadout>,
}

impl CompanionSpecies {
    /// Abilities for `level`: the highest threshold at or below it, or none.
    pub fn loadout(&self, level: u32) -> &[AbilityKey] {
        self.loadouts
            .iter()
            .filter(|l| l.level <= level)
            .max_by_key(|l| l.level)
            .map(|l| l.abilities.as_slice())
            .unwrap_or_default()
    }

    /// Check loadout sizes and that every referenced ability and item exists.
    pub fn validate(
        &self,
        abilities: &(impl AbilityOracle + ?Sized),
        items: &(impl ItemOracle + ?Sized),
    ) -> Result<(), CompanionError> {
        for loadout in &self.loadouts {
            if loadout.abilities.len() > CombatConfig::MAX_LOADOUT {
                return Err(CompanionError::LoadoutTooLarge {
                    species: self.key.clone(),
                    level: loadout.level,
                    count: loadout.abilities.len(),
                    max: CombatConfig::MAX_LOADOUT,
                });
            }
            if let Some(unknown) = loadout.abilities.iter().find(|k| !abilities.contains(k)) {
                return Err(CompanionError::UnknownAbility {
                    species: self.key.clone(),
                    ability: unknown.clone(),
                });
            }
        }
        match &self.weapon {
            Some(weapon) if items.definition(weapon).is_none() => Err(CompanionError::UnknownItem {
                species: self.key.clone(),
                item: weapon.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Build a battle-ready companion at `level`, weapon equipped and pools full.
    pub fn build(
        &self,
        level: u32,
        id: CombatantId,
        team: Team,
        items: &(impl ItemOracle + ?Sized),
        config: &CombatConfig,
    ) -> Result<Combatant, CompanionError> {
        let mut combatant = Combatant::new(id, self.name.clone(), team, self.attributes.evaluate(level))
            .with_kind(CombatantKind::Companion)
            .with_level(level)
            .with_abilities(self.loadout(level).iter().cloned());

        if let Some(key) = &self.weapon {
            let weapon = items.definition(key).ok_or_else(|| CompanionError::UnknownItem {
                species: self.key.clone(),
                item: key.clone(),
            })?;
            combatant.equipment.equip(weapon.clone());
        }

        let combatant = combatant.with_base_resources(
            self.base_hp.evaluate(level).max(1),
            self.base_mana.evaluate(level).max(0),
            self.base_armor.max(0),
            config,
        );
        tracing::debug!(
            species = %self.key,
            level,
            hp = combatant.resources.max_hp,
            abilities = combatant.abilities.len(),
            "companion built"
        );
        Ok(combatant)
    }
}

/// Every companion species, by key.
#[derive(Clone, Debug, Default)]
pub struct CompanionRoster {
    species: BTreeMap<String, CompanionSpecies>,
}

impl CompanionRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, species: CompanionSpecies) -> Result<(), CompanionError> {
        if self.species.contains_key(&species.key) {
            return Err(CompanionError::DuplicateSpecies(species.key));
        }
        self.species.insert(species.key.clone(), species);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&CompanionSpecies> {
        self.species.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompanionSpecies> {
        self.species.values()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityCatalog, AbilityDefinition, AbilityShape};
    use crate::item::{ItemDefinition, ItemEffect, ItemSlot};
    use crate::stats::Attribute;

    struct Items(Vec<ItemDefinition>);

    impl ItemOracle for Items {
        fn definition(&self, key: &ItemKey) -> Option<&ItemDefinition> {
            self.0.iter().find(|item| &item.key == key)
        }
    }

    fn boar() -> CompanionSpecies {
        CompanionSpecies {
            key: "boar".into(),
            name: "Boar".into(),
            weapon: Some(ItemKey::from("boar_tusks")),
            attributes: AttributeFormulas {
                strength: LevelFormula::per_levels(2, 2),
                constitution: LevelFormula::per_levels(1, 3).with_cap(10),
                ..AttributeFormulas::default()
            },
            base_hp: LevelFormula {
                base: 10,
                multiplier: 2,
                divisor: 1,
                cap: None,
            },
            base_mana: LevelFormula::flat(5),
            base_armor: 2,
            loadouts: vec![
                Loadout {
                    level: 10,
                    abilities: vec!["gore_2".into(), "charge_1".into()],
                },
                Loadout {
                    level: 5,
                    abilities: vec!["gore_1".into()],
                },
            ],
        }
    }

    fn tusks() -> Items {
        Items(vec![
            ItemDefinition::new("boar_tusks", "Boar Tusks", ItemSlot::Weapon).with_effect(
                ItemEffect::AttributeBonus {
                    attr: Attribute::Strength,
                    value: 1,
                },
            ),
        ])
    }

    #[test]
    fn loadout_picks_highest_threshold_at_or_below_level() {
        let boar = boar();
        assert!(boar.loadout(4).is_empty());
        assert_eq!(boar.loadout(5), &[AbilityKey::from("gore_1")]);
        assert_eq!(boar.loadout(9), &[AbilityKey::from("gore_1")]);
        assert_eq!(boar.loadout(50).len(), 2);
    }

    #[test]
    fn build_evaluates_formulas_and_equips_weapon() {
        let config = CombatConfig::default();
        let boar = boar()
            .build(12, CombatantId(4), Team::Right, &tusks(), &config)
            .unwrap();

        assert_eq!(boar.kind, CombatantKind::Companion);
        assert_eq!(boar.level, 12);
        assert_eq!(boar.base_attributes.strength, 8);
        assert_eq!(boar.combined_attributes().strength, 9);
        assert_eq!(boar.base_attributes.constitution, 5);
        assert_eq!(boar.resources.max_hp, 34 + 5 * config.con_health_scale);
        assert_eq!(boar.resources.hp, boar.resources.max_hp);
        assert_eq!(boar.resources.armor, 2);
        assert_eq!(boar.abilities.len(), 2);
        assert!(boar.equipment.weapon.is_some());
    }

    #[test]
    fn build_fails_on_missing_weapon() {
        let config = CombatConfig::default();
        let err = boar()
            .build(5, CombatantId(1), Team::Left, &Items(Vec::new()), &config)
            .unwrap_err();
        assert!(matches!(err, CompanionError::UnknownItem { .. }));
    }

    #[test]
    fn validate_checks_loadouts_against_catalog() {
        let mut catalog = AbilityCatalog::new();
        for key in ["gore_1", "gore_2"] {
            catalog
                .insert(AbilityDefinition::new(key, key, AbilityShape::HealSelf { percent: 0.1 }))
                .unwrap();
        }
        let err = boar().validate(&catalog, &tusks()).unwrap_err();
        assert_eq!(
            err,
            CompanionError::UnknownAbility {
                species: "boar".into(),
                ability: "charge_1".into(),
            }
        );

        let mut crowded = boar();
        crowded.loadouts[0].abilities = vec!["gore_2".into()];
        crowded.loadouts[1].abilities = vec!["gore_1".into(); 4];
        assert!(matches!(
            crowded.validate(&catalog, &tusks()),
            Err(CompanionError::LoadoutTooLarge { count: 4, .. })
        ));
    }
}
