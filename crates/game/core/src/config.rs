use crate::stats::Attribute;

/// Combat tuning constants.
///
/// Every scale factor used by the resolution pipeline lives here so content
/// files can rebalance without touching the rules. Missing keys in a data file
/// fall back to [`CombatConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Dodge chance contributed by each point of Dexterity.
    pub dex_dodge_scale: f64,
    /// Crit chance contributed by each point of Luck.
    pub luck_crit_scale: f64,
    /// Damage multiplier applied on a critical hit.
    pub luck_crit_dmg_boost: f64,

    // ===== attribute scaling (fraction of base damage per point) =====
    pub str_dmg_scale: f64,
    pub dex_dmg_scale: f64,
    pub int_dmg_scale: f64,
    pub luck_dmg_scale: f64,

    // ===== derived stats =====
    /// Max HP granted per point of Constitution.
    pub con_health_scale: i32,
    /// Max mana granted per point of Intelligence.
    pub int_mana_scale: i32,

    // ===== clamps =====
    pub max_damage_reduction: f64,
    pub min_damage_reduction: f64,
    pub max_resist_chance: f64,

    /// Mana restored at the end of each of a combatant's turns.
    pub mana_regen_per_turn: i32,
}

impl CombatConfig {
    // ===== compile-time capacities =====
    pub const MAX_STATUS_EFFECTS: usize = 32;
    pub const MAX_LOADOUT: usize = 3;
    pub const MAX_TIERS: usize = 5;

    // ===== defaults =====
    pub const DEFAULT_DEX_DODGE_SCALE: f64 = 0.0025;
    pub const DEFAULT_LUCK_CRIT_SCALE: f64 = 0.005;
    pub const DEFAULT_LUCK_CRIT_DMG_BOOST: f64 = 1.5;
    pub const DEFAULT_ATTR_DMG_SCALE: f64 = 0.025;

    pub fn new() -> Self {
        Self {
            dex_dodge_scale: Self::DEFAULT_DEX_DODGE_SCALE,
            luck_crit_scale: Self::DEFAULT_LUCK_CRIT_SCALE,
            luck_crit_dmg_boost: Self::DEFAULT_LUCK_CRIT_DMG_BOOST,
            str_dmg_scale: Self::DEFAULT_ATTR_DMG_SCALE,
            dex_dmg_scale: Self::DEFAULT_ATTR_DMG_SCALE,
            int_dmg_scale: Self::DEFAULT_ATTR_DMG_SCALE,
            luck_dmg_scale: Self::DEFAULT_ATTR_DMG_SCALE,
            con_health_scale: 5,
            int_mana_scale: 3,
            max_damage_reduction: 0.85,
            min_damage_reduction: -1.0,
            max_resist_chance: 0.9,
            mana_regen_per_turn: 2,
        }
    }
}

impl CombatConfig {
    /// Fraction of base damage added per point of `attr` when it scales an
    /// ability. Constitution never scales damage.
    pub const fn attribute_damage_scale(&self, attr: Attribute) -> f64 {
        match attr {
            Attribute::Strength => self.str_dmg_scale,
            Attribute::Dexterity => self.dex_dmg_scale,
            Attribute::Intelligence => self.int_dmg_scale,
            Attribute::Luck => self.luck_dmg_scale,
            Attribute::Constitution => 0.0,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
