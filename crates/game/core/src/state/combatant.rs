//! Combatant state: a player, companion or NPC taking part in a battle.

use std::collections::HashMap;

use crate::ability::AbilityKey;
use crate::combat::CombatRng;
use crate::config::CombatConfig;
use crate::item::ItemDefinition;
use crate::stats::{AttributeBonuses, Attributes, CombatStats, Resources};

use super::common::{CombatantId, CombatantKind, Team};
use super::equipment::Equipment;
use super::status::{StatusEffect, StatusEffects};

/// Outcome of trying to put a status effect on a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusApplication {
    Applied,
    Resisted,
    /// The effect list had no room left.
    Dropped,
}

/// Complete combatant state.
///
/// # Invariants
///
/// - `resources` maximums always reflect `base_*` + combined attributes +
///   equipment; call [`Combatant::recompute_derived`] after changing any of
///   `base_attributes`, `status_effects` or `equipment`
/// - the helpers that mutate those fields (`add_status_effect*`,
///   `tick_status_effects`, `equip`) recompute on their own
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub kind: CombatantKind,
    pub team: Team,
    pub level: u32,
    /// Legendary combatants take extra damage from some items.
    pub legendary: bool,

    // === Stored stats ===
    pub base_attributes: Attributes,
    pub base_max_hp: i32,
    pub base_max_mana: i32,
    pub base_max_armor: i32,
    /// Innate chance to resist a new status effect.
    pub base_resist: f64,
    pub resources: Resources,

    // === State affecting derived stats ===
    pub status_effects: StatusEffects,
    pub equipment: Equipment,

    // === Abilities ===
    /// Abilities this combatant may use, by catalog key.
    pub abilities: Vec<AbilityKey>,
    /// Turns left before an ability can be used again. Absent means ready.
    pub cooldowns: HashMap<AbilityKey, u32>,

    // === Bookkeeping ===
    pub battle_stats: CombatStats,
    pub lifetime_stats: CombatStats,
}

impl Combatant {
    /// Create a combatant with empty resources; call
    /// [`Combatant::with_base_resources`] or [`Combatant::recompute_derived`]
    /// before battle.
    pub fn new(id: CombatantId, name: impl Into<String>, team: Team, attributes: Attributes) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CombatantKind::default(),
            team,
            level: 1,
            legendary: false,
            base_attributes: attributes,
            base_max_hp: 0,
            base_max_mana: 0,
            base_max_armor: 0,
            base_resist: 0.0,
            resources: Resources::default(),
            status_effects: StatusEffects::empty(),
            equipment: Equipment::empty(),
            abilities: Vec::new(),
            cooldowns: HashMap::new(),
            battle_stats: CombatStats::default(),
            lifetime_stats: CombatStats::default(),
        }
    }

    pub fn with_kind(mut self, kind: CombatantKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_legendary(mut self, legendary: bool) -> Self {
        self.legendary = legendary;
        self
    }

    pub fn with_resist(mut self, base_resist: f64) -> Self {
        self.base_resist = base_resist;
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityKey>) -> Self {
        self.abilities = abilities.into_iter().collect();
        self
    }

    /// Set base maximums, recompute derived stats and fill every pool.
    pub fn with_base_resources(
        mut self,
        max_hp: i32,
        max_mana: i32,
        max_armor: i32,
        config: &CombatConfig,
    ) -> Self {
        self.base_max_hp = max_hp;
        self.base_max_mana = max_mana;
        self.base_max_armor = max_armor;
        self.recompute_derived(config);
        self.refill();
        self
    }

    /// Fill HP, mana and armor to their maximums.
    pub fn refill(&mut self) {
        let r = &mut self.resources;
        r.hp = r.max_hp;
        r.mana = r.max_mana;
        r.armor = r.max_armor;
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// Base attributes with status effect and equipment bonuses applied.
    pub fn combined_attributes(&self) -> Attributes {
        let mut bonuses = AttributeBonuses::new();
        self.status_effects.collect_attribute_bonuses(&mut bonuses);
        self.equipment.collect_attribute_bonuses(&mut bonuses);
        bonuses.apply(&self.base_attributes)
    }

    /// Recompute max HP, mana and armor, then clamp current values.
    pub fn recompute_derived(&mut self, config: &CombatConfig) {
        let attrs = self.combined_attributes();
        let r = &mut self.resources;
        r.max_hp = (self.base_max_hp + attrs.constitution * config.con_health_scale).max(1);
        r.max_mana = (self.base_max_mana + attrs.intelligence * config.int_mana_scale).max(0);
        r.max_armor = (self.base_max_armor + self.equipment.armor_bonus()).max(0);
        r.clamp_to_max();
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.resources.is_alive()
    }

    pub fn is_undying(&self) -> bool {
        self.status_effects.is_undying()
    }

    /// Percent damage reduction from effects and items, clamped to config bounds.
    pub fn damage_reduction(&self, config: &CombatConfig) -> f64 {
        let raw = self.status_effects.damage_reduction() + self.equipment.totals().damage_reduction;
        raw.clamp(config.min_damage_reduction, config.max_damage_reduction)
    }

    /// Chance to resist a newly applied status effect.
    pub fn resist_chance(&self, config: &CombatConfig) -> f64 {
        let raw = self.base_resist
            + self.status_effects.resist_bonus()
            + self.equipment.totals().status_resist;
        raw.clamp(0.0, config.max_resist_chance)
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    /// Add an effect unconditionally (self buffs) and recompute derived stats.
    pub fn add_status_effect(&mut self, effect: StatusEffect, config: &CombatConfig) -> bool {
        let added = self.status_effects.push(effect);
        if added {
            self.recompute_derived(config);
        }
        added
    }

    /// Add an effect subject to this combatant's resist chance.
    pub fn add_status_effect_with_resist(
        &mut self,
        effect: StatusEffect,
        rng: &mut (impl CombatRng + ?Sized),
        config: &CombatConfig,
    ) -> StatusApplication {
        let resist = self.resist_chance(config);
        if resist > 0.0 && rng.chance(resist) {
            self.battle_stats.effects_resisted += 1;
            return StatusApplication::Resisted;
        }
        if self.add_status_effect(effect, config) {
            self.battle_stats.effects_applied += 1;
            StatusApplication::Applied
        } else {
            StatusApplication::Dropped
        }
    }

    /// End-of-turn tick. Returns the effects that expired.
    pub fn tick_status_effects(&mut self, config: &CombatConfig) -> Vec<StatusEffect> {
        let expired = self.status_effects.tick();
        if !expired.is_empty() {
            self.recompute_derived(config);
        }
        expired
    }

    // ========================================================================
    // Equipment
    // ========================================================================

    pub fn equip(&mut self, item: ItemDefinition, config: &CombatConfig) -> Option<ItemDefinition> {
        let previous = self.equipment.equip(item);
        self.recompute_derived(config);
        previous
    }

    // ========================================================================
    // Abilities and cooldowns
    // ========================================================================

    pub fn knows(&self, key: &AbilityKey) -> bool {
        self.abilities.contains(key)
    }

    pub fn cooldown_remaining(&self, key: &AbilityKey) -> u32 {
        self.cooldowns.get(key).copied().unwrap_or(0)
    }

    pub fn start_cooldown(&mut self, key: &AbilityKey, turns: u32) {
        if turns > 0 {
            self.cooldowns.insert(key.clone(), turns);
        }
    }

    /// Decrement every cooldown and forget the ones that reached zero.
    pub fn tick_cooldowns(&mut self) {
        for turns in self.cooldowns.values_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.cooldowns.retain(|_, turns| *turns > 0);
    }

    /// Fold this battle's counters into the lifetime counters and reset them.
    pub fn finish_battle(&mut self) {
        let battle = core::mem::take(&mut self.battle_stats);
        self.lifetime_stats += battle;
        self.cooldowns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemEffect, ItemSlot};
    use crate::state::status::StatusEffectKind;
    use crate::stats::Attribute;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn wolf(config: &CombatConfig) -> Combatant {
        Combatant::new(CombatantId(1), "Wolf", Team::Left, Attributes::new(4, 6, 4, 2, 1))
            .with_base_resources(20, 5, 0, config)
    }

    #[test]
    fn derived_maximums_follow_attributes() {
        let config = CombatConfig::default();
        let c = wolf(&config);
        assert_eq!(c.resources.max_hp, 20 + 4 * config.con_health_scale);
        assert_eq!(c.resources.max_mana, 5 + 2 * config.int_mana_scale);
        assert_eq!(c.resources.hp, c.resources.max_hp);
    }

    #[test]
    fn constitution_buff_raises_max_hp_and_expiry_clamps() {
        let config = CombatConfig::default();
        let mut c = wolf(&config);
        let before = c.resources.max_hp;

        c.add_status_effect(
            StatusEffect::new(
                StatusEffectKind::AttributeBuff {
                    attr: Attribute::Constitution,
                    value: 2,
                },
                1,
                "Howl",
            ),
            &config,
        );
        assert_eq!(c.resources.max_hp, before + 2 * config.con_health_scale);

        c.resources.hp = c.resources.max_hp;
        let expired = c.tick_status_effects(&config);
        assert_eq!(expired.len(), 1);
        assert_eq!(c.resources.max_hp, before);
        assert_eq!(c.resources.hp, before);
    }

    #[test]
    fn full_resist_blocks_every_effect() {
        let config = CombatConfig {
            max_resist_chance: 1.0,
            ..CombatConfig::default()
        };
        let mut c = wolf(&config).with_resist(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let outcome = c.add_status_effect_with_resist(
                StatusEffect::new(StatusEffectKind::Poisoned { damage: 1 }, 2, "Venom"),
                &mut rng,
                &config,
            );
            assert_eq!(outcome, StatusApplication::Resisted);
        }
        assert!(c.status_effects.is_empty());
        assert_eq!(c.battle_stats.effects_resisted, 20);
    }

    #[test]
    fn item_attributes_and_armor_apply() {
        let config = CombatConfig::default();
        let mut c = wolf(&config);
        c.equip(
            ItemDefinition::new("collar", "Spiked Collar", ItemSlot::Armor)
                .with_armor(5)
                .with_effect(ItemEffect::AttributeBonus {
                    attr: Attribute::Dexterity,
                    value: 3,
                }),
            &config,
        );
        assert_eq!(c.combined_attributes().dexterity, 9);
        assert_eq!(c.resources.max_armor, 5);
    }

    #[test]
    fn cooldowns_count_down_and_clear() {
        let config = CombatConfig::default();
        let mut c = wolf(&config);
        let key = AbilityKey::from("gore_1");
        c.start_cooldown(&key, 2);
        assert_eq!(c.cooldown_remaining(&key), 2);
        c.tick_cooldowns();
        assert_eq!(c.cooldown_remaining(&key), 1);
        c.tick_cooldowns();
        assert_eq!(c.cooldown_remaining(&key), 0);
        assert!(c.cooldowns.is_empty());
    }

    #[test]
    fn finish_battle_merges_stats() {
        let config = CombatConfig::default();
        let mut c = wolf(&config);
        c.battle_stats.damage_dealt = 12;
        c.finish_battle();
        c.battle_stats.damage_dealt = 3;
        c.finish_battle();
        assert_eq!(c.lifetime_stats.damage_dealt, 15);
        assert_eq!(c.battle_stats, CombatStats::default());
    }
}
