//! Character snapshot - the value every engine operation transforms.
//!
//! The surrounding application owns persistence; the engine receives a
//! snapshot by reference and hands back a new one. Optional collections
//! default to empty so older records deserialize cleanly.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::game_systems::final_ability_score;
use crate::ids::CharacterId;
use crate::value_objects::{
    validate_pool, Ability, AbilityScores, Currency, PoolKey, PoolKind, RacialBonuses,
    ResourcePool, Skill, SlotPool,
};

use super::equipment::InventoryItem;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Named pools keyed by ability key (e.g. "rage", "channel_divinity").
pub type NamedPools = BTreeMap<String, ResourcePool>;

/// Spell slot pools keyed by spell level 1-9.
pub type SpellSlots = BTreeMap<u8, SlotPool>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub level: u8,
    #[serde(default)]
    pub base_abilities: AbilityScores,
    #[serde(default)]
    pub racial_bonuses: RacialBonuses,
    #[serde(default)]
    pub skill_proficiencies: BTreeSet<Skill>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub spell_slots: SpellSlots,
    #[serde(default)]
    pub feature_uses: NamedPools,
    #[serde(default)]
    pub trait_uses: NamedPools,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    /// 0 = not hiding; otherwise the last recorded stealth total
    #[serde(default)]
    pub stealth_roll: u32,
}

impl Character {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            level: level.clamp(MIN_LEVEL, MAX_LEVEL),
            base_abilities: AbilityScores::default(),
            racial_bonuses: RacialBonuses::new(),
            skill_proficiencies: BTreeSet::new(),
            currency: Currency::zero(),
            spell_slots: SpellSlots::new(),
            feature_uses: NamedPools::new(),
            trait_uses: NamedPools::new(),
            inventory: Vec::new(),
            stealth_roll: 0,
        }
    }

    // =========================================================================
    // Builders (used by the creation workflow and by tests)
    // =========================================================================

    pub fn with_ability(mut self, ability: Ability, score: i32) -> Self {
        self.base_abilities.set(ability, score);
        self
    }

    pub fn with_racial_bonus(mut self, ability: Ability, bonus: i32) -> Self {
        self.racial_bonuses.insert(ability, bonus);
        self
    }

    pub fn with_proficiency(mut self, skill: Skill) -> Self {
        self.skill_proficiencies.insert(skill);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_spell_slots(mut self, level: u8, slots: SlotPool) -> Self {
        self.spell_slots.insert(level, slots);
        self
    }

    pub fn with_pool(mut self, kind: PoolKind, key: impl Into<String>, pool: ResourcePool) -> Self {
        self.pools_mut(kind).insert(key.into(), pool);
        self
    }

    pub fn with_item(mut self, item: InventoryItem) -> Self {
        self.inventory.push(item);
        self
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Base score plus racial bonus, unclamped.
    pub fn ability_score(&self, ability: Ability) -> i32 {
        let bonus = self.racial_bonuses.get(&ability).copied().unwrap_or(0);
        final_ability_score(self.base_abilities.get(ability), bonus)
    }

    pub fn is_proficient(&self, skill: Skill) -> bool {
        self.skill_proficiencies.contains(&skill)
    }

    /// The feature or trait pool map.
    pub fn pools(&self, kind: PoolKind) -> &NamedPools {
        match kind {
            PoolKind::Feature => &self.feature_uses,
            PoolKind::Trait => &self.trait_uses,
        }
    }

    pub fn pools_mut(&mut self, kind: PoolKind) -> &mut NamedPools {
        match kind {
            PoolKind::Feature => &mut self.feature_uses,
            PoolKind::Trait => &mut self.trait_uses,
        }
    }

    /// Every named pool with its qualified key.
    pub fn named_pools(&self) -> impl Iterator<Item = (PoolKey, &ResourcePool)> {
        self.feature_uses
            .iter()
            .map(|(k, p)| (PoolKey::Feature(k.clone()), p))
            .chain(
                self.trait_uses
                    .iter()
                    .map(|(k, p)| (PoolKey::Trait(k.clone()), p)),
            )
    }

    pub fn equipped_items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.inventory.iter().filter(|item| item.equipped)
    }

    /// Hiding while a stealth total is recorded.
    pub fn is_in_stealth(&self) -> bool {
        self.stealth_roll > 0
    }

    /// Check the snapshot invariants: level range, spell levels and `used <= max`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            return Err(DomainError::validation(format!(
                "level {} outside {MIN_LEVEL}-{MAX_LEVEL}",
                self.level
            )));
        }
        for (level, slots) in &self.spell_slots {
            if !(1..=MAX_SPELL_LEVEL).contains(level) {
                return Err(DomainError::validation(format!(
                    "spell slot level {level} outside 1-{MAX_SPELL_LEVEL}"
                )));
            }
            validate_pool(&PoolKey::SpellSlot(*level), slots)?;
        }
        for (key, pool) in self.named_pools() {
            validate_pool(&key, pool)?;
        }
        Ok(())
    }
}
