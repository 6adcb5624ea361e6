//! Character resource and encounter-check rules.
//!
//! Every operation takes a character snapshot by reference and returns a
//! new snapshot (plus a summary or outcome) or a [`DomainError`]. Nothing
//! here performs I/O or reads ambient randomness: dice rolls go through an
//! injected `(min, max) -> value` closure.

pub mod checks;
pub mod entities;
pub mod error;
pub mod events;
pub mod game_systems;
pub mod ids;
pub mod resources;
pub mod turn_order;
pub mod value_objects;

pub use checks::{
    action_breaks_stealth, CheckKind, CheckOutcome, CheckResolver, CheckRoll, NpcPerceptionTable,
    ARMOR_STEALTH_PENALTY, DEFAULT_NPC_PASSIVE_PERCEPTION, STEAL_MARGIN,
};

pub use entities::{
    ArmorProfile, Character, Equipment, EquipmentCategory, EquipmentProperties, InventoryItem,
    NamedPools, PartyMember, SpellSlots, Target, MAX_LEVEL, MAX_SPELL_LEVEL, MIN_LEVEL,
};

pub use error::DomainError;
pub use events::CharacterEvent;

pub use game_systems::{
    ability_modifier, attack_bonus, final_ability_score, proficiency_bonus, CalculationEngine,
    Dnd5eSystem, RestType,
};

pub use ids::{CharacterId, EquipmentId, SessionId};

pub use resources::{
    get_pool, get_spell_slot, long_rest, needs_long_rest, needs_short_rest, remaining_spell_slots,
    restore_ability, restore_spell_slot, short_rest, take_rest, use_ability, use_spell_slot,
    PoolAction, PoolChange, RestSummary, RestoredPool,
};

pub use value_objects::{
    can_afford, can_use, from_minor_units, purchase, refund, replenish, restore_pool, roll_d20,
    to_minor_units, use_pool, validate_pool, Ability, AbilityScores, CappedPool, Currency,
    PoolKey, PoolKind, RacialBonuses, ResetCadence, ResourcePool, Skill, SlotPool,
    COPPER_PER_GOLD, COPPER_PER_SILVER, D20_FACES,
};
