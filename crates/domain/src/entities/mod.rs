//! Domain entities - Core business objects with identity

mod character;
mod equipment;
mod party;

pub use character::{
    Character, NamedPools, SpellSlots, MAX_LEVEL, MAX_SPELL_LEVEL, MIN_LEVEL,
};
pub use equipment::{
    ArmorProfile, Equipment, EquipmentCategory, EquipmentProperties, InventoryItem,
};
pub use party::{PartyMember, Target};
