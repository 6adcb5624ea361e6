//! Resource pool tracking and rest replenishment.

mod rest;
mod tracker;

pub use rest::{
    long_rest, needs_long_rest, needs_short_rest, short_rest, take_rest, RestSummary,
    RestoredPool,
};
pub use tracker::{
    get_pool, get_spell_slot, remaining_spell_slots, restore_ability, restore_spell_slot,
    use_ability, use_spell_slot, PoolAction, PoolChange,
};
