//! Value objects - Immutable objects defined by their attributes

mod ability;
mod currency;
mod dice;
mod resource_pool;

pub use ability::{Ability, AbilityScores, RacialBonuses, Skill};
pub use currency::{
    can_afford, from_minor_units, purchase, refund, to_minor_units, Currency, COPPER_PER_GOLD,
    COPPER_PER_SILVER,
};
pub use dice::{roll_d20, D20_FACES};
pub use resource_pool::{
    can_use, replenish, restore_pool, use_pool, validate_pool, CappedPool, PoolKey, PoolKind,
    ResetCadence, ResourcePool, SlotPool,
};
