//! Short and long rest replenishment.
//!
//! - Short rest: named pools with `resets_on == short` only.
//! - Long rest: every spell slot plus named pools with `short` or `long`.
//! - `none` pools are never touched by a rest.
//!
//! Both are total functions; only pools that actually had spent uses are
//! reported as restored.

use serde::{Deserialize, Serialize};

use crate::entities::Character;
use crate::game_systems::RestType;
use crate::value_objects::{replenish, CappedPool, PoolKey, ResourcePool};

/// One pool brought back to full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoredPool {
    pub pool: PoolKey,
    pub recovered: u8,
}

/// Everything a rest changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestSummary {
    pub rest_type: RestType,
    pub restored: Vec<RestoredPool>,
}

impl RestSummary {
    fn new(rest_type: RestType) -> Self {
        Self {
            rest_type,
            restored: Vec::new(),
        }
    }

    pub fn restored_pool_keys(&self) -> Vec<PoolKey> {
        self.restored.iter().map(|r| r.pool.clone()).collect()
    }

    pub fn total_recovered(&self) -> u32 {
        self.restored.iter().map(|r| r.recovered as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.restored.is_empty()
    }

    fn record(&mut self, pool: PoolKey, recovered: u8) {
        if recovered > 0 {
            self.restored.push(RestoredPool { pool, recovered });
        }
    }
}

/// Dispatch on a rest-trigger command.
pub fn take_rest(character: &Character, rest_type: RestType) -> (Character, RestSummary) {
    match rest_type {
        RestType::Short => short_rest(character),
        RestType::Long => long_rest(character),
    }
}

/// Refill short-cadence named pools. Spell slots and long pools are untouched.
pub fn short_rest(character: &Character) -> (Character, RestSummary) {
    let mut next = character.clone();
    let mut summary = RestSummary::new(RestType::Short);
    replenish_named(&mut next, &mut summary, ResourcePool::resets_on_short_rest);
    (next, summary)
}

/// Refill every spell slot and every short- or long-cadence named pool.
pub fn long_rest(character: &Character) -> (Character, RestSummary) {
    let mut next = character.clone();
    let mut summary = RestSummary::new(RestType::Long);
    for (level, slots) in next.spell_slots.iter_mut() {
        summary.record(PoolKey::SpellSlot(*level), replenish(slots));
    }
    replenish_named(&mut next, &mut summary, ResourcePool::resets_on_long_rest);
    (next, summary)
}

fn replenish_named(
    character: &mut Character,
    summary: &mut RestSummary,
    applies: fn(&ResourcePool) -> bool,
) {
    for (key, pool) in character.feature_uses.iter_mut().filter(|(_, p)| applies(p)) {
        summary.record(PoolKey::Feature(key.clone()), replenish(pool));
    }
    for (key, pool) in character.trait_uses.iter_mut().filter(|(_, p)| applies(p)) {
        summary.record(PoolKey::Trait(key.clone()), replenish(pool));
    }
}

/// Any short-cadence named pool has spent uses.
pub fn needs_short_rest(character: &Character) -> bool {
    character
        .named_pools()
        .any(|(_, p)| p.resets_on_short_rest() && p.used() > 0)
}

/// Any spell slot or short/long-cadence named pool has spent uses.
pub fn needs_long_rest(character: &Character) -> bool {
    character.spell_slots.values().any(|s| s.used() > 0)
        || character
            .named_pools()
            .any(|(_, p)| p.resets_on_long_rest() && p.used() > 0)
}
