//! Use/restore bookkeeping over a character's pools.
//!
//! Each transition borrows the input snapshot and returns a fresh one, so a
//! failed call leaves the caller's snapshot exactly as it was.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::Character;
use crate::error::DomainError;
use crate::value_objects::{
    restore_pool, use_pool, CappedPool, PoolKey, PoolKind, ResourcePool, SlotPool,
};

/// Which way a pool moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolAction {
    Used,
    Restored,
}

/// Result of a single use/restore transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolChange {
    pub pool: PoolKey,
    pub action: PoolAction,
    pub used: u8,
    pub max: u8,
}

impl PoolChange {
    fn of<P: CappedPool>(pool: PoolKey, action: PoolAction, state: &P) -> Self {
        Self {
            pool,
            action,
            used: state.used(),
            max: state.max(),
        }
    }

    /// Uses left after this change.
    pub fn remaining(&self) -> u8 {
        self.max.saturating_sub(self.used)
    }
}

/// Look up a named pool. `None` means untracked, which is not an error.
pub fn get_pool<'a>(character: &'a Character, key: &str, kind: PoolKind) -> Option<&'a ResourcePool> {
    character.pools(kind).get(key)
}

/// Look up the spell slot pool for a level.
pub fn get_spell_slot(character: &Character, level: u8) -> Option<&SlotPool> {
    character.spell_slots.get(&level)
}

/// Remaining (unspent) slots per level.
pub fn remaining_spell_slots(character: &Character) -> BTreeMap<u8, u8> {
    character
        .spell_slots
        .iter()
        .map(|(level, pool)| (*level, pool.available()))
        .collect()
}

/// Spend one use of a named ability or trait.
pub fn use_ability(
    character: &Character,
    kind: PoolKind,
    key: &str,
) -> Result<(Character, PoolChange), DomainError> {
    transition_named(character, kind, key, PoolAction::Used)
}

/// Give back one use of a named ability or trait.
pub fn restore_ability(
    character: &Character,
    kind: PoolKind,
    key: &str,
) -> Result<(Character, PoolChange), DomainError> {
    transition_named(character, kind, key, PoolAction::Restored)
}

/// Expend one spell slot of the given level.
pub fn use_spell_slot(
    character: &Character,
    level: u8,
) -> Result<(Character, PoolChange), DomainError> {
    transition_slot(character, level, PoolAction::Used)
}

/// Give back one spell slot of the given level.
pub fn restore_spell_slot(
    character: &Character,
    level: u8,
) -> Result<(Character, PoolChange), DomainError> {
    transition_slot(character, level, PoolAction::Restored)
}

fn apply<P: CappedPool>(pool_key: &PoolKey, pool: &mut P, action: PoolAction) -> Result<(), DomainError> {
    match action {
        PoolAction::Used => use_pool(pool_key, pool),
        PoolAction::Restored => restore_pool(pool_key, pool),
    }
}

fn transition_named(
    character: &Character,
    kind: PoolKind,
    key: &str,
    action: PoolAction,
) -> Result<(Character, PoolChange), DomainError> {
    let pool_key = PoolKey::named(kind, key);
    let mut pool = *get_pool(character, key, kind).ok_or_else(|| DomainError::untracked(&pool_key))?;
    apply(&pool_key, &mut pool, action)?;

    let mut next = character.clone();
    next.pools_mut(kind).insert(key.to_string(), pool);
    Ok((next, PoolChange::of(pool_key, action, &pool)))
}

fn transition_slot(
    character: &Character,
    level: u8,
    action: PoolAction,
) -> Result<(Character, PoolChange), DomainError> {
    let pool_key = PoolKey::SpellSlot(level);
    let mut pool = *get_spell_slot(character, level).ok_or_else(|| DomainError::untracked(&pool_key))?;
    apply(&pool_key, &mut pool, action)?;

    let mut next = character.clone();
    next.spell_slots.insert(level, pool);
    Ok((next, PoolChange::of(pool_key, action, &pool)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::short_rest;
    use crate::value_objects::ResetCadence;

    fn barbarian() -> Character {
        Character::new("Grum", 3)
            .with_pool(PoolKind::Feature, "rage", ResourcePool::long_rest(3))
            .with_pool(PoolKind::Feature, "second_wind", ResourcePool::short_rest(2).with_used(2))
            .with_pool(PoolKind::Trait, "relentless_endurance", ResourcePool::long_rest(1))
            .with_spell_slots(1, SlotPool::new(2))
    }

    #[test]
    fn get_pool_reports_untracked_as_none() {
        let pc = barbarian();
        assert!(get_pool(&pc, "rage", PoolKind::Feature).is_some());
        assert!(get_pool(&pc, "rage", PoolKind::Trait).is_none());
        assert!(get_pool(&pc, "wild_shape", PoolKind::Feature).is_none());
    }

    #[test]
    fn use_ability_returns_new_snapshot() {
        let pc = barbarian();
        let (next, change) = use_ability(&pc, PoolKind::Feature, "rage").unwrap();
        assert_eq!(next.feature_uses["rage"].used, 1);
        assert_eq!(pc.feature_uses["rage"].used, 0);
        assert_eq!(change.action, PoolAction::Used);
        assert_eq!(change.remaining(), 2);
    }

    #[test]
    fn exhausted_pool_then_short_rest_then_use() {
        let pc = barbarian();
        let err = use_ability(&pc, PoolKind::Feature, "second_wind").unwrap_err();
        assert!(matches!(err, DomainError::PoolExhausted { used: 2, max: 2, .. }));

        let (rested, _) = short_rest(&pc);
        assert_eq!(rested.feature_uses["second_wind"].used, 0);

        let (after, _) = use_ability(&rested, PoolKind::Feature, "second_wind").unwrap();
        assert_eq!(after.feature_uses["second_wind"].used, 1);
    }

    #[test]
    fn restore_ability_undoes_use() {
        let pc = barbarian();
        let (used, _) = use_ability(&pc, PoolKind::Trait, "relentless_endurance").unwrap();
        let (restored, change) = restore_ability(&used, PoolKind::Trait, "relentless_endurance").unwrap();
        assert_eq!(restored, pc);
        assert_eq!(change.action, PoolAction::Restored);
    }

    #[test]
    fn restore_at_zero_fails_without_mutation() {
        let pc = barbarian();
        let err = restore_ability(&pc, PoolKind::Feature, "rage").unwrap_err();
        assert!(matches!(err, DomainError::NothingToRestore { .. }));
    }

    #[test]
    fn untracked_key_is_informational() {
        let pc = barbarian();
        let err = use_ability(&pc, PoolKind::Feature, "ki").unwrap_err();
        assert_eq!(err, DomainError::untracked("feature:ki"));
        assert!(err.is_informational());
    }

    #[test]
    fn overspent_input_is_rejected() {
        let pc = Character::new("Odd", 1).with_pool(
            PoolKind::Feature,
            "bardic_inspiration",
            ResourcePool::new(1, ResetCadence::Long).with_used(4),
        );
        assert!(matches!(
            use_ability(&pc, PoolKind::Feature, "bardic_inspiration"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn spell_slot_use_and_restore() {
        let pc = barbarian();
        let (one, _) = use_spell_slot(&pc, 1).unwrap();
        let (two, change) = use_spell_slot(&one, 1).unwrap();
        assert_eq!(change.remaining(), 0);
        assert!(matches!(use_spell_slot(&two, 1), Err(DomainError::PoolExhausted { .. })));
        assert_eq!(remaining_spell_slots(&two)[&1], 0);

        let (back, _) = restore_spell_slot(&two, 1).unwrap();
        assert_eq!(back.spell_slots[&1].used, 1);
        assert!(use_spell_slot(&pc, 3).unwrap_err().is_informational());
    }
}
