//! Capped, replenishable resource pools.
//!
//! A pool counts *spent* uses: `used` starts at 0 after a rest and climbs to
//! `max`. The invariant `used <= max` holds for every pool the engine emits;
//! pools arriving in violation are rejected with a validation error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// When a named pool replenishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetCadence {
    /// Restored on a short rest (and on a long rest)
    Short,
    /// Restored on a long rest only
    Long,
    /// Never restored automatically (manual tracking)
    None,
}

/// Shared bookkeeping for every pool shape.
pub trait CappedPool {
    fn used(&self) -> u8;
    fn max(&self) -> u8;
    fn set_used(&mut self, used: u8);

    /// Uses still available.
    fn available(&self) -> u8 {
        self.max().saturating_sub(self.used())
    }

    /// Whether the pool respects `used <= max`.
    fn is_consistent(&self) -> bool {
        self.used() <= self.max()
    }
}

/// A named ability or trait pool (e.g. "rage", "breath_weapon").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePool {
    #[serde(default)]
    pub used: u8,
    pub max: u8,
    pub resets_on: ResetCadence,
}

impl ResourcePool {
    /// A fresh pool with nothing spent.
    pub fn new(max: u8, resets_on: ResetCadence) -> Self {
        Self {
            used: 0,
            max,
            resets_on,
        }
    }

    /// Full pool that refills on any rest.
    pub fn short_rest(max: u8) -> Self {
        Self::new(max, ResetCadence::Short)
    }

    /// Full pool that refills only on a long rest.
    pub fn long_rest(max: u8) -> Self {
        Self::new(max, ResetCadence::Long)
    }

    /// Builder-style setter for spent uses.
    pub fn with_used(mut self, used: u8) -> Self {
        self.used = used;
        self
    }

    /// Whether a rest of this cadence replenishes the pool.
    pub fn resets_on_short_rest(&self) -> bool {
        self.resets_on == ResetCadence::Short
    }

    /// Long rests refill both short and long cadences.
    pub fn resets_on_long_rest(&self) -> bool {
        matches!(self.resets_on, ResetCadence::Short | ResetCadence::Long)
    }
}

impl CappedPool for ResourcePool {
    fn used(&self) -> u8 {
        self.used
    }

    fn max(&self) -> u8 {
        self.max
    }

    fn set_used(&mut self, used: u8) {
        self.used = used;
    }
}

/// Spell slots of a single level. Always replenished by a long rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPool {
    #[serde(default)]
    pub used: u8,
    pub max: u8,
}

impl SlotPool {
    pub fn new(max: u8) -> Self {
        Self { used: 0, max }
    }

    pub fn with_used(mut self, used: u8) -> Self {
        self.used = used;
        self
    }
}

impl CappedPool for SlotPool {
    fn used(&self) -> u8 {
        self.used
    }

    fn max(&self) -> u8 {
        self.max
    }

    fn set_used(&mut self, used: u8) {
        self.used = used;
    }
}

/// Which named-pool map a key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    /// Class feature uses (`feature_uses`)
    Feature,
    /// Racial trait uses (`trait_uses`)
    Trait,
}

/// Fully qualified name of any pool on a character.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "camelCase")]
pub enum PoolKey {
    SpellSlot(u8),
    Feature(String),
    Trait(String),
}

impl PoolKey {
    /// Qualify an ability key with its pool kind.
    pub fn named(kind: PoolKind, key: impl Into<String>) -> Self {
        match kind {
            PoolKind::Feature => PoolKey::Feature(key.into()),
            PoolKind::Trait => PoolKey::Trait(key.into()),
        }
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKey::SpellSlot(level) => write!(f, "spell_slot:{level}"),
            PoolKey::Feature(key) => write!(f, "feature:{key}"),
            PoolKey::Trait(key) => write!(f, "trait:{key}"),
        }
    }
}

/// Reject pools that arrive with `used > max`.
pub fn validate_pool<P: CappedPool>(key: &PoolKey, pool: &P) -> Result<(), DomainError> {
    if pool.is_consistent() {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "{key} has used {} greater than max {}",
            pool.used(),
            pool.max()
        )))
    }
}

/// `used < max`
pub fn can_use<P: CappedPool>(pool: &P) -> bool {
    pool.used() < pool.max()
}

/// Spend one use.
pub fn use_pool<P: CappedPool>(key: &PoolKey, pool: &mut P) -> Result<(), DomainError> {
    validate_pool(key, pool)?;
    if !can_use(pool) {
        return Err(DomainError::pool_exhausted(key, pool.used(), pool.max()));
    }
    pool.set_used(pool.used() + 1);
    Ok(())
}

/// Give back one spent use (manual undo).
pub fn restore_pool<P: CappedPool>(key: &PoolKey, pool: &mut P) -> Result<(), DomainError> {
    validate_pool(key, pool)?;
    if pool.used() == 0 {
        return Err(DomainError::nothing_to_restore(key));
    }
    pool.set_used(pool.used() - 1);
    Ok(())
}

/// Reset spent uses to zero, returning how many were recovered.
pub fn replenish<P: CappedPool>(pool: &mut P) -> u8 {
    let recovered = pool.used();
    pool.set_used(0);
    recovered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn rage() -> PoolKey {
        PoolKey::Feature("rage".into())
    }

    #[test]
    fn use_increments_until_exhausted() {
        let mut pool = ResourcePool::short_rest(2);
        use_pool(&rage(), &mut pool).unwrap();
        use_pool(&rage(), &mut pool).unwrap();
        assert_eq!(pool.used, 2);
        assert!(!can_use(&pool));
        assert_eq!(
            use_pool(&rage(), &mut pool),
            Err(DomainError::pool_exhausted("feature:rage", 2, 2))
        );
        assert_eq!(pool.used, 2);
    }

    #[test]
    fn restore_at_zero_is_rejected() {
        let mut pool = ResourcePool::long_rest(3);
        assert!(matches!(
            restore_pool(&rage(), &mut pool),
            Err(DomainError::NothingToRestore { .. })
        ));
        assert_eq!(pool.used, 0);
    }

    #[test]
    fn inconsistent_pool_is_a_validation_error() {
        let mut pool = ResourcePool::long_rest(1).with_used(3);
        assert!(matches!(
            use_pool(&rage(), &mut pool),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            restore_pool(&rage(), &mut pool),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(pool.used, 3);
    }

    #[test]
    fn zero_max_pool_is_never_usable() {
        let mut slots = SlotPool::new(0);
        assert!(!can_use(&slots));
        assert!(use_pool(&PoolKey::SpellSlot(9), &mut slots).is_err());
    }

    #[test]
    fn random_use_restore_sequences_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let max = rng.gen_range(0..6u8);
            let mut pool = SlotPool::new(max);
            for _ in 0..100 {
                let key = PoolKey::SpellSlot(1);
                let _ = if rng.gen_bool(0.6) {
                    use_pool(&key, &mut pool)
                } else {
                    restore_pool(&key, &mut pool)
                };
                assert!(pool.used <= pool.max);
            }
        }
    }

    #[test]
    fn replenish_reports_recovered_amount() {
        let mut pool = ResourcePool::short_rest(4).with_used(3);
        assert_eq!(replenish(&mut pool), 3);
        assert_eq!(pool.used, 0);
        assert_eq!(pool.available(), 4);
    }

    #[test]
    fn cadence_flags() {
        assert!(ResourcePool::short_rest(1).resets_on_short_rest());
        assert!(ResourcePool::short_rest(1).resets_on_long_rest());
        assert!(!ResourcePool::long_rest(1).resets_on_short_rest());
        assert!(ResourcePool::long_rest(1).resets_on_long_rest());
        assert!(!ResourcePool::new(1, ResetCadence::None).resets_on_long_rest());
    }

    #[test]
    fn pool_deserializes_with_lowercase_cadence() {
        let pool: ResourcePool =
            serde_json::from_str(r#"{"used":1,"max":2,"resetsOn":"short"}"#).unwrap();
        assert_eq!(pool, ResourcePool::short_rest(2).with_used(1));
    }

    #[test]
    fn pool_key_display() {
        assert_eq!(PoolKey::SpellSlot(3).to_string(), "spell_slot:3");
        assert_eq!(PoolKey::named(PoolKind::Trait, "relentless").to_string(), "trait:relentless");
    }
}
