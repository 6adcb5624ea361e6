//! Common test helpers: stock characters and a wired in-memory engine.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{characters, Harness};
//!
//! #[tokio::test]
//! async fn rage_is_spent() {
//!     let harness = Harness::new();
//!     let stored = harness.seed(characters::barbarian()).await;
//!     // ... test logic
//! }
//! ```

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tablekeep_domain::{Character, SessionId};

use crate::infrastructure::broadcast::{SessionBroadcaster, SessionHandle};
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::memory::InMemorySnapshotStore;
use crate::infrastructure::ports::{CharacterSnapshotRepo, Versioned};
use crate::use_cases::TransitionRunner;

// =============================================================================
// Stock Characters
// =============================================================================

pub mod characters {
    use tablekeep_domain::{
        Ability, Character, Currency, PoolKind, ResourcePool, Skill, SlotPool,
    };

    /// Level 5 barbarian with 3 rages (long rest) and a spent short-rest trait.
    pub fn barbarian() -> Character {
        Character::new("Korga", 5)
            .with_ability(Ability::Strength, 16)
            .with_racial_bonus(Ability::Strength, 2)
            .with_pool(PoolKind::Feature, "rage", ResourcePool::long_rest(3))
            .with_pool(
                PoolKind::Trait,
                "relentless_endurance",
                ResourcePool::long_rest(1),
            )
            .with_pool(
                PoolKind::Feature,
                "second_wind",
                ResourcePool::short_rest(1).with_used(1),
            )
    }

    /// Level 5 wizard with slots 4/3/2.
    pub fn wizard() -> Character {
        Character::new("Ansel", 5)
            .with_ability(Ability::Intelligence, 17)
            .with_spell_slots(1, SlotPool::new(4))
            .with_spell_slots(2, SlotPool::new(3))
            .with_spell_slots(3, SlotPool::new(2))
            .with_pool(PoolKind::Feature, "arcane_recovery", ResourcePool::long_rest(1))
    }

    /// DEX 14, Stealth-proficient, level 5, 50 gp.
    pub fn rogue() -> Character {
        Character::new("Nim", 5)
            .with_ability(Ability::Dexterity, 14)
            .with_proficiency(Skill::Stealth)
            .with_currency(Currency::gold(50))
    }
}

// =============================================================================
// Engine Harness
// =============================================================================

/// In-memory store + real session broadcaster, with one subscribed session.
pub struct Harness {
    pub store: Arc<InMemorySnapshotStore>,
    pub broadcaster: Arc<SessionBroadcaster>,
    pub runner: Arc<TransitionRunner>,
    pub session: SessionId,
}

impl Harness {
    pub fn new() -> Self {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let store = Arc::new(InMemorySnapshotStore::new(Arc::new(FixedClock(at))));
        let broadcaster = Arc::new(SessionBroadcaster::new(16));
        let runner = Arc::new(TransitionRunner::new(store.clone(), broadcaster.clone(), 3));
        Self {
            store,
            broadcaster,
            runner,
            session: SessionId::new(),
        }
    }

    pub fn subscribe(&self) -> SessionHandle {
        self.broadcaster.subscribe(self.session)
    }

    pub async fn seed(&self, character: Character) -> Versioned<Character> {
        self.store.create(&character).await.unwrap()
    }

    pub async fn current(&self, character: &Character) -> Versioned<Character> {
        self.store.load(character.id).await.unwrap().unwrap()
    }
}
