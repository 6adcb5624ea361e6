//! In-memory snapshot store.
//!
//! Each character lives in one DashMap entry; `commit` checks and bumps the
//! version while holding that entry's shard lock, so two writers racing on
//! the same character cannot both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tablekeep_domain::{Character, CharacterId};

use crate::infrastructure::ports::{
    CharacterSnapshotRepo, ClockPort, RepoError, SnapshotVersion, Versioned,
};

const ENTITY: &str = "Character";

pub struct InMemorySnapshotStore {
    snapshots: DashMap<CharacterId, Versioned<Character>>,
    clock: Arc<dyn ClockPort>,
}

impl InMemorySnapshotStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            snapshots: DashMap::new(),
            clock,
        }
    }

    /// Number of registered characters.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[async_trait]
impl CharacterSnapshotRepo for InMemorySnapshotStore {
    async fn load(&self, id: CharacterId) -> Result<Option<Versioned<Character>>, RepoError> {
        Ok(self.snapshots.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, snapshot: &Character) -> Result<Versioned<Character>, RepoError> {
        match self.snapshots.entry(snapshot.id) {
            Entry::Occupied(_) => Err(RepoError::constraint(format!(
                "{ENTITY} {} already exists",
                snapshot.id
            ))),
            Entry::Vacant(slot) => {
                let stored = Versioned::new(snapshot.clone(), 1, self.clock.now());
                slot.insert(stored.clone());
                tracing::debug!(character_id = %snapshot.id, "Snapshot created");
                Ok(stored)
            }
        }
    }

    async fn commit(
        &self,
        expected_version: SnapshotVersion,
        snapshot: &Character,
    ) -> Result<Versioned<Character>, RepoError> {
        let mut entry = self
            .snapshots
            .get_mut(&snapshot.id)
            .ok_or_else(|| RepoError::not_found(ENTITY, snapshot.id))?;

        if entry.version != expected_version {
            return Err(RepoError::version_conflict(
                ENTITY,
                snapshot.id,
                expected_version,
                entry.version,
            ));
        }

        *entry = Versioned::new(snapshot.clone(), expected_version + 1, self.clock.now());
        Ok(entry.value().clone())
    }
}
