//! Repository port traits for snapshot persistence.

use async_trait::async_trait;
use tablekeep_domain::{Character, CharacterId};

use super::error::RepoError;
use super::types::{SnapshotVersion, Versioned};

// =============================================================================
// Character Snapshots
// =============================================================================

/// Versioned storage for character snapshots.
///
/// `commit` is a compare-and-swap: it succeeds only when the stored version
/// still equals `expected_version`, and otherwise fails with
/// `RepoError::VersionConflict`. Implementations never fall back to
/// last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterSnapshotRepo: Send + Sync {
    async fn load(&self, id: CharacterId) -> Result<Option<Versioned<Character>>, RepoError>;

    /// Store the first snapshot of a character at version 1.
    async fn create(&self, snapshot: &Character) -> Result<Versioned<Character>, RepoError>;

    async fn commit(
        &self,
        expected_version: SnapshotVersion,
        snapshot: &Character,
    ) -> Result<Versioned<Character>, RepoError>;
}
