//! Failures reported by the snapshot store and the broadcast sink.

use super::types::SnapshotVersion;

/// Snapshot store failures. Cloneable so mocks can hand them out repeatedly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepoError {
    /// No record to update.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Another writer committed first.
    #[error("{entity_type} {id} changed concurrently: expected version {expected}, found {actual}")]
    VersionConflict {
        entity_type: &'static str,
        id: String,
        expected: SnapshotVersion,
        actual: SnapshotVersion,
    },

    /// Backing store failure, tagged with the operation that hit it.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// e.g. registering an id twice
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn version_conflict(
        entity_type: &'static str,
        id: impl ToString,
        expected: SnapshotVersion,
        actual: SnapshotVersion,
    ) -> Self {
        Self::VersionConflict {
            entity_type,
            id: id.to_string(),
            expected,
            actual,
        }
    }

    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Errors from publishing to session participants.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BroadcastError {
    #[error("Session channel closed: {0}")]
    Closed(String),
    #[error("Broadcast unavailable: {0}")]
    Unavailable(String),
}
