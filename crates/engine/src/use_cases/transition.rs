//! Versioned read-modify-commit loop shared by every character use case.
//!
//! One call = one atomic transition: load the latest snapshot, run a pure
//! domain function on it, commit conditioned on the version that was read.
//! A version conflict re-reads and re-runs the domain function from scratch;
//! a domain error aborts without committing anything.

use std::sync::Arc;

use tablekeep_domain::{Character, CharacterEvent, CharacterId, SessionId};

use crate::infrastructure::ports::{
    BroadcastPort, CharacterBroadcast, CharacterSnapshotRepo, RepoError, Versioned,
};

use super::error::EngineError;

/// What a domain function hands back to the runner.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    pub snapshot: Character,
    pub output: T,
    pub event: CharacterEvent,
}

impl<T> Transition<T> {
    pub fn new(snapshot: Character, output: T, event: CharacterEvent) -> Self {
        Self {
            snapshot,
            output,
            event,
        }
    }
}

/// A committed transition: the stored snapshot plus the domain output.
#[derive(Debug, Clone)]
pub struct Committed<T> {
    pub snapshot: Versioned<Character>,
    pub output: T,
}

pub struct TransitionRunner {
    repo: Arc<dyn CharacterSnapshotRepo>,
    broadcast: Arc<dyn BroadcastPort>,
    max_commit_retries: u32,
}

impl TransitionRunner {
    pub fn new(
        repo: Arc<dyn CharacterSnapshotRepo>,
        broadcast: Arc<dyn BroadcastPort>,
        max_commit_retries: u32,
    ) -> Self {
        Self {
            repo,
            broadcast,
            max_commit_retries,
        }
    }

    pub fn repo(&self) -> &Arc<dyn CharacterSnapshotRepo> {
        &self.repo
    }

    /// Latest stored snapshot, or `CharacterNotFound`.
    pub async fn load(&self, character_id: CharacterId) -> Result<Versioned<Character>, EngineError> {
        self.repo
            .load(character_id)
            .await?
            .ok_or(EngineError::CharacterNotFound(character_id))
    }

    /// Run `transition` against the latest snapshot and commit the result.
    ///
    /// The closure may run more than once (once per conflicting commit), so
    /// it must not have side effects beyond drawing dice.
    pub async fn run<T, F>(
        &self,
        session: SessionId,
        character_id: CharacterId,
        mut transition: F,
    ) -> Result<Committed<T>, EngineError>
    where
        F: FnMut(&Character) -> Result<Transition<T>, EngineError>,
    {
        let mut conflicts = 0u32;
        loop {
            let current = self.load(character_id).await?;

            let Transition {
                snapshot,
                output,
                event,
            } = match transition(&current.value) {
                Ok(next) => next,
                Err(e) => {
                    if e.is_informational() {
                        tracing::debug!(character_id = %character_id, error = %e, "Transition skipped");
                    } else {
                        tracing::info!(character_id = %character_id, error = %e, "Transition rejected");
                    }
                    return Err(e);
                }
            };
            snapshot.validate()?;

            match self.repo.commit(current.version, &snapshot).await {
                Ok(committed) => {
                    tracing::info!(
                        character_id = %character_id,
                        version = committed.version,
                        event = event.kind(),
                        "Transition committed"
                    );
                    self.publish(session, &committed, event).await;
                    return Ok(Committed {
                        snapshot: committed,
                        output,
                    });
                }
                Err(RepoError::VersionConflict {
                    expected, actual, ..
                }) if conflicts < self.max_commit_retries => {
                    conflicts += 1;
                    tracing::warn!(
                        character_id = %character_id,
                        expected,
                        actual,
                        attempt = conflicts,
                        "Version conflict, re-running transition"
                    );
                }
                Err(RepoError::VersionConflict { .. }) => {
                    tracing::warn!(
                        character_id = %character_id,
                        attempts = conflicts + 1,
                        "Version conflict retries exhausted"
                    );
                    return Err(EngineError::ConflictRetriesExhausted {
                        character_id,
                        attempts: conflicts + 1,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn publish(&self, session: SessionId, committed: &Versioned<Character>, event: CharacterEvent) {
        let message = CharacterBroadcast {
            snapshot: committed.value.clone(),
            version: committed.version,
            event,
        };
        match self.broadcast.publish(session, message).await {
            Ok(delivered) => {
                tracing::debug!(session_id = %session, delivered, "Broadcast sent");
            }
            Err(e) => {
                // The commit stands; other participants resync on their next read.
                tracing::warn!(session_id = %session, error = %e, "Failed to broadcast transition");
            }
        }
    }
}
