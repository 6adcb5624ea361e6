//! Engine operation errors.

use crate::infrastructure::ports::RepoError;
use tablekeep_domain::{CharacterId, DomainError, EquipmentId};

/// Errors that can occur while running a character transition.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Equipment {equipment_id} not in inventory of character {character_id}")]
    ItemNotInInventory {
        character_id: CharacterId,
        equipment_id: EquipmentId,
    },

    #[error("Gave up on character {character_id} after {attempts} conflicting commits")]
    ConflictRetriesExhausted {
        character_id: CharacterId,
        attempts: u32,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl EngineError {
    /// The requested ability is simply not tracked for this character.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Domain(err) if err.is_informational())
    }

    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untracked_ability_is_informational() {
        let err: EngineError = DomainError::untracked("wild_shape").into();
        assert!(err.is_informational());
        assert!(err.domain().is_some());

        let err: EngineError = DomainError::insufficient_funds(1250, 100).into();
        assert!(!err.is_informational());
        assert!(!EngineError::CharacterNotFound(CharacterId::new()).is_informational());
    }
}
