//! Spending and restoring tracked resources.

use std::collections::BTreeMap;
use std::sync::Arc;

use tablekeep_domain::{
    remaining_spell_slots, restore_ability, restore_spell_slot, use_ability, use_spell_slot,
    Character, CharacterEvent, CharacterId, PoolAction, PoolChange, PoolKind, SessionId,
};

use super::error::EngineError;
use super::transition::{Committed, Transition, TransitionRunner};

pub struct ResourceUseCases {
    runner: Arc<TransitionRunner>,
}

impl ResourceUseCases {
    pub fn new(runner: Arc<TransitionRunner>) -> Self {
        Self { runner }
    }

    /// Spend one use of a named feature or trait pool.
    pub async fn use_ability(
        &self,
        session: SessionId,
        character_id: CharacterId,
        kind: PoolKind,
        key: &str,
    ) -> Result<Committed<PoolChange>, EngineError> {
        self.runner
            .run(session, character_id, |character| {
                let (next, change) = use_ability(character, kind, key)?;
                Ok(pool_transition(next, change))
            })
            .await
    }

    /// Give back one spent use (manual undo).
    pub async fn restore_ability(
        &self,
        session: SessionId,
        character_id: CharacterId,
        kind: PoolKind,
        key: &str,
    ) -> Result<Committed<PoolChange>, EngineError> {
        self.runner
            .run(session, character_id, |character| {
                let (next, change) = restore_ability(character, kind, key)?;
                Ok(pool_transition(next, change))
            })
            .await
    }

    /// Expend one slot of `level`.
    pub async fn use_spell_slot(
        &self,
        session: SessionId,
        character_id: CharacterId,
        level: u8,
    ) -> Result<Committed<PoolChange>, EngineError> {
        self.runner
            .run(session, character_id, |character| {
                let (next, change) = use_spell_slot(character, level)?;
                Ok(pool_transition(next, change))
            })
            .await
    }

    /// Give back one slot of `level`.
    pub async fn restore_spell_slot(
        &self,
        session: SessionId,
        character_id: CharacterId,
        level: u8,
    ) -> Result<Committed<PoolChange>, EngineError> {
        self.runner
            .run(session, character_id, |character| {
                let (next, change) = restore_spell_slot(character, level)?;
                Ok(pool_transition(next, change))
            })
            .await
    }

    /// Unspent slots per spell level, read from the latest snapshot.
    pub async fn remaining_spell_slots(
        &self,
        character_id: CharacterId,
    ) -> Result<BTreeMap<u8, u8>, EngineError> {
        let current = self.runner.load(character_id).await?;
        Ok(remaining_spell_slots(&current.value))
    }
}

fn pool_transition(next: Character, change: PoolChange) -> Transition<PoolChange> {
    let event = match change.action {
        PoolAction::Used => CharacterEvent::PoolUsed {
            change: change.clone(),
        },
        PoolAction::Restored => CharacterEvent::PoolRestored {
            change: change.clone(),
        },
    };
    Transition::new(next, change, event)
}
