//! Short and long rests.

use std::sync::Arc;

use tablekeep_domain::{take_rest, CharacterEvent, CharacterId, RestSummary, RestType, SessionId};

use super::error::EngineError;
use super::transition::{Committed, Transition, TransitionRunner};

pub struct RestUseCases {
    runner: Arc<TransitionRunner>,
}

impl RestUseCases {
    pub fn new(runner: Arc<TransitionRunner>) -> Self {
        Self { runner }
    }

    pub async fn short_rest(
        &self,
        session: SessionId,
        character_id: CharacterId,
    ) -> Result<Committed<RestSummary>, EngineError> {
        self.take_rest(session, character_id, RestType::Short).await
    }

    pub async fn long_rest(
        &self,
        session: SessionId,
        character_id: CharacterId,
    ) -> Result<Committed<RestSummary>, EngineError> {
        self.take_rest(session, character_id, RestType::Long).await
    }

    /// Apply a rest trigger and broadcast what it restored.
    pub async fn take_rest(
        &self,
        session: SessionId,
        character_id: CharacterId,
        rest_type: RestType,
    ) -> Result<Committed<RestSummary>, EngineError> {
        let committed = self
            .runner
            .run(session, character_id, |character| {
                let (next, summary) = take_rest(character, rest_type);
                let event = CharacterEvent::Rested {
                    summary: summary.clone(),
                };
                Ok(Transition::new(next, summary, event))
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            rest_type = ?rest_type,
            restored = committed.output.restored.len(),
            recovered = committed.output.total_recovered(),
            "Rest completed"
        );
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{characters, Harness};
    use crate::use_cases::ResourceUseCases;
    use tablekeep_domain::{DomainError, PoolKey, PoolKind, ResourcePool};

    #[tokio::test]
    async fn short_rest_resets_only_short_pools() {
        let harness = Harness::new();
        let pc = harness.seed(characters::barbarian()).await.value;
        let resources = ResourceUseCases::new(harness.runner.clone());
        let rests = RestUseCases::new(harness.runner.clone());

        resources
            .use_ability(harness.session, pc.id, PoolKind::Feature, "rage")
            .await
            .unwrap();
        let committed = rests.short_rest(harness.session, pc.id).await.unwrap();

        assert_eq!(
            committed.output.restored_pool_keys(),
            vec![PoolKey::Feature("second_wind".into())]
        );
        let after = committed.snapshot.value;
        assert_eq!(after.feature_uses["second_wind"].used, 0);
        assert_eq!(after.feature_uses["rage"].used, 1);
    }

    #[tokio::test]
    async fn long_rest_resets_slots_and_pools() {
        let harness = Harness::new();
        let pc = harness.seed(characters::wizard()).await.value;
        let resources = ResourceUseCases::new(harness.runner.clone());
        let rests = RestUseCases::new(harness.runner.clone());

        resources.use_spell_slot(harness.session, pc.id, 1).await.unwrap();
        resources.use_spell_slot(harness.session, pc.id, 3).await.unwrap();
        resources
            .use_ability(harness.session, pc.id, PoolKind::Feature, "arcane_recovery")
            .await
            .unwrap();

        let mut handle = harness.subscribe();
        let committed = rests.long_rest(harness.session, pc.id).await.unwrap();
        assert_eq!(committed.output.total_recovered(), 3);
        assert!(committed.snapshot.value.spell_slots.values().all(|s| s.used == 0));

        let message = handle.recv().await.unwrap();
        assert!(matches!(message.event, CharacterEvent::Rested { .. }));
    }

    #[tokio::test]
    async fn exhausted_pool_recovers_after_short_rest() {
        let harness = Harness::new();
        let pc = tablekeep_domain::Character::new("Bryn", 2).with_pool(
            PoolKind::Feature,
            "action_surge",
            ResourcePool::short_rest(2).with_used(2),
        );
        harness.seed(pc.clone()).await;
        let resources = ResourceUseCases::new(harness.runner.clone());
        let rests = RestUseCases::new(harness.runner.clone());

        let err = resources
            .use_ability(harness.session, pc.id, PoolKind::Feature, "action_surge")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Domain(DomainError::PoolExhausted { .. })
        ));

        rests.take_rest(harness.session, pc.id, RestType::Short).await.unwrap();
        let used = resources
            .use_ability(harness.session, pc.id, PoolKind::Feature, "action_surge")
            .await
            .unwrap();
        assert_eq!(used.output.used, 1);
    }
}
