//! Application state and composition.

use std::sync::Arc;

use tablekeep_domain::{Character, CharacterId};

use crate::infrastructure::{
    broadcast::SessionBroadcaster,
    clock::{SeededRandom, SystemClock, SystemRandom},
    config::EngineConfig,
    memory::InMemorySnapshotStore,
    ports::{BroadcastPort, CharacterSnapshotRepo, ClockPort, RandomPort, Versioned},
};
use crate::use_cases::{
    CheckUseCases, EngineError, ResourceUseCases, RestUseCases, ShopUseCases, TransitionRunner,
};

/// Main application state.
///
/// Holds the snapshot port and all use cases. Cheap to share behind an `Arc`.
pub struct App {
    pub snapshots: Arc<dyn CharacterSnapshotRepo>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub resources: ResourceUseCases,
    pub rest: RestUseCases,
    pub checks: CheckUseCases,
    pub shop: ShopUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        config: &EngineConfig,
        snapshots: Arc<dyn CharacterSnapshotRepo>,
        broadcast: Arc<dyn BroadcastPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let runner = Arc::new(TransitionRunner::new(
            snapshots.clone(),
            broadcast,
            config.max_commit_retries,
        ));

        let use_cases = UseCases {
            resources: ResourceUseCases::new(runner.clone()),
            rest: RestUseCases::new(runner.clone()),
            checks: CheckUseCases::new(runner.clone(), random),
            shop: ShopUseCases::new(runner),
        };

        tracing::debug!(
            max_commit_retries = config.max_commit_retries,
            seeded = config.rng_seed.is_some(),
            "Engine wired"
        );

        Self {
            snapshots,
            use_cases,
        }
    }

    /// Wire the in-process adapters. The returned broadcaster hands out
    /// session subscriptions.
    pub fn in_memory(config: &EngineConfig) -> (Self, Arc<SessionBroadcaster>) {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let snapshots = Arc::new(InMemorySnapshotStore::new(clock));
        let broadcaster = Arc::new(SessionBroadcaster::new(config.broadcast_capacity));
        let app = Self::new(config, snapshots, broadcaster.clone(), random_port(config));
        (app, broadcaster)
    }

    /// Accept a freshly created character as version 1.
    pub async fn register_character(
        &self,
        character: &Character,
    ) -> Result<Versioned<Character>, EngineError> {
        character.validate()?;
        let stored = self.snapshots.create(character).await?;
        tracing::info!(character_id = %character.id, name = %character.name, "Character registered");
        Ok(stored)
    }

    /// Latest committed snapshot with its version.
    pub async fn character(&self, id: CharacterId) -> Result<Versioned<Character>, EngineError> {
        self.snapshots
            .load(id)
            .await?
            .ok_or(EngineError::CharacterNotFound(id))
    }
}

/// Seeded dice when a seed is configured, system randomness otherwise.
pub fn random_port(config: &EngineConfig) -> Arc<dyn RandomPort> {
    match config.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded dice");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(SystemRandom::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::characters;
    use tablekeep_domain::{
        CharacterEvent, Currency, DomainError, Equipment, EquipmentCategory, PoolKind, RestType,
        SessionId, SlotPool, Target,
    };

    fn seeded(seed: u64) -> EngineConfig {
        EngineConfig {
            rng_seed: Some(seed),
            ..EngineConfig::default()
        }
    }

    #[tokio::test]
    async fn session_round_trip_through_every_use_case() {
        let (app, broadcaster) = App::in_memory(&seeded(7));
        let session = SessionId::new();
        let mut handle = broadcaster.subscribe(session);

        let pc = characters::rogue().with_spell_slots(1, SlotPool::new(2));
        app.register_character(&pc).await.unwrap();

        app.use_cases
            .resources
            .use_spell_slot(session, pc.id, 1)
            .await
            .unwrap();
        app.use_cases
            .checks
            .enter_stealth(session, pc.id)
            .await
            .unwrap();
        app.use_cases
            .shop
            .purchase(
                session,
                pc.id,
                &Equipment::new("Rope", EquipmentCategory::Gear, Currency::gold(1)),
            )
            .await
            .unwrap();
        app.use_cases
            .rest
            .take_rest(session, pc.id, RestType::Long)
            .await
            .unwrap();

        let kinds: Vec<&str> = [
            handle.recv().await,
            handle.recv().await,
            handle.recv().await,
            handle.recv().await,
        ]
        .iter()
        .flatten()
        .map(|m| m.event.kind())
        .collect();
        assert_eq!(kinds, vec!["pool_used", "stealth_entered", "item_purchased", "rested"]);

        let current = app.character(pc.id).await.unwrap();
        assert_eq!(current.version, 5);
        assert_eq!(current.value.currency, Currency::gold(49));
        assert_eq!(current.value.spell_slots[&1].used, 0);
    }

    #[tokio::test]
    async fn seeded_engines_roll_identically() {
        let pc = characters::rogue();
        let mut totals = Vec::new();
        for _ in 0..2 {
            let (app, _) = App::in_memory(&seeded(42));
            app.register_character(&pc).await.unwrap();
            let committed = app
                .use_cases
                .checks
                .steal_attempt(SessionId::new(), pc.id, &Target::npc("guard"), "")
                .await
                .unwrap();
            totals.push(committed.output.total());
        }
        assert_eq!(totals[0], totals[1]);
    }

    #[tokio::test]
    async fn invalid_snapshot_is_rejected_on_registration() {
        let (app, _) = App::in_memory(&EngineConfig::default());
        let mut pc = characters::barbarian();
        if let Some(rage) = pc.feature_uses.get_mut("rage") {
            rage.used = 9;
        }
        let err = app.register_character(&pc).await.unwrap_err();
        assert!(matches!(err, EngineError::Domain(DomainError::Validation(_))));
        assert!(matches!(
            app.character(pc.id).await,
            Err(EngineError::CharacterNotFound(_))
        ));
    }

    #[tokio::test]
    async fn untracked_pool_surfaces_as_informational() {
        let (app, broadcaster) = App::in_memory(&EngineConfig::default());
        let session = SessionId::new();
        let mut handle = broadcaster.subscribe(session);
        let pc = characters::rogue();
        app.register_character(&pc).await.unwrap();

        let err = app
            .use_cases
            .resources
            .use_ability(session, pc.id, PoolKind::Trait, "darkvision")
            .await
            .unwrap_err();
        assert!(err.is_informational());
        assert!(handle.try_recv().is_none());

        // a later transition still broadcasts normally
        app.use_cases.checks.break_stealth(session, pc.id).await.unwrap();
        let message = handle.recv().await.unwrap();
        assert_eq!(message.event, CharacterEvent::StealthBroken);
    }
}
