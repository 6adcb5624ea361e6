//! Stealth and pilfering checks against live snapshots.

use std::sync::Arc;

use tablekeep_domain::{
    CharacterEvent, CharacterId, CheckOutcome, CheckResolver, CheckRoll, SessionId, Target,
};

use crate::infrastructure::ports::RandomPort;

use super::error::EngineError;
use super::transition::{Committed, Transition, TransitionRunner};

pub struct CheckUseCases {
    runner: Arc<TransitionRunner>,
    random: Arc<dyn RandomPort>,
    resolver: CheckResolver,
}

impl CheckUseCases {
    pub fn new(runner: Arc<TransitionRunner>, random: Arc<dyn RandomPort>) -> Self {
        Self::with_resolver(runner, random, CheckResolver::new())
    }

    pub fn with_resolver(
        runner: Arc<TransitionRunner>,
        random: Arc<dyn RandomPort>,
        resolver: CheckResolver,
    ) -> Self {
        Self {
            runner,
            random,
            resolver,
        }
    }

    pub fn resolver(&self) -> &CheckResolver {
        &self.resolver
    }

    /// Roll Stealth and record the total as the character's hiding score.
    pub async fn enter_stealth(
        &self,
        session: SessionId,
        character_id: CharacterId,
    ) -> Result<Committed<CheckRoll>, EngineError> {
        let mut rng = |min: i32, max: i32| self.random.gen_range(min, max);
        let committed = self
            .runner
            .run(session, character_id, |character| {
                let (next, roll) = self.resolver.enter_stealth(character, &mut rng);
                Ok(Transition::new(
                    next,
                    roll,
                    CharacterEvent::StealthEntered { roll },
                ))
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            total = committed.output.total,
            breakdown = %committed.output.breakdown(),
            "Stealth entered"
        );
        Ok(committed)
    }

    /// Drop out of hiding. Commits even if the character was not hidden.
    pub async fn break_stealth(
        &self,
        session: SessionId,
        character_id: CharacterId,
    ) -> Result<Committed<()>, EngineError> {
        self.runner
            .run(session, character_id, |character| {
                let next = self.resolver.break_stealth(character);
                Ok(Transition::new(next, (), CharacterEvent::StealthBroken))
            })
            .await
    }

    /// Sleight of Hand against the target's passive perception + 5.
    pub async fn steal_attempt(
        &self,
        session: SessionId,
        character_id: CharacterId,
        target: &Target,
        description: &str,
    ) -> Result<Committed<CheckOutcome>, EngineError> {
        let mut rng = |min: i32, max: i32| self.random.gen_range(min, max);
        let committed = self
            .runner
            .run(session, character_id, |character| {
                let (next, outcome) =
                    self.resolver
                        .steal_attempt(character, target, description, &mut rng);
                let event = CharacterEvent::StealAttempted {
                    outcome: outcome.clone(),
                };
                Ok(Transition::new(next, outcome, event))
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            target = target.label(),
            total = committed.output.total(),
            dc = committed.output.dc,
            success = committed.output.success,
            stealth_broken = committed.output.stealth_broken,
            "Steal attempt resolved"
        );
        Ok(committed)
    }

    /// Classify a free-text action and drop the character out of hiding if
    /// it gives them away. Output is whether stealth was broken.
    pub async fn resolve_action(
        &self,
        session: SessionId,
        character_id: CharacterId,
        description: &str,
    ) -> Result<Committed<bool>, EngineError> {
        self.runner
            .run(session, character_id, |character| {
                let (next, stealth_broken) = self.resolver.resolve_action(character, description);
                let event = CharacterEvent::ActionResolved {
                    description: description.to_string(),
                    stealth_broken,
                };
                Ok(Transition::new(next, stealth_broken, event))
            })
            .await
    }

    /// Read-only; never commits.
    pub async fn is_in_stealth(&self, character_id: CharacterId) -> Result<bool, EngineError> {
        let current = self.runner.load(character_id).await?;
        Ok(self.resolver.is_in_stealth(&current.value))
    }

    /// Passive perception of a PC snapshot or an NPC archetype.
    pub fn passive_perception(&self, target: &Target) -> i32 {
        self.resolver.passive_perception(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::MockRandomPort;
    use crate::test_fixtures::{characters, Harness};

    fn checks(harness: &Harness, face: i32) -> CheckUseCases {
        CheckUseCases::new(harness.runner.clone(), Arc::new(FixedRandom(face)))
    }

    #[tokio::test]
    async fn enter_stealth_records_total() {
        let harness = Harness::new();
        let pc = harness.seed(characters::rogue()).await.value;
        let checks = checks(&harness, 11);

        let committed = checks.enter_stealth(harness.session, pc.id).await.unwrap();
        assert_eq!(committed.output.total, 16);
        assert_eq!(committed.snapshot.value.stealth_roll, 16);
        assert!(checks.is_in_stealth(pc.id).await.unwrap());
    }

    #[tokio::test]
    async fn d20_is_drawn_from_the_random_port() {
        let harness = Harness::new();
        let pc = harness.seed(characters::rogue()).await.value;
        let mut random = MockRandomPort::new();
        random
            .expect_gen_range()
            .withf(|min, max| *min == 1 && *max == 20)
            .times(1)
            .returning(|_, _| 20);
        let checks = CheckUseCases::new(harness.runner.clone(), Arc::new(random));

        let committed = checks.enter_stealth(harness.session, pc.id).await.unwrap();
        assert_eq!(committed.output.d20, 20);
        assert_eq!(committed.output.total, 25);
    }

    #[tokio::test]
    async fn successful_steal_keeps_hiding() {
        let harness = Harness::new();
        let pc = harness.seed(characters::rogue()).await.value;
        let checks = checks(&harness, 16);
        checks.enter_stealth(harness.session, pc.id).await.unwrap();

        let mut handle = harness.subscribe();
        let committed = checks
            .steal_attempt(harness.session, pc.id, &Target::npc("guard"), "lift the purse")
            .await
            .unwrap();

        assert_eq!(committed.output.total(), 18);
        assert!(committed.output.success);
        assert!(!committed.output.stealth_broken);
        assert!(committed.snapshot.value.is_in_stealth());

        let message = handle.recv().await.unwrap();
        assert!(matches!(message.event, CharacterEvent::StealAttempted { .. }));
    }

    #[tokio::test]
    async fn failed_steal_breaks_hiding() {
        let harness = Harness::new();
        let pc = harness.seed(characters::rogue()).await.value;
        checks(&harness, 15)
            .enter_stealth(harness.session, pc.id)
            .await
            .unwrap();

        let committed = checks(&harness, 2)
            .steal_attempt(harness.session, pc.id, &Target::npc("spy"), "")
            .await
            .unwrap();

        assert!(!committed.output.success);
        assert!(committed.output.stealth_broken);
        assert_eq!(committed.snapshot.value.stealth_roll, 0);
    }

    #[tokio::test]
    async fn resolve_action_breaks_on_attack() {
        let harness = Harness::new();
        let pc = harness.seed(characters::rogue()).await.value;
        let checks = checks(&harness, 10);
        checks.enter_stealth(harness.session, pc.id).await.unwrap();

        let sneaking = checks
            .resolve_action(harness.session, pc.id, "I sneak along the wall")
            .await
            .unwrap();
        assert!(!sneaking.output);
        assert!(sneaking.snapshot.value.is_in_stealth());

        let attacking = checks
            .resolve_action(harness.session, pc.id, "I attack the sentry")
            .await
            .unwrap();
        assert!(attacking.output);
        assert!(!checks.is_in_stealth(pc.id).await.unwrap());
    }

    #[tokio::test]
    async fn break_stealth_clears_roll() {
        let harness = Harness::new();
        let pc = harness.seed(characters::rogue()).await.value;
        let checks = checks(&harness, 10);
        checks.enter_stealth(harness.session, pc.id).await.unwrap();

        let committed = checks.break_stealth(harness.session, pc.id).await.unwrap();
        assert_eq!(committed.snapshot.value.stealth_roll, 0);
    }

    #[tokio::test]
    async fn passive_perception_of_player_target() {
        let harness = Harness::new();
        let checks = checks(&harness, 10);
        let watcher = characters::wizard();
        assert_eq!(checks.passive_perception(&Target::player(watcher)), 10);
        assert_eq!(checks.passive_perception(&Target::npc("scout")), 15);
    }
}
