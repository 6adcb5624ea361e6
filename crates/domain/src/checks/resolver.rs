use crate::entities::{Character, Target};
use crate::game_systems::{CalculationEngine, Dnd5eSystem};
use crate::value_objects::{roll_d20, Ability, Skill};

use super::keywords::action_breaks_stealth;
use super::outcome::{CheckKind, CheckOutcome, CheckRoll};
use super::perception::NpcPerceptionTable;

/// Penalty applied when any equipped armor hampers stealth.
pub const ARMOR_STEALTH_PENALTY: i32 = -2;

/// Margin over passive perception a pilfer must reach to succeed.
pub const STEAL_MARGIN: i32 = 5;

/// Base of every passive score.
const PASSIVE_BASE: i32 = 10;

/// Contested stealth and pilfering checks.
///
/// Randomness is always injected as a `(min, max) -> value` closure so
/// that callers decide between seeded and system sources.
#[derive(Debug, Clone)]
pub struct CheckResolver<E: CalculationEngine = Dnd5eSystem> {
    engine: E,
    npc_table: NpcPerceptionTable,
}

impl Default for CheckResolver<Dnd5eSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckResolver<Dnd5eSystem> {
    pub fn new() -> Self {
        Self::with_engine(Dnd5eSystem::new())
    }
}

impl<E: CalculationEngine> CheckResolver<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            npc_table: NpcPerceptionTable::stock(),
        }
    }

    pub fn with_npc_table(mut self, npc_table: NpcPerceptionTable) -> Self {
        self.npc_table = npc_table;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Uniform `[1, 20]` from the injected source.
    pub fn roll_d20<R>(&self, rng: &mut R) -> i32
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        roll_d20(rng)
    }

    /// `d20 + DEX + proficiency (if Stealth-trained) + armor penalty`, floored at 1.
    pub fn stealth_check<R>(&self, character: &Character, rng: &mut R) -> CheckRoll
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        self.dexterity_check(CheckKind::Stealth, character, rng)
    }

    /// Same formula as [`Self::stealth_check`], gated on Sleight of Hand.
    pub fn sleight_of_hand_check<R>(&self, character: &Character, rng: &mut R) -> CheckRoll
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        self.dexterity_check(CheckKind::SleightOfHand, character, rng)
    }

    fn dexterity_check<R>(&self, kind: CheckKind, character: &Character, rng: &mut R) -> CheckRoll
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        let d20 = self.roll_d20(rng);
        let ability_modifier = self.engine.character_modifier(character, Ability::Dexterity);
        let proficiency_bonus = if character.is_proficient(kind.skill()) {
            self.engine.proficiency_bonus(character.level)
        } else {
            0
        };
        let equipment_penalty = equipment_penalty(character);
        let total = d20
            .saturating_add(ability_modifier)
            .saturating_add(proficiency_bonus)
            .saturating_add(equipment_penalty)
            .max(1);

        CheckRoll {
            kind,
            d20,
            ability_modifier,
            proficiency_bonus,
            equipment_penalty,
            total,
        }
    }

    /// PC: 10 + Perception modifier. NPC: archetype table.
    pub fn passive_perception(&self, target: &Target) -> i32 {
        match target {
            Target::PlayerCharacter { character } => {
                PASSIVE_BASE.saturating_add(self.engine.skill_modifier(character, Skill::Perception))
            }
            Target::Npc { archetype } => self.npc_table.lookup(archetype),
        }
    }

    /// Pilfer from a target. A failed or noticed attempt drops the stealer
    /// out of hiding in the returned snapshot.
    pub fn steal_attempt<R>(
        &self,
        stealer: &Character,
        target: &Target,
        description: &str,
        rng: &mut R,
    ) -> (Character, CheckOutcome)
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        let roll = self.sleight_of_hand_check(stealer, rng);
        let passive_perception = self.passive_perception(target);
        let dc = passive_perception.saturating_add(STEAL_MARGIN);
        let success = roll.total >= dc;
        let stealth_broken = roll.total < passive_perception || !success;

        let next = if stealth_broken {
            self.break_stealth(stealer)
        } else {
            stealer.clone()
        };

        let message = steal_message(stealer, target, description, &roll, success, stealth_broken);
        let outcome = CheckOutcome {
            roll,
            passive_perception,
            dc,
            success,
            stealth_broken,
            message,
        };
        (next, outcome)
    }

    /// Roll stealth and record the total as the hiding score.
    pub fn enter_stealth<R>(&self, character: &Character, rng: &mut R) -> (Character, CheckRoll)
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        let roll = self.stealth_check(character, rng);
        let mut next = character.clone();
        // total is floored at 1, so a hiding character is always > 0
        next.stealth_roll = roll.total.max(1).unsigned_abs();
        (next, roll)
    }

    /// Clear the hiding score.
    pub fn break_stealth(&self, character: &Character) -> Character {
        let mut next = character.clone();
        next.stealth_roll = 0;
        next
    }

    /// `stealth_roll > 0`
    pub fn is_in_stealth(&self, character: &Character) -> bool {
        character.is_in_stealth()
    }

    /// Apply a free-text action to a hiding character. Returns the new
    /// snapshot and whether stealth was broken by it.
    pub fn resolve_action(&self, character: &Character, description: &str) -> (Character, bool) {
        if character.is_in_stealth() && action_breaks_stealth(description) {
            (self.break_stealth(character), true)
        } else {
            (character.clone(), false)
        }
    }
}

fn equipment_penalty(character: &Character) -> i32 {
    if character
        .equipped_items()
        .any(|item| item.equipment.imposes_stealth_penalty())
    {
        ARMOR_STEALTH_PENALTY
    } else {
        0
    }
}

fn steal_message(
    stealer: &Character,
    target: &Target,
    description: &str,
    roll: &CheckRoll,
    success: bool,
    stealth_broken: bool,
) -> String {
    let attempt = if description.trim().is_empty() {
        format!("{} tries to pilfer from {}", stealer.name, target.label())
    } else {
        format!("{} tries to {}", stealer.name, description.trim())
    };
    let result = match (success, stealth_broken) {
        (true, false) => "and gets away with it unnoticed",
        (true, true) => "and succeeds, but is spotted",
        (false, _) => "and is caught in the act",
    };
    format!("{attempt} ({}) {result}.", roll.breakdown())
}
