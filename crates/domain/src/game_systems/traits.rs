//! Game system traits for rules-specific derived statistics.
//!
//! The rest of the engine reaches derived numbers only through
//! `CalculationEngine`, so a different rule set can be swapped in without
//! touching pools, rests or checks.

use serde::{Deserialize, Serialize};

use crate::entities::{Character, Equipment};
use crate::value_objects::{Ability, Skill};

/// Calculation rules that vary per game system.
pub trait CalculationEngine: Send + Sync {
    /// Unique identifier for this rule set (e.g., "dnd5e").
    fn system_id(&self) -> &str;

    /// Calculate ability modifier from score.
    fn ability_modifier(&self, score: i32) -> i32;

    /// Calculate proficiency bonus from character level.
    fn proficiency_bonus(&self, level: u8) -> i32;

    /// Final score after racial bonuses.
    fn final_ability_score(&self, base: i32, racial_bonus: i32) -> i32 {
        base.saturating_add(racial_bonus)
    }

    /// Attack bonus from an ability modifier and proficiency.
    fn attack_bonus(&self, ability_modifier: i32, proficient: bool, level: u8) -> i32 {
        if proficient {
            ability_modifier.saturating_add(self.proficiency_bonus(level))
        } else {
            ability_modifier
        }
    }

    /// Modifier of a character's final score in one ability.
    fn character_modifier(&self, character: &Character, ability: Ability) -> i32 {
        self.ability_modifier(character.ability_score(ability))
    }

    /// Calculate skill check modifier (ability modifier + proficiency if trained).
    fn skill_modifier(&self, character: &Character, skill: Skill) -> i32 {
        let modifier = self.character_modifier(character, skill.ability());
        self.attack_bonus(modifier, character.is_proficient(skill), character.level)
    }

    /// Calculate saving throw modifier.
    fn saving_throw_modifier(&self, character: &Character, ability: Ability, proficient: bool) -> i32 {
        let modifier = self.character_modifier(character, ability);
        self.attack_bonus(modifier, proficient, character.level)
    }

    /// Attack bonus with a specific weapon.
    fn weapon_attack_bonus(&self, character: &Character, weapon: &Equipment, proficient: bool) -> i32;

    /// Calculate Armor Class from stats and equipped gear.
    fn armor_class(&self, character: &Character) -> i32;

    /// Calculate spell save DC for a casting ability.
    fn spell_save_dc(&self, character: &Character, casting_ability: Ability) -> i32;

    /// Calculate spell attack bonus for a casting ability.
    fn spell_attack_bonus(&self, character: &Character, casting_ability: Ability) -> i32;
}

/// Rest type for resource recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestType {
    /// Short rest (typically 1 hour)
    Short,
    /// Long rest (typically 8 hours)
    Long,
}

impl std::str::FromStr for RestType {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(RestType::Short),
            "long" => Ok(RestType::Long),
            other => Err(crate::error::DomainError::validation(format!(
                "Unknown rest type: {other}"
            ))),
        }
    }
}
