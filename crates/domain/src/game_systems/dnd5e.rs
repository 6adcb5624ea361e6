//! D&D 5th Edition derived statistics.
//!
//! Pure arithmetic: ability modifiers, the proficiency bracket table, final
//! scores, attack bonuses and armor class. No side effects, no failure modes.

use super::traits::CalculationEngine;
use crate::entities::{Character, Equipment};
use crate::value_objects::Ability;

/// Proficiency bonus by level bracket: (highest level in bracket, bonus).
const PROFICIENCY_BRACKETS: [(u8, i32); 5] = [(4, 2), (8, 3), (12, 4), (16, 5), (20, 6)];

/// Unarmored base AC.
const UNARMORED_AC: i32 = 10;

/// `floor((score - 10) / 2)`
///
/// Rust's `/` truncates toward zero, so floor division goes through
/// `div_euclid` (the divisor is positive).
pub fn ability_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

/// The canonical bracket table: 1-4 +2, 5-8 +3, 9-12 +4, 13-16 +5, 17-20 +6.
///
/// Levels below 1 fall in the first bracket, above 20 in the last.
pub fn proficiency_bonus(level: u8) -> i32 {
    PROFICIENCY_BRACKETS
        .iter()
        .find(|(ceiling, _)| level <= *ceiling)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(6)
}

/// Base score plus racial bonus. Not clamped to the 1-30 table, only to
/// the `i32` range.
pub fn final_ability_score(base: i32, racial_bonus: i32) -> i32 {
    base.saturating_add(racial_bonus)
}

/// `ability_modifier + (proficient ? proficiency_bonus(level) : 0)`
pub fn attack_bonus(ability_modifier: i32, proficient: bool, level: u8) -> i32 {
    if proficient {
        ability_modifier.saturating_add(proficiency_bonus(level))
    } else {
        ability_modifier
    }
}

/// D&D 5th Edition rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dnd5eSystem;

impl Dnd5eSystem {
    pub fn new() -> Self {
        Self
    }
}

impl CalculationEngine for Dnd5eSystem {
    fn system_id(&self) -> &str {
        "dnd5e"
    }

    fn ability_modifier(&self, score: i32) -> i32 {
        ability_modifier(score)
    }

    fn proficiency_bonus(&self, level: u8) -> i32 {
        proficiency_bonus(level)
    }

    fn final_ability_score(&self, base: i32, racial_bonus: i32) -> i32 {
        final_ability_score(base, racial_bonus)
    }

    fn attack_bonus(&self, ability_modifier: i32, proficient: bool, level: u8) -> i32 {
        attack_bonus(ability_modifier, proficient, level)
    }

    fn weapon_attack_bonus(&self, character: &Character, weapon: &Equipment, proficient: bool) -> i32 {
        let str_mod = self.character_modifier(character, Ability::Strength);
        let dex_mod = self.character_modifier(character, Ability::Dexterity);
        // Finesse lets the wielder pick the better stat; ranged weapons use DEX.
        let modifier = if weapon.properties.finesse {
            str_mod.max(dex_mod)
        } else if weapon.properties.ranged {
            dex_mod
        } else {
            str_mod
        };
        attack_bonus(modifier, proficient, character.level)
    }

    fn armor_class(&self, character: &Character) -> i32 {
        let dex_mod = self.character_modifier(character, Ability::Dexterity);

        let body_armor = character
            .equipped_items()
            .map(|item| &item.equipment)
            .filter(|e| e.is_armor())
            .find_map(|e| e.armor);

        let base_ac = match body_armor {
            Some(profile) => {
                let dex_bonus = match profile.max_dex_bonus {
                    Some(max) => dex_mod.min(max),
                    None => dex_mod,
                };
                profile.base_ac.saturating_add(dex_bonus)
            }
            None => UNARMORED_AC.saturating_add(dex_mod),
        };

        let shield_bonus: i32 = character
            .equipped_items()
            .map(|item| &item.equipment)
            .filter(|e| e.is_shield())
            .filter_map(|e| e.armor.map(|a| a.shield_bonus))
            .max()
            .unwrap_or(0);

        base_ac.saturating_add(shield_bonus)
    }

    fn spell_save_dc(&self, character: &Character, casting_ability: Ability) -> i32 {
        8 + self.spell_attack_bonus(character, casting_ability)
    }

    fn spell_attack_bonus(&self, character: &Character, casting_ability: Ability) -> i32 {
        self.character_modifier(character, casting_ability) + proficiency_bonus(character.level)
    }
}
