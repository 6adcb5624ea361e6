//! Check breakdowns and outcomes handed back to callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::Skill;

/// Which contested check was rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Stealth,
    SleightOfHand,
}

impl CheckKind {
    /// The skill whose proficiency gates the bonus.
    pub fn skill(&self) -> Skill {
        match self {
            CheckKind::Stealth => Skill::Stealth,
            CheckKind::SleightOfHand => Skill::SleightOfHand,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.skill().display_name())
    }
}

/// Every term that went into a check total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRoll {
    pub kind: CheckKind,
    pub d20: i32,
    pub ability_modifier: i32,
    pub proficiency_bonus: i32,
    pub equipment_penalty: i32,
    /// Sum of the terms, floored at 1
    pub total: i32,
}

impl CheckRoll {
    /// Everything added to the die: ability, proficiency and penalty.
    pub fn modifier(&self) -> i32 {
        self.ability_modifier + self.proficiency_bonus + self.equipment_penalty
    }

    /// e.g. "Stealth: d20(12) +2 DEX +3 prof -2 armor = 15"
    pub fn breakdown(&self) -> String {
        let mut parts = format!("{}: d20({})", self.kind, self.d20);
        parts.push_str(&format!(" {:+} DEX", self.ability_modifier));
        if self.proficiency_bonus != 0 {
            parts.push_str(&format!(" {:+} prof", self.proficiency_bonus));
        }
        if self.equipment_penalty != 0 {
            parts.push_str(&format!(" {:+} armor", self.equipment_penalty));
        }
        format!("{} = {}", parts, self.total)
    }
}

/// Result of a contested check against a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub roll: CheckRoll,
    pub passive_perception: i32,
    /// Total needed to succeed
    pub dc: i32,
    pub success: bool,
    pub stealth_broken: bool,
    pub message: String,
}

impl CheckOutcome {
    pub fn total(&self) -> i32 {
        self.roll.total
    }
}
