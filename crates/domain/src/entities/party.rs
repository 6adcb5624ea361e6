//! Party members and check targets.

use serde::{Deserialize, Serialize};

use super::character::Character;

/// A player seat in a session, possibly without a resolved character yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyMember {
    pub player_id: String,
    pub display_name: String,
    #[serde(default)]
    pub character: Option<Character>,
}

impl PartyMember {
    pub fn new(player_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            display_name: display_name.into(),
            character: None,
        }
    }

    pub fn with_character(mut self, character: Character) -> Self {
        self.character = Some(character);
        self
    }
}

/// The subject of a contested check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Target {
    /// Another player character, scored from its snapshot
    PlayerCharacter { character: Box<Character> },
    /// A non-player character, scored by archetype lookup
    Npc { archetype: String },
}

impl Target {
    pub fn player(character: Character) -> Self {
        Target::PlayerCharacter {
            character: Box::new(character),
        }
    }

    pub fn npc(archetype: impl Into<String>) -> Self {
        Target::Npc {
            archetype: archetype.into(),
        }
    }

    /// Human-readable name for messages and logs.
    pub fn label(&self) -> &str {
        match self {
            Target::PlayerCharacter { character } => &character.name,
            Target::Npc { archetype } => archetype,
        }
    }
}
