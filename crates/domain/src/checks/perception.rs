//! Passive perception for non-player targets.

use std::collections::BTreeMap;

/// Passive perception used when an archetype is not in the table.
pub const DEFAULT_NPC_PASSIVE_PERCEPTION: i32 = 12;

/// Stock archetypes and their passive perception.
const STOCK_ARCHETYPES: &[(&str, i32)] = &[
    ("acolyte", 12),
    ("assassin", 13),
    ("bandit", 10),
    ("bandit_captain", 10),
    ("commoner", 10),
    ("cultist", 10),
    ("gladiator", 11),
    ("guard", 12),
    ("knight", 10),
    ("mage", 11),
    ("merchant", 11),
    ("noble", 12),
    ("priest", 13),
    ("scout", 15),
    ("spy", 16),
    ("thug", 10),
    ("veteran", 12),
];

/// Lookup table from archetype id to passive perception.
///
/// Ids are matched case-insensitively with spaces and dashes treated as
/// underscores ("Bandit Captain" == "bandit_captain").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcPerceptionTable {
    entries: BTreeMap<String, i32>,
    default_value: i32,
}

impl Default for NpcPerceptionTable {
    fn default() -> Self {
        Self::stock()
    }
}

impl NpcPerceptionTable {
    /// The stock SRD archetypes, defaulting to 12.
    pub fn stock() -> Self {
        Self {
            entries: STOCK_ARCHETYPES
                .iter()
                .map(|(id, value)| (id.to_string(), *value))
                .collect(),
            default_value: DEFAULT_NPC_PASSIVE_PERCEPTION,
        }
    }

    /// Add or replace an archetype.
    pub fn with_archetype(mut self, archetype: &str, passive_perception: i32) -> Self {
        self.entries.insert(normalize(archetype), passive_perception);
        self
    }

    /// Passive perception for `archetype`, or the default when unknown.
    pub fn lookup(&self, archetype: &str) -> i32 {
        self.entries
            .get(&normalize(archetype))
            .copied()
            .unwrap_or(self.default_value)
    }

    /// Whether `archetype` has its own table entry.
    pub fn is_known(&self, archetype: &str) -> bool {
        self.entries.contains_key(&normalize(archetype))
    }
}

fn normalize(archetype: &str) -> String {
    archetype
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_archetypes_use_table_values() {
        let table = NpcPerceptionTable::stock();
        assert_eq!(table.lookup("guard"), 12);
        assert_eq!(table.lookup("Spy"), 16);
        assert_eq!(table.lookup("Bandit Captain"), 10);
    }

    #[test]
    fn unknown_archetype_defaults_to_twelve() {
        let table = NpcPerceptionTable::stock();
        assert!(!table.is_known("beholder"));
        assert_eq!(table.lookup("beholder"), DEFAULT_NPC_PASSIVE_PERCEPTION);
    }

    #[test]
    fn custom_archetype_overrides() {
        let table = NpcPerceptionTable::stock().with_archetype("Watch Captain", 14);
        assert_eq!(table.lookup("watch-captain"), 14);
    }
}
