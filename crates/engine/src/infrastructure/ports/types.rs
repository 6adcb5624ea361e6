//! Helper types for port operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tablekeep_domain::{Character, CharacterEvent};

/// Monotonic snapshot version. The first stored version is 1.
pub type SnapshotVersion = u64;

// =============================================================================
// Versioned Snapshots
// =============================================================================

/// A stored value plus the version it was committed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versioned<T> {
    pub value: T,
    pub version: SnapshotVersion,
    pub updated_at: DateTime<Utc>,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: SnapshotVersion, updated_at: DateTime<Utc>) -> Self {
        Self {
            value,
            version,
            updated_at,
        }
    }
}

// =============================================================================
// Session Broadcast Types
// =============================================================================

/// What other session participants receive after a committed transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterBroadcast {
    pub snapshot: Character,
    pub version: SnapshotVersion,
    pub event: CharacterEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablekeep_domain::Character;

    #[test]
    fn broadcast_payload_is_camel_case_and_tagged() {
        let message = CharacterBroadcast {
            snapshot: Character::new("Nim", 5),
            version: 3,
            event: CharacterEvent::ActionResolved {
                description: "I shout a warning".into(),
                stealth_broken: true,
            },
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["version"], 3);
        assert_eq!(json["snapshot"]["stealthRoll"], 0);
        assert_eq!(json["event"]["type"], "actionResolved");
        assert_eq!(json["event"]["stealthBroken"], true);

        let back: CharacterBroadcast = serde_json::from_value(json).unwrap();
        assert_eq!(back, message);
    }
}
