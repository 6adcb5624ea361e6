//! Character-related domain events

use serde::{Deserialize, Serialize};

use crate::checks::{CheckOutcome, CheckRoll};
use crate::ids::EquipmentId;
use crate::resources::{PoolChange, RestSummary};
use crate::value_objects::Currency;

/// What happened to a character in one committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CharacterEvent {
    // Resources
    PoolUsed { change: PoolChange },
    PoolRestored { change: PoolChange },
    Rested { summary: RestSummary },

    // Checks
    StealthEntered { roll: CheckRoll },
    StealthBroken,
    StealAttempted { outcome: CheckOutcome },
    ActionResolved {
        description: String,
        stealth_broken: bool,
    },

    // Shop
    ItemPurchased {
        equipment_id: EquipmentId,
        name: String,
        cost: Currency,
    },
    ItemRefunded {
        equipment_id: EquipmentId,
        name: String,
        cost: Currency,
    },
}

impl CharacterEvent {
    /// Short machine-readable name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CharacterEvent::PoolUsed { .. } => "pool_used",
            CharacterEvent::PoolRestored { .. } => "pool_restored",
            CharacterEvent::Rested { .. } => "rested",
            CharacterEvent::StealthEntered { .. } => "stealth_entered",
            CharacterEvent::StealthBroken => "stealth_broken",
            CharacterEvent::StealAttempted { .. } => "steal_attempted",
            CharacterEvent::ActionResolved { .. } => "action_resolved",
            CharacterEvent::ItemPurchased { .. } => "item_purchased",
            CharacterEvent::ItemRefunded { .. } => "item_refunded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::PoolAction;
    use crate::value_objects::PoolKey;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = CharacterEvent::PoolUsed {
            change: PoolChange {
                pool: PoolKey::Feature("rage".into()),
                action: PoolAction::Used,
                used: 1,
                max: 3,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "poolUsed");
        assert_eq!(json["change"]["used"], 1);
        assert_eq!(event.kind(), "pool_used");
    }

    #[test]
    fn unit_event_round_trips() {
        let json = serde_json::to_string(&CharacterEvent::StealthBroken).unwrap();
        let back: CharacterEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CharacterEvent::StealthBroken);
    }
}
