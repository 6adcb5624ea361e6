//! Buying and refunding equipment.

use std::sync::Arc;

use tablekeep_domain::{
    purchase, refund, Character, CharacterEvent, CharacterId, Currency, Equipment, EquipmentId,
    InventoryItem, SessionId,
};

use super::error::EngineError;
use super::transition::{Committed, Transition, TransitionRunner};

/// Result of a shop transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub item: Equipment,
    pub holdings: Currency,
}

pub struct ShopUseCases {
    runner: Arc<TransitionRunner>,
}

impl ShopUseCases {
    pub fn new(runner: Arc<TransitionRunner>) -> Self {
        Self { runner }
    }

    /// Pay for `equipment` and add it to the character's pack (not equipped).
    pub async fn purchase(
        &self,
        session: SessionId,
        character_id: CharacterId,
        equipment: &Equipment,
    ) -> Result<Committed<Receipt>, EngineError> {
        let committed = self
            .runner
            .run(session, character_id, |character| {
                let mut next = character.clone();
                next.currency = purchase(&character.currency, &equipment.cost)?;
                next.inventory.push(InventoryItem::carried(equipment.clone()));

                let event = CharacterEvent::ItemPurchased {
                    equipment_id: equipment.id,
                    name: equipment.name.clone(),
                    cost: equipment.cost,
                };
                let receipt = Receipt {
                    item: equipment.clone(),
                    holdings: next.currency,
                };
                Ok(Transition::new(next, receipt, event))
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            item = %equipment.name,
            cost = %equipment.cost,
            holdings = %committed.output.holdings,
            "Item purchased"
        );
        Ok(committed)
    }

    /// Remove an owned item and credit its listed cost.
    pub async fn refund(
        &self,
        session: SessionId,
        character_id: CharacterId,
        equipment_id: EquipmentId,
    ) -> Result<Committed<Receipt>, EngineError> {
        let committed = self
            .runner
            .run(session, character_id, |character| {
                let (mut next, item) = take_item(character, equipment_id)?;
                next.currency = refund(&character.currency, &item.cost)?;

                let event = CharacterEvent::ItemRefunded {
                    equipment_id,
                    name: item.name.clone(),
                    cost: item.cost,
                };
                let receipt = Receipt {
                    item,
                    holdings: next.currency,
                };
                Ok(Transition::new(next, receipt, event))
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            item = %committed.output.item.name,
            holdings = %committed.output.holdings,
            "Item refunded"
        );
        Ok(committed)
    }
}

fn take_item(
    character: &Character,
    equipment_id: EquipmentId,
) -> Result<(Character, Equipment), EngineError> {
    let position = character
        .inventory
        .iter()
        .position(|item| item.equipment.id == equipment_id)
        .ok_or(EngineError::ItemNotInInventory {
            character_id: character.id,
            equipment_id,
        })?;
    let mut next = character.clone();
    let removed = next.inventory.remove(position);
    Ok((next, removed.equipment))
}
