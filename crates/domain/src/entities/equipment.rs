//! Equipment catalog records and carried inventory.

use serde::{Deserialize, Serialize};

use crate::ids::EquipmentId;
use crate::value_objects::Currency;

/// Broad equipment grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Weapon,
    Armor,
    Shield,
    Gear,
    Tool,
    Consumable,
    /// Unknown category for forward compatibility
    #[serde(other)]
    Other,
}

/// Property flags. Every flag defaults to `false` when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentProperties {
    /// Wearing this imposes a penalty on Stealth checks
    pub stealth_disadvantage: bool,
    /// Weapon may use the better of STR and DEX
    pub finesse: bool,
    pub light: bool,
    pub heavy: bool,
    pub two_handed: bool,
    pub thrown: bool,
    pub ranged: bool,
}

/// Armor class contribution for armor and shields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorProfile {
    /// Base AC granted by body armor (ignored for shields)
    #[serde(default)]
    pub base_ac: i32,
    /// Cap on the DEX modifier; `None` = uncapped, `Some(0)` = no DEX
    #[serde(default)]
    pub max_dex_bonus: Option<i32>,
    /// Flat bonus granted by a shield
    #[serde(default)]
    pub shield_bonus: i32,
}

/// An equipment catalog entry.
///
/// Data-carrying struct with no invariants to protect; all fields are public.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub cost: Currency,
    #[serde(default)]
    pub weight: f32,
    pub category: EquipmentCategory,
    #[serde(default)]
    pub properties: EquipmentProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<ArmorProfile>,
}

impl Equipment {
    pub fn new(name: impl Into<String>, category: EquipmentCategory, cost: Currency) -> Self {
        Self {
            id: EquipmentId::new(),
            name: name.into(),
            cost,
            weight: 0.0,
            category,
            properties: EquipmentProperties::default(),
            armor: None,
        }
    }

    /// Body armor with the given base AC and DEX cap.
    pub fn armor(
        name: impl Into<String>,
        cost: Currency,
        base_ac: i32,
        max_dex_bonus: Option<i32>,
    ) -> Self {
        let mut item = Self::new(name, EquipmentCategory::Armor, cost);
        item.armor = Some(ArmorProfile {
            base_ac,
            max_dex_bonus,
            shield_bonus: 0,
        });
        item
    }

    pub fn with_properties(mut self, properties: EquipmentProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn is_armor(&self) -> bool {
        self.category == EquipmentCategory::Armor
    }

    pub fn is_shield(&self) -> bool {
        self.category == EquipmentCategory::Shield
    }

    /// Armor that hampers sneaking.
    pub fn imposes_stealth_penalty(&self) -> bool {
        self.is_armor() && self.properties.stealth_disadvantage
    }
}

/// An item a character carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub equipment: Equipment,
    #[serde(default)]
    pub equipped: bool,
}

impl InventoryItem {
    pub fn carried(equipment: Equipment) -> Self {
        Self {
            equipment,
            equipped: false,
        }
    }

    pub fn equipped(equipment: Equipment) -> Self {
        Self {
            equipment,
            equipped: true,
        }
    }
}
