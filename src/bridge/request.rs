use serde_json::{Value, json};

use crate::registry::EquipmentCategory;

/// Outbound calls to the game client.
#[derive(Clone, Debug, PartialEq)]
pub enum BridgeRequest {
    GetPlayerEquipment,
    AssignToEquipmentSlot {
        item_name: String,
        equipment_type: EquipmentCategory,
        from_slot: u32,
    },
    RemoveFromEquipmentSlot {
        equipment_type: EquipmentCategory,
    },
    EquipItem {
        name: String,
        slot: u32,
    },
    UnequipItem {
        slot: u32,
    },
    UseItem {
        name: String,
        slot: u32,
    },
    DropItem {
        name: String,
        slot: u32,
        count: u32,
    },
    Exit,
}

impl BridgeRequest {
    pub fn action(&self) -> &'static str {
        match self {
            BridgeRequest::GetPlayerEquipment => "getPlayerEquipment",
            BridgeRequest::AssignToEquipmentSlot { .. } => "assignToEquipmentSlot",
            BridgeRequest::RemoveFromEquipmentSlot { .. } => "removeFromEquipmentSlot",
            BridgeRequest::EquipItem { .. } => "equipItem",
            BridgeRequest::UnequipItem { .. } => "unequipItem",
            BridgeRequest::UseItem { .. } => "useItem",
            BridgeRequest::DropItem { .. } => "dropItem",
            BridgeRequest::Exit => "exit",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            BridgeRequest::GetPlayerEquipment | BridgeRequest::Exit => Value::Null,
            BridgeRequest::AssignToEquipmentSlot {
                item_name,
                equipment_type,
                from_slot,
            } => json!({
                "itemName": item_name,
                "equipmentType": equipment_type.as_str(),
                "fromSlot": from_slot,
            }),
            BridgeRequest::RemoveFromEquipmentSlot { equipment_type } => json!({
                "equipmentType": equipment_type.as_str(),
            }),
            BridgeRequest::EquipItem { name, slot } | BridgeRequest::UseItem { name, slot } => {
                json!({ "name": name, "slot": slot })
            }
            BridgeRequest::UnequipItem { slot } => json!({ "slot": slot }),
            BridgeRequest::DropItem { name, slot, count } => {
                json!({ "name": name, "slot": slot, "count": count })
            }
        }
    }

    /// Requests that change authoritative state and therefore hold the busy gate.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, BridgeRequest::GetPlayerEquipment | BridgeRequest::Exit)
    }
}

/// Loose truthiness used by the game client for success results.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
