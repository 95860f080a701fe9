use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use crate::bridge::{BridgeError, is_truthy};
use crate::item::Item;
use crate::registry::{EquipmentCategory, EquipmentRegistry};

/// Local equipment slot assignment.
///
/// Every wholesale replacement bumps the version; optimistic patches carry
/// the version they were issued against and are refused once it moved on.
#[derive(Resource, Debug, Default)]
pub struct EquipmentSlots {
    slots: HashMap<EquipmentCategory, Item>,
    version: u64,
}

impl EquipmentSlots {
    pub fn get(&self, category: EquipmentCategory) -> Option<&Item> {
        self.slots.get(&category)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn occupied(&self) -> usize {
        self.slots.len()
    }

    pub fn replace_all(&mut self, slots: HashMap<EquipmentCategory, Item>) {
        self.slots = slots;
        self.version += 1;
    }

    /// Apply a confirmed assignment. Returns `false` if the patch is stale.
    pub fn apply_assign(&mut self, category: EquipmentCategory, item: Item, version: u64) -> bool {
        if version != self.version {
            return false;
        }
        self.slots.insert(category, item);
        true
    }

    /// Apply a confirmed removal. Returns `false` if the patch is stale.
    pub fn apply_remove(&mut self, category: EquipmentCategory, version: u64) -> bool {
        if version != self.version {
            return false;
        }
        self.slots.remove(&category);
        true
    }
}

/// An item dragged onto an equipment slot.
#[derive(Message, Debug, Clone)]
pub struct EquipmentDrop {
    pub item: Item,
    pub category: EquipmentCategory,
}

/// Secondary click on an equipment slot.
#[derive(Message, Debug, Clone, Copy)]
pub struct EquipmentRemove {
    pub category: EquipmentCategory,
}

/// Shared by drop-target highlighting and request dispatch.
pub fn drop_accepted(
    accepts_input: bool,
    registry: &EquipmentRegistry,
    item_name: &str,
    category: EquipmentCategory,
) -> bool {
    accepts_input && registry.can_equip_in(item_name, category)
}

#[derive(Deserialize)]
struct EquipmentEntry {
    #[serde(default)]
    item: Option<Item>,
}

/// Decode a `getPlayerEquipment` result; a falsy result means nothing is equipped.
pub fn decode_equipment(value: &Value) -> Result<HashMap<EquipmentCategory, Item>, BridgeError> {
    if !is_truthy(value) {
        return Ok(HashMap::new());
    }

    let entries: HashMap<String, Option<EquipmentEntry>> =
        serde_json::from_value(value.clone())?;

    let mut slots = HashMap::new();
    for (name, entry) in entries {
        let Some(category) = EquipmentCategory::from_wire(&name) else {
            warn!("ignoring unknown equipment category `{name}`");
            continue;
        };
        if let Some(item) = entry.and_then(|e| e.item).filter(|i| !i.name.is_empty()) {
            slots.insert(category, item);
        }
    }
    Ok(slots)
}
