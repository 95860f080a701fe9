use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Deserializer};

use crate::bridge::{RefreshPayload, SetupPayload};
use crate::item::{Item, fill_percent, total_weight};

/// Snapshot of one container as pushed by the game client.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub slots: u32,
    #[serde(default)]
    pub max_weight: Option<f64>,
    #[serde(default, deserialize_with = "sparse_items")]
    pub items: Vec<Item>,
}

impl Container {
    pub fn item_at(&self, slot: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.slot == slot)
    }

    /// Replace the item at `item.slot`, appending when the slot is not listed.
    pub fn set_slot(&mut self, item: Item) {
        let item = if item.name.is_empty() {
            Item::placeholder(item.slot)
        } else {
            item
        };

        match self.items.iter_mut().find(|i| i.slot == item.slot) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub fn weight(&self) -> f64 {
        total_weight(&self.items)
    }

    pub fn fill_percent(&self) -> f64 {
        fill_percent(self.weight(), self.max_weight)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemList {
    List(Vec<Option<Item>>),
    Keyed(BTreeMap<String, Item>),
}

/// Items arrive either as a list with `null` holes or keyed by slot.
fn sparse_items<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ItemList::deserialize(deserializer)? {
        ItemList::List(items) => items.into_iter().flatten().collect(),
        ItemList::Keyed(items) => items.into_values().collect(),
    })
}

/// The player's container (left) and the secondary container (right).
#[derive(Resource, Default, Debug)]
pub struct Containers {
    left: Option<Container>,
    right: Option<Container>,
    version: u64,
}

impl Containers {
    pub fn left(&self) -> Option<&Container> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&Container> {
        self.right.as_ref()
    }

    /// Container shown in the right-hand panel: the secondary one, or the
    /// player's own when nothing else is open.
    pub fn displayed_right(&self) -> Option<&Container> {
        self.right.as_ref().or(self.left.as_ref())
    }

    /// Bumped on every authoritative change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace each side present in the payload.
    pub fn setup(&mut self, payload: SetupPayload) {
        if let Some(left) = payload.left_inventory {
            self.left = Some(left);
        }
        if let Some(right) = payload.right_inventory {
            self.right = Some(right);
        }
        self.version += 1;
    }

    /// Merge slot updates. Returns how many updates found their container.
    pub fn refresh(&mut self, payload: RefreshPayload) -> usize {
        let mut applied = 0;
        for update in payload.items {
            match self.target_mut(update.inventory.as_deref()) {
                Some(container) => {
                    container.set_slot(update.item);
                    applied += 1;
                }
                None => warn!(
                    "slot update for unknown inventory {:?} dropped",
                    update.inventory
                ),
            }
        }

        if let Some(weight) = payload.weight_data {
            match self.target_mut(Some(&weight.inventory_id)) {
                Some(container) => container.max_weight = Some(weight.max_weight),
                None => warn!("weight update for unknown inventory `{}`", weight.inventory_id),
            }
        }

        self.version += 1;
        applied
    }

    fn target_mut(&mut self, inventory: Option<&str>) -> Option<&mut Container> {
        let Some(id) = inventory else {
            return self.left.as_mut();
        };

        if self.left.as_ref().is_some_and(|c| c.id == id) {
            self.left.as_mut()
        } else if self.right.as_ref().is_some_and(|c| c.id == id) {
            self.right.as_mut()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{SlotUpdate, WeightData};
    use serde_json::json;

    fn container(id: &str, items: Vec<Item>) -> Container {
        Container {
            id: id.into(),
            kind: "player".into(),
            slots: 20,
            max_weight: Some(30000.0),
            items,
            ..Default::default()
        }
    }

    fn update(item: Item, inventory: Option<&str>) -> SlotUpdate {
        SlotUpdate {
            item,
            inventory: inventory.map(Into::into),
        }
    }

    #[test]
    fn container_accepts_sparse_and_keyed_items() {
        let list: Container = serde_json::from_value(json!({
            "id": "player",
            "items": [null, { "name": "bread", "slot": 2, "count": 1 }]
        }))
        .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.item_at(2).unwrap().name, "bread");

        let keyed: Container = serde_json::from_value(json!({
            "id": "trunk:42",
            "type": "trunk",
            "items": { "1": { "name": "ammo", "slot": 1, "count": 30 } }
        }))
        .unwrap();
        assert_eq!(keyed.kind, "trunk");
        assert_eq!(keyed.item_at(1).unwrap().count, 30);
    }

    #[test]
    fn setup_keeps_side_missing_from_payload() {
        let mut containers = Containers::default();
        containers.setup(SetupPayload {
            left_inventory: Some(container("player", vec![])),
            right_inventory: Some(container("trunk:1", vec![])),
        });
        containers.setup(SetupPayload {
            left_inventory: Some(container("player", vec![Item::new("bread", 1, 1)])),
            right_inventory: None,
        });

        assert_eq!(containers.left().unwrap().items.len(), 1);
        assert_eq!(containers.right().unwrap().id, "trunk:1");
        assert_eq!(containers.version(), 2);
    }

    #[test]
    fn displayed_right_falls_back_to_player() {
        let mut containers = Containers::default();
        assert!(containers.displayed_right().is_none());

        containers.setup(SetupPayload {
            left_inventory: Some(container("player", vec![])),
            right_inventory: None,
        });
        assert_eq!(containers.displayed_right().unwrap().id, "player");
    }

    #[test]
    fn refresh_replaces_slot_and_routes_by_inventory() {
        let mut containers = Containers::default();
        containers.setup(SetupPayload {
            left_inventory: Some(container("player", vec![Item::new("bread", 1, 2)])),
            right_inventory: Some(container("trunk:1", vec![])),
        });

        let applied = containers.refresh(RefreshPayload {
            items: vec![
                update(Item::new("bread", 1, 1), None),
                update(Item::new("ammo", 5, 30), Some("trunk:1")),
                update(Item::new("water", 2, 1), Some("glovebox:9")),
            ],
            weight_data: Some(WeightData {
                inventory_id: "trunk:1".into(),
                max_weight: 50000.0,
            }),
        });

        assert_eq!(applied, 2);
        let left = containers.left().unwrap();
        assert_eq!(left.items.len(), 1);
        assert_eq!(left.item_at(1).unwrap().count, 1);
        let right = containers.right().unwrap();
        assert_eq!(right.item_at(5).unwrap().name, "ammo");
        assert_eq!(right.max_weight, Some(50000.0));
    }

    #[test]
    fn refresh_with_nameless_item_clears_slot() {
        let mut containers = Containers::default();
        containers.setup(SetupPayload {
            left_inventory: Some(container("player", vec![Item::new("bread", 3, 2)])),
            right_inventory: None,
        });

        containers.refresh(RefreshPayload {
            items: vec![update(Item::placeholder(3), Some("player"))],
            weight_data: None,
        });

        let slot = containers.left().unwrap().item_at(3).unwrap();
        assert!(slot.is_empty());
        assert_eq!(*slot, Item::placeholder(3));
    }
}
