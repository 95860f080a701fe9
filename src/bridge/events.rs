use bevy::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::client::BridgeError;
use crate::inventory::Container;
use crate::item::Item;

/// Authoritative pushes from the game client.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum NuiEvent {
    SetInventoryVisible(bool),
    CloseInventory,
    SetupInventory(SetupPayload),
    RefreshSlots(RefreshPayload),
    DisplayMetadata(Vec<MetadataLabel>),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupPayload {
    #[serde(default)]
    pub left_inventory: Option<Container>,
    #[serde(default)]
    pub right_inventory: Option<Container>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    #[serde(default, deserialize_with = "one_or_many")]
    pub items: Vec<SlotUpdate>,
    #[serde(default)]
    pub weight_data: Option<WeightData>,
}

/// A single slot change; `inventory` names the target container, the
/// player's own container when absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlotUpdate {
    pub item: Item,
    #[serde(default)]
    pub inventory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightData {
    pub inventory_id: String,
    pub max_weight: f64,
}

/// Display label for an item metadata key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataLabel {
    pub metadata: String,
    pub value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

#[derive(Deserialize)]
struct Envelope {
    action: String,
    #[serde(default)]
    data: Value,
}

impl NuiEvent {
    /// Decode a `{ "action": ..., "data": ... }` push.
    ///
    /// Called by whatever transport delivers game-client pushes; it writes
    /// the decoded event with `MessageWriter<NuiEvent>`, which
    /// `apply_nui_events` consumes in `InventorySet::Inbound`.
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        let Envelope { action, data } = serde_json::from_str(json)?;
        let event = match action.as_str() {
            "setInventoryVisible" => NuiEvent::SetInventoryVisible(serde_json::from_value(data)?),
            "closeInventory" => NuiEvent::CloseInventory,
            "setupInventory" => NuiEvent::SetupInventory(serde_json::from_value(data)?),
            "refreshSlots" => NuiEvent::RefreshSlots(serde_json::from_value(data)?),
            "displayMetadata" => NuiEvent::DisplayMetadata(serde_json::from_value(data)?),
            _ => return Err(BridgeError::UnknownEvent(action)),
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_visibility_and_close() {
        assert_eq!(
            NuiEvent::from_json(r#"{"action":"setInventoryVisible","data":true}"#).unwrap(),
            NuiEvent::SetInventoryVisible(true)
        );
        assert_eq!(
            NuiEvent::from_json(r#"{"action":"closeInventory","data":false}"#).unwrap(),
            NuiEvent::CloseInventory
        );
        assert_eq!(
            NuiEvent::from_json(r#"{"action":"closeInventory"}"#).unwrap(),
            NuiEvent::CloseInventory
        );
    }

    #[test]
    fn decodes_setup_with_one_side() {
        let event = NuiEvent::from_json(
            r#"{"action":"setupInventory","data":{"leftInventory":{
                "id":"player","type":"player","slots":20,"maxWeight":30000,
                "items":[{"name":"bread","slot":1,"count":2,"weight":150}]
            }}}"#,
        )
        .unwrap();

        let NuiEvent::SetupInventory(setup) = event else {
            panic!("expected setup");
        };
        let left = setup.left_inventory.unwrap();
        assert_eq!(left.id, "player");
        assert_eq!(left.max_weight, Some(30000.0));
        assert_eq!(left.items[0].name, "bread");
        assert!(setup.right_inventory.is_none());
    }

    #[test]
    fn setup_tolerates_empty_metadata_list() {
        let event = NuiEvent::from_json(
            r#"{"action":"setupInventory","data":{"leftInventory":{
                "id":"player","slots":20,
                "items":[{"name":"bread","slot":1,"count":2,"metadata":[]},
                         {"name":"weapon_pistol","slot":2,"count":1,"metadata":{"equipped":true}}]
            }}}"#,
        )
        .unwrap();

        let NuiEvent::SetupInventory(setup) = event else {
            panic!("expected setup");
        };
        let left = setup.left_inventory.unwrap();
        assert_eq!(left.items[0].metadata, None);
        assert!(left.items[1].is_equipped());
    }

    #[test]
    fn refresh_accepts_single_update_or_list() {
        let single = NuiEvent::from_json(
            r#"{"action":"refreshSlots","data":{"items":{"item":{"name":"water","slot":3,"count":1}}}}"#,
        )
        .unwrap();
        let NuiEvent::RefreshSlots(single) = single else {
            panic!("expected refresh");
        };
        assert_eq!(single.items.len(), 1);
        assert_eq!(single.items[0].inventory, None);

        let many = NuiEvent::from_json(
            r#"{"action":"refreshSlots","data":{
                "items":[{"item":{"slot":1}},{"item":{"name":"ammo","slot":2,"count":30},"inventory":"trunk:42"}],
                "weightData":{"inventoryId":"player","maxWeight":40000}
            }}"#,
        )
        .unwrap();
        let NuiEvent::RefreshSlots(many) = many else {
            panic!("expected refresh");
        };
        assert_eq!(many.items.len(), 2);
        assert_eq!(many.items[1].inventory.as_deref(), Some("trunk:42"));
        assert_eq!(many.weight_data.unwrap().max_weight, 40000.0);
    }

    #[test]
    fn unknown_or_malformed_events_are_errors() {
        assert!(matches!(
            NuiEvent::from_json(r#"{"action":"openShop","data":{}}"#),
            Err(BridgeError::UnknownEvent(name)) if name == "openShop"
        ));
        assert!(matches!(
            NuiEvent::from_json(r#"{"action":"setInventoryVisible","data":"yes"}"#),
            Err(BridgeError::Decode(_))
        ));
    }
}
