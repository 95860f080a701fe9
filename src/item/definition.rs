use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::bridge::is_truthy;

/// Free-form item metadata as pushed by the game client.
pub type ItemMetadata = Map<String, Value>;

/// An item occupying one slot of a container.
///
/// Items are only ever created from authoritative pushes (or mirrored from
/// them after a confirmed request); an empty slot is an item with no name
/// and a count of zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub name: String,
    pub slot: u32,
    #[serde(default)]
    pub count: u32,
    /// Unit weight in grams.
    #[serde(default)]
    pub weight: f64,
    #[serde(
        default,
        deserialize_with = "loose_metadata",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<ItemMetadata>,
}

/// The game client encodes an empty metadata table as `[]`.
fn loose_metadata<'de, D>(deserializer: D) -> Result<Option<ItemMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "expected metadata object, got {other}"
        ))),
    }
}

impl Item {
    pub fn new(name: impl Into<String>, slot: u32, count: u32) -> Self {
        Self {
            name: name.into(),
            slot,
            count,
            ..Default::default()
        }
    }

    /// Empty placeholder for a slot with no item.
    pub fn placeholder(slot: u32) -> Self {
        Self {
            slot,
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.to_owned(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() || self.count == 0
    }

    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    /// Whether the game client flagged this item as equipped.
    pub fn is_equipped(&self) -> bool {
        self.metadata_value("equipped").is_some_and(is_truthy)
    }
}
