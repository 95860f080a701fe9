use std::collections::HashMap;

use bevy::prelude::*;

use serde_json::Value;

use crate::bridge::MetadataLabel;
use crate::item::{Item, item_weight};

/// Inventory screen visibility state.
#[derive(Resource, Default, Debug)]
pub struct InventoryScreenState {
    pub visible: bool,
}

/// Label overrides for item metadata keys.
#[derive(Resource, Default, Debug)]
pub struct MetadataLabels(HashMap<String, String>);

impl MetadataLabels {
    pub fn merge(&mut self, labels: impl IntoIterator<Item = MetadataLabel>) {
        for label in labels {
            self.0.insert(label.metadata, label.value);
        }
    }

    pub fn label_for(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Tooltip text for an item: name and count, total weight, then every
/// metadata entry that has a label, ordered by key.
pub fn tooltip_lines(item: &Item, labels: &MetadataLabels) -> Vec<String> {
    let mut lines = vec![format!("{} x{}", item.name, item.count)];

    let weight = item_weight(item);
    if weight > 0.0 {
        lines.push(format!("{}kg", weight / 1000.0));
    }

    if let Some(metadata) = &item.metadata {
        let mut keys: Vec<&String> = metadata.keys().collect();
        keys.sort();
        for key in keys {
            let Some(label) = labels.label_for(key) else {
                continue;
            };
            let value = match &metadata[key] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push(format!("{label}: {value}"));
        }
    }

    lines
}
