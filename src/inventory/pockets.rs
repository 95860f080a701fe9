use std::ops::RangeInclusive;

use bevy::prelude::*;

use super::containers::{Container, Containers};
use crate::item::{Item, fill_percent, total_weight};

pub const POCKET_SLOTS: RangeInclusive<u32> = 1..=10;
pub const STORAGE_SLOTS: RangeInclusive<u32> = 11..=20;

/// Look up every slot index in `range`, filling gaps with placeholders.
pub fn slot_band(items: &[Item], range: RangeInclusive<u32>) -> Vec<Item> {
    range
        .map(|slot| {
            items
                .iter()
                .find(|i| i.slot == slot)
                .cloned()
                .unwrap_or_else(|| Item::placeholder(slot))
        })
        .collect()
}

/// Weight summary for the pockets header and weight bar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightView {
    pub weight: f64,
    pub max_weight: Option<f64>,
    pub percent: f64,
}

impl WeightView {
    pub fn of(container: Option<&Container>) -> Self {
        let Some(container) = container else {
            return Self::default();
        };
        let weight = total_weight(&container.items);
        Self {
            weight,
            max_weight: container.max_weight,
            percent: fill_percent(weight, container.max_weight),
        }
    }

    /// `"1.5/30kg"`, or `None` without a positive capacity.
    pub fn header(&self) -> Option<String> {
        self.max_weight
            .filter(|max| *max > 0.0)
            .map(|max| format!("{}/{}kg", self.weight / 1000.0, max / 1000.0))
    }
}

/// Fixed 10 + 10 projection of the player's container.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PocketsView {
    pub pockets: Vec<Item>,
    pub storage: Vec<Item>,
    pub weight: WeightView,
}

impl PocketsView {
    pub fn project(container: Option<&Container>) -> Self {
        let items = container.map(|c| c.items.as_slice()).unwrap_or_default();
        Self {
            pockets: slot_band(items, POCKET_SLOTS),
            storage: slot_band(items, STORAGE_SLOTS),
            weight: WeightView::of(container),
        }
    }

    pub fn slot(&self, slot: u32) -> Option<&Item> {
        self.pockets.iter().chain(&self.storage).find(|i| i.slot == slot)
    }
}

impl Default for PocketsView {
    fn default() -> Self {
        Self::project(None)
    }
}

/// Recompute the projection whenever the containers change.
pub fn refresh_pockets_view(containers: Res<Containers>, mut view: ResMut<PocketsView>) {
    if !containers.is_changed() {
        return;
    }
    *view = PocketsView::project(containers.left());
}
