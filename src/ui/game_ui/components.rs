use bevy::prelude::*;

use crate::inventory::MenuAction;
use crate::item::Item;
use crate::registry::EquipmentCategory;

/// Which container an item slot shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotSource {
    /// Player container, projected through the pockets bands.
    Pockets,
    /// Right-hand panel (secondary container or the player's own).
    Right,
}

/// Item slot in the pockets or right-hand grid.
#[derive(Component, Debug)]
pub struct ItemSlotNode {
    pub source: SlotSource,
    pub slot: u32,
}

/// One of the six equipment slots.
#[derive(Component, Debug)]
pub struct EquipmentSlotNode {
    pub category: EquipmentCategory,
}

/// Information about an item being dragged.
#[derive(Clone, Debug)]
pub struct DragInfo {
    pub item: Item,
}

/// Global drag & drop state.
#[derive(Resource, Default, Debug)]
pub struct DragState {
    pub dragging: Option<DragInfo>,
}

/// Tracks which slot is currently hovered (tooltip source).
#[derive(Resource, Default, Debug)]
pub struct HoveredSlot {
    pub slot: Option<(SlotSource, u32)>,
}

/// Singleton tooltip node.
#[derive(Component)]
pub struct ItemTooltip;

/// Marker for inventory screen root (toggled visible/hidden).
#[derive(Component)]
pub struct InventoryScreen;

/// Marker for the count/name text label inside a slot.
#[derive(Component)]
pub struct SlotLabel;

/// Pockets header weight text.
#[derive(Component)]
pub struct WeightLabel;

/// Filled part of the pockets weight bar.
#[derive(Component)]
pub struct WeightBarFill;

/// Grid holding the right-hand panel slots; rebuilt when the slot count changes.
#[derive(Component, Default)]
pub struct RightGrid {
    pub slots: u32,
}

/// Header text of the right-hand panel.
#[derive(Component)]
pub struct RightTitle;

/// Root of the open context menu.
#[derive(Component)]
pub struct ContextMenuRoot;

/// A context menu entry.
#[derive(Component)]
pub struct MenuEntry(pub MenuAction);
