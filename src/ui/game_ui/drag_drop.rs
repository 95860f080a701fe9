//! Drag & drop and pointer input for inventory slots.
//!
//! Item slots (pockets and right-hand grid) are drag sources; equipment
//! slots are drop targets. Every observer checks the busy gate first, and
//! the drop-target highlight uses the same acceptance check as the request.

use bevy::picking::events::{DragDrop, DragEnd, DragEnter, DragLeave, DragStart};
use bevy::picking::prelude::*;
use bevy::prelude::*;

use super::components::*;
use super::theme::UiTheme;
use crate::bridge::BusyGate;
use crate::inventory::{
    Containers, EquipmentDrop, EquipmentRemove, EquipmentSlots, OpenContextMenu, PocketsView,
    drop_accepted,
};
use crate::item::Item;
use crate::registry::EquipmentRegistry;

/// Where the context menu opens.
#[derive(Resource, Default, Debug)]
pub struct MenuAnchor(pub Vec2);

/// Item currently shown in a slot, if any.
pub fn slot_item(
    source: SlotSource,
    slot: u32,
    pockets: &PocketsView,
    containers: &Containers,
) -> Option<Item> {
    let item = match source {
        SlotSource::Pockets => pockets.slot(slot),
        SlotSource::Right => containers.displayed_right().and_then(|c| c.item_at(slot)),
    };
    item.filter(|i| !i.is_empty()).cloned()
}

pub fn on_item_drag_start(
    start: On<Pointer<DragStart>>,
    slots: Query<&ItemSlotNode>,
    gate: Res<BusyGate>,
    pockets: Res<PocketsView>,
    containers: Res<Containers>,
    mut drag_state: ResMut<DragState>,
) {
    if !gate.accepts_input() {
        return;
    }
    let Ok(node) = slots.get(start.event_target()) else {
        return;
    };
    let Some(item) = slot_item(node.source, node.slot, &pockets, &containers) else {
        return; // Empty slot, don't start drag
    };

    drag_state.dragging = Some(DragInfo { item });
}

pub fn on_item_drag_end(_end: On<Pointer<DragEnd>>, mut drag_state: ResMut<DragState>) {
    drag_state.dragging = None;
}

pub fn on_item_secondary_click(
    click: On<Pointer<Click>>,
    slots: Query<&ItemSlotNode>,
    gate: Res<BusyGate>,
    pockets: Res<PocketsView>,
    containers: Res<Containers>,
    mut anchor: ResMut<MenuAnchor>,
    mut opens: MessageWriter<OpenContextMenu>,
) {
    if click.button != PointerButton::Secondary || !gate.accepts_input() {
        return;
    }
    let Ok(node) = slots.get(click.event_target()) else {
        return;
    };
    let Some(item) = slot_item(node.source, node.slot, &pockets, &containers) else {
        return;
    };

    anchor.0 = click.pointer_location.position;
    opens.write(OpenContextMenu { item });
}

pub fn on_item_hover(
    over: On<Pointer<Over>>,
    slots: Query<&ItemSlotNode>,
    mut hovered: ResMut<HoveredSlot>,
) {
    if let Ok(node) = slots.get(over.event_target()) {
        hovered.slot = Some((node.source, node.slot));
    }
}

pub fn on_item_hover_end(_out: On<Pointer<Out>>, mut hovered: ResMut<HoveredSlot>) {
    hovered.slot = None;
}

pub fn on_equipment_drop(
    drop: On<Pointer<DragDrop>>,
    slots: Query<&EquipmentSlotNode>,
    gate: Res<BusyGate>,
    drag_state: Res<DragState>,
    mut drops: MessageWriter<EquipmentDrop>,
) {
    if !gate.accepts_input() {
        return;
    }
    let Ok(node) = slots.get(drop.event_target()) else {
        return;
    };
    let Some(drag) = drag_state.dragging.as_ref() else {
        return;
    };

    drops.write(EquipmentDrop {
        item: drag.item.clone(),
        category: node.category,
    });
}

pub fn on_equipment_drag_enter(
    enter: On<Pointer<DragEnter>>,
    mut slots: Query<(&EquipmentSlotNode, &mut BackgroundColor)>,
    gate: Res<BusyGate>,
    drag_state: Res<DragState>,
    registry: Res<EquipmentRegistry>,
    theme: Res<UiTheme>,
) {
    let Ok((node, mut bg)) = slots.get_mut(enter.event_target()) else {
        return;
    };
    let Some(drag) = drag_state.dragging.as_ref() else {
        return;
    };

    if drop_accepted(gate.accepts_input(), &registry, &drag.item.name, node.category) {
        *bg = BackgroundColor(Color::from(theme.colors.drop_valid.clone()));
    }
}

pub fn on_equipment_drag_leave(
    leave: On<Pointer<DragLeave>>,
    mut slots: Query<(&EquipmentSlotNode, &mut BackgroundColor)>,
    equipment: Res<EquipmentSlots>,
    theme: Res<UiTheme>,
) {
    if let Ok((node, mut bg)) = slots.get_mut(leave.event_target()) {
        let occupied = equipment.get(node.category).is_some();
        *bg = BackgroundColor(super::slot_sync::slot_background(&theme, occupied));
    }
}

pub fn on_equipment_secondary_click(
    click: On<Pointer<Click>>,
    slots: Query<&EquipmentSlotNode>,
    gate: Res<BusyGate>,
    equipment: Res<EquipmentSlots>,
    mut removals: MessageWriter<EquipmentRemove>,
) {
    if click.button != PointerButton::Secondary || !gate.accepts_input() {
        return;
    }
    let Ok(node) = slots.get(click.event_target()) else {
        return;
    };

    if equipment.get(node.category).is_some() {
        removals.write(EquipmentRemove {
            category: node.category,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::SetupPayload;
    use crate::inventory::Container;

    #[test]
    fn slot_item_skips_placeholders() {
        let mut containers = Containers::default();
        containers.setup(SetupPayload {
            left_inventory: Some(Container {
                id: "player".into(),
                items: vec![Item::new("bread", 2, 1), Item::placeholder(3)],
                ..Default::default()
            }),
            right_inventory: None,
        });
        let pockets = PocketsView::project(containers.left());

        assert_eq!(
            slot_item(SlotSource::Pockets, 2, &pockets, &containers).map(|i| i.name),
            Some("bread".to_string())
        );
        assert!(slot_item(SlotSource::Pockets, 3, &pockets, &containers).is_none());
        assert!(slot_item(SlotSource::Pockets, 9, &pockets, &containers).is_none());
        // right panel falls back to the player's container
        assert!(slot_item(SlotSource::Right, 2, &pockets, &containers).is_some());
    }
}
