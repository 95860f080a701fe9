//! Sync slot visuals with the backing inventory state.

use bevy::prelude::*;

use super::components::*;
use super::theme::UiTheme;
use crate::inventory::{Containers, EquipmentSlots, InventoryScreenState, PocketsView};
use crate::item::Item;

pub fn slot_background(theme: &UiTheme, occupied: bool) -> Color {
    if occupied {
        Color::from(theme.colors.occupied.clone())
    } else {
        Color::from(theme.colors.bg_medium.clone())
    }
}

fn slot_text(item: Option<&Item>) -> String {
    match item {
        Some(item) if !item.is_empty() => format!("{} x{}", item.name, item.count),
        _ => String::new(),
    }
}

fn set_label(
    children: Option<&Children>,
    text_query: &mut Query<&mut Text, With<SlotLabel>>,
    value: &str,
) {
    let Some(children) = children else {
        return;
    };
    let mut labels = text_query.iter_many_mut(children.iter());
    while let Some(mut text) = labels.fetch_next() {
        *text = Text::new(value);
    }
}

/// Show equipment occupants; also clears a leftover drop highlight when a drag ends.
pub fn sync_equipment_slots(
    equipment: Res<EquipmentSlots>,
    drag_state: Res<DragState>,
    theme: Res<UiTheme>,
    mut slot_query: Query<(&EquipmentSlotNode, &mut BackgroundColor, Option<&Children>)>,
    mut text_query: Query<&mut Text, With<SlotLabel>>,
) {
    if !equipment.is_changed() && !drag_state.is_changed() {
        return;
    }

    for (node, mut bg, children) in &mut slot_query {
        let occupant = equipment.get(node.category);
        *bg = BackgroundColor(slot_background(&theme, occupant.is_some()));
        let name = occupant.map(|i| i.name.as_str()).unwrap_or_default();
        set_label(children, &mut text_query, name);
    }
}

/// Show pockets and right-hand items.
pub fn sync_item_slots(
    pockets: Res<PocketsView>,
    containers: Res<Containers>,
    theme: Res<UiTheme>,
    mut slot_query: Query<(Ref<ItemSlotNode>, &mut BackgroundColor, Option<&Children>)>,
    mut text_query: Query<&mut Text, With<SlotLabel>>,
) {
    let refresh_all = pockets.is_changed() || containers.is_changed();

    for (node, mut bg, children) in &mut slot_query {
        if !refresh_all && !node.is_added() {
            continue;
        }

        let item = match node.source {
            SlotSource::Pockets => pockets.slot(node.slot),
            SlotSource::Right => containers
                .displayed_right()
                .and_then(|c| c.item_at(node.slot)),
        };
        let occupied = item.is_some_and(|i| !i.is_empty());
        *bg = BackgroundColor(slot_background(&theme, occupied));
        set_label(children, &mut text_query, &slot_text(item));
    }
}

/// Pockets header text and weight bar fill.
pub fn sync_weight(
    pockets: Res<PocketsView>,
    mut label_query: Query<&mut Text, With<WeightLabel>>,
    mut bar_query: Query<&mut Node, With<WeightBarFill>>,
) {
    if !pockets.is_changed() {
        return;
    }

    for mut text in &mut label_query {
        *text = Text::new(pockets.weight.header().unwrap_or_default());
    }
    for mut node in &mut bar_query {
        node.width = Val::Percent(pockets.weight.percent.clamp(0.0, 100.0) as f32);
    }
}

pub fn sync_screen_visibility(
    screen: Res<InventoryScreenState>,
    mut roots: Query<&mut Visibility, With<InventoryScreen>>,
) {
    if !screen.is_changed() {
        return;
    }

    for mut visibility in &mut roots {
        *visibility = if screen.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Hiding the screen drops drag, hover and menu state.
pub fn clear_transient_on_hide(
    screen: Res<InventoryScreenState>,
    mut drag_state: ResMut<DragState>,
    mut hovered: ResMut<HoveredSlot>,
    mut menu: ResMut<crate::inventory::ContextMenuState>,
) {
    if !screen.is_changed() || screen.visible {
        return;
    }

    drag_state.dragging = None;
    hovered.slot = None;
    if menu.item.is_some() {
        menu.close();
    }
}
