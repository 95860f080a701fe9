use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::components::*;
use super::drag_drop::slot_item;
use super::theme::UiTheme;
use crate::inventory::{Containers, MetadataLabels, PocketsView, tooltip_lines};

/// Spawn tooltip entity (singleton).
pub fn spawn_tooltip(mut commands: Commands, theme: Res<UiTheme>) {
    let colors = &theme.colors;

    commands.spawn((
        ItemTooltip,
        Text::new(""),
        TextFont {
            font_size: theme.font_size,
            ..default()
        },
        TextColor(Color::from(colors.text.clone())),
        Node {
            position_type: PositionType::Absolute,
            padding: UiRect::all(Val::Px(theme.tooltip.padding)),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BackgroundColor(Color::from(colors.bg_dark.clone())),
        BorderColor::all(Color::from(colors.border.clone())),
        Visibility::Hidden,
        Pickable::IGNORE,
        ZIndex(1000),
    ));
}

/// Follow the cursor while an occupied slot is hovered and nothing is dragged.
pub fn update_tooltip(
    mut tooltip_query: Query<(&mut Node, &mut Visibility, &mut Text), With<ItemTooltip>>,
    hovered: Res<HoveredSlot>,
    drag_state: Res<DragState>,
    pockets: Res<PocketsView>,
    containers: Res<Containers>,
    labels: Res<MetadataLabels>,
    window: Query<&Window, With<PrimaryWindow>>,
    theme: Res<UiTheme>,
) {
    let Ok((mut node, mut vis, mut text)) = tooltip_query.single_mut() else {
        return;
    };

    let item = hovered
        .slot
        .filter(|_| drag_state.dragging.is_none())
        .and_then(|(source, slot)| slot_item(source, slot, &pockets, &containers));
    let Some(item) = item else {
        *vis = Visibility::Hidden;
        return;
    };

    *vis = Visibility::Visible;
    let content = tooltip_lines(&item, &labels).join("\n");
    if text.0 != content {
        text.0 = content;
    }

    let Ok(window) = window.single() else {
        return;
    };
    if let Some(cursor_pos) = window.cursor_position() {
        let offset = theme.tooltip.offset;
        node.left = Val::Px(cursor_pos.x + offset);
        node.top = Val::Px(cursor_pos.y + offset);
    }
}
