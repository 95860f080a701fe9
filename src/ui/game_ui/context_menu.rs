use bevy::picking::prelude::*;
use bevy::prelude::*;

use super::components::{ContextMenuRoot, MenuEntry};
use super::drag_drop::MenuAnchor;
use super::theme::UiTheme;
use crate::bridge::BusyGate;
use crate::inventory::{ContextMenuState, MenuActionChosen, menu_actions};
use crate::registry::EquipmentRegistry;

/// Rebuild the menu whenever the selection changes. Nothing is spawned for
/// a selection that has no equipment actions.
pub fn sync_context_menu(
    mut commands: Commands,
    menu: Res<ContextMenuState>,
    registry: Res<EquipmentRegistry>,
    anchor: Res<MenuAnchor>,
    theme: Res<UiTheme>,
    existing: Query<Entity, With<ContextMenuRoot>>,
) {
    if !menu.is_changed() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let Some(actions) = menu_actions(menu.item.as_ref(), &registry) else {
        return;
    };

    let config = &theme.context_menu;
    let colors = &theme.colors;
    commands
        .spawn((
            ContextMenuRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(anchor.0.x),
                top: Val::Px(anchor.0.y),
                width: Val::Px(config.width),
                padding: UiRect::all(Val::Px(config.padding)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::from(colors.menu_bg.clone())),
            BorderColor::all(Color::from(colors.border.clone())),
            GlobalZIndex(1000),
        ))
        .with_children(|parent| {
            for action in actions {
                parent
                    .spawn((
                        MenuEntry(action),
                        Node {
                            height: Val::Px(config.item_height),
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(Color::NONE),
                        Pickable {
                            should_block_lower: true,
                            is_hoverable: true,
                        },
                    ))
                    .with_children(|entry| {
                        entry.spawn((
                            Text::new(action.label()),
                            TextFont {
                                font_size: theme.font_size,
                                ..default()
                            },
                            TextColor(Color::from(colors.text.clone())),
                            Pickable::IGNORE,
                        ));
                    })
                    .observe(on_menu_entry_click)
                    .observe(on_menu_entry_over)
                    .observe(on_menu_entry_out);
            }
        });
}

fn on_menu_entry_click(
    click: On<Pointer<Click>>,
    entries: Query<&MenuEntry>,
    gate: Res<BusyGate>,
    mut chosen: MessageWriter<MenuActionChosen>,
) {
    if click.button != PointerButton::Primary || !gate.accepts_input() {
        return;
    }
    if let Ok(entry) = entries.get(click.event_target()) {
        chosen.write(MenuActionChosen(entry.0));
    }
}

fn on_menu_entry_over(
    over: On<Pointer<Over>>,
    mut entries: Query<&mut BackgroundColor, With<MenuEntry>>,
    theme: Res<UiTheme>,
) {
    if let Ok(mut bg) = entries.get_mut(over.event_target()) {
        *bg = BackgroundColor(Color::from(theme.colors.menu_hover.clone()));
    }
}

fn on_menu_entry_out(out: On<Pointer<Out>>, mut entries: Query<&mut BackgroundColor, With<MenuEntry>>) {
    if let Ok(mut bg) = entries.get_mut(out.event_target()) {
        *bg = BackgroundColor(Color::NONE);
    }
}
