use bevy::picking::prelude::*;
use bevy::prelude::*;

use super::components::*;
use super::drag_drop::*;
use super::theme::{UiTheme, hex_color};
use crate::bridge::{ActionDispatcher, BridgeRequest, RequestPurpose};
use crate::inventory::{Containers, InventoryScreenState, POCKET_SLOTS, STORAGE_SLOTS};
use crate::registry::EquipmentRegistry;

/// Spawn the three-column inventory screen (hidden by default).
pub fn spawn_inventory_screen(
    mut commands: Commands,
    theme: Res<UiTheme>,
    registry: Res<EquipmentRegistry>,
) {
    let config = &theme.inventory_screen;
    let colors = &theme.colors;

    commands
        .spawn((
            InventoryScreen,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(config.padding)),
                column_gap: Val::Px(config.column_gap),
                ..default()
            },
            Visibility::Hidden,
            Pickable::IGNORE,
        ))
        .with_children(|screen| {
            // Left column: Equipment
            let eq = &config.equipment;
            screen
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(eq.gap),
                        ..default()
                    },
                    BackgroundColor(Color::from(colors.bg_dark.clone())),
                    Pickable::IGNORE,
                ))
                .with_children(|column| {
                    column.spawn(header_text("EQUIPMENT", &theme));

                    for def in registry.categories() {
                        let caption = match &def.key_bind {
                            Some(key) => format!("{} ({key})", def.label),
                            None => def.label.clone(),
                        };

                        column
                            .spawn((
                                EquipmentSlotNode {
                                    category: def.category,
                                },
                                Node {
                                    width: Val::Px(eq.slot_size * 3.0),
                                    height: Val::Px(eq.slot_size),
                                    border: UiRect::all(Val::Px(eq.border_width)),
                                    flex_direction: FlexDirection::Column,
                                    justify_content: JustifyContent::SpaceBetween,
                                    ..default()
                                },
                                BackgroundColor(Color::from(colors.bg_medium.clone())),
                                BorderColor::all(hex_color(&def.color)),
                                Pickable {
                                    should_block_lower: false,
                                    is_hoverable: true,
                                },
                            ))
                            .with_children(|slot| {
                                slot.spawn(slot_label(&theme));
                                slot.spawn((
                                    Text::new(caption),
                                    TextFont {
                                        font_size: theme.font_size * 0.8,
                                        ..default()
                                    },
                                    TextColor(Color::from(colors.text_dim.clone())),
                                    Pickable::IGNORE,
                                ));
                            })
                            .observe(on_equipment_drop)
                            .observe(on_equipment_drag_enter)
                            .observe(on_equipment_drag_leave)
                            .observe(on_equipment_secondary_click);
                    }
                });

            // Center column: Pockets
            let pockets = &config.pockets;
            let grid_width = grid_width(pockets.columns, pockets.slot_size, pockets.gap);
            screen
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(pockets.gap * 2.0),
                        ..default()
                    },
                    BackgroundColor(Color::from(colors.bg_dark.clone())),
                    Pickable::IGNORE,
                ))
                .with_children(|column| {
                    column
                        .spawn((
                            Node {
                                width: Val::Px(grid_width),
                                justify_content: JustifyContent::SpaceBetween,
                                ..default()
                            },
                            Pickable::IGNORE,
                        ))
                        .with_children(|header| {
                            header.spawn(header_text("POCKETS", &theme));
                            header.spawn((WeightLabel, header_text("", &theme)));
                        });

                    column
                        .spawn((
                            Node {
                                width: Val::Px(grid_width),
                                height: Val::Px(pockets.weight_bar_height),
                                ..default()
                            },
                            BackgroundColor(Color::from(colors.bg_medium.clone())),
                            Pickable::IGNORE,
                        ))
                        .with_children(|bar| {
                            bar.spawn((
                                WeightBarFill,
                                Node {
                                    width: Val::Percent(0.0),
                                    height: Val::Percent(100.0),
                                    ..default()
                                },
                                BackgroundColor(Color::from(colors.weight_bar.clone())),
                                Pickable::IGNORE,
                            ));
                        });

                    for band in [POCKET_SLOTS, STORAGE_SLOTS] {
                        column
                            .spawn(grid_node(pockets.columns, pockets.slot_size, pockets.gap))
                            .with_children(|grid| {
                                for slot in band {
                                    spawn_item_slot(grid, &theme, SlotSource::Pockets, slot, pockets.slot_size);
                                }
                            });
                    }
                });

            // Right column: secondary container
            let right = &config.right;
            screen
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(right.gap * 2.0),
                        ..default()
                    },
                    BackgroundColor(Color::from(colors.bg_dark.clone())),
                    Pickable::IGNORE,
                ))
                .with_children(|column| {
                    column.spawn((RightTitle, header_text("", &theme)));
                    column.spawn((
                        RightGrid::default(),
                        grid_node(right.columns, right.slot_size, right.gap),
                    ));
                });
        });
}

fn grid_width(columns: usize, slot_size: f32, gap: f32) -> f32 {
    columns as f32 * slot_size + columns.saturating_sub(1) as f32 * gap
}

fn grid_node(columns: usize, slot_size: f32, gap: f32) -> impl Bundle {
    (
        Node {
            width: Val::Px(grid_width(columns, slot_size, gap)),
            display: Display::Grid,
            grid_template_columns: vec![GridTrack::px(slot_size); columns],
            column_gap: Val::Px(gap),
            row_gap: Val::Px(gap),
            ..default()
        },
        Pickable::IGNORE,
    )
}

fn header_text(value: &str, theme: &UiTheme) -> impl Bundle {
    (
        Text::new(value),
        TextFont {
            font_size: theme.font_size,
            ..default()
        },
        TextColor(Color::from(theme.colors.text.clone())),
        Pickable::IGNORE,
    )
}

fn slot_label(theme: &UiTheme) -> impl Bundle {
    (
        SlotLabel,
        Text::new(""),
        TextFont {
            font_size: theme.font_size * 0.8,
            ..default()
        },
        TextColor(Color::from(theme.colors.text.clone())),
        Pickable::IGNORE,
    )
}

fn spawn_item_slot(
    parent: &mut ChildSpawnerCommands,
    theme: &UiTheme,
    source: SlotSource,
    slot: u32,
    slot_size: f32,
) {
    parent
        .spawn((
            ItemSlotNode { source, slot },
            Node {
                width: Val::Px(slot_size),
                height: Val::Px(slot_size),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::from(theme.colors.bg_medium.clone())),
            BorderColor::all(Color::from(theme.colors.border.clone())),
            Pickable {
                should_block_lower: false,
                is_hoverable: true,
            },
        ))
        .with_children(|slot| {
            slot.spawn(slot_label(theme));
        })
        .observe(on_item_drag_start)
        .observe(on_item_drag_end)
        .observe(on_item_secondary_click)
        .observe(on_item_hover)
        .observe(on_item_hover_end);
}

/// Number of slots the right-hand panel should show.
fn right_slot_count(containers: &Containers) -> u32 {
    containers.displayed_right().map_or(0, |c| {
        let highest = c.items.iter().map(|i| i.slot).max().unwrap_or(0);
        c.slots.max(highest)
    })
}

/// Rebuild the right-hand grid when the displayed container's size changes.
pub fn rebuild_right_grid(
    mut commands: Commands,
    containers: Res<Containers>,
    theme: Res<UiTheme>,
    mut grids: Query<(Entity, &mut RightGrid)>,
    mut titles: Query<&mut Text, With<RightTitle>>,
    slots: Query<(Entity, &ItemSlotNode)>,
) {
    if !containers.is_changed() {
        return;
    }

    let title = containers
        .displayed_right()
        .map(|c| c.label.clone().unwrap_or_else(|| c.id.clone()))
        .unwrap_or_default();
    for mut text in &mut titles {
        *text = Text::new(title.to_uppercase());
    }

    let wanted = right_slot_count(&containers);
    let slot_size = theme.inventory_screen.right.slot_size;
    for (grid, mut state) in &mut grids {
        if state.slots == wanted {
            continue;
        }
        state.slots = wanted;

        for (entity, node) in &slots {
            if node.source == SlotSource::Right {
                commands.entity(entity).despawn();
            }
        }
        commands.entity(grid).with_children(|parent| {
            for slot in 1..=wanted {
                spawn_item_slot(parent, &theme, SlotSource::Right, slot, slot_size);
            }
        });
    }
}

/// Escape closes the screen and tells the game client to release focus.
pub fn exit_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut screen: ResMut<InventoryScreenState>,
    mut dispatcher: ActionDispatcher,
) {
    if !screen.visible || !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    screen.visible = false;
    dispatcher.submit(BridgeRequest::Exit, RequestPurpose::Notify);
}
