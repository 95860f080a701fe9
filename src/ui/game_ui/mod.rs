pub mod components;
pub mod context_menu;
pub mod drag_drop;
pub mod inventory;
pub mod slot_sync;
pub mod theme;
pub mod tooltip;

use bevy::prelude::*;

use crate::sets::InventorySet;

pub use components::*;
pub use drag_drop::MenuAnchor;
pub use theme::*;

pub struct GameUiPlugin;

impl Plugin for GameUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>()
            .init_resource::<HoveredSlot>()
            .init_resource::<MenuAnchor>()
            .insert_resource(UiTheme::load())
            .add_systems(
                Startup,
                (inventory::spawn_inventory_screen, tooltip::spawn_tooltip),
            )
            .add_systems(
                Update,
                inventory::exit_on_escape
                    .run_if(resource_exists::<ButtonInput<KeyCode>>)
                    .in_set(InventorySet::Input),
            )
            .add_systems(
                Update,
                (
                    slot_sync::clear_transient_on_hide,
                    inventory::rebuild_right_grid,
                    slot_sync::sync_screen_visibility,
                    slot_sync::sync_equipment_slots,
                    slot_sync::sync_item_slots,
                    slot_sync::sync_weight,
                    context_menu::sync_context_menu,
                    tooltip::update_tooltip,
                )
                    .chain()
                    .in_set(InventorySet::Sync),
            );
    }
}
