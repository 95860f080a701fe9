use bevy::prelude::*;

use super::containers::Containers;
use super::context_menu::{ContextMenuState, MenuActionChosen, OpenContextMenu};
use super::equipment::{EquipmentDrop, EquipmentRemove, EquipmentSlots};
use super::pockets::{PocketsView, refresh_pockets_view};
use super::screen::{InventoryScreenState, MetadataLabels};
use super::systems::*;
use crate::registry::EquipmentRegistry;
use crate::sets::InventorySet;

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<EquipmentRegistry>() {
            app.insert_resource(EquipmentRegistry::load());
        }

        app.configure_sets(
            Update,
            (
                InventorySet::Inbound,
                InventorySet::Input,
                InventorySet::Poll,
                InventorySet::Apply,
                InventorySet::Sync,
            )
                .chain(),
        )
        .init_resource::<Containers>()
        .init_resource::<EquipmentSlots>()
        .init_resource::<PocketsView>()
        .init_resource::<ContextMenuState>()
        .init_resource::<InventoryScreenState>()
        .init_resource::<MetadataLabels>()
        .add_message::<EquipmentDrop>()
        .add_message::<EquipmentRemove>()
        .add_message::<OpenContextMenu>()
        .add_message::<MenuActionChosen>()
        .add_systems(Startup, load_player_equipment)
        .add_systems(Update, apply_nui_events.in_set(InventorySet::Inbound))
        .add_systems(
            Update,
            (
                handle_open_context_menu,
                handle_menu_actions,
                handle_equipment_drops,
                handle_equipment_removals,
            )
                .chain()
                .in_set(InventorySet::Input),
        )
        .add_systems(
            Update,
            apply_equipment_responses.in_set(InventorySet::Apply),
        )
        .add_systems(Update, refresh_pockets_view.in_set(InventorySet::Sync));
    }
}
