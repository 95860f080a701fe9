use bevy::prelude::*;

use super::containers::Containers;
use super::context_menu::{ContextMenuState, MenuActionChosen, OpenContextMenu, menu_actions};
use super::equipment::{
    EquipmentDrop, EquipmentRemove, EquipmentSlots, decode_equipment, drop_accepted,
};
use super::screen::{InventoryScreenState, MetadataLabels};
use crate::bridge::{
    ActionDispatcher, BridgeRequest, BridgeResponse, BridgeResult, BusyGate, NuiEvent,
    RequestPurpose, is_truthy,
};
use crate::item::Item;
use crate::registry::EquipmentRegistry;

/// Apply authoritative pushes from the game client.
pub fn apply_nui_events(
    mut events: MessageReader<NuiEvent>,
    mut containers: ResMut<Containers>,
    mut screen: ResMut<InventoryScreenState>,
    mut labels: ResMut<MetadataLabels>,
    mut menu: ResMut<ContextMenuState>,
) {
    for event in events.read() {
        match event {
            NuiEvent::SetInventoryVisible(visible) => screen.visible = *visible,
            NuiEvent::CloseInventory => {
                screen.visible = false;
                menu.close();
            }
            NuiEvent::SetupInventory(setup) => {
                containers.setup(setup.clone());
                screen.visible = true;
                info!("inventory set up (version {})", containers.version());
            }
            NuiEvent::RefreshSlots(refresh) => {
                let applied = containers.refresh(refresh.clone());
                debug!("refreshed {applied} slot(s)");
            }
            NuiEvent::DisplayMetadata(entries) => labels.merge(entries.iter().cloned()),
        }
    }
}

/// Fetch the authoritative equipment once the panel is mounted.
pub fn load_player_equipment(mut dispatcher: ActionDispatcher) {
    dispatcher.submit(BridgeRequest::GetPlayerEquipment, RequestPurpose::LoadEquipment);
}

pub fn handle_equipment_drops(
    mut drops: MessageReader<EquipmentDrop>,
    registry: Res<EquipmentRegistry>,
    slots: Res<EquipmentSlots>,
    mut dispatcher: ActionDispatcher,
) {
    for drop in drops.read() {
        let name = &drop.item.name;
        if !drop_accepted(dispatcher.accepts_input(), &registry, name, drop.category) {
            debug!("drop of `{name}` on {} refused", drop.category);
            continue;
        }

        dispatcher.submit(
            BridgeRequest::AssignToEquipmentSlot {
                item_name: name.clone(),
                equipment_type: drop.category,
                from_slot: drop.item.slot,
            },
            RequestPurpose::AssignEquipment {
                category: drop.category,
                item: Item::new(name.clone(), drop.item.slot, 1),
                version: slots.version(),
            },
        );
    }
}

pub fn handle_equipment_removals(
    mut removals: MessageReader<EquipmentRemove>,
    slots: Res<EquipmentSlots>,
    mut dispatcher: ActionDispatcher,
) {
    for removal in removals.read() {
        if !dispatcher.accepts_input() || slots.get(removal.category).is_none() {
            continue;
        }

        dispatcher.submit(
            BridgeRequest::RemoveFromEquipmentSlot {
                equipment_type: removal.category,
            },
            RequestPurpose::RemoveEquipment {
                category: removal.category,
                version: slots.version(),
            },
        );
    }
}

fn confirmed(result: &BridgeResult) -> bool {
    result.as_ref().is_ok_and(is_truthy)
}

/// Reconcile the slot store with finished equipment requests.
pub fn apply_equipment_responses(
    mut responses: MessageReader<BridgeResponse>,
    mut slots: ResMut<EquipmentSlots>,
    mut dispatcher: ActionDispatcher,
) {
    for response in responses.read() {
        let applied = match &response.purpose {
            RequestPurpose::LoadEquipment => {
                if let Ok(value) = &response.result {
                    match decode_equipment(value) {
                        Ok(equipment) => {
                            slots.replace_all(equipment);
                            info!("loaded {} equipped item(s)", slots.occupied());
                        }
                        Err(err) => warn!("malformed equipment response: {err}"),
                    }
                }
                continue;
            }
            RequestPurpose::AssignEquipment {
                category,
                item,
                version,
            } => {
                if !confirmed(&response.result) {
                    warn!("assigning `{}` to {category} was rejected", item.name);
                    continue;
                }
                slots.apply_assign(*category, item.clone(), *version)
            }
            RequestPurpose::RemoveEquipment { category, version } => {
                if !confirmed(&response.result) {
                    warn!("clearing {category} was rejected");
                    continue;
                }
                slots.apply_remove(*category, *version)
            }
            RequestPurpose::Notify => continue,
        };

        if !applied {
            debug!("equipment changed while request was in flight, re-syncing");
            dispatcher.submit(BridgeRequest::GetPlayerEquipment, RequestPurpose::LoadEquipment);
        }
    }
}

pub fn handle_open_context_menu(
    mut opens: MessageReader<OpenContextMenu>,
    mut menu: ResMut<ContextMenuState>,
    gate: Res<BusyGate>,
) {
    for open in opens.read() {
        if gate.accepts_input() {
            menu.item = Some(open.item.clone());
        }
    }
}

/// Send the chosen entry; the outcome arrives later as a slot refresh.
pub fn handle_menu_actions(
    mut chosen: MessageReader<MenuActionChosen>,
    mut menu: ResMut<ContextMenuState>,
    registry: Res<EquipmentRegistry>,
    mut dispatcher: ActionDispatcher,
) {
    for MenuActionChosen(action) in chosen.read() {
        let Some(item) = menu.item.clone() else {
            continue;
        };
        let offered = menu_actions(Some(&item), &registry).is_some_and(|a| a.contains(action));
        if !offered || !dispatcher.accepts_input() {
            continue;
        }

        if dispatcher.submit(action.request(&item), RequestPurpose::Notify) {
            menu.close();
        }
    }
}
