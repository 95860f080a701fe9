use bevy::prelude::*;

use crate::bridge::BridgeRequest;
use crate::item::Item;
use crate::registry::EquipmentRegistry;

/// Currently selected item for the context menu.
#[derive(Resource, Default, Debug)]
pub struct ContextMenuState {
    pub item: Option<Item>,
}

impl ContextMenuState {
    pub fn close(&mut self) {
        self.item = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Equip,
    Unequip,
    Use,
    Drop,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Equip => "Equip",
            MenuAction::Unequip => "Unequip",
            MenuAction::Use => "Use",
            MenuAction::Drop => "Drop",
        }
    }

    pub fn request(self, item: &Item) -> BridgeRequest {
        match self {
            MenuAction::Equip => BridgeRequest::EquipItem {
                name: item.name.clone(),
                slot: item.slot,
            },
            MenuAction::Unequip => BridgeRequest::UnequipItem { slot: item.slot },
            MenuAction::Use => BridgeRequest::UseItem {
                name: item.name.clone(),
                slot: item.slot,
            },
            // always a single unit, whatever the stack size
            MenuAction::Drop => BridgeRequest::DropItem {
                name: item.name.clone(),
                slot: item.slot,
                count: 1,
            },
        }
    }
}

/// Menu entries for the selected item; `None` means no menu at all.
pub fn menu_actions(item: Option<&Item>, registry: &EquipmentRegistry) -> Option<[MenuAction; 3]> {
    let item = item.filter(|i| registry.is_equipment(&i.name))?;
    let toggle = if item.is_equipped() {
        MenuAction::Unequip
    } else {
        MenuAction::Equip
    };
    Some([toggle, MenuAction::Use, MenuAction::Drop])
}

/// Secondary click on an item slot.
#[derive(Message, Debug, Clone)]
pub struct OpenContextMenu {
    pub item: Item,
}

/// A context menu entry was clicked.
#[derive(Message, Debug, Clone, Copy)]
pub struct MenuActionChosen(pub MenuAction);
