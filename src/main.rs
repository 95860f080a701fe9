mod bridge;
mod inventory;
mod item;
mod registry;
mod sets;
mod ui;

#[cfg(test)]
mod test_helpers;

use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Inventory".into(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(bridge::BridgePlugin)
        .add_plugins(inventory::InventoryPlugin)
        .add_plugins(ui::GameUiPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
