pub mod client;
pub mod dispatch;
pub mod events;
pub mod request;

use bevy::prelude::*;

pub use client::*;
pub use dispatch::*;
pub use events::*;
pub use request::*;

use crate::sets::InventorySet;

pub struct BridgePlugin;

impl Plugin for BridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BridgeClient>()
            .init_resource::<BusyGate>()
            .add_message::<BridgeResponse>()
            .add_message::<NuiEvent>()
            .add_systems(
                Update,
                poll_pending_requests.in_set(InventorySet::Poll),
            );
    }
}
