//! Action dispatch and the process-wide busy gate.
//!
//! Every call to the game client goes through [`ActionDispatcher`]. Calls
//! that mutate authoritative state take the [`BusyGate`] for as long as they
//! are in flight; while it is held no panel accepts pointer input and no
//! further mutation can be submitted. Results come back as
//! [`BridgeResponse`] messages once the polling system sees the task finish.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;

use super::client::{BridgeClient, BridgeResult};
use super::request::BridgeRequest;
use crate::item::Item;
use crate::registry::EquipmentCategory;

/// Set while a mutating request is in flight.
#[derive(Resource, Default, Debug)]
pub struct BusyGate {
    busy: bool,
}

impl BusyGate {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether panels may process pointer input right now.
    pub fn accepts_input(&self) -> bool {
        !self.busy
    }

    fn try_acquire(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    fn release(&mut self) {
        self.busy = false;
    }
}

/// What a response should be applied to once it arrives.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestPurpose {
    LoadEquipment,
    AssignEquipment {
        category: EquipmentCategory,
        item: Item,
        version: u64,
    },
    RemoveEquipment {
        category: EquipmentCategory,
        version: u64,
    },
    /// Fire-and-forget; state is reconciled by a later push.
    Notify,
}

/// An in-flight bridge call.
#[derive(Component)]
pub struct PendingRequest {
    task: Task<BridgeResult>,
    action: &'static str,
    purpose: RequestPurpose,
    holds_gate: bool,
}

/// A finished bridge call.
#[derive(Message, Debug)]
pub struct BridgeResponse {
    pub purpose: RequestPurpose,
    pub result: BridgeResult,
}

/// Issues bridge requests on behalf of panels.
#[derive(SystemParam)]
pub struct ActionDispatcher<'w, 's> {
    commands: Commands<'w, 's>,
    client: Res<'w, BridgeClient>,
    gate: ResMut<'w, BusyGate>,
}

impl ActionDispatcher<'_, '_> {
    pub fn accepts_input(&self) -> bool {
        self.gate.accepts_input()
    }

    /// Send a request. Mutating requests are refused (returning `false`)
    /// while another one holds the gate.
    pub fn submit(&mut self, request: BridgeRequest, purpose: RequestPurpose) -> bool {
        let holds_gate = request.is_mutating();
        if holds_gate && !self.gate.try_acquire() {
            debug!("bridge busy, refusing `{}`", request.action());
            return false;
        }

        let action = request.action();
        let payload = request.payload();
        debug!("bridge -> {action} {payload}");

        let call = self.client.call(action, payload);
        let task = IoTaskPool::get().spawn(call);
        self.commands.spawn(PendingRequest {
            task,
            action,
            purpose,
            holds_gate,
        });
        true
    }
}

/// Poll in-flight requests and emit responses for the finished ones.
pub fn poll_pending_requests(
    mut commands: Commands,
    mut pending: Query<(Entity, &mut PendingRequest)>,
    mut gate: ResMut<BusyGate>,
    mut responses: MessageWriter<BridgeResponse>,
) {
    for (entity, mut request) in &mut pending {
        let Some(result) = future::block_on(future::poll_once(&mut request.task)) else {
            continue;
        };

        match &result {
            Ok(value) => debug!("bridge <- {} {value}", request.action),
            Err(err) => warn!("bridge call `{}` failed: {err}", request.action),
        }

        if request.holds_gate {
            gate.release();
        }
        commands.entity(entity).despawn();
        responses.write(BridgeResponse {
            purpose: request.purpose.clone(),
            result,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use crate::test_helpers::fixtures::*;
    use serde_json::json;

    #[test]
    fn busy_gate_refuses_second_acquire() {
        let mut gate = BusyGate::default();

        assert!(gate.accepts_input());
        assert!(gate.try_acquire());
        assert!(gate.is_busy());
        assert!(!gate.try_acquire());

        gate.release();
        assert!(gate.accepts_input());
    }

    fn submit(app: &mut App, request: BridgeRequest) -> bool {
        app.world_mut()
            .run_system_once(move |mut dispatcher: ActionDispatcher| {
                dispatcher.submit(request.clone(), RequestPurpose::Notify)
            })
            .unwrap()
    }

    #[test]
    fn mutating_request_holds_gate_until_resolved() {
        let bridge = MockBridge::new().respond("useItem", json!(true));
        let mut app = test_app(bridge.clone());
        app.update();

        let use_bread = BridgeRequest::UseItem {
            name: "bread".into(),
            slot: 3,
        };
        assert!(submit(&mut app, use_bread.clone()));
        assert!(app.world().resource::<BusyGate>().is_busy());

        // second mutation is refused while the first is in flight
        assert!(!submit(&mut app, use_bread));

        settle(&mut app);
        assert!(app.world().resource::<BusyGate>().accepts_input());
        assert_eq!(bridge.calls_for("useItem").len(), 1);
    }

    #[test]
    fn failed_request_releases_gate() {
        let bridge = MockBridge::new().fail("dropItem");
        let mut app = test_app(bridge.clone());
        app.update();

        assert!(submit(
            &mut app,
            BridgeRequest::DropItem {
                name: "bread".into(),
                slot: 1,
                count: 1,
            }
        ));
        settle(&mut app);

        assert!(app.world().resource::<BusyGate>().accepts_input());
    }

    #[test]
    fn stalled_request_keeps_gate_closed() {
        let bridge = MockBridge::new().stall("equipItem");
        let mut app = test_app(bridge);
        app.update();

        assert!(submit(
            &mut app,
            BridgeRequest::EquipItem {
                name: "weapon_pistol".into(),
                slot: 2,
            }
        ));
        for _ in 0..10 {
            app.update();
        }

        assert!(app.world().resource::<BusyGate>().is_busy());
    }

    #[test]
    fn reads_do_not_take_the_gate() {
        let bridge = MockBridge::new().stall("exit");
        let mut app = test_app(bridge);
        app.update();

        assert!(submit(&mut app, BridgeRequest::Exit));
        assert!(app.world().resource::<BusyGate>().accepts_input());
    }
}
