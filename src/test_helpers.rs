pub mod fixtures {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use bevy::prelude::*;
    use futures_lite::future;
    use serde_json::{Value, json};

    use crate::bridge::{
        BridgeClient, BridgeError, BridgeFuture, BridgePlugin, NuiBridge, NuiEvent,
        PendingRequest, SetupPayload,
    };
    use crate::inventory::{Container, InventoryPlugin};
    use crate::item::Item;

    #[derive(Clone, Debug)]
    enum Scripted {
        Respond(Value),
        Fail,
        Stall,
    }

    /// Scriptable bridge that records every call it receives. Unscripted
    /// actions resolve to `null`.
    #[derive(Clone, Default)]
    pub struct MockBridge {
        calls: Arc<Mutex<Vec<(String, Value)>>>,
        script: Arc<Mutex<HashMap<String, Scripted>>>,
    }

    impl MockBridge {
        pub fn new() -> Self {
            Self::default()
        }

        fn script(self, action: &str, entry: Scripted) -> Self {
            self.script.lock().unwrap().insert(action.into(), entry);
            self
        }

        pub fn respond(self, action: &str, value: Value) -> Self {
            self.script(action, Scripted::Respond(value))
        }

        pub fn fail(self, action: &str) -> Self {
            self.script(action, Scripted::Fail)
        }

        pub fn stall(self, action: &str) -> Self {
            self.script(action, Scripted::Stall)
        }

        /// Payloads of every call made for `action`, oldest first.
        pub fn calls_for(&self, action: &str) -> Vec<Value> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(name, _)| name == action)
                .map(|(_, payload)| payload.clone())
                .collect()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl NuiBridge for MockBridge {
        fn call(&self, action: &str, payload: Value) -> BridgeFuture {
            self.calls.lock().unwrap().push((action.into(), payload));
            let entry = self.script.lock().unwrap().get(action).cloned();
            let action = action.to_string();
            match entry {
                Some(Scripted::Respond(value)) => Box::pin(async move { Ok(value) }),
                Some(Scripted::Fail) => Box::pin(async move {
                    Err(BridgeError::Transport(format!("{action} refused")))
                }),
                Some(Scripted::Stall) => Box::pin(future::pending()),
                None => Box::pin(async { Ok(Value::Null) }),
            }
        }
    }

    /// Minimal headless app with the bridge and inventory state wired up.
    pub fn test_app(bridge: MockBridge) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(BridgeClient::new(bridge));
        app.add_plugins((BridgePlugin, InventoryPlugin));
        app
    }

    /// Run updates until every in-flight bridge call has resolved, then one
    /// more so responses are applied.
    pub fn settle(app: &mut App) {
        for _ in 0..1000 {
            app.update();
            let pending = app
                .world_mut()
                .query::<&PendingRequest>()
                .iter(app.world())
                .count();
            if pending == 0 {
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        app.update();
    }

    /// Deliver an inbound event and run a frame.
    pub fn push(app: &mut App, event: NuiEvent) {
        app.world_mut().write_message(event);
        app.update();
    }

    pub fn player_container(items: Vec<Item>) -> Container {
        Container {
            id: "player".into(),
            kind: "player".into(),
            label: Some("Pockets".into()),
            slots: 20,
            max_weight: Some(30000.0),
            items,
        }
    }

    pub fn setup_player(app: &mut App, items: Vec<Item>) {
        push(
            app,
            NuiEvent::SetupInventory(SetupPayload {
                left_inventory: Some(player_container(items)),
                right_inventory: None,
            }),
        );
    }

    pub fn equipment_response(entries: &[(&str, &str, u32)]) -> Value {
        let mut map = serde_json::Map::new();
        for (category, name, slot) in entries {
            map.insert(
                (*category).into(),
                json!({ "item": { "name": name, "slot": slot, "count": 1 } }),
            );
        }
        Value::Object(map)
    }
}
