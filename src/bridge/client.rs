use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bevy::prelude::*;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("bridge transport failed: {0}")]
    Transport(String),
    #[error("bridge payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unknown inbound event `{0}`")]
    UnknownEvent(String),
}

pub type BridgeResult = Result<Value, BridgeError>;
pub type BridgeFuture = Pin<Box<dyn Future<Output = BridgeResult> + Send + 'static>>;

/// Asynchronous named-call channel to the game client.
pub trait NuiBridge: Send + Sync + 'static {
    fn call(&self, action: &str, payload: Value) -> BridgeFuture;
}

/// Shared handle to the active bridge.
#[derive(Resource, Clone)]
pub struct BridgeClient(Arc<dyn NuiBridge>);

impl BridgeClient {
    pub fn new(bridge: impl NuiBridge) -> Self {
        Self(Arc::new(bridge))
    }

    pub fn call(&self, action: &str, payload: Value) -> BridgeFuture {
        self.0.call(action, payload)
    }
}

/// Bridge used when no game client is attached: every call resolves to
/// `null`, so reads come back empty and mutations are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineBridge;

impl NuiBridge for OfflineBridge {
    fn call(&self, action: &str, _payload: Value) -> BridgeFuture {
        debug!("offline bridge ignoring `{action}`");
        Box::pin(async { Ok(Value::Null) })
    }
}

impl Default for BridgeClient {
    fn default() -> Self {
        Self::new(OfflineBridge)
    }
}
