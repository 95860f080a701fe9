use bevy::prelude::*;

/// System ordering for the inventory screen.
///
/// Configured as a chain: Inbound → Input → Poll → Apply → Sync.
/// Pushes land first, gestures turn into requests, finished requests are
/// collected and applied, and the visuals catch up last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InventorySet {
    Inbound,
    Input,
    Poll,
    Apply,
    Sync,
}
