pub mod containers;
pub mod context_menu;
pub mod equipment;
pub mod plugin;
pub mod pockets;
pub mod screen;
pub mod systems;

pub use containers::*;
pub use context_menu::*;
pub use equipment::*;
pub use plugin::InventoryPlugin;
pub use pockets::*;
pub use screen::*;
pub use systems::*;
