// Game objects library - contains the world entities the storage system works on

pub mod containers;
pub mod ids;
pub mod inventory;
pub mod items;
pub mod objects;
pub mod players;
pub mod storage;
pub mod tiles;

// Re-export commonly used types
pub use containers::Container;
pub use ids::{ContainerId, ItemId, NetworkId, PlayerId};
pub use inventory::{Inventory, INVENTORY_SLOTS};
pub use items::{Item, ItemKind, ItemStack};
pub use objects::{GridCell, WorldPosition, WORLD_EXTENT};
pub use players::Player;
pub use storage::StorageNetwork;
pub use tiles::{AccessKind, AccessPoint, Tile, TileKind};
