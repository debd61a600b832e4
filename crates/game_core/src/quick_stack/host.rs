// Seams between the quick-stack core and the world it runs against

use crate::config::QuickStackConfig;
use game_objects::{GridCell, ItemStack, NetworkId, PlayerId, StorageNetwork, Tile, WorldPosition};

/// Occupancy and type of world tiles
pub trait TileQuery {
    fn tile_at(&self, cell: GridCell) -> Option<&Tile>;
}

/// Access to the networks the world owns
pub trait NetworkStore {
    fn network(&self, id: NetworkId) -> Option<&StorageNetwork>;
    fn network_mut(&mut self, id: NetworkId) -> Option<&mut StorageNetwork>;
}

pub trait ParticipantStore {
    fn participant_position(&self, id: PlayerId) -> Option<WorldPosition>;

    /// Participant acting on this process when none is named
    fn local_participant(&self) -> Option<PlayerId>;

    /// Locations of the portable endpoints in the participant's inventory
    fn portable_locations(&self, id: PlayerId) -> Vec<GridCell>;

    fn inventory_slot(&self, id: PlayerId, slot: usize) -> Option<&ItemStack>;

    /// Returns false if the participant or the slot does not exist
    fn set_inventory_slot(&mut self, id: PlayerId, slot: usize, stack: ItemStack) -> bool;

    fn inventory_len(&self, id: PlayerId) -> usize;
}

/// The host's own "put into nearest generic container" stacking
pub trait FallbackStacker {
    fn put_item_in_nearby_container(
        &mut self,
        item: ItemStack,
        position: WorldPosition,
        config: &QuickStackConfig,
    ) -> ItemStack;
}

/// Everything the pipeline needs from the world
pub trait QuickStackWorld: TileQuery + NetworkStore + ParticipantStore + FallbackStacker {
    /// General lookup: follows an access point's wiring to its network.
    /// Slow path for access kinds that have no dedicated registry.
    fn access_network(&self, cell: GridCell) -> Option<NetworkId>;

    /// Dedicated lookup: the network whose heart sits exactly at `cell`
    fn endpoint_network(&self, cell: GridCell) -> Option<NetworkId>;
}
