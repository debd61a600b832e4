// Quick-stack seams implemented over the session world

use crate::config::QuickStackConfig;
use crate::quick_stack::{
    FallbackStacker, NetworkStore, ParticipantStore, QuickStackWorld, TileQuery,
};
use game_objects::{GridCell, ItemStack, NetworkId, PlayerId, StorageNetwork, Tile, WorldPosition};
use game_world::World;

impl TileQuery for World {
    fn tile_at(&self, cell: GridCell) -> Option<&Tile> {
        self.tile(cell)
    }
}

impl NetworkStore for World {
    fn network(&self, id: NetworkId) -> Option<&StorageNetwork> {
        World::network(self, id)
    }

    fn network_mut(&mut self, id: NetworkId) -> Option<&mut StorageNetwork> {
        World::network_mut(self, id)
    }
}

impl ParticipantStore for World {
    fn participant_position(&self, id: PlayerId) -> Option<WorldPosition> {
        self.player(id).map(|p| p.center())
    }

    fn local_participant(&self) -> Option<PlayerId> {
        self.local_player()
    }

    fn portable_locations(&self, id: PlayerId) -> Vec<GridCell> {
        self.player(id)
            .map(|p| p.inventory.portable_locations())
            .unwrap_or_default()
    }

    fn inventory_slot(&self, id: PlayerId, slot: usize) -> Option<&ItemStack> {
        self.player(id).and_then(|p| p.inventory.get(slot))
    }

    fn set_inventory_slot(&mut self, id: PlayerId, slot: usize, stack: ItemStack) -> bool {
        self.player_mut(id)
            .is_some_and(|p| p.inventory.set(slot, stack))
    }

    fn inventory_len(&self, id: PlayerId) -> usize {
        self.player(id).map(|p| p.inventory.len()).unwrap_or(0)
    }
}

impl FallbackStacker for World {
    fn put_item_in_nearby_container(
        &mut self,
        item: ItemStack,
        position: WorldPosition,
        config: &QuickStackConfig,
    ) -> ItemStack {
        World::put_item_in_nearby_container(self, item, position, config.max_distance, config.tile_width)
    }
}

impl QuickStackWorld for World {
    fn access_network(&self, cell: GridCell) -> Option<NetworkId> {
        World::access_network(self, cell)
    }

    fn endpoint_network(&self, cell: GridCell) -> Option<NetworkId> {
        self.heart_network(cell)
    }
}
