// world.rs: tuiles, réseaux de stockage, joueurs et coffres d'une session.
// Les entités sont créées et détruites ici par la gestion du monde; le coeur de stockage
// ne fait que les consulter et modifier le contenu des réseaux.

use ahash::AHashMap;
use game_objects::{
    Container, ContainerId, GridCell, ItemStack, NetworkId, Player, PlayerId, StorageNetwork,
    Tile, TileKind, WorldPosition,
};
use game_utils::Arena;
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct World {
    pub name: String,
    tiles: AHashMap<GridCell, Tile>,
    /// Heart cell -> network, the dedicated endpoint registry
    hearts: AHashMap<GridCell, NetworkId>,
    networks: Arena<StorageNetwork, NetworkId>,
    players: Arena<Player, PlayerId>,
    containers: Arena<Container, ContainerId>,
    /// Joueurs ayant l'interface d'un réseau ouverte
    observers: AHashMap<NetworkId, BTreeSet<PlayerId>>,
    /// Player driven by this process, if it has a display
    local_player: Option<PlayerId>,
    next_network_id: u32,
    next_container_id: u32,
}

impl World {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_network_id: 1,
            next_container_id: 1,
            ..Self::default()
        }
    }

    // ---- tuiles ----

    pub fn tile(&self, cell: GridCell) -> Option<&Tile> {
        self.tiles.get(&cell)
    }

    pub fn place_tile(&mut self, cell: GridCell, tile: Tile) {
        self.tiles.insert(cell, tile);
    }

    /// Removes whatever occupies `cell`. A heart takes its network with it.
    pub fn remove_tile(&mut self, cell: GridCell) -> Option<Tile> {
        if let Some(id) = self.hearts.remove(&cell) {
            self.networks.remove(id);
            self.observers.remove(&id);
            tracing::debug!("Storage heart at {:?} removed, {} dropped", cell, id);
        }
        self.tiles.remove(&cell)
    }

    /// Places a heart at `cell` and registers the network it anchors
    pub fn place_heart(&mut self, cell: GridCell, capacity: u32) -> NetworkId {
        let id = NetworkId(self.next_network_id);
        self.next_network_id += 1;
        self.place_tile(cell, Tile::new(TileKind::StorageHeart));
        self.hearts.insert(cell, id);
        self.networks.insert(StorageNetwork::new(id, cell, capacity));
        tracing::debug!("Storage heart placed at {:?} as {}", cell, id);
        id
    }

    /// Places an access or crafting access wired to the heart at `heart`
    pub fn place_access(&mut self, cell: GridCell, kind: TileKind, heart: GridCell) {
        self.place_tile(cell, Tile::linked_to(kind, heart));
    }

    // ---- recherche de réseaux ----

    /// Network behind an access tile, following its wiring to the heart
    pub fn access_network(&self, cell: GridCell) -> Option<NetworkId> {
        let tile = self.tiles.get(&cell)?;
        if !tile.active || !tile.kind.is_storage_access() {
            return None;
        }
        let heart = tile.link?;
        self.hearts.get(&heart).copied()
    }

    /// Network anchored by a heart at exactly `cell`
    pub fn heart_network(&self, cell: GridCell) -> Option<NetworkId> {
        self.hearts.get(&cell).copied()
    }

    pub fn network(&self, id: NetworkId) -> Option<&StorageNetwork> {
        self.networks.get(id)
    }

    pub fn network_mut(&mut self, id: NetworkId) -> Option<&mut StorageNetwork> {
        self.networks.get_mut(id)
    }

    /// Remplace le réseau stocké sous son Id (chargement d'un contenu sauvegardé)
    pub fn load_network(&mut self, network: StorageNetwork) {
        self.hearts.insert(network.heart, network.id);
        self.next_network_id = self.next_network_id.max(network.id.0 + 1);
        self.networks.insert(network);
    }

    pub fn network_count(&self) -> usize {
        self.networks.len()
    }

    // ---- joueurs ----

    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = player.id;
        self.players.insert(player);
        id
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        self.close_storage(id);
        if self.local_player == Some(id) {
            self.local_player = None;
        }
        self.players.remove(id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn set_local_player(&mut self, id: Option<PlayerId>) {
        self.local_player = id;
    }

    pub fn local_player(&self) -> Option<PlayerId> {
        self.local_player
    }

    // ---- observers ----

    /// Records that `player` has the storage UI of `network` open
    pub fn open_storage(&mut self, player: PlayerId, network: NetworkId) {
        self.close_storage(player);
        self.observers.entry(network).or_default().insert(player);
    }

    pub fn close_storage(&mut self, player: PlayerId) {
        for watchers in self.observers.values_mut() {
            watchers.remove(&player);
        }
        self.observers.retain(|_, watchers| !watchers.is_empty());
    }

    pub fn observers_of(&self, network: NetworkId) -> Vec<PlayerId> {
        self.observers
            .get(&network)
            .map(|watchers| watchers.iter().copied().collect())
            .unwrap_or_default()
    }

    // ---- coffres génériques ----

    pub fn place_container(&mut self, origin: GridCell, slots: Vec<ItemStack>) -> ContainerId {
        let id = ContainerId(self.next_container_id);
        self.next_container_id += 1;
        self.place_tile(origin, Tile::new(TileKind::Container));
        let mut container = Container::new(id, origin);
        container.slots = slots;
        self.containers.insert(container);
        id
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id)
    }

    /// Host stacking into generic chests: tops up matching slots of every chest
    /// whose origin lies strictly within `max_distance` of `position`.
    pub fn put_item_in_nearby_container(
        &mut self,
        mut item: ItemStack,
        position: WorldPosition,
        max_distance: u32,
        tile_width: u32,
    ) -> ItemStack {
        let mut ids: Vec<ContainerId> = self.containers.ids().collect();
        ids.sort();
        for id in ids {
            if item.is_empty() {
                break;
            }
            let Some(chest) = self.containers.get_mut(id) else {
                continue;
            };
            if chest.origin.to_world(tile_width).distance(&position) >= max_distance as f32 {
                continue;
            }
            if chest.holds(&item) {
                chest.stack_onto(&mut item);
            }
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_objects::Item;

    #[test]
    fn test_lookup_paths() {
        let mut world = World::new("test");
        let heart = GridCell::new(10, 10);
        let id = world.place_heart(heart, 100);
        world.place_access(GridCell::new(12, 10), TileKind::StorageAccess, heart);

        assert_eq!(world.access_network(GridCell::new(12, 10)), Some(id));
        assert_eq!(world.heart_network(heart), Some(id));
        assert_eq!(world.heart_network(GridCell::new(12, 10)), None);
        // hearts carry no wiring of their own
        assert_eq!(world.access_network(heart), None);
    }

    #[test]
    fn test_inactive_access_does_not_resolve() {
        let mut world = World::new("test");
        let heart = GridCell::new(0, 0);
        world.place_heart(heart, 100);
        let mut tile = Tile::linked_to(TileKind::StorageAccess, heart);
        tile.active = false;
        world.place_tile(GridCell::new(1, 0), tile);

        assert_eq!(world.access_network(GridCell::new(1, 0)), None);
    }

    #[test]
    fn test_removing_heart_drops_network() {
        let mut world = World::new("test");
        let heart = GridCell::new(0, 0);
        let id = world.place_heart(heart, 100);
        world.open_storage(PlayerId(1), id);

        world.remove_tile(heart);
        assert!(world.network(id).is_none());
        assert!(world.observers_of(id).is_empty());
    }

    #[test]
    fn test_observers() {
        let mut world = World::new("test");
        let a = world.place_heart(GridCell::new(0, 0), 10);
        let b = world.place_heart(GridCell::new(5, 0), 10);

        world.open_storage(PlayerId(1), a);
        world.open_storage(PlayerId(2), a);
        world.open_storage(PlayerId(1), b);

        assert_eq!(world.observers_of(a), vec![PlayerId(2)]);
        assert_eq!(world.observers_of(b), vec![PlayerId(1)]);
    }

    #[test]
    fn test_nearby_container_stacking() {
        let mut world = World::new("test");
        let near = world.place_container(
            GridCell::new(2, 0),
            vec![ItemStack::new(Item::wood(), 10)],
        );
        let far = world.place_container(
            GridCell::new(40, 0),
            vec![ItemStack::new(Item::wood(), 10)],
        );

        let left = world.put_item_in_nearby_container(
            ItemStack::new(Item::wood(), 5),
            WorldPosition::new(8.0, 8.0),
            200,
            16,
        );
        assert!(left.is_empty());
        assert_eq!(world.container(near).unwrap().slots[0].quantity, 15);
        assert_eq!(world.container(far).unwrap().slots[0].quantity, 10);
    }
}
