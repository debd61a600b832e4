// Authoritative handling of client messages. Socket-free so it can be driven
// directly from tests.

use game_core::objects::{GridCell, Item, ItemStack, Player, PlayerId, TileKind, WorldPosition};
use game_core::quick_stack::{install, BulkStackRoutine, QuickStack, Role};
use game_core::world::World;
use game_core::QuickStackConfig;
use game_protocol::{Message, PlayerAction, Recipient, ServerOutbox};
use std::collections::HashMap;

pub const SPAWN: WorldPosition = WorldPosition { x: 8.0, y: 8.0 };

/// Lays out a storage heart with one access next to the spawn point
pub fn seed_demo_world(world: &mut World) {
    let heart = GridCell::new(4, 0);
    let id = world.place_heart(heart, 10_000);
    world.place_access(GridCell::new(2, 0), TileKind::StorageAccess, heart);
    if let Some(network) = world.network(id) {
        let stocked = network
            .clone()
            .with_stored(ItemStack::new(Item::wood(), 100))
            .with_stored(ItemStack::new(Item::healing_potion(), 10));
        world.load_network(stocked);
    }
}

pub struct ServerSession {
    pub world: World,
    quick_stack: QuickStack,
    // keeps the host hook alive for the lifetime of the session
    _routine: BulkStackRoutine,
    client_to_player: HashMap<u32, PlayerId>,
    player_to_client: HashMap<PlayerId, u32>,
    next_player_id: u32,
}

impl ServerSession {
    pub fn new(world: World, config: QuickStackConfig) -> Self {
        let mut routine = BulkStackRoutine::standard();
        let integration = install(&mut routine, Role::Authoritative, None);
        Self {
            world,
            quick_stack: QuickStack::new(config, Role::Authoritative).with_integration(integration),
            _routine: routine,
            client_to_player: HashMap::new(),
            player_to_client: HashMap::new(),
            next_player_id: 1,
        }
    }

    pub fn player_of(&self, client_id: u32) -> Option<PlayerId> {
        self.client_to_player.get(&client_id).copied()
    }

    /// Applies one client message and returns the messages to send, by client id
    pub fn handle(&mut self, client_id: u32, message: Message) -> Vec<(u32, Message)> {
        let mut outbox = ServerOutbox::new();

        if let Message::Connect { player_name } = &message {
            let player_id = PlayerId(self.next_player_id);
            self.next_player_id += 1;
            self.world
                .add_player(Player::new(player_id.0, player_name.clone()).spawn_at(SPAWN));
            self.client_to_player.insert(client_id, player_id);
            self.player_to_client.insert(player_id, client_id);
            tracing::info!("Player '{}' joined as {}", player_name, player_id);
            return vec![(client_id, Message::Welcome { player_id })];
        }

        let Some(player) = self.player_of(client_id) else {
            tracing::warn!("Message from client {} before connect: {:?}", client_id, message);
            return vec![(client_id, error("not connected"))];
        };

        match message {
            Message::PlayerAction {
                action: PlayerAction::UpdatePosition { position },
            } => {
                if !position.is_in_world() {
                    tracing::warn!("{} sent an out-of-world position {:?}", player, position);
                    outbox.push(Recipient::Player(player), error("position outside the world"));
                } else if let Some(p) = self.world.player_mut(player) {
                    p.move_to(position);
                }
            }

            Message::QuickStackRequest { slot } => {
                if let Err(e) = self.quick_stack.handle_quick_stack_request(
                    &mut self.world,
                    &mut outbox,
                    player,
                    slot,
                ) {
                    tracing::warn!("Quick-stack request from {} rejected: {}", player, e);
                    outbox.push(Recipient::Player(player), error(&e.to_string()));
                }
            }

            Message::OpenStorage { network_id } => {
                if self.world.network(network_id).is_some() {
                    self.world.open_storage(player, network_id);
                }
                outbox.push(Recipient::Player(player), self.contents(network_id));
            }

            Message::RequestNetworkContents { network_id } => {
                outbox.push(Recipient::Player(player), self.contents(network_id));
            }

            Message::CloseStorage => self.world.close_storage(player),

            Message::Disconnect => {
                self.world.remove_player(player);
                self.client_to_player.remove(&client_id);
                self.player_to_client.remove(&player);
                tracing::info!("{} left", player);
            }

            other => {
                tracing::warn!("Unhandled message from client {}: {:?}", client_id, other);
            }
        }

        self.deliver(&mut outbox)
    }

    fn contents(&self, network_id: game_core::objects::NetworkId) -> Message {
        match self.world.network(network_id) {
            Some(network) => Message::NetworkContents {
                network_id,
                items: network.stored_items().to_vec(),
            },
            None => error(&format!("no such storage network: {}", network_id)),
        }
    }

    fn deliver(&self, outbox: &mut ServerOutbox) -> Vec<(u32, Message)> {
        let mut out = Vec::new();
        for (to, message) in outbox.drain() {
            match to {
                Recipient::Player(player) => {
                    if let Some(&client) = self.player_to_client.get(&player) {
                        out.push((client, message));
                    }
                }
                Recipient::ObserversOf(network) => {
                    for watcher in self.world.observers_of(network) {
                        if let Some(&client) = self.player_to_client.get(&watcher) {
                            out.push((client, message.clone()));
                        }
                    }
                }
            }
        }
        out
    }
}

fn error(message: &str) -> Message {
    Message::Error {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::objects::{NetworkId, WORLD_EXTENT};

    fn session() -> ServerSession {
        let mut world = World::new("test");
        seed_demo_world(&mut world);
        ServerSession::new(world, QuickStackConfig::default())
    }

    fn connect(session: &mut ServerSession, client: u32, name: &str) -> PlayerId {
        let replies = session.handle(client, Message::Connect { player_name: name.into() });
        match replies.as_slice() {
            [(_, Message::Welcome { player_id })] => *player_id,
            other => panic!("unexpected replies: {:?}", other),
        }
    }

    #[test]
    fn test_request_syncs_slot_and_notifies_observers() {
        let mut s = session();
        let alice = connect(&mut s, 10, "Alice");
        let _bob = connect(&mut s, 20, "Bob");
        s.handle(20, Message::OpenStorage { network_id: NetworkId(1) });
        s.world
            .player_mut(alice)
            .unwrap()
            .inventory
            .set(5, ItemStack::new(Item::wood(), 40));

        let out = s.handle(10, Message::QuickStackRequest { slot: 5 });

        assert!(out.contains(&(20, Message::RefreshNetworkItems { network_id: NetworkId(1) })));
        assert!(out.iter().any(|(to, m)| *to == 10
            && matches!(m, Message::SyncEquipment { slot: 5, item, .. } if item.is_empty())));
        assert!(!out.iter().any(|(to, m)| *to == 10 && matches!(m, Message::RefreshNetworkItems { .. })));

        let wood = ItemStack::new(Item::wood(), 0);
        assert_eq!(s.world.network(NetworkId(1)).unwrap().count_of(&wood), 140);
    }

    #[test]
    fn test_unmatched_item_is_left_in_slot() {
        let mut s = session();
        let alice = connect(&mut s, 1, "Alice");
        s.world
            .player_mut(alice)
            .unwrap()
            .inventory
            .set(0, ItemStack::new(Item::iron_bar(), 12));

        let out = s.handle(1, Message::QuickStackRequest { slot: 0 });

        assert_eq!(out.len(), 1);
        assert!(matches!(&out[0], (1, Message::SyncEquipment { item, .. }) if item.quantity == 12));
    }

    #[test]
    fn test_bad_slot_reports_error() {
        let mut s = session();
        connect(&mut s, 1, "Alice");

        let out = s.handle(1, Message::QuickStackRequest { slot: 999 });
        assert!(matches!(out.as_slice(), [(1, Message::Error { .. })]));
    }

    #[test]
    fn test_messages_before_connect_rejected() {
        let mut s = session();
        let out = s.handle(3, Message::QuickStackRequest { slot: 0 });
        assert!(matches!(out.as_slice(), [(3, Message::Error { .. })]));
    }

    #[test]
    fn test_open_storage_returns_contents() {
        let mut s = session();
        connect(&mut s, 1, "Alice");

        let out = s.handle(1, Message::OpenStorage { network_id: NetworkId(1) });
        match out.as_slice() {
            [(1, Message::NetworkContents { items, .. })] => assert_eq!(items.len(), 2),
            other => panic!("unexpected replies: {:?}", other),
        }
    }

    #[test]
    fn test_out_of_world_position_rejected() {
        let mut s = session();
        let alice = connect(&mut s, 1, "Alice");
        s.world
            .player_mut(alice)
            .unwrap()
            .inventory
            .set(0, ItemStack::new(Item::wood(), 5));

        for position in [
            WorldPosition::new(1.0e12, 0.0),
            WorldPosition::new(f32::NAN, 0.0),
            WorldPosition::new(0.0, f32::INFINITY),
        ] {
            let out = s.handle(
                1,
                Message::PlayerAction {
                    action: PlayerAction::UpdatePosition { position },
                },
            );
            assert!(matches!(out.as_slice(), [(1, Message::Error { .. })]));
        }
        assert_eq!(s.world.player(alice).unwrap().position, SPAWN);

        let out = s.handle(1, Message::QuickStackRequest { slot: 0 });
        assert!(out.iter().any(|(to, m)| *to == 1
            && matches!(m, Message::SyncEquipment { slot: 0, item, .. } if item.is_empty())));
    }

    #[test]
    fn test_far_position_within_world_finds_nothing() {
        let mut s = session();
        let alice = connect(&mut s, 1, "Alice");
        s.world
            .player_mut(alice)
            .unwrap()
            .inventory
            .set(0, ItemStack::new(Item::wood(), 5));

        let far = WorldPosition::new(WORLD_EXTENT, -WORLD_EXTENT);
        let moved = s.handle(
            1,
            Message::PlayerAction {
                action: PlayerAction::UpdatePosition { position: far },
            },
        );
        assert!(moved.is_empty());

        let out = s.handle(1, Message::QuickStackRequest { slot: 0 });
        assert!(matches!(&out[0], (1, Message::SyncEquipment { item, .. }) if item.quantity == 5));
    }

    #[test]
    fn test_disconnect_clears_observer() {
        let mut s = session();
        let bob = connect(&mut s, 2, "Bob");
        s.handle(2, Message::OpenStorage { network_id: NetworkId(1) });
        s.handle(2, Message::Disconnect);

        assert!(s.world.player(bob).is_none());
        assert!(s.world.observers_of(NetworkId(1)).is_empty());
        assert!(s.player_of(2).is_none());
    }
}
