use game_core::objects::{ItemStack, NetworkId, PlayerId, WorldPosition};
use game_core::quick_stack::SyncNotifier;
use serde::{Deserialize, Serialize};

/// Protocol messages exchanged between client and server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    // Client to Server messages
    Connect { player_name: String },
    Disconnect,
    PlayerAction { action: PlayerAction },
    /// Ask the server to quick-stack one inventory slot
    QuickStackRequest { slot: usize },
    /// The client opened the storage UI of a network
    OpenStorage { network_id: NetworkId },
    CloseStorage,
    RequestNetworkContents { network_id: NetworkId },

    // Server to Client messages
    Welcome { player_id: PlayerId },
    /// Contents of the network changed; re-query if it is being viewed
    RefreshNetworkItems { network_id: NetworkId },
    /// Authoritative contents of one inventory slot
    SyncEquipment { player_id: PlayerId, slot: usize, item: ItemStack },
    NetworkContents { network_id: NetworkId, items: Vec<ItemStack> },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    UpdatePosition { position: WorldPosition },
}

impl Message {
    pub fn encode(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(data: &[u8]) -> anyhow::Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}

/// Who an outgoing message is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Player(PlayerId),
    /// Every participant with this network's storage UI open
    ObserversOf(NetworkId),
}

/// Messages produced while the authoritative process handles one request,
/// queued for delivery once the world mutation is done
#[derive(Debug, Default)]
pub struct ServerOutbox {
    pending: Vec<(Recipient, Message)>,
}

impl ServerOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, to: Recipient, message: Message) {
        self.pending.push((to, message));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (Recipient, Message)> + '_ {
        self.pending.drain(..)
    }
}

impl SyncNotifier for ServerOutbox {
    fn refresh_network_items(&mut self, network: NetworkId) {
        self.push(
            Recipient::ObserversOf(network),
            Message::RefreshNetworkItems { network_id: network },
        );
    }

    fn sync_inventory_slot(&mut self, player: PlayerId, slot: usize, stack: &ItemStack) {
        self.push(
            Recipient::Player(player),
            Message::SyncEquipment {
                player_id: player,
                slot,
                item: stack.clone(),
            },
        );
    }
}

/// Client-side copy of the storage network being viewed
pub mod view {
    use super::*;

    #[derive(Debug, Default)]
    pub struct StorageView {
        viewing: Option<NetworkId>,
        items: Vec<ItemStack>,
    }

    impl StorageView {
        pub fn new() -> Self {
            Self::default()
        }

        /// Opens the UI of `network`; returns what to send to the server
        pub fn open(&mut self, network: NetworkId) -> Message {
            self.viewing = Some(network);
            self.items.clear();
            Message::OpenStorage { network_id: network }
        }

        pub fn close(&mut self) -> Message {
            self.viewing = None;
            self.items.clear();
            Message::CloseStorage
        }

        pub fn viewing(&self) -> Option<NetworkId> {
            self.viewing
        }

        pub fn items(&self) -> &[ItemStack] {
            &self.items
        }

        /// Applies a server message. Returns the reply to send, if any.
        pub fn handle(&mut self, message: &Message) -> Option<Message> {
            match message {
                Message::RefreshNetworkItems { network_id } if self.viewing == Some(*network_id) => {
                    Some(Message::RequestNetworkContents {
                        network_id: *network_id,
                    })
                }
                Message::NetworkContents { network_id, items } if self.viewing == Some(*network_id) => {
                    self.items = items.clone();
                    None
                }
                _ => None,
            }
        }
    }
}

/// Network connection management using WebSockets
pub mod connection {
    use super::*;
    use anyhow::Result;
    use futures_util::{SinkExt, StreamExt};
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use tokio::sync::mpsc;
    use tokio_tungstenite::{accept_async, tungstenite::Message as WsMessage};

    pub struct GameServer {
        pub listener: tokio::net::TcpListener,
        pub connections: HashMap<u32, mpsc::UnboundedSender<Message>>,
        pub message_tx: mpsc::UnboundedSender<(u32, Message)>,
        pub message_rx: mpsc::UnboundedReceiver<(u32, Message)>,
        pub next_client_id: u32,
    }

    impl GameServer {
        pub async fn new(addr: SocketAddr) -> Result<Self> {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            let (message_tx, message_rx) = mpsc::unbounded_channel();

            Ok(Self {
                listener,
                connections: HashMap::new(),
                message_tx,
                message_rx,
                next_client_id: 1,
            })
        }

        /// Registers an accepted socket and spawns its connection task
        pub fn register(&mut self, stream: tokio::net::TcpStream) -> u32 {
            let client_id = self.next_client_id;
            self.next_client_id += 1;

            let tx = self.message_tx.clone();
            let (conn_tx, conn_rx) = mpsc::unbounded_channel();
            self.connections.insert(client_id, conn_tx);

            // Spawn task to handle this WebSocket connection
            tokio::spawn(async move {
                if let Err(e) = handle_websocket_connection(stream, client_id, tx, conn_rx).await {
                    tracing::error!("Connection {} error: {}", client_id, e);
                }
            });
            client_id
        }

        pub fn send_to_client(&self, client_id: u32, message: Message) -> Result<()> {
            if let Some(conn_tx) = self.connections.get(&client_id) {
                conn_tx.send(message)?;
            }
            Ok(())
        }

        pub fn disconnect_client(&mut self, client_id: u32) {
            self.connections.remove(&client_id);
        }
    }

    pub async fn handle_websocket_connection(
        stream: tokio::net::TcpStream,
        client_id: u32,
        server_tx: mpsc::UnboundedSender<(u32, Message)>,
        mut conn_rx: mpsc::UnboundedReceiver<Message>,
    ) -> Result<()> {
        let ws_stream = accept_async(stream).await?;
        let (mut ws_tx, mut ws_rx) = ws_stream.split();

        // Spawn task to send messages to client
        tokio::spawn(async move {
            while let Some(message) = conn_rx.recv().await {
                if let Ok(data) = message.encode() {
                    if ws_tx.send(WsMessage::Binary(data)).await.is_err() {
                        break;
                    }
                }
            }
        });

        // Receive messages from client
        while let Some(msg) = ws_rx.next().await {
            match msg {
                Ok(WsMessage::Binary(data)) => match Message::decode(&data) {
                    Ok(message) => server_tx.send((client_id, message))?,
                    Err(e) => tracing::warn!("Client {} sent an undecodable frame: {}", client_id, e),
                },
                Ok(WsMessage::Close(_)) => break,
                Err(_) => break,
                _ => {}
            }
        }

        // Let the game loop clean up after the client
        let _ = server_tx.send((client_id, Message::Disconnect));
        Ok(())
    }
}
