mod session;

use game_core::world::World;
use game_core::QuickStackConfig;
use game_protocol::{connection::GameServer, Message};
use session::ServerSession;
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tracing_subscriber::EnvFilter;

enum Event {
    Accepted(TcpStream, SocketAddr),
    Received(u32, Message),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Config absente ou invalide: on garde les valeurs par défaut
    let config = QuickStackConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default quick-stack settings: {}", e);
        QuickStackConfig::default()
    });

    let addr: SocketAddr = "127.0.0.1:8080".parse()?;
    let mut server = GameServer::new(addr).await?;
    let mut world = World::new("server");
    session::seed_demo_world(&mut world);
    let mut session = ServerSession::new(world, config);

    tracing::info!("Storage server listening on {}", addr);

    loop {
        // Accepter les connexions / traiter les messages entrants
        let event = tokio::select! {
            Ok((stream, addr)) = server.listener.accept() => Event::Accepted(stream, addr),
            Some((client_id, message)) = server.message_rx.recv() => Event::Received(client_id, message),
        };

        match event {
            Event::Accepted(stream, addr) => {
                let client_id = server.register(stream);
                tracing::info!("New connection from {} as client {}", addr, client_id);
            }
            Event::Received(client_id, message) => {
                let disconnect = matches!(message, Message::Disconnect);
                for (to, reply) in session.handle(client_id, message) {
                    if let Err(e) = server.send_to_client(to, reply) {
                        tracing::warn!("Dropping message for client {}: {}", to, e);
                    }
                }
                // Le socket est fermé, on oublie le client
                if disconnect {
                    server.disconnect_client(client_id);
                }
            }
        }
    }
}
