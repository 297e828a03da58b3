//! LobbyLink demo client.
//!
//! Usage: `lobbylink [config.yaml] [player_id] [recipient_id]`
//!
//! - Load config (strict parsing + env overrides for credentials)
//! - Connect to the lobby and wait for the connection to open
//! - Register the player, send one chat message
//! - Log every inbound envelope until the connection closes

use std::sync::Arc;

use async_trait::async_trait;
use tracing_subscriber::{fmt, EnvFilter};

use lobbylink_client::config;
use lobbylink_client::dispatch::{ActionHandler, Dispatcher};
use lobbylink_client::session::{self, LobbySession, SessionState};
use lobbylink_client::transport::WsTransport;
use lobbylink_core::protocol::envelope::{ActionEnvelope, ActionKind};
use lobbylink_core::protocol::payload::ChatMessage;
use lobbylink_core::Result;

/// Logs every envelope that no other handler claims.
struct LogHandler;

#[async_trait]
impl ActionHandler for LogHandler {
    fn action(&self) -> ActionKind {
        ActionKind::None
    }

    async fn handle(&self, env: ActionEnvelope) -> Result<()> {
        if env.action == ActionKind::TextChat {
            if let Ok(chat) = serde_json::from_str::<ChatMessage>(&env.payload) {
                tracing::info!(from = %chat.sender_player_id, message = %chat.message, "chat");
                return Ok(());
            }
        }
        tracing::info!(action = %env.action, client_id = %env.client_id, payload = %env.payload, "lobby message");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "lobbylink.yaml".into());
    let player = args.next().unwrap_or_else(|| "demo-player".into());
    let recipient = args.next().unwrap_or_else(|| player.clone());

    let cfg = config::load_from_file(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.logging.filter));
    fmt().with_env_filter(filter).init();

    let (transport, mut events) = WsTransport::new(cfg.session.outbound_queue);
    let transport = transport.with_close_timeout(cfg.session.close_timeout());
    let dispatcher = Arc::new(Dispatcher::with_fallback(Arc::new(LogHandler)));
    let lobby = Arc::new(LobbySession::from_config(&cfg, transport, dispatcher)?);

    tracing::info!(url = %cfg.lobby.url, %player, "lobbylink starting");
    lobby.connect(&cfg.lobby.url)?;

    // Wait for the socket to open before sending anything.
    while let Some(event) = events.recv().await {
        if let Err(e) = lobby.handle_event(event).await {
            tracing::warn!(code = e.code().as_str(), error = %e, "inbound frame dropped");
        }
        match lobby.state() {
            SessionState::Connected => break,
            SessionState::Closed => return Ok(()),
            _ => {}
        }
    }

    lobby.register_player(&player)?;
    lobby.send_chat(&player, "hello from lobbylink", &recipient)?;

    session::run(lobby.clone(), events).await;
    tracing::debug!(metrics = %lobby.metrics().render(), "final metrics");
    Ok(())
}
