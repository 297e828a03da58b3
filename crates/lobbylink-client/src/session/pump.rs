use std::sync::Arc;

use tokio::sync::mpsc;

use crate::transport::{Transport, TransportEvent};

use super::lobby::LobbySession;

/// Feed transport events to `session` one at a time.
///
/// Returns once the session reaches `Closed` or the event stream ends.
pub async fn run<T: Transport>(
    session: Arc<LobbySession<T>>,
    mut events: mpsc::UnboundedReceiver<TransportEvent>,
) {
    while let Some(event) = events.recv().await {
        if let Err(e) = session.handle_event(event).await {
            tracing::debug!(code = e.code().as_str(), error = %e, "inbound frame dropped");
        }
        if session.state().is_terminal() {
            break;
        }
    }
    tracing::debug!(state = %session.state(), "event pump finished");
}
