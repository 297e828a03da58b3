//! WebSocket transport (tokio-tungstenite client).
//!
//! Responsibilities:
//! - Dial the lobby url (`ws://` or `wss://`)
//! - Own the socket in one background task: outbound writer + inbound reader
//! - Report lifecycle and text frames as `TransportEvent`s
//! - Close handshake on request, then drain until the peer answers or the
//!   close timeout expires
//!
//! `send` never awaits: frames go into a bounded queue with `try_send`, so a
//! full queue surfaces as an error instead of blocking the caller.

use std::sync::Mutex;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::Instrument;

use lobbylink_core::error::{LobbyError, Result};

use super::codec::{abnormal_close, decode};
use super::{Transport, TransportEvent};

/// Default time to wait for the peer's close frame after a local close.
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
enum Command {
    Send(String),
    Close,
}

/// Transport handle backed by a spawned socket task.
pub struct WsTransport {
    events: mpsc::UnboundedSender<TransportEvent>,
    outbound: Mutex<Option<mpsc::Sender<Command>>>,
    queue_capacity: usize,
    close_timeout: Duration,
}

impl WsTransport {
    /// Build a transport and the event stream it reports on.
    pub fn new(queue_capacity: usize) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let transport = Self {
            events,
            outbound: Mutex::new(None),
            queue_capacity: queue_capacity.max(1),
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        };
        (transport, rx)
    }

    /// Bound on the close handshake; the socket is dropped once it expires.
    pub fn with_close_timeout(mut self, close_timeout: Duration) -> Self {
        self.close_timeout = close_timeout;
        self
    }

    fn outbound(&self) -> std::sync::MutexGuard<'_, Option<mpsc::Sender<Command>>> {
        // Poisoning only means another caller panicked mid-send; the slot is still valid.
        self.outbound.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Transport for WsTransport {
    fn connect(&self, url: &str) -> Result<()> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| LobbyError::TransportUnavailable(format!("no async runtime: {e}")))?;

        let mut slot = self.outbound();
        if slot.is_some() {
            return Err(LobbyError::InvalidState("transport already started".into()));
        }

        let (tx, rx) = mpsc::channel(self.queue_capacity);
        *slot = Some(tx);

        let span = tracing::info_span!("lobby_ws", %url);
        let url = url.to_owned();
        let events = self.events.clone();
        let close_timeout = self.close_timeout;
        runtime.spawn(run_socket(url, rx, events, close_timeout).instrument(span));
        Ok(())
    }

    fn send(&self, text: String) -> Result<()> {
        let slot = self.outbound();
        let tx = slot
            .as_ref()
            .ok_or_else(|| LobbyError::TransportUnavailable("not connected".into()))?;
        tx.try_send(Command::Send(text)).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                LobbyError::TransportUnavailable("outbound queue full".into())
            }
            mpsc::error::TrySendError::Closed(_) => {
                LobbyError::TransportUnavailable("socket task gone".into())
            }
        })
    }

    fn close(&self) {
        if let Some(tx) = self.outbound().take() {
            // A full queue still gets closed: dropping `tx` ends the writer loop.
            let _ = tx.try_send(Command::Close);
        }
    }
}

// --------------------
// Socket task
// --------------------
async fn run_socket(
    url: String,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::UnboundedSender<TransportEvent>,
    close_timeout: Duration,
) {
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            tracing::error!(error = %e, "lobby connect failed");
            let _ = events.send(TransportEvent::ConnectionError(e.to_string()));
            return;
        }
    };
    let _ = events.send(TransportEvent::Connected);

    let (mut ws_tx, mut ws_rx) = stream.split();
    let mut closing = false;
    // Armed only once `closing` is set.
    let drain = tokio::time::sleep(close_timeout);
    tokio::pin!(drain);

    loop {
        tokio::select! {
            // outbound writer
            cmd = commands.recv(), if !closing => {
                match cmd {
                    Some(Command::Send(text)) => {
                        if let Err(e) = ws_tx.send(Message::Text(text)).await {
                            let _ = events.send(TransportEvent::ConnectionError(e.to_string()));
                            break;
                        }
                    }
                    Some(Command::Close) | None => {
                        closing = true;
                        drain.as_mut().reset(Instant::now() + close_timeout);
                        if ws_tx.send(Message::Close(None)).await.is_err() {
                            let _ = events.send(abnormal_close("close handshake failed"));
                            break;
                        }
                    }
                }
            }

            // close drain deadline
            _ = &mut drain, if closing => {
                tracing::warn!(?close_timeout, "peer did not answer close frame");
                let _ = events.send(abnormal_close("close handshake timed out"));
                break;
            }

            // inbound reader
            incoming = ws_rx.next() => {
                match incoming {
                    Some(Ok(msg)) => {
                        if let Some(ev) = decode(msg) {
                            let done = matches!(ev, TransportEvent::Closed { .. });
                            let _ = events.send(ev);
                            if done {
                                break;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        let _ = events.send(TransportEvent::ConnectionError(e.to_string()));
                        break;
                    }
                    None => {
                        let _ = events.send(abnormal_close("stream ended"));
                        break;
                    }
                }
            }
        }
    }

    tracing::debug!("lobby socket task finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::codec::ABNORMAL_CLOSURE;

    #[test]
    fn send_before_connect_is_unavailable() {
        let (t, _rx) = WsTransport::new(4);
        let err = t.send("x".into()).unwrap_err();
        assert_eq!(err.code().as_str(), "TRANSPORT_UNAVAILABLE");
    }

    #[test]
    fn connect_outside_runtime_is_unavailable() {
        let (t, _rx) = WsTransport::new(4);
        let err = t.connect("ws://127.0.0.1:1/ws").unwrap_err();
        assert_eq!(err.code().as_str(), "TRANSPORT_UNAVAILABLE");
    }

    #[test]
    fn close_is_idempotent() {
        let (t, _rx) = WsTransport::new(4);
        t.close();
        t.close();
    }

    #[tokio::test]
    async fn silent_peer_is_dropped_after_close_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Completes the upgrade, then never reads again.
        let peer = tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(ws);
        });

        let (t, mut rx) = WsTransport::new(4);
        let t = t.with_close_timeout(Duration::from_millis(100));
        t.connect(&format!("ws://{addr}/")).unwrap();
        assert_eq!(rx.recv().await, Some(TransportEvent::Connected));

        t.close();
        let ev = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("close must not hang");
        match ev {
            Some(TransportEvent::Closed {
                status_code,
                was_clean,
                ..
            }) => {
                assert_eq!(status_code, ABNORMAL_CLOSURE);
                assert!(!was_clean);
            }
            other => panic!("expected abnormal close, got {other:?}"),
        }
        peer.abort();
    }

    #[tokio::test]
    async fn refused_connection_reports_error_event() {
        let (t, mut rx) = WsTransport::new(4);
        // Port 1 is reserved and closed on test hosts.
        t.connect("ws://127.0.0.1:1/ws").unwrap();
        match rx.recv().await {
            Some(TransportEvent::ConnectionError(_)) => {}
            other => panic!("expected connection error, got {other:?}"),
        }
    }
}
