//! Transport layer (WebSocket).
//!
//! The session only sees the [`Transport`] trait: start a connection, push a
//! text frame, request closure. Everything the socket reports comes back as a
//! [`TransportEvent`] on a channel, consumed one at a time by the session pump.

pub mod codec;
pub mod ws;

use lobbylink_core::error::Result;

pub use ws::WsTransport;

/// Lifecycle and data events reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Connected,
    ConnectionError(String),
    Message(String),
    Closed {
        status_code: u16,
        reason: String,
        was_clean: bool,
    },
}

/// WebSocket-like transport handle.
///
/// All methods are non-blocking. Writes are fire-and-forget: `Ok` means the
/// frame was accepted for sending, not that it reached the peer.
pub trait Transport: Send + Sync {
    /// Start connecting to `url`. Progress is reported through events.
    fn connect(&self, url: &str) -> Result<()>;

    /// Queue one text frame.
    fn send(&self, text: String) -> Result<()>;

    /// Request closure. Must be idempotent.
    fn close(&self);
}
