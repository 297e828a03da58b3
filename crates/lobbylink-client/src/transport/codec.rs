//! Decode-once mapping from socket messages to transport events.
//!
//! - Text frames => `TransportEvent::Message`
//! - Close frames => `TransportEvent::Closed` (clean)
//! - Ping/Pong/Binary/raw frames are not part of the lobby protocol and are
//!   swallowed here (tungstenite answers pings itself)

use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

use super::TransportEvent;

/// Status reported when the stream ends without a close frame.
pub const ABNORMAL_CLOSURE: u16 = 1006;
/// Status reported for a close frame that carries no payload.
pub const NO_STATUS_RECEIVED: u16 = 1005;

pub fn decode(msg: Message) -> Option<TransportEvent> {
    match msg {
        Message::Text(s) => Some(TransportEvent::Message(s)),
        Message::Close(frame) => Some(closed_from(frame)),
        Message::Binary(b) => {
            tracing::debug!(len = b.len(), "ignoring binary frame");
            None
        }
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => None,
    }
}

fn closed_from(frame: Option<CloseFrame<'static>>) -> TransportEvent {
    match frame {
        Some(f) => TransportEvent::Closed {
            status_code: u16::from(f.code),
            reason: f.reason.into_owned(),
            was_clean: true,
        },
        None => TransportEvent::Closed {
            status_code: NO_STATUS_RECEIVED,
            reason: String::new(),
            was_clean: true,
        },
    }
}

/// Event for a stream that ended without a close handshake.
pub fn abnormal_close(reason: impl Into<String>) -> TransportEvent {
    TransportEvent::Closed {
        status_code: ABNORMAL_CLOSURE,
        reason: reason.into(),
        was_clean: false,
    }
}
