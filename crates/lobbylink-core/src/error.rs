//! Shared error type across lobbylink crates.

use thiserror::Error;

/// Stable error codes (used in logs, metrics labels and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Transport could not be started, or is not connected.
    TransportUnavailable,
    /// Inbound frame could not be split into its four parts.
    MalformedFrame,
    /// HMAC did not match the locally derived signature.
    SignatureMismatch,
    /// Frame timestamp is outside the accepted window.
    StaleFrame,
    /// Credentials failed validation.
    InvalidCredentials,
    /// Operation not valid in the current session state.
    InvalidState,
    /// Invalid input (JSON, config).
    BadRequest,
    /// Internal fault.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::TransportUnavailable => "TRANSPORT_UNAVAILABLE",
            ErrorCode::MalformedFrame => "MALFORMED_FRAME",
            ErrorCode::SignatureMismatch => "SIGNATURE_MISMATCH",
            ErrorCode::StaleFrame => "STALE_FRAME",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LobbyError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum LobbyError {
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("stale frame: timestamp {timestamp} is {skew_ms}ms away from local clock")]
    StaleFrame { timestamp: u64, skew_ms: u64 },
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl LobbyError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            LobbyError::TransportUnavailable(_) => ErrorCode::TransportUnavailable,
            LobbyError::MalformedFrame(_) => ErrorCode::MalformedFrame,
            LobbyError::SignatureMismatch => ErrorCode::SignatureMismatch,
            LobbyError::StaleFrame { .. } => ErrorCode::StaleFrame,
            LobbyError::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            LobbyError::InvalidState(_) => ErrorCode::InvalidState,
            LobbyError::BadRequest(_) => ErrorCode::BadRequest,
            LobbyError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Whether this error means the peer can no longer be trusted.
    ///
    /// Framing, authentication and freshness failures all fall in this class
    /// and end the session.
    pub fn is_untrusted_peer(&self) -> bool {
        matches!(
            self,
            LobbyError::MalformedFrame(_)
                | LobbyError::SignatureMismatch
                | LobbyError::StaleFrame { .. }
        )
    }
}
