use std::time::Duration;

use lobbylink_core::error::{ErrorCode, LobbyError, Result};
use lobbylink_core::protocol::frame::{self, WireFrame};
use lobbylink_core::protocol::signer;
use lobbylink_core::ClientCredentials;

/// Decision from policy evaluation.
#[derive(Debug)]
pub enum PolicyDecision {
    /// Authentic, fresh frame.
    Pass(WireFrame),
    /// Peer can no longer be trusted; the connection must be closed.
    Close { code: ErrorCode, error: LobbyError },
}

/// Validation rules for inbound frames.
#[derive(Debug, Clone)]
pub struct InboundPolicy {
    freshness_window: Option<Duration>,
}

impl Default for InboundPolicy {
    fn default() -> Self {
        Self {
            freshness_window: Some(Duration::from_millis(300_000)),
        }
    }
}

impl InboundPolicy {
    /// `None` disables the freshness check.
    pub fn new(freshness_window: Option<Duration>) -> Self {
        Self { freshness_window }
    }

    pub fn freshness_window(&self) -> Option<Duration> {
        self.freshness_window
    }

    /// Evaluate a raw frame against local credentials at local time `now_ms`.
    pub fn evaluate(&self, creds: &ClientCredentials, raw: &str, now_ms: u64) -> PolicyDecision {
        match self.check(creds, raw, now_ms) {
            Ok(wf) => PolicyDecision::Pass(wf),
            Err(error) => PolicyDecision::Close {
                code: error.code(),
                error,
            },
        }
    }

    fn check(&self, creds: &ClientCredentials, raw: &str, now_ms: u64) -> Result<WireFrame> {
        let wf = frame::decode(raw)?;

        if wf.client_id != creds.client_id() {
            return Err(LobbyError::MalformedFrame(format!(
                "unexpected client id {:?}",
                wf.client_id
            )));
        }

        // The expected signature is always derived from the local id and secret.
        let timestamp = wf.timestamp_millis()?;
        let message = signer::signing_input(creds.client_id(), timestamp, &wf.json_body);
        if !signer::verify(creds.client_secret(), &message, &wf.signature) {
            return Err(LobbyError::SignatureMismatch);
        }

        if let Some(window) = self.freshness_window {
            let skew_ms = now_ms.abs_diff(timestamp);
            if u128::from(skew_ms) > window.as_millis() {
                return Err(LobbyError::StaleFrame { timestamp, skew_ms });
            }
        }

        Ok(wf)
    }
}
