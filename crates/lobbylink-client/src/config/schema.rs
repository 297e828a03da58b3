use serde::Deserialize;
use std::time::Duration;

use lobbylink_core::error::{LobbyError, Result};
use lobbylink_core::ClientCredentials;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    pub lobby: LobbySection,

    pub credentials: CredentialsSection,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LobbyError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.lobby.validate()?;
        self.credentials.to_credentials()?;
        self.session.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LobbySection {
    pub url: String,
}

impl LobbySection {
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(LobbyError::BadRequest(
                "lobby.url must start with ws:// or wss://".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    pub client_id: String,
    pub client_secret: String,
}

impl CredentialsSection {
    pub fn to_credentials(&self) -> Result<ClientCredentials> {
        ClientCredentials::new(self.client_id.clone(), self.client_secret.clone())
    }
}

impl std::fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsSection")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    /// Max distance between a frame's timestamp and the local clock. 0 disables.
    #[serde(default = "default_freshness_window_ms")]
    pub freshness_window_ms: u64,

    /// Capacity of the outbound frame queue feeding the socket writer.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,

    /// Wait for the peer's close frame after a local close, in milliseconds.
    #[serde(default = "default_close_timeout_ms")]
    pub close_timeout_ms: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            freshness_window_ms: default_freshness_window_ms(),
            outbound_queue: default_outbound_queue(),
            close_timeout_ms: default_close_timeout_ms(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if self.freshness_window_ms > 3_600_000 {
            return Err(LobbyError::BadRequest(
                "session.freshness_window_ms must be at most 3600000".into(),
            ));
        }
        if !(1..=65_536).contains(&self.outbound_queue) {
            return Err(LobbyError::BadRequest(
                "session.outbound_queue must be between 1 and 65536".into(),
            ));
        }
        if !(1..=60_000).contains(&self.close_timeout_ms) {
            return Err(LobbyError::BadRequest(
                "session.close_timeout_ms must be between 1 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn close_timeout(&self) -> Duration {
        Duration::from_millis(self.close_timeout_ms)
    }

    pub fn freshness_window(&self) -> Option<Duration> {
        match self.freshness_window_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

fn default_freshness_window_ms() -> u64 {
    300_000
}
fn default_outbound_queue() -> usize {
    1024
}

fn default_close_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".into()
}
