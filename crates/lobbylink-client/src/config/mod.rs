//! Client config loader (strict parsing).

pub mod schema;

use std::fs;

use lobbylink_core::error::{LobbyError, Result};

pub use schema::{ClientConfig, CredentialsSection, LobbySection, LoggingSection, SessionSection};

/// Environment variable overriding `credentials.client_id`.
pub const ENV_CLIENT_ID: &str = "LOBBYLINK_CLIENT_ID";
/// Environment variable overriding `credentials.client_secret`.
pub const ENV_CLIENT_SECRET: &str = "LOBBYLINK_CLIENT_SECRET";

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| LobbyError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let mut cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| LobbyError::BadRequest(format!("invalid yaml: {e}")))?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    cfg.validate()?;
    Ok(cfg)
}

/// Replace credentials with values from the environment, when present.
///
/// `lookup` is the key-value source (normally `std::env::var`).
pub fn apply_env_overrides<F>(cfg: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(id) = lookup(ENV_CLIENT_ID) {
        cfg.credentials.client_id = id;
    }
    if let Some(secret) = lookup(ENV_CLIENT_SECRET) {
        cfg.credentials.client_secret = secret;
    }
}
