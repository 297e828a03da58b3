//! Shared-secret credentials used to sign and verify frames.

use std::fmt;

use crate::error::{LobbyError, Result};
use crate::protocol::frame::CLIENT_ID_LEN;

/// Client id + shared secret.
///
/// Immutable once built. The id is placed verbatim at the head of every
/// frame, so it must be exactly [`CLIENT_ID_LEN`] ASCII characters.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if !client_id.is_ascii() {
            return Err(LobbyError::InvalidCredentials(
                "client_id must be ASCII".into(),
            ));
        }
        if client_id.len() != CLIENT_ID_LEN {
            return Err(LobbyError::InvalidCredentials(format!(
                "client_id must be exactly {CLIENT_ID_LEN} characters (got {})",
                client_id.len()
            )));
        }
        if client_secret.is_empty() {
            return Err(LobbyError::InvalidCredentials(
                "client_secret must not be empty".into(),
            ));
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
