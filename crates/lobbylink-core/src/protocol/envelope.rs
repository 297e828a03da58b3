//! Action envelope (the JSON body of every frame).
//!
//! Field names follow the lobby server's JSON contract
//! (`clientID`, `action`, `payLoadData`, `requestId`); `payLoadData` holds an
//! opaque JSON string that this layer never interprets.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LobbyError, Result};

/// Purpose tag of an envelope. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    #[default]
    None,
    Database,
    TextChat,
    FindPlayer,
    #[serde(rename = "REGISTER_PLAYER_INTO_LOBBY")]
    RegisterPlayerInLobby,
    RequestStatus,
}

impl ActionKind {
    /// Wire name of the action (also used as a metric label).
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::None => "NONE",
            ActionKind::Database => "DATABASE",
            ActionKind::TextChat => "TEXT_CHAT",
            ActionKind::FindPlayer => "FIND_PLAYER",
            ActionKind::RegisterPlayerInLobby => "REGISTER_PLAYER_INTO_LOBBY",
            ActionKind::RequestStatus => "REQUEST_STATUS",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Correlation token for one outbound envelope (UUID v4, hyphenated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Fresh random id. Never reused across sends.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn empty() -> Self {
        Self(String::new())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logical message carried in a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    #[serde(rename = "clientID", default)]
    pub client_id: String,
    #[serde(default)]
    pub action: ActionKind,
    #[serde(rename = "payLoadData", default)]
    pub payload: String,
    #[serde(rename = "requestId", default = "RequestId::empty")]
    pub request_id: RequestId,
}

impl ActionEnvelope {
    /// Build an envelope with a freshly generated request id.
    pub fn new(action: ActionKind, client_id: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            action,
            payload: payload.into(),
            request_id: RequestId::generate(),
        }
    }

    /// Serialize to the JSON body placed on the wire.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| LobbyError::BadRequest(format!("envelope encode failed: {e}")))
    }

    /// Parse a JSON body taken off the wire.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| LobbyError::BadRequest(format!("invalid envelope json: {e}")))
    }
}
