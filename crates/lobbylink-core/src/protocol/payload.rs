//! Application payload contracts.
//!
//! These structures are serialized into the envelope's `payLoadData` string.
//! Their meaning belongs to the lobby server's chat and database services;
//! this crate only fixes their JSON shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LobbyError, Result};

/// Direct chat message between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender_player_id: String,
    pub message: String,
    pub recipient_player_id: String,
}

/// Database operation requested through the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbAction {
    #[default]
    None,
    Aggregate,
    DropCollection,
    CreateCollection,
    Find,
    FindWithOptions,
    FindOne,
    FindOneWithOptions,
    InsertOne,
    InsertMany,
    ListDatabases,
    ListCollectionNames,
    ListIndexes,
    CreateIndex,
    DeleteOne,
    DeleteMany,
    GetEstimatedDocumentCount,
    CountDocuments,
    RenameCollection,
    RunCommand,
    ReplaceOne,
    UpdateOne,
    UpdateOneWithOptions,
    UpdateMany,
    UpdateManyWithOptions,
    FindOneAndDelete,
    FindOneAndReplace,
    FindOneAndUpdate,
}

/// Database request. `data`, `filter` and `options` are opaque JSON strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbRequest {
    pub sender_player_id: String,
    pub db_name: String,
    pub collection_name: String,
    pub db_action: DbAction,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub options: String,
}

impl DbRequest {
    pub fn new(
        sender_player_id: impl Into<String>,
        db_name: impl Into<String>,
        collection_name: impl Into<String>,
        db_action: DbAction,
    ) -> Self {
        Self {
            sender_player_id: sender_player_id.into(),
            db_name: db_name.into(),
            collection_name: collection_name.into(),
            db_action,
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

/// Serialize a payload struct to the string stored in `payLoadData`.
pub fn to_payload<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| LobbyError::BadRequest(format!("payload encode failed: {e}")))
}

/// Render a string-keyed map as a JSON object string.
///
/// Handy for building `data` / `filter` / `options` documents from plain maps
/// of strings, numbers, booleans or nested `serde_json::Value`s.
pub fn map_to_json<V: Serialize>(map: &BTreeMap<String, V>) -> Result<String> {
    serde_json::to_string(map).map_err(|e| LobbyError::BadRequest(format!("map encode failed: {e}")))
}
