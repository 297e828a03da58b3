use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use lobbylink_core::error::{LobbyError, Result};
use lobbylink_core::protocol::envelope::{ActionEnvelope, ActionKind};

/// Consumer of verified inbound envelopes for one action kind.
///
/// Implementations live outside this crate (chat UI, database layer, ...).
#[async_trait]
pub trait ActionHandler: Send + Sync {
    fn action(&self) -> ActionKind;
    async fn handle(&self, env: ActionEnvelope) -> Result<()>;
}

/// Registry and dispatcher for inbound envelopes, keyed by action kind.
#[derive(Default)]
pub struct Dispatcher {
    handlers: DashMap<ActionKind, Arc<dyn ActionHandler>>,
    fallback: Option<Arc<dyn ActionHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
            fallback: None,
        }
    }

    /// Dispatcher that hands every unclaimed action to `fallback`.
    pub fn with_fallback(fallback: Arc<dyn ActionHandler>) -> Self {
        Self {
            handlers: DashMap::new(),
            fallback: Some(fallback),
        }
    }

    pub fn register(&self, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(handler.action(), handler);
    }

    pub fn registered_actions(&self) -> Vec<ActionKind> {
        self.handlers.iter().map(|e| *e.key()).collect()
    }

    pub async fn dispatch(&self, env: ActionEnvelope) -> Result<()> {
        let action = env.action;
        let handler = match self.handlers.get(&action) {
            Some(h) => h.value().clone(),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| LobbyError::BadRequest(format!("no handler for action: {action}")))?,
        };
        handler.handle(env).await
    }
}
