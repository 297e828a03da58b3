//! Lobby protocol session.
//!
//! Outbound: envelope -> JSON -> HMAC signature -> positional frame -> transport.
//! Inbound: frame -> inbound policy (id, signature, freshness) -> envelope -> dispatcher.
//!
//! Concurrency:
//! - `state` guards the lifecycle and is never held across an `.await`
//! - `send_lock` serializes encode-and-send so frames leave in call order

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use lobbylink_core::error::{LobbyError, Result};
use lobbylink_core::protocol::envelope::{ActionEnvelope, ActionKind, RequestId};
use lobbylink_core::protocol::frame;
use lobbylink_core::protocol::payload::{to_payload, ChatMessage, DbRequest};
use lobbylink_core::protocol::signer;
use lobbylink_core::ClientCredentials;

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::obs::SessionMetrics;
use crate::policy::{InboundPolicy, PolicyDecision};
use crate::transport::{Transport, TransportEvent};

use super::state::SessionState;

pub struct LobbySession<T: Transport> {
    credentials: ClientCredentials,
    transport: T,
    dispatcher: Arc<Dispatcher>,
    policy: InboundPolicy,
    state: Mutex<SessionState>,
    send_lock: Mutex<()>,
    metrics: Arc<SessionMetrics>,
}

impl<T: Transport> LobbySession<T> {
    pub fn new(credentials: ClientCredentials, transport: T, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            credentials,
            transport,
            dispatcher,
            policy: InboundPolicy::default(),
            state: Mutex::new(SessionState::Disconnected),
            send_lock: Mutex::new(()),
            metrics: Arc::new(SessionMetrics::default()),
        }
    }

    /// Session using the credentials and freshness window from `cfg`.
    pub fn from_config(cfg: &ClientConfig, transport: T, dispatcher: Arc<Dispatcher>) -> Result<Self> {
        let credentials = cfg.credentials.to_credentials()?;
        Ok(Self::new(credentials, transport, dispatcher)
            .with_freshness_window(cfg.session.freshness_window()))
    }

    /// `None` accepts inbound frames of any age.
    pub fn with_freshness_window(mut self, window: Option<Duration>) -> Self {
        self.policy = InboundPolicy::new(window);
        self
    }

    pub fn state(&self) -> SessionState {
        *self.lock_state()
    }

    pub fn metrics(&self) -> Arc<SessionMetrics> {
        self.metrics.clone()
    }

    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    // --------------------
    // Lifecycle
    // --------------------

    /// Start connecting. Only valid from `Disconnected`.
    pub fn connect(&self, url: &str) -> Result<()> {
        let mut state = self.lock_state();
        if *state != SessionState::Disconnected {
            return Err(LobbyError::InvalidState(format!("connect while {}", *state)));
        }
        *state = SessionState::Connecting;

        if let Err(e) = self.transport.connect(url) {
            tracing::error!(error = %e, %url, "transport failed to start");
            *state = SessionState::Closed;
            return Err(e);
        }
        tracing::info!(%url, client_id = %self.credentials.client_id(), "connecting to lobby");
        Ok(())
    }

    pub fn on_connected(&self) {
        let mut state = self.lock_state();
        if *state == SessionState::Connecting {
            *state = SessionState::Connected;
            tracing::info!("lobby connection established");
        } else {
            tracing::debug!(state = %*state, "ignoring connected event");
        }
    }

    pub fn on_connection_error(&self, reason: &str) {
        tracing::error!(%reason, "lobby connection error");
        self.close();
    }

    pub fn on_closed(&self, status_code: u16, reason: &str, was_clean: bool) {
        tracing::info!(status_code, %reason, was_clean, "lobby connection closed");
        self.close();
    }

    /// Close the session. Safe to call any number of times.
    pub fn close(&self) {
        let previous = {
            let mut state = self.lock_state();
            std::mem::replace(&mut *state, SessionState::Closed)
        };
        if previous.is_terminal() {
            return;
        }
        self.transport.close();
        tracing::debug!(from = %previous, "session closed");
    }

    /// Route one transport event to its handler.
    ///
    /// Returns the inbound rejection, if any, for a `Message` event.
    pub async fn handle_event(&self, event: TransportEvent) -> Result<()> {
        match event {
            TransportEvent::Connected => self.on_connected(),
            TransportEvent::ConnectionError(reason) => self.on_connection_error(&reason),
            TransportEvent::Message(text) => {
                self.on_message(&text).await?;
            }
            TransportEvent::Closed {
                status_code,
                reason,
                was_clean,
            } => self.on_closed(status_code, &reason, was_clean),
        }
        Ok(())
    }

    // --------------------
    // Outbound
    // --------------------

    /// Sign, frame and send one envelope under a freshly generated request id.
    ///
    /// Any request id already on `env` is replaced; the id actually sent is returned.
    pub fn send_envelope(&self, env: &ActionEnvelope) -> Result<RequestId> {
        let _guard = self.send_lock.lock().unwrap_or_else(|p| p.into_inner());

        let state = self.state();
        if !state.can_send() {
            let err = LobbyError::TransportUnavailable(format!("session is {state}"));
            self.metrics.send_failures.inc(&[("code", err.code().as_str())]);
            return Err(err);
        }

        let env = ActionEnvelope {
            request_id: RequestId::generate(),
            ..env.clone()
        };
        let client_id = self.credentials.client_id();
        let body = env.to_json()?;
        let timestamp = now_millis();
        let signature = signer::sign(
            self.credentials.client_secret(),
            &signer::signing_input(client_id, timestamp, &body),
        );
        let wire = frame::encode(client_id, timestamp, &body, &signature)?;

        tracing::debug!(
            action = %env.action,
            request_id = %env.request_id,
            %signature,
            frame = %wire,
            "sending frame"
        );

        if let Err(e) = self.transport.send(wire) {
            self.metrics.send_failures.inc(&[("code", e.code().as_str())]);
            return Err(e);
        }
        self.metrics.frames_sent.inc(&[("action", env.action.as_str())]);
        Ok(env.request_id)
    }

    /// Send `payload` under `kind`.
    pub fn send_action(
        &self,
        kind: ActionKind,
        client_id: impl Into<String>,
        payload: impl Into<String>,
    ) -> Result<RequestId> {
        self.send_envelope(&ActionEnvelope::new(kind, client_id, payload))
    }

    pub fn send_chat(&self, sender_id: &str, message: &str, recipient_id: &str) -> Result<RequestId> {
        let chat = ChatMessage {
            sender_player_id: sender_id.to_owned(),
            message: message.to_owned(),
            recipient_player_id: recipient_id.to_owned(),
        };
        self.send_action(ActionKind::TextChat, sender_id, to_payload(&chat)?)
    }

    pub fn send_db_request(&self, request: &DbRequest) -> Result<RequestId> {
        self.send_action(
            ActionKind::Database,
            request.sender_player_id.as_str(),
            to_payload(request)?,
        )
    }

    pub fn register_player(&self, player_id: &str) -> Result<RequestId> {
        self.send_action(ActionKind::RegisterPlayerInLobby, player_id, String::new())
    }

    // --------------------
    // Inbound
    // --------------------

    /// Validate and dispatch one inbound text frame.
    ///
    /// Framing, client id, signature and freshness failures close the session.
    /// Handler failures are logged and counted; the envelope is still returned.
    pub async fn on_message(&self, raw: &str) -> Result<ActionEnvelope> {
        let state = self.state();
        if !state.can_send() {
            return Err(LobbyError::InvalidState(format!("message while {state}")));
        }

        let wf = match self.policy.evaluate(&self.credentials, raw, now_millis()) {
            PolicyDecision::Pass(wf) => wf,
            PolicyDecision::Close { code, error } => {
                tracing::warn!(code = code.as_str(), error = %error, "rejecting inbound frame");
                self.metrics.inbound_rejections.inc(&[("code", code.as_str())]);
                self.close();
                return Err(error);
            }
        };

        tracing::debug!(timestamp = %wf.timestamp, body = %wf.json_body, "received frame");

        let env = match ActionEnvelope::from_json(&wf.json_body) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(error = %e, "authenticated frame carries no valid envelope");
                self.metrics.inbound_rejections.inc(&[("code", e.code().as_str())]);
                return Err(e);
            }
        };

        let action = env.action.as_str();
        self.metrics.frames_received.inc(&[("action", action)]);

        let started = Instant::now();
        let outcome = self.dispatcher.dispatch(env.clone()).await;
        self.metrics
            .dispatch_duration
            .observe(&[("action", action)], started.elapsed());

        if let Err(e) = outcome {
            tracing::warn!(
                action,
                request_id = %env.request_id,
                code = e.code().as_str(),
                error = %e,
                "handler failed"
            );
            self.metrics.handler_errors.inc(&[("action", action)]);
        }
        Ok(env)
    }
}

impl<T: Transport> Drop for LobbySession<T> {
    fn drop(&mut self) {
        self.close();
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
