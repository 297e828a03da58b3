//! Protocol session.
//!
//! A [`LobbySession`] owns one transport connection: it signs and frames
//! outbound envelopes, and validates inbound frames before dispatching them.
//! Transport events are fed to it one at a time by [`run`].

pub mod lobby;
pub mod pump;
pub mod state;

pub use lobby::LobbySession;
pub use pump::run;
pub use state::SessionState;
