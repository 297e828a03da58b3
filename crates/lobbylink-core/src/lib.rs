//! lobbylink core: transport-agnostic lobby protocol primitives.
//!
//! This crate defines the wire-level contracts shared by the client runtime
//! and any tooling that needs to produce or check lobby frames: the HMAC
//! signer, the positional frame codec, the action envelope and the payload
//! contracts carried inside it. It carries no transport or runtime
//! dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `LobbyError`/`Result` so a hostile or
//! broken peer can never crash the process through a malformed frame.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod credentials;
pub mod error;
pub mod protocol;

pub use credentials::ClientCredentials;
/// Shared result type.
pub use error::{ErrorCode, LobbyError, Result};
