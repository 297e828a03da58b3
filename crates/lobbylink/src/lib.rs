//! Top-level facade crate for LobbyLink.
//!
//! Re-exports the protocol core and the client library so users can depend on a single crate.

pub mod core {
    pub use lobbylink_core::*;
}

pub mod client {
    pub use lobbylink_client::*;
}
