//! LobbyLink client library entry.
//!
//! This crate wires the WebSocket transport, inbound policy, dispatcher and
//! protocol session into a client for the lobby server. It is consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod config;
pub mod dispatch;
pub mod obs;
pub mod policy;
pub mod session;
pub mod transport;
