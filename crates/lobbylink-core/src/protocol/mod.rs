//! Lobby protocol modules.
//!
//! - `signer`: HMAC-SHA256 over `client_id + timestamp + json_body`.
//! - `frame`: positional wire codec (`id || digits || {json} || hex`).
//! - `envelope`: the action envelope carried as the JSON body.
//! - `payload`: chat / database payload contracts carried inside envelopes.
//!
//! All parsers are panic-free: malformed input is reported as `LobbyError`
//! instead of panicking or slicing past a char boundary.

pub mod envelope;
pub mod frame;
pub mod payload;
pub mod signer;
