//! Inbound validation policy.
//!
//! Every inbound text frame passes through [`InboundPolicy`] before anything
//! downstream sees it. Framing, authentication and freshness failures are
//! reported as untrusted-peer errors, which the session answers by closing.

pub mod inbound;

pub use inbound::{InboundPolicy, PolicyDecision};
