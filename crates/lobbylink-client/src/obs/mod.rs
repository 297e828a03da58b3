//! Lightweight in-process metrics (no exporter dependency).
//!
//! Counters are stored as atomics and rendered on demand in Prometheus text
//! format; exposing them is left to the embedding application.

pub mod metrics;

pub use metrics::SessionMetrics;
