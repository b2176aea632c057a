//! telemetry/mod.rs
//! Per-connection counters and immutable snapshots.
//!
//! Counters are owned by one encoder and never shared, so no locks or atomics.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
