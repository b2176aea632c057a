//! telemetry/snapshot.rs
//! Immutable view of one connection's counters, exportable as JSON.

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::compression::ContentCoding;
use crate::framing::Dialect;
use crate::telemetry::counters::StreamCounters;
use crate::types::StreamError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSnapshot {
    pub dialect: Dialect,
    pub coding: ContentCoding,
    /// Next sequence number the encoder would assign.
    pub sequence: u64,
    pub counters: StreamCounters,
    /// Bytes handed to the raw sink (after compression).
    pub bytes_wire: u64,
    /// `bytes_wire / bytes_framed`, 0 when nothing was written.
    pub compression_ratio: f64,
    pub elapsed: Duration,
}

impl StreamSnapshot {
    pub fn new(
        dialect: Dialect,
        coding: ContentCoding,
        sequence: u64,
        counters: &StreamCounters,
        bytes_wire: u64,
        elapsed: Duration,
    ) -> Self {
        let compression_ratio = if counters.bytes_framed > 0 {
            bytes_wire as f64 / counters.bytes_framed as f64
        } else {
            0.0
        };

        Self {
            dialect,
            coding,
            sequence,
            counters: counters.clone(),
            bytes_wire,
            compression_ratio,
            elapsed,
        }
    }

    pub fn to_json(&self) -> Result<String, StreamError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn throughput_bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.counters.bytes_framed as f64 / secs
        } else {
            0.0
        }
    }
}
