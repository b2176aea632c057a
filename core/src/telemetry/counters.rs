//! telemetry/counters.rs
//! Mutable counters collected while a stream encoder writes.
use std::ops::AddAssign;
use serde::{Serialize, Deserialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    pub frames_data: u64,
    pub frames_id: u64,
    pub frames_retry: u64,
    pub frames_legacy: u64,
    pub writes_ok: u64,
    pub writes_failed: u64,
    /// Framed (pre-compression) bytes accepted by the sink.
    pub bytes_framed: u64,
}

impl StreamCounters {
    /// Record `count` data frames of one message.
    pub fn add_data(&mut self, count: usize) {
        self.frames_data += count as u64;
    }

    pub fn add_id(&mut self) {
        self.frames_id += 1;
    }

    pub fn add_retry(&mut self) {
        self.frames_retry += 1;
    }

    pub fn add_legacy(&mut self) {
        self.frames_legacy += 1;
    }

    /// Record the outcome of one flush of `len` framed bytes.
    pub fn record_write(&mut self, ok: bool, len: usize) {
        if ok {
            self.writes_ok += 1;
            self.bytes_framed += len as u64;
        } else {
            self.writes_failed += 1;
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.frames_data + self.frames_id + self.frames_retry + self.frames_legacy
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.frames_data += other.frames_data;
        self.frames_id += other.frames_id;
        self.frames_retry += other.frames_retry;
        self.frames_legacy += other.frames_legacy;

        self.writes_ok += other.writes_ok;
        self.writes_failed += other.writes_failed;
        self.bytes_framed += other.bytes_framed;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
