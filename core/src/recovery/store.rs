use std::io;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sequence log I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt sequence log line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
}

/// Payload of one numbered message, as persisted for replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFrame {
    pub sequence: u64,
    /// Concatenated `data` frames of the message, without the `id` frame.
    pub payload: String,
    pub stored_at: DateTime<Utc>,
}

impl StoredFrame {
    pub fn new(sequence: u64, payload: impl Into<String>) -> Self {
        Self { sequence, payload: payload.into(), stored_at: Utc::now() }
    }
}

/// Write side of replay persistence, attached to an encoder.
pub trait SequenceStore: Send + Sync {
    fn set(&self, sequence: u64, payload: &str) -> Result<(), StoreError>;
}

/// Read side of replay persistence.
pub trait ReplaySource {
    /// Every stored frame with a sequence strictly greater than `last`, ascending.
    fn entries_after(&self, last: u64) -> Vec<StoredFrame>;
}
