//! Bounded in-memory sequence store.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::constants::DEFAULT_STORE_CAPACITY;
use crate::recovery::store::{ReplaySource, SequenceStore, StoreError, StoredFrame};

/// Ring of the most recent frames, one per sequence. Re-setting a sequence
/// replaces its payload in place; a new sequence evicts the oldest entry at capacity.
#[derive(Debug)]
pub struct MemorySequenceStore {
    frames: Mutex<VecDeque<StoredFrame>>,
    capacity: usize,
}

impl MemorySequenceStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_STORE_CAPACITY))),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn latest_sequence(&self) -> Option<u64> {
        self.lock().back().map(|f| f.sequence)
    }

    pub fn get(&self, sequence: u64) -> Option<StoredFrame> {
        self.lock().iter().find(|f| f.sequence == sequence).cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<StoredFrame>> {
        // The ring is never left half-updated, so a poisoned lock is still usable.
        self.frames.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemorySequenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceStore for MemorySequenceStore {
    fn set(&self, sequence: u64, payload: &str) -> Result<(), StoreError> {
        let mut frames = self.lock();
        if let Some(existing) = frames.iter_mut().find(|f| f.sequence == sequence) {
            *existing = StoredFrame::new(sequence, payload);
            return Ok(());
        }
        while frames.len() >= self.capacity {
            frames.pop_front();
        }
        frames.push_back(StoredFrame::new(sequence, payload));
        Ok(())
    }
}

impl ReplaySource for MemorySequenceStore {
    fn entries_after(&self, last: u64) -> Vec<StoredFrame> {
        let mut out: Vec<StoredFrame> = self
            .lock()
            .iter()
            .filter(|f| f.sequence > last)
            .cloned()
            .collect();
        out.sort_by_key(|f| f.sequence);
        out
    }
}
