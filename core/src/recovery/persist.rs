//! Append-only sequence log on disk.
//!
//! Line format: `SEQ|<sequence>|<rfc3339>|<base64 payload>|<crc32 hex>`.
//! The checksum covers everything before the last `|`.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::recovery::store::{ReplaySource, SequenceStore, StoreError, StoredFrame};
use crate::utils::compute_checksum;

const LINE_TAG: &str = "SEQ";

#[derive(Debug)]
pub struct LogSequenceStore {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl LogSequenceStore {
    /// Open (or create) a log for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, writer: Mutex::new(BufWriter::new(file)) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one frame and flush it to the OS.
    pub fn append(&self, frame: &StoredFrame) -> Result<(), StoreError> {
        let line = format_line(frame);
        let mut writer = self.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Raw lines of a log file, streamed.
    pub fn stream_log(path: impl AsRef<Path>) -> io::Result<impl Iterator<Item = io::Result<String>>> {
        let file = File::open(path)?;
        Ok(BufReader::new(file).lines())
    }

    /// Read every intact frame back, ascending by sequence. A sequence written
    /// more than once keeps its last line. Corrupt lines are skipped and logged.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<StoredFrame>, StoreError> {
        let mut frames = BTreeMap::new();
        for (index, line) in Self::stream_log(path)?.enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match parse_line(&line, index + 1) {
                Ok(frame) => {
                    frames.insert(frame.sequence, frame);
                }
                Err(e) => warn!(error = %e, "skipping sequence log line"),
            }
        }
        Ok(frames.into_values().collect())
    }

    fn lock(&self) -> MutexGuard<'_, BufWriter<File>> {
        self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SequenceStore for LogSequenceStore {
    fn set(&self, sequence: u64, payload: &str) -> Result<(), StoreError> {
        self.append(&StoredFrame::new(sequence, payload))
    }
}

impl ReplaySource for LogSequenceStore {
    fn entries_after(&self, last: u64) -> Vec<StoredFrame> {
        if let Err(e) = self.lock().flush() {
            warn!(error = %e, path = %self.path.display(), "sequence log flush failed before replay");
        }
        match Self::load(&self.path) {
            Ok(frames) => frames.into_iter().filter(|f| f.sequence > last).collect(),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "sequence log unreadable");
                Vec::new()
            }
        }
    }
}

/// Render one log line, newline included.
pub fn format_line(frame: &StoredFrame) -> String {
    let body = format!(
        "{}|{}|{}|{}",
        LINE_TAG,
        frame.sequence,
        frame.stored_at.to_rfc3339(),
        STANDARD.encode(frame.payload.as_bytes()),
    );
    let checksum = compute_checksum(body.as_bytes());
    format!("{}|{:08x}\n", body, checksum)
}

/// Parse and verify one log line (without its newline).
pub fn parse_line(line: &str, line_no: usize) -> Result<StoredFrame, StoreError> {
    let corrupt = |reason: &str| StoreError::Corrupt { line: line_no, reason: reason.to_owned() };

    let (body, checksum) = line.rsplit_once('|').ok_or_else(|| corrupt("missing checksum"))?;
    let expected = u32::from_str_radix(checksum, 16).map_err(|_| corrupt("bad checksum field"))?;
    if compute_checksum(body.as_bytes()) != expected {
        return Err(corrupt("checksum mismatch"));
    }

    let mut parts = body.splitn(4, '|');
    if parts.next() != Some(LINE_TAG) {
        return Err(corrupt("unknown tag"));
    }
    let sequence = parts
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| corrupt("bad sequence"))?;
    let stored_at = parts
        .next()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| corrupt("bad timestamp"))?;
    let payload = parts
        .next()
        .and_then(|s| STANDARD.decode(s).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| corrupt("bad payload"))?;

    Ok(StoredFrame { sequence, payload, stored_at })
}
