//! Configuration for encoders and transports.
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! Example `eventpush.toml`:
//!
//! ```toml
//! [encoder]
//! numbering = true
//! compression = true
//! compression_level = 6
//! codings = ["gzip", "deflate"]
//!
//! [transport]
//! reconnect = false
//! ```

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::compression::{ContentCoding, DEFAULT_PREFERENCE};
use crate::constants::DEFAULT_COMPRESSION_LEVEL;
use crate::types::StreamError;

/// Server-side stream encoder options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Attach an `id` frame and advance the sequence on every standard write.
    pub numbering: bool,
    /// Skip the automatic `accept` at construction.
    pub manual: bool,
    /// Allow compression at all. When false the peer's `Accept-Encoding` is ignored.
    pub compression: bool,
    /// flate level, 0..=9.
    pub compression_level: u32,
    /// Offered codings in preference order.
    pub codings: Vec<ContentCoding>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            numbering: false,
            manual: false,
            compression: true,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            codings: DEFAULT_PREFERENCE.to_vec(),
        }
    }
}

impl EncoderConfig {
    pub fn numbered() -> Self {
        Self { numbering: true, ..Self::default() }
    }
}

/// Client-side transport options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// When false the transport reports `noreconnect`; callers decide what to do with it.
    pub reconnect: bool,
    /// Do not open at construction; wait for an explicit `open`.
    pub manual: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { reconnect: true, manual: false }
    }
}

/// File-level configuration: one table per endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    pub encoder: EncoderConfig,
    pub transport: TransportConfig,
}

impl PushConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, StreamError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, StreamError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
