//! compression/types.rs
//! Coding identifiers, codec traits and errors.
use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::compression::constants::coding_tokens;

/// Content coding applied to a whole connection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentCoding {
    #[default]
    Identity,
    Gzip,
    Deflate,
    DeflateRaw,
}

impl ContentCoding {
    pub const fn token(self) -> &'static str {
        match self {
            ContentCoding::Identity   => coding_tokens::IDENTITY,
            ContentCoding::Gzip       => coding_tokens::GZIP,
            ContentCoding::Deflate    => coding_tokens::DEFLATE,
            ContentCoding::DeflateRaw => coding_tokens::DEFLATE_RAW,
        }
    }

    /// Case-insensitive token lookup.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        [
            ContentCoding::Identity,
            ContentCoding::Gzip,
            ContentCoding::Deflate,
            ContentCoding::DeflateRaw,
        ]
        .into_iter()
        .find(|c| c.token().eq_ignore_ascii_case(token))
    }

    #[inline]
    pub const fn is_identity(self) -> bool {
        matches!(self, ContentCoding::Identity)
    }
}

impl fmt::Display for ContentCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("unsupported content coding: {0}")]
    UnsupportedCoding(ContentCoding),
    #[error("codec {codec} process failed: {msg}")]
    CodecProcessFailed { codec: &'static str, msg: String },
    #[error("codec {codec} already finished")]
    Finished { codec: &'static str },
}

impl CompressionError {
    pub(crate) fn process(coding: ContentCoding, err: std::io::Error) -> Self {
        CompressionError::CodecProcessFailed { codec: coding.token(), msg: err.to_string() }
    }
}

// Require Send so a compressed sink can move with its connection.
pub trait Compressor: Send {
    /// Compress one chunk and sync-flush; output is appended to `out`.
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
    /// Write the stream trailer. Further chunks are rejected.
    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError>;
    fn coding(&self) -> ContentCoding;
}

pub trait Decompressor: Send {
    /// Decompress one chunk of a continuous stream; output is appended to `out`.
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
    fn coding(&self) -> ContentCoding;
}
