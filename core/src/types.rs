use std::io;
use thiserror::Error;

use crate::{
    client::TransportError,
    compression::CompressionError,
    recovery::StoreError,
};

/// Unified crate error covering I/O, configuration, compression, replay storage and transport.
/// - `From<T>` impls enable `?` across layers.
/// - Protocol writes never produce this type; they report failure as `false`.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("telemetry export error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    #[error("sequence store error: {0}")]
    Store(#[from] StoreError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
