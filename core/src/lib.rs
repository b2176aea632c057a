//! eventpush-core
//!
//! One-way text event stream over a long-lived HTTP response.
//! Server side frames, compresses and numbers messages; client side hides
//! the standard/legacy delivery split behind one four-channel transport.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

// Wire vocabulary
pub mod compression;
pub mod framing;

// Replay persistence and observability
pub mod recovery;
pub mod telemetry;

// Protocol endpoints
pub mod client;
pub mod server;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::client::{Channel, Platform, Transport, TransportEvent};
    pub use crate::compression::ContentCoding;
    pub use crate::config::{EncoderConfig, PushConfig, TransportConfig};
    pub use crate::framing::Dialect;
    pub use crate::recovery::{MemorySequenceStore, SequenceStore};
    pub use crate::server::{IncomingRequest, ResponseSink, StreamEncoder};
    pub use crate::types::StreamError;
}
