//! compression/mod.rs
//! HTTP content-coding negotiation and streaming codecs.
//!
//! Notes:
//! - Compression is chosen once per connection and never renegotiated.
//! - Encoders sync-flush after every chunk so each frame group is decodable on arrival.
//! - Registry resolves a `ContentCoding` to its implementation.

pub mod constants;
pub mod types;
pub mod registry;
pub mod negotiate;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use negotiate::*;
