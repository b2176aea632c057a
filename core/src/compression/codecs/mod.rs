//! compression/codecs/mod.rs
//! Streaming codecs, one per content coding.

pub mod identity;
pub mod deflate;
pub mod deflate_raw;
pub mod gzip;

pub use identity::*;
pub use deflate::*;
pub use deflate_raw::*;
pub use gzip::*;

use flate2::Compression;

use crate::compression::constants::MAX_LEVEL;

/// Map a numeric level onto flate2, falling back to the default when out of range.
pub(crate) fn flate_level(level: u32) -> Compression {
    match level {
        0..=MAX_LEVEL => Compression::new(level),
        _ => Compression::default(),
    }
}
