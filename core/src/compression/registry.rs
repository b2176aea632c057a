//! compression/registry.rs
//! Codec registry and factory functions.

use crate::compression::codecs::{
    DeflateCompressor, DeflateDecompressor, DeflateRawCompressor, DeflateRawDecompressor,
    GzipCompressor, GzipDecompressor, IdentityCodec,
};
use crate::compression::types::{CompressionError, Compressor, ContentCoding, Decompressor};
use crate::constants::DEFAULT_COMPRESSION_LEVEL;

pub struct CodecInfo {
    pub name: &'static str,
    pub compresses: bool,
    pub default_level: u32,
}

pub fn resolve(coding: ContentCoding) -> CodecInfo {
    match coding {
        ContentCoding::Identity =>
            CodecInfo { name: coding.token(), compresses: false, default_level: 0 },
        ContentCoding::Gzip | ContentCoding::Deflate | ContentCoding::DeflateRaw =>
            CodecInfo { name: coding.token(), compresses: true, default_level: DEFAULT_COMPRESSION_LEVEL },
    }
}

/// Build a compressor. Identity is rejected: identity connections write to the sink unwrapped.
pub fn create_compressor(coding: ContentCoding, level: Option<u32>)
    -> Result<Box<dyn Compressor>, CompressionError>
{
    let level = level.unwrap_or(resolve(coding).default_level);
    match coding {
        ContentCoding::Gzip => Ok(Box::new(GzipCompressor::new(level))),
        ContentCoding::Deflate => Ok(Box::new(DeflateCompressor::new(level))),
        ContentCoding::DeflateRaw => Ok(Box::new(DeflateRawCompressor::new(level))),
        ContentCoding::Identity => Err(CompressionError::UnsupportedCoding(coding)),
    }
}

pub fn create_decompressor(coding: ContentCoding) -> Box<dyn Decompressor> {
    match coding {
        ContentCoding::Identity => Box::new(IdentityCodec::new()),
        ContentCoding::Gzip => Box::new(GzipDecompressor::new()),
        ContentCoding::Deflate => Box::new(DeflateDecompressor::new()),
        ContentCoding::DeflateRaw => Box::new(DeflateRawDecompressor::new()),
    }
}
