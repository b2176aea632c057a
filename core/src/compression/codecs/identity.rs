//! codecs/identity.rs
//! Pass-through decoder for responses without a content coding.
//! Identity connections never get a compressor; the encoder writes to the sink unwrapped.

use crate::compression::types::{CompressionError, ContentCoding, Decompressor};

#[derive(Debug, Default)]
pub struct IdentityCodec;

impl IdentityCodec {
    pub fn new() -> Self { Self }
}

impl Decompressor for IdentityCodec {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        out.extend_from_slice(input);
        Ok(())
    }
    fn coding(&self) -> ContentCoding {
        ContentCoding::Identity
    }
}
