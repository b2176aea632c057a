//! HTTP `deflate` (zlib wrapper) via flate2 with streaming enc/dec.

use std::io::Write;
use flate2::write::{ZlibDecoder, ZlibEncoder};

use crate::compression::codecs::flate_level;
use crate::compression::types::{Compressor, Decompressor, CompressionError, ContentCoding};

const CODING: ContentCoding = ContentCoding::Deflate;

pub struct DeflateCompressor {
    enc: Option<ZlibEncoder<Vec<u8>>>,
}

impl DeflateCompressor {
    pub fn new(level: u32) -> Self {
        Self { enc: Some(ZlibEncoder::new(Vec::new(), flate_level(level))) }
    }
}

impl Compressor for DeflateCompressor {
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let enc = self.enc.as_mut().ok_or(CompressionError::Finished { codec: CODING.token() })?;
        enc.write_all(input).map_err(|e| CompressionError::process(CODING, e))?;
        // Sync flush: everything written so far becomes decodable.
        enc.flush().map_err(|e| CompressionError::process(CODING, e))?;
        out.append(enc.get_mut());
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let enc = self.enc.take().ok_or(CompressionError::Finished { codec: CODING.token() })?;
        let tail = enc.finish().map_err(|e| CompressionError::process(CODING, e))?;
        out.extend_from_slice(&tail);
        Ok(())
    }

    fn coding(&self) -> ContentCoding {
        CODING
    }
}

pub struct DeflateDecompressor {
    dec: ZlibDecoder<Vec<u8>>,
}

impl DeflateDecompressor {
    pub fn new() -> Self {
        Self { dec: ZlibDecoder::new(Vec::new()) }
    }
}

impl Default for DeflateDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Decompressor for DeflateDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        self.dec.write_all(input).map_err(|e| CompressionError::process(CODING, e))?;
        self.dec.flush().map_err(|e| CompressionError::process(CODING, e))?;
        out.append(self.dec.get_mut());
        Ok(())
    }

    fn coding(&self) -> ContentCoding {
        CODING
    }
}
