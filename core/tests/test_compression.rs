// Streaming codecs: every chunk must be decodable as soon as it is written.

#[cfg(test)]
mod tests {
    use eventpush_core::compression::{
        create_compressor, create_decompressor, resolve, CompressionError, ContentCoding,
    };

    const COMPRESSED: [ContentCoding; 3] =
        [ContentCoding::Gzip, ContentCoding::Deflate, ContentCoding::DeflateRaw];

// # ✅ 1. Sync flush: each chunk decodes on arrival

    #[test]
    fn chunks_decode_incrementally() {
        for coding in COMPRESSED {
            let mut enc = create_compressor(coding, None).unwrap();
            let mut dec = create_decompressor(coding);
            assert_eq!(enc.coding(), coding);
            assert_eq!(dec.coding(), coding);

            for chunk in ["data:first\n\n", "id:1\ndata:second\n\n", "retry:500\n\n"] {
                let mut wire = Vec::new();
                enc.compress_chunk(chunk.as_bytes(), &mut wire).unwrap();
                assert!(!wire.is_empty(), "{coding}: flush produced nothing");

                let mut plain = Vec::new();
                dec.decompress_chunk(&wire, &mut plain).unwrap();
                assert_eq!(plain, chunk.as_bytes(), "{coding}: chunk not decodable on arrival");
            }
        }
    }

// # ✅ 2. Trailer after finish, further chunks rejected

    #[test]
    fn finish_closes_stream() {
        for coding in COMPRESSED {
            let mut enc = create_compressor(coding, Some(1)).unwrap();
            let mut wire = Vec::new();
            enc.compress_chunk(b"data:x\n\n", &mut wire).unwrap();
            enc.finish(&mut wire).unwrap();

            let err = enc.compress_chunk(b"late", &mut wire).unwrap_err();
            assert!(matches!(err, CompressionError::Finished { .. }));
            assert!(matches!(enc.finish(&mut wire), Err(CompressionError::Finished { .. })));
        }
    }

// # ✅ 3. gzip output is a standard gzip stream

    #[test]
    fn gzip_is_readable_by_plain_flate2() {
        use std::io::Read;

        let mut enc = create_compressor(ContentCoding::Gzip, None).unwrap();
        let mut wire = Vec::new();
        enc.compress_chunk(b"data:a\n\n", &mut wire).unwrap();
        enc.compress_chunk(b"data:b\n\n", &mut wire).unwrap();
        enc.finish(&mut wire).unwrap();

        let mut out = String::new();
        flate2::read::GzDecoder::new(&wire[..]).read_to_string(&mut out).unwrap();
        assert_eq!(out, "data:a\n\ndata:b\n\n");
    }

// # ✅ 4. Identity

    #[test]
    fn identity_has_no_compressor() {
        assert!(matches!(
            create_compressor(ContentCoding::Identity, None),
            Err(CompressionError::UnsupportedCoding(ContentCoding::Identity))
        ));
        let mut dec = create_decompressor(ContentCoding::Identity);
        let mut out = Vec::new();
        dec.decompress_chunk(b"as-is", &mut out).unwrap();
        assert_eq!(out, b"as-is");
        assert!(!resolve(ContentCoding::Identity).compresses);
        assert!(resolve(ContentCoding::Gzip).compresses);
    }

// # ❌ 5. Corrupt input surfaces as a codec error

    #[test]
    fn garbage_is_rejected() {
        let mut dec = create_decompressor(ContentCoding::Deflate);
        let mut out = Vec::new();
        let err = dec.decompress_chunk(&[0xFF; 16], &mut out).unwrap_err();
        assert!(matches!(err, CompressionError::CodecProcessFailed { codec: "deflate", .. }));
    }

// # ✅ 6. Tokens

    #[test]
    fn tokens_round_trip() {
        for coding in COMPRESSED {
            assert_eq!(ContentCoding::from_token(coding.token()), Some(coding));
        }
        assert_eq!(ContentCoding::from_token(" Deflate-Raw "), Some(ContentCoding::DeflateRaw));
        assert_eq!(ContentCoding::from_token("br"), None);
    }
}
