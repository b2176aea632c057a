/// Content-coding tokens as they appear in `Accept-Encoding` / `Content-Encoding`.
pub mod coding_tokens {
    pub const IDENTITY: &str    = "identity";
    pub const GZIP: &str        = "gzip";
    pub const DEFLATE: &str     = "deflate";
    pub const DEFLATE_RAW: &str = "deflate-raw";
    pub const WILDCARD: &str    = "*";
}

/// Default server preference when q-values tie.
pub const DEFAULT_PREFERENCE: &[crate::compression::ContentCoding] = &[
    crate::compression::ContentCoding::Gzip,
    crate::compression::ContentCoding::Deflate,
    crate::compression::ContentCoding::DeflateRaw,
];

/// Highest flate level accepted; larger values fall back to the default.
pub const MAX_LEVEL: u32 = 9;
