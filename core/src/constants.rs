//! Protocol constants shared by the encoder and the transport.

/// Content type for the standard dialect.
pub const CONTENT_TYPE_STANDARD: &str = "text/event-stream";
/// Content type for the legacy (DOM event stream) dialect.
pub const CONTENT_TYPE_LEGACY: &str = "text/x-dom-event-stream";

/// Query marker appended by legacy clients; its presence selects the legacy dialect.
pub const LEGACY_QUERY_PARAM: &str = "_SSE_LEGACY";

/// Request/response header names.
pub mod headers {
    pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
    pub const CACHE_CONTROL: &str = "Cache-Control";
    pub const CONNECTION: &str = "Connection";
    pub const CONTENT_ENCODING: &str = "Content-Encoding";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const LAST_EVENT_ID: &str = "Last-Event-ID";
    pub const TRANSFER_ENCODING: &str = "Transfer-Encoding";
    pub const USER_AGENT: &str = "User-Agent";
    pub const VARY: &str = "Vary";
}

/// Event names observed on connection handles.
pub mod events {
    /// Standard message event.
    pub const MESSAGE: &str = "message";
    /// Custom event fired by the legacy event-source element.
    pub const LEGACY: &str = "sse";
    pub const OPEN: &str = "open";
    pub const ERROR: &str = "error";
    pub const CLOSE: &str = "close";
}

/// Status written by `accept`.
pub const STATUS_OK: u16 = 200;

/// Default flate level (balanced).
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Default number of frames kept by the in-memory sequence store.
pub const DEFAULT_STORE_CAPACITY: usize = 1024;
