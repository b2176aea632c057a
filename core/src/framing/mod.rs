//! Wire framing for the event stream.
//!
//! Responsibilities:
//! - Name the two dialects and the protocol keys
//! - Encode one `key:value` line per frame
//! - Decode a byte stream back into dispatched events
//!
//! Non-responsibilities:
//! - Compression
//! - IO
//! - Sequence numbering

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    Dialect,
    DecodedEvent,
    KEY_DATA,
    KEY_EVENT,
    KEY_ID,
    KEY_LEGACY_EVENT,
    KEY_RETRY,
    LEGACY_EVENT_NAME,
};
pub use encode::{format_frame, write_frame, terminate};
pub use decode::EventStreamDecoder;
