use std::fmt;
use serde::{Serialize, Deserialize};

pub const KEY_RETRY: &str = "retry";
pub const KEY_ID: &str = "id";
pub const KEY_DATA: &str = "data";
pub const KEY_EVENT: &str = "event";
/// Legacy clients expect the capitalised field name.
pub const KEY_LEGACY_EVENT: &str = "Event";
/// The only event name a legacy frame ever carries.
pub const LEGACY_EVENT_NAME: &str = "sse";

/// Wire-format variant spoken on one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Standard,
    Legacy,
}

impl Dialect {
    #[inline]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Dialect::Legacy)
    }

    /// Text placed between `key:` and the value.
    #[inline]
    pub const fn separator(self) -> &'static str {
        match self {
            Dialect::Standard => "",
            Dialect::Legacy => " ",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Standard => "standard",
            Dialect::Legacy => "legacy",
        })
    }
}

/// One event dispatched by the decoder at a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    /// Event name (`message` when the block named none).
    pub event: String,
    /// Data lines joined with `\n`, without the trailing newline.
    pub data: String,
    /// Last event id in effect when the event was dispatched.
    pub last_event_id: String,
}
