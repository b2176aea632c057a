//! `Last-Event-ID` resume state.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::utils::parse_leading_int;

/// Resume id supplied by a reconnecting peer.
///
/// Non-numeric input is kept as-is rather than rejected; the surrounding
/// application decides what an invalid resume point means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastEventId {
    Valid(i64),
    Invalid(String),
}

impl LastEventId {
    /// Sequence to resume after, when the id is a usable non-negative integer.
    pub fn sequence(&self) -> Option<u64> {
        match self {
            LastEventId::Valid(v) => u64::try_from(*v).ok(),
            LastEventId::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, LastEventId::Valid(_))
    }
}

impl fmt::Display for LastEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastEventId::Valid(v) => write!(f, "{}", v),
            LastEventId::Invalid(raw) => write!(f, "NaN({:?})", raw),
        }
    }
}

/// Parse the integer prefix of a `Last-Event-ID` header value.
pub fn parse_last_event_id(raw: &str) -> LastEventId {
    match parse_leading_int(raw) {
        Some(v) => LastEventId::Valid(v),
        None => LastEventId::Invalid(raw.to_owned()),
    }
}
