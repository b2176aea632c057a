//! Legacy connection markers and markup.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::LEGACY_QUERY_PARAM;
use crate::utils::{append_query, escape_attribute};

/// Attribute cleared when a legacy element is torn down.
pub const SRC_ATTRIBUTE: &str = "src";

static NEXT_MARKER: AtomicU64 = AtomicU64::new(1);

/// Process-unique id tying a legacy element to its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegacyMarker(u64);

impl LegacyMarker {
    pub fn mint() -> Self {
        Self(NEXT_MARKER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Element id the marker is mounted under.
    pub fn element_id(self) -> String {
        format!("{}{}", LEGACY_QUERY_PARAM, self.0)
    }

    /// `url` with `_SSE_LEGACY=<n>` appended, which the encoder recognises.
    pub fn apply(self, url: &str) -> String {
        append_query(url, LEGACY_QUERY_PARAM, &self.0.to_string())
    }

    /// Container markup declaring the event-source element.
    pub fn markup(self, url: &str) -> String {
        format!(
            r#"<event-source src="{}" id="{}"></event-source>"#,
            escape_attribute(url),
            self.element_id(),
        )
    }
}
