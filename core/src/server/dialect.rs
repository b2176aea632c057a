//! Per-connection dialect detection.

use crate::constants::{headers, LEGACY_QUERY_PARAM};
use crate::framing::Dialect;
use crate::server::request::Request;
use crate::utils::query_param;

/// Legacy when the request carries the legacy query marker or comes from an
/// early Opera 9 release; standard otherwise.
pub fn detect_dialect<R: Request + ?Sized>(request: &R) -> Dialect {
    let marked = query_param(request.url(), LEGACY_QUERY_PARAM).is_some();
    let early_opera = request.header(headers::USER_AGENT).is_some_and(is_early_opera);
    if marked || early_opera {
        Dialect::Legacy
    } else {
        Dialect::Standard
    }
}

/// Opera 9.0x-9.6x user agents, in either the native (`Opera/9.xx`) or the
/// masquerading (`... Opera 9.xx`) form. `Opera/9.80` is the frozen token of
/// Opera 10+ and does not match.
pub fn is_early_opera(user_agent: &str) -> bool {
    ["Opera/9.", "Opera 9."].iter().any(|marker| {
        user_agent.match_indices(marker).any(|(at, m)| {
            let minor: String = user_agent[at + m.len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            !minor.is_empty() && minor.parse::<u32>().map_or(false, |v| v < 80)
        })
    })
}
