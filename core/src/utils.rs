/// CRC32 of a byte slice; guards persisted sequence-log lines.
pub fn compute_checksum(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Integer prefix of `raw`, mirroring lenient header parsing: leading
/// whitespace and one sign are allowed, trailing garbage is ignored.
/// Returns `None` when no digit follows.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Value of the first query parameter called `name`, if present.
/// A bare `?name` yields `Some("")`.
pub fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let query = url.split_once('?')?.1;
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == name).then_some(value)
    })
}

/// Append `key=value` to a URL, keeping any fragment last.
pub fn append_query(url: &str, key: &str, value: &str) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let joiner = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };
    let mut out = format!("{base}{joiner}{key}={value}");
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Escape text for use inside a double-quoted markup attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_follows_lenient_parse() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7abc"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn query_param_lookup() {
        assert_eq!(query_param("/s?_SSE_LEGACY=3", "_SSE_LEGACY"), Some("3"));
        assert_eq!(query_param("/s?a=1&_SSE_LEGACY", "_SSE_LEGACY"), Some(""));
        assert_eq!(query_param("/s?a=1#_SSE_LEGACY=1", "_SSE_LEGACY"), None);
        assert_eq!(query_param("/s", "_SSE_LEGACY"), None);
    }

    #[test]
    fn append_query_picks_joiner() {
        assert_eq!(append_query("/s", "k", "1"), "/s?k=1");
        assert_eq!(append_query("/s?a=b", "k", "1"), "/s?a=b&k=1");
        assert_eq!(append_query("/s?", "k", "1"), "/s?k=1");
        assert_eq!(append_query("/s#top", "k", "1"), "/s?k=1#top");
    }

    #[test]
    fn attribute_escaping() {
        assert_eq!(escape_attribute(r#"/s?a=1&b="x""#), "/s?a=1&amp;b=&quot;x&quot;");
    }
}
