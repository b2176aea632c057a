//! compression/negotiate.rs
//! `Accept-Encoding` parsing and content-coding selection.

use crate::compression::constants::coding_tokens;
use crate::compression::types::ContentCoding;

/// One `token[;q=value]` entry of an `Accept-Encoding` header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptEntry<'a> {
    pub token: &'a str,
    pub q: f32,
}

/// Parse an `Accept-Encoding` value. Entries with a malformed or out-of-range
/// q-value are dropped; a missing q-value means 1.
pub fn parse_accept_encoding(header: &str) -> Vec<AcceptEntry<'_>> {
    header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let token = pieces.next()?.trim();
            if token.is_empty() {
                return None;
            }
            let mut q = 1.0_f32;
            for param in pieces {
                let (key, value) = param.split_once('=')?;
                if key.trim().eq_ignore_ascii_case("q") {
                    q = value
                        .trim()
                        .parse::<f32>()
                        .ok()
                        .filter(|q| (0.0..=1.0).contains(q))?;
                }
            }
            Some(AcceptEntry { token, q })
        })
        .collect()
}

/// Pick the content coding for a connection.
///
/// Highest q wins; ties go to the earlier entry of `preference`. `*` covers
/// every coding the peer did not list. An explicit `identity` entry beats
/// compression only with a strictly higher q.
pub fn negotiate(accept_encoding: Option<&str>, preference: &[ContentCoding]) -> ContentCoding {
    let Some(header) = accept_encoding else {
        return ContentCoding::Identity;
    };
    let entries = parse_accept_encoding(header);
    let q_of = |token: &str| {
        entries
            .iter()
            .find(|e| e.token.eq_ignore_ascii_case(token))
            .map(|e| e.q)
    };
    let wildcard = q_of(coding_tokens::WILDCARD);

    let mut best: Option<(ContentCoding, f32)> = None;
    for &coding in preference.iter().filter(|c| !c.is_identity()) {
        let q = q_of(coding.token()).or(wildcard).unwrap_or(0.0);
        if q > 0.0 && best.map_or(true, |(_, best_q)| q > best_q) {
            best = Some((coding, q));
        }
    }

    match (best, q_of(coding_tokens::IDENTITY)) {
        (Some((_, q)), Some(identity_q)) if identity_q > q => ContentCoding::Identity,
        (Some((coding, _)), _) => coding,
        (None, _) => ContentCoding::Identity,
    }
}
