use std::fmt::Write;

use crate::framing::types::Dialect;

/// Append one frame line to `out`.
///
/// Layout:
///
/// ```text
/// key:value\n      (standard)
/// key: value\n     (legacy)
/// ```
///
/// Values are not validated. A value containing `\n` breaks framing, so
/// callers must split multi-line payloads into separate values.
#[inline]
pub fn write_frame(out: &mut String, dialect: Dialect, key: &str, value: impl std::fmt::Display) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}:{}{}", key, dialect.separator(), value);
}

/// Format one frame line as an owned string.
#[inline]
pub fn format_frame(dialect: Dialect, key: &str, value: impl std::fmt::Display) -> String {
    let mut out = String::new();
    write_frame(&mut out, dialect, key, value);
    out
}

/// Close a frame group with the blank-line terminator.
#[inline]
pub fn terminate(out: &mut String) {
    out.push('\n');
}
