//! Backslash escape decoding for cell values
//!
//! Cells in the tabular source format use `\` to escape the next character.
//! `\n`, `\t` and `\r` produce the corresponding control characters; any
//! other escaped character is taken literally. A trailing lone backslash
//! decodes to nothing, which is why a cell holding only `\` is empty.

/// Decode the escapes in `text` between character indices `start` and `end`.
///
/// Indices count characters, not bytes, matching token offsets. Bounds past
/// the end of `text` are clamped and an inverted range yields an empty string.
pub fn unescape_argument(text: &str, start: usize, end: usize) -> String {
    let span = end.saturating_sub(start);
    let mut out = String::with_capacity(span.min(text.len()));
    let mut escaped = false;

    for ch in text.chars().skip(start).take(span) {
        if escaped {
            out.push(match ch {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                other => other,
            });
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else {
            out.push(ch);
        }
    }

    out
}
