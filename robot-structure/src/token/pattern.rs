//! Matching of keyword names that embed `${...}` variables
//!
//! A keyword defined as `Set ${field} To ${value}` accepts any call of the
//! shape `Set <anything> To <anything>`. The name is compiled once into an
//! anchored [`Regex`] where the literal segments are escaped and each
//! placeholder becomes a single-line wildcard. `\r`, NEL and the Unicode
//! line and paragraph separators end a line as well as `\n`.

use std::ops::Range;

use regex::Regex;

/// Any run of characters that stays on one line
const WILDCARD: &str = r"[^\n\r\x{85}\x{2028}\x{2029}]*";

/// Byte ranges of the `${...}` placeholders in `name`, in source order.
///
/// A placeholder needs at least one character other than `}` between the
/// braces. `${}` and an unterminated `${` are literal text.
pub fn placeholder_spans(name: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut from = 0;

    while let Some(found) = name[from..].find("${") {
        let open = from + found;
        let body = open + 2;
        match name[body..].find('}') {
            // `${}` has an empty body; resume the scan right after the `$`
            Some(0) => from = open + 1,
            Some(len) => {
                let close = body + len + 1;
                spans.push(open..close);
                from = close;
            }
            None => break,
        }
    }

    spans
}

/// A compiled keyword name containing at least one placeholder.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    regex: Regex,
}

impl KeywordPattern {
    /// Compile `name` into a pattern.
    ///
    /// Returns `Ok(None)` when the name has no placeholders, in which case
    /// callers compare names for plain equality.
    pub fn compile(name: &str) -> Result<Option<Self>, regex::Error> {
        let spans = placeholder_spans(name);
        if spans.is_empty() {
            return Ok(None);
        }

        let mut source = String::with_capacity(name.len() * 2 + 8);
        source.push_str(r"\A(?:");
        let mut last = 0;
        for span in spans {
            source.push_str(&regex::escape(&name[last..span.start]));
            source.push_str(WILDCARD);
            last = span.end;
        }
        source.push_str(&regex::escape(&name[last..]));
        source.push_str(r")\z");

        let pattern = Self {
            regex: Regex::new(&source)?,
        };
        tracing::trace!(
            "Compiled keyword pattern {} from {:?}",
            pattern.as_str(),
            name
        );
        Ok(Some(pattern))
    }

    /// Whether `candidate` matches the whole pattern.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// The regular expression source, for diagnostics.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
