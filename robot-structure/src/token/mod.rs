//! Positioned, classified tokens
//!
//! Tokens are produced in two phases. The tokenizer first builds a
//! [`RawToken`] from a cell's text and absolute character offset, then
//! classifies it into a [`ParsedToken`]. A parsed token never changes after
//! that: its text, position and classifier are fixed.
//!
//! Token identity is its text. Two tokens with the same text are equal and
//! hash alike regardless of where they appear or how they were classified,
//! so tokens work as map keys that can also be looked up by `&str`.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use thiserror::Error;

use crate::classifier::ArgumentClassifier;
use crate::escaping::unescape_argument;

pub mod dynamic;
pub mod pattern;

pub use dynamic::{DynamicToken, Resolution};
pub use pattern::KeywordPattern;

/// Role-words that may prefix a keyword call in behaviour-driven style.
const STRIPPABLE_PREFIXES: [&str; 4] = ["given ", "when ", "then ", "and "];

/// Errors raised while constructing a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token text is missing")]
    MissingText,
    #[error("source offset {offset} is negative")]
    NegativeOffset { offset: i64 },
}

/// Strip one leading `given `/`when `/`then `/`and ` (ASCII case-insensitive).
///
/// Only the first matching prefix is removed. Returns `None` when `text`
/// starts with none of them.
pub fn strip_bdd_prefix(text: &str) -> Option<&str> {
    STRIPPABLE_PREFIXES.iter().find_map(|prefix| {
        let head = text.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| &text[prefix.len()..])
    })
}

/// A token that has been located but not yet classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    text: String,
    source_offset: usize,
}

impl RawToken {
    /// Create a raw token from its text and the absolute character offset
    /// of its first character.
    pub fn new(text: impl Into<String>, source_offset: i64) -> Result<Self, TokenError> {
        let source_offset = usize::try_from(source_offset).map_err(|_| TokenError::NegativeOffset {
            offset: source_offset,
        })?;
        Ok(Self {
            text: text.into(),
            source_offset,
        })
    }

    /// Create a raw token from a cell that may be absent.
    pub fn from_cell(text: Option<&str>, source_offset: i64) -> Result<Self, TokenError> {
        let text = text.ok_or(TokenError::MissingText)?;
        Self::new(text, source_offset)
    }

    /// Assign the token's role, producing the final token.
    pub fn classify(self, classification: ArgumentClassifier) -> ParsedToken {
        ParsedToken {
            text: self.text,
            source_offset: self.source_offset,
            classification,
            keyword_pattern: OnceLock::new(),
        }
    }
}

impl From<RawToken> for ParsedToken {
    fn from(raw: RawToken) -> Self {
        raw.classify(ArgumentClassifier::Ignored)
    }
}

/// An immutable piece of source text with its position and role
#[derive(Clone)]
pub struct ParsedToken {
    text: String,
    source_offset: usize,
    classification: ArgumentClassifier,
    /// Compiled form of `text` when it is used as a keyword name. The cell is
    /// initialized on first match attempt, with `None` when the name holds
    /// no placeholders.
    keyword_pattern: OnceLock<Option<KeywordPattern>>,
}

impl ParsedToken {
    /// Build an unclassified token; see [`RawToken::new`].
    pub fn new(text: impl Into<String>, source_offset: i64) -> Result<Self, TokenError> {
        RawToken::new(text, source_offset).map(Self::from)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character offset of the first character in the source file.
    pub fn source_offset(&self) -> usize {
        self.source_offset
    }

    /// Character offset just past the last character.
    pub fn end_offset(&self) -> usize {
        self.source_offset + self.text.chars().count()
    }

    pub fn classification(&self) -> ArgumentClassifier {
        self.classification
    }

    /// Whether the cell is empty, either literally or as a lone `\`.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() || self.text == "\\"
    }

    /// The text with a leading `given `/`when `/`then `/`and ` removed.
    pub fn alternate_value(&self) -> Option<&str> {
        strip_bdd_prefix(&self.text)
    }

    /// Whether `keyword_call` invokes the keyword named by this token.
    ///
    /// `${...}` placeholders in this token's text match any run of
    /// characters on a single line, including none. Everything else must
    /// match exactly, case included.
    pub fn matches_keyword_call(&self, keyword_call: &str) -> bool {
        match self.keyword_pattern() {
            Some(pattern) => pattern.is_match(keyword_call),
            None => self.text == keyword_call,
        }
    }

    fn keyword_pattern(&self) -> Option<&KeywordPattern> {
        self.keyword_pattern
            .get_or_init(|| match KeywordPattern::compile(&self.text) {
                Ok(pattern) => pattern,
                Err(e) => {
                    tracing::warn!(
                        "Keyword name {:?} could not be compiled, matching it literally: {}",
                        self.text,
                        e
                    );
                    None
                }
            })
            .as_ref()
    }

    /// The value a reader perceives, with backslash escapes decoded.
    pub fn unescaped_value(&self) -> String {
        unescape_argument(&self.text, 0, self.text.chars().count())
    }

    /// Re-read a regular argument as a possibly dynamic value.
    ///
    /// No inner structure is extracted yet: the returned token carries the
    /// same text, position and role with an unresolved reference.
    pub fn split_regular_argument(&self) -> DynamicToken {
        DynamicToken::new(self.clone())
    }

    /// Rendering with the character range, for logs.
    pub fn debug_string(&self) -> String {
        format!("{self} @[{}, {})", self.source_offset, self.end_offset())
    }
}

impl fmt::Display for ParsedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.classification)
    }
}

impl fmt::Debug for ParsedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedToken")
            .field("text", &self.text)
            .field("source_offset", &self.source_offset)
            .field("classification", &self.classification)
            .finish()
    }
}

impl PartialEq for ParsedToken {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ParsedToken {}

impl Hash for ParsedToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Borrow<str> for ParsedToken {
    fn borrow(&self) -> &str {
        &self.text
    }
}
