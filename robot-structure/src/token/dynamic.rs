//! Tokens whose value may resolve to another definition

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::ParsedToken;

/// What a dynamic token turned out to refer to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A variable definition, by name
    Variable(String),
    /// A user or library keyword, by name
    Keyword(String),
    /// A resource, library or variable file on disk
    File(PathBuf),
}

/// A [`ParsedToken`] with a reference slot filled in by a resolver.
///
/// The slot starts empty and can be set once, through a shared reference,
/// after the owning document has been published to readers.
#[derive(Clone)]
pub struct DynamicToken {
    token: ParsedToken,
    resolution: OnceLock<Resolution>,
}

impl DynamicToken {
    pub fn new(token: ParsedToken) -> Self {
        Self {
            token,
            resolution: OnceLock::new(),
        }
    }

    pub fn token(&self) -> &ParsedToken {
        &self.token
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.get()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.get().is_some()
    }

    /// Record what this token refers to.
    ///
    /// Returns the rejected value if the token was already resolved.
    pub fn resolve(&self, resolution: Resolution) -> Result<(), Resolution> {
        self.resolution.set(resolution)
    }
}

impl From<ParsedToken> for DynamicToken {
    fn from(token: ParsedToken) -> Self {
        Self::new(token)
    }
}

impl Deref for DynamicToken {
    type Target = ParsedToken;

    fn deref(&self) -> &ParsedToken {
        &self.token
    }
}

impl fmt::Display for DynamicToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.token, f)
    }
}

impl fmt::Debug for DynamicToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicToken")
            .field("token", &self.token)
            .field("resolution", &self.resolution.get())
            .finish()
    }
}

impl PartialEq for DynamicToken {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for DynamicToken {}

impl Hash for DynamicToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

impl Borrow<str> for DynamicToken {
    fn borrow(&self) -> &str {
        self.token.text()
    }
}
