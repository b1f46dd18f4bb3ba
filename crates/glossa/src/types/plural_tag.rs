use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A key identifying one plural form of a message.
///
/// Tags are either CLDR category names (e.g., "one", "few", "other") or
/// positional slots (e.g., "0", "1") for catalogs that list their forms in
/// plural-rule order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluralTag(String);

impl PluralTag {
    /// Create a new plural tag from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Create the positional tag for slot `index`.
    pub fn index(index: usize) -> Self {
        Self(index.to_string())
    }

    /// Get the plural tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for PluralTag {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for PluralTag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PluralTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<usize> for PluralTag {
    fn from(index: usize) -> Self {
        Self::index(index)
    }
}

impl Display for PluralTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
