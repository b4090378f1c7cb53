//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Listing identifier as issued by the source platform - newtype for type safety.
///
/// Polymarket condition ids and Kalshi tickers both land here. The inner
/// String is private to ensure all construction goes through the defined
/// constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingId(String);

impl ListingId {
    /// Create a new ListingId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the listing ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Category tag shared by both platforms (e.g. `politics`, `crypto`).
///
/// Always stored trimmed and lowercased so that `"Politics"` on one platform
/// and `"politics"` on the other compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Create a new Category, canonicalizing case and surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// Get the category name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.0
    }
}
