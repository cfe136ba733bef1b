//! Identifier newtypes with smart constructors.
//!
//! Store names are validated at ingestion; the resolver and recomputer
//! only ever see well-formed values.

use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

// ===== PlatformId =====

/// Integer identifier of a partner platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(i64);

impl PlatformId {
    /// Wrap a raw platform id.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PlatformId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== StoreName =====

/// Error returned when a store name is empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Store name must not be empty")]
pub struct InvalidStoreName;

/// Store name with its pre-computed search key.
///
/// The search key is the trimmed, lower-cased name in NFC form. Matching and name
/// sorting both operate on the key; the display form keeps the original
/// casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreName {
    display: String,
    key: String,
}

impl StoreName {
    /// Smart constructor: rejects empty or whitespace-only names.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidStoreName> {
        let raw = raw.into();
        let display = raw.trim();
        if display.is_empty() {
            return Err(InvalidStoreName);
        }
        Ok(Self {
            key: display.to_lowercase().nfc().collect(),
            display: display.to_string(),
        })
    }

    /// Name as it should be rendered.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Lower-cased key used for matching and ordering.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Substring match against an already-normalized query.
    ///
    /// An empty query matches every store.
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.key.contains(normalized_query)
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}
