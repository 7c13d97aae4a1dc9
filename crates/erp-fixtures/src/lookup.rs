// crates/erp-fixtures/src/lookup.rs
// ============================================================================
// Module: Name Lookup
// Description: Resolve reference records by their display caption.
// Purpose: Map human-readable dropdown names to server keys.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Dropdown endpoints return `{key, caption}` pairs. [`find_by_name`] picks the
//! first record whose caption equals the requested name exactly.
//! Invariants:
//! - Matching is case-sensitive with no trimming, fuzzy matching, or key fallback.
//! - A miss is always [`LookupError::NotFound`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Reference Records
// ============================================================================

/// Dropdown key; the server uses numeric or textual keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceKey {
    /// Numeric key.
    Number(i64),
    /// Textual key.
    Text(String),
}

impl ReferenceKey {
    /// Returns the key as it appears on the wire.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(value) => Value::from(*value),
            Self::Text(value) => Value::from(value.as_str()),
        }
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// `{key, caption}` pair returned by dropdown endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Server-side key.
    pub key: ReferenceKey,
    /// Display caption.
    pub caption: String,
}

impl ReferenceRecord {
    /// Builds a record from a key and caption.
    #[must_use]
    pub fn new(key: ReferenceKey, caption: impl Into<String>) -> Self {
        Self {
            key,
            caption: caption.into(),
        }
    }

    /// Returns the `{key, caption}` object used as a patch value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("key".to_string(), self.key.to_value());
        object.insert("caption".to_string(), Value::from(self.caption.as_str()));
        Value::Object(object)
    }
}

/// Records that carry a display caption.
pub trait Captioned {
    /// Returns the display caption.
    fn caption(&self) -> &str;
}

impl Captioned for ReferenceRecord {
    fn caption(&self) -> &str {
        &self.caption
    }
}

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Name lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No record carries the requested caption.
    #[error("no reference record named '{name}'")]
    NotFound {
        /// Requested caption.
        name: String,
    },
}

/// Returns the first record whose caption equals `name`.
///
/// # Errors
///
/// Returns [`LookupError::NotFound`] when no caption matches exactly.
pub fn find_by_name<'a, T: Captioned>(records: &'a [T], name: &str) -> Result<&'a T, LookupError> {
    records.iter().find(|record| record.caption() == name).ok_or_else(|| LookupError::NotFound {
        name: name.to_string(),
    })
}
