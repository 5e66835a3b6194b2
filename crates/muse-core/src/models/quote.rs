//! Quote model

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::CategorySelection;
use crate::error::{Error, Result};

/// Category assigned to imported records that do not carry one.
pub const IMPORTED_CATEGORY: &str = "Imported";

const LOCAL_ID_PREFIX: &str = "local-";
const REMOTE_ID_PREFIX: &str = "srv-";

/// A unique identifier for a quote.
///
/// Locally created quotes use `local-<uuid v7>` (time-sortable, random tail);
/// quotes that came from a remote source use `srv-<remote id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
    /// Create a new local quote ID
    #[must_use]
    pub fn local() -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{}", Uuid::now_v7()))
    }

    /// Namespace a remote record identifier
    #[must_use]
    pub fn remote(raw: impl fmt::Display) -> Self {
        Self(format!("{REMOTE_ID_PREFIX}{raw}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.0.starts_with(REMOTE_ID_PREFIX)
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::local()
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for QuoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for QuoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A quote with its category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteEntry {
    /// Unique identifier, assigned once
    pub id: QuoteId,
    /// Quotation body
    pub text: String,
    /// Category label
    pub category: String,
}

impl QuoteEntry {
    /// Create a quote with a fresh local id. No validation is applied.
    #[must_use]
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self::with_id(QuoteId::local(), text, category)
    }

    #[must_use]
    pub fn with_id(id: QuoteId, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
        }
    }

    /// Build a local quote from user input, trimming both fields.
    pub fn validated(text: &str, category: &str) -> Result<Self> {
        let (text, category) = validate_fields(text, category)?;
        Ok(Self::new(text, category))
    }

    /// True when text and category both match.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.text == other.text && self.category == other.category
    }
}

/// Trim text and category, rejecting empties and the reserved `all`
/// category, which always means every category when selecting.
pub fn validate_fields(text: &str, category: &str) -> Result<(String, String)> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Validation("quote text must not be empty".to_string()));
    }
    let category = category.trim();
    if category.is_empty() {
        return Err(Error::Validation(
            "quote category must not be empty".to_string(),
        ));
    }
    if CategorySelection::parse(category).is_all() {
        return Err(Error::Validation(format!(
            "'{category}' is reserved for selecting every category"
        )));
    }
    Ok((text.to_string(), category.to_string()))
}
