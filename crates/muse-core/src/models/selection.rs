//! Category selection and per-session view state

use serde::{Deserialize, Serialize};
use std::fmt;

use super::QuoteEntry;

const ALL_CATEGORIES: &str = "all";

/// Which categories the random picker draws from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategorySelection {
    /// Wildcard, spelled `all`
    #[default]
    All,
    /// Exact, case-sensitive category name
    Category(String),
}

impl CategorySelection {
    /// Parse user input; blank input and `all` select every category.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(name) => name,
        }
    }

    /// Whether a quote falls inside this selection
    #[must_use]
    pub fn matches(&self, quote: &QuoteEntry) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => quote.category == *name,
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CategorySelection {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CategorySelection> for String {
    fn from(value: CategorySelection) -> Self {
        value.as_str().to_string()
    }
}

/// What the user is looking at: the durable category filter plus the
/// session-scoped last viewed quote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_category: CategorySelection,
    pub last_viewed: Option<QuoteEntry>,
}
