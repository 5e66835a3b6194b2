//! Merge result model

use serde::{Deserialize, Serialize};

use super::QuoteEntry;

/// A local quote whose fields were replaced by the remote record with the
/// same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryChange {
    pub previous: QuoteEntry,
    pub current: QuoteEntry,
}

/// A local quote matched only by text whose category diverged from the
/// remote one. `local` is what was overwritten; `remote` is the quote as
/// stored afterwards, normally under the remote id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConflict {
    pub local: QuoteEntry,
    pub remote: QuoteEntry,
}

/// Classification of every record of a remote batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub added: Vec<QuoteEntry>,
    pub updated: Vec<EntryChange>,
    pub conflicts: Vec<MergeConflict>,
    /// Remote records that matched a local quote and changed nothing
    pub unchanged: usize,
}

impl ChangeReport {
    /// True when the merge did not touch the store.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.conflicts.is_empty()
    }

    #[must_use]
    pub fn change_count(&self) -> usize {
        self.added.len() + self.updated.len() + self.conflicts.len()
    }

    /// Number of remote records this report accounts for.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.change_count() + self.unchanged
    }

    /// Short human-readable description, e.g. `2 added, 1 conflict`.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "no changes".to_string();
        }

        let mut parts = Vec::new();
        if !self.added.is_empty() {
            parts.push(format!("{} added", self.added.len()));
        }
        if !self.updated.is_empty() {
            parts.push(format!("{} updated", self.updated.len()));
        }
        match self.conflicts.len() {
            0 => {}
            1 => parts.push("1 conflict".to_string()),
            n => parts.push(format!("{n} conflicts")),
        }
        parts.join(", ")
    }
}
