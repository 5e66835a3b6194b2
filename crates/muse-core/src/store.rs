//! In-memory quote store

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{validate_fields, QuoteEntry, QuoteId};

/// Ordered list of quotes. Insertion order is the canonical order and ids
/// are unique after every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<QuoteEntry>,
}

impl EntryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a store from persisted quotes.
    ///
    /// Later quotes that reuse an earlier id get a fresh local id.
    #[must_use]
    pub fn from_entries(entries: Vec<QuoteEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            let original_id = entry.id.clone();
            let appended = store.append(entry);
            if appended.id != original_id {
                tracing::warn!(
                    "Duplicate quote id {} in stored data; reassigned to {}",
                    original_id,
                    appended.id
                );
            }
        }
        store
    }

    /// Validate and append a new local quote.
    pub fn add(&mut self, text: &str, category: &str) -> Result<QuoteEntry> {
        let quote = QuoteEntry::validated(text, category)?;
        Ok(self.append(quote))
    }

    /// Append an already-built quote, keeping its id unless it is taken.
    pub fn append(&mut self, mut entry: QuoteEntry) -> QuoteEntry {
        if self.contains_id(&entry.id) {
            entry.id = QuoteId::local();
        }
        self.entries.push(entry.clone());
        entry
    }

    /// Overwrite text and category of the quote with `id`, keeping its id
    /// and position. Returns the previous version.
    pub fn replace(&mut self, id: &QuoteId, new_entry: &QuoteEntry) -> Result<QuoteEntry> {
        let index = self
            .position_by_id(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let (text, category) = validate_fields(&new_entry.text, &new_entry.category)?;

        let slot = &mut self.entries[index];
        let previous = slot.clone();
        slot.text = text;
        slot.category = category;
        Ok(previous)
    }

    pub fn find_by_id(&self, id: &QuoteId) -> Option<&QuoteEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// First quote in insertion order whose text matches exactly.
    pub fn find_by_text(&self, text: &str) -> Option<&QuoteEntry> {
        self.entries.iter().find(|entry| entry.text == text)
    }

    /// Quotes whose id starts with `prefix`, in insertion order.
    pub fn find_by_id_prefix(&self, prefix: &str) -> Vec<&QuoteEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.id.as_str().starts_with(prefix))
            .collect()
    }

    pub fn all(&self) -> &[QuoteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuoteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_id(&self, id: &QuoteId) -> bool {
        self.position_by_id(id).is_some()
    }

    pub(crate) fn position_by_id(&self, id: &QuoteId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == *id)
    }

    /// Overwrite the fields at `index` without validation. Used by the merge
    /// engine, whose input is validated at the remote boundary.
    pub(crate) fn overwrite_at(&mut self, index: usize, text: &str, category: &str) -> QuoteEntry {
        let slot = &mut self.entries[index];
        text.clone_into(&mut slot.text);
        category.clone_into(&mut slot.category);
        slot.clone()
    }

    /// Replace the quote at `index` with a remote record. The caller checks
    /// that `entry.id` is not held by another quote.
    pub(crate) fn put_at(&mut self, index: usize, entry: QuoteEntry) {
        self.entries[index] = entry;
    }

    /// Ids are unique; used by tests and debug assertions.
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.entries.len());
        self.entries.iter().all(|entry| seen.insert(&entry.id))
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a QuoteEntry;
    type IntoIter = std::slice::Iter<'a, QuoteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Quotes a fresh book starts with.
#[must_use]
pub fn seed_entries() -> Vec<QuoteEntry> {
    vec![
        QuoteEntry::new(
            "The best way to get started is to quit talking and begin doing.",
            "Motivation",
        ),
        QuoteEntry::new("Don't let yesterday take up too much of today.", "Insight"),
        QuoteEntry::new(
            "It's not whether you get knocked down, it's whether you get up.",
            "Resilience",
        ),
    ]
}
