//! Category index derived from the store. Recomputed on every call.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::CategorySelection;
use crate::store::EntryStore;

/// Distinct categories in lexicographic order.
#[must_use]
pub fn categories(store: &EntryStore) -> BTreeSet<String> {
    store.iter().map(|entry| entry.category.clone()).collect()
}

/// Categories with the number of quotes in each.
#[must_use]
pub fn category_counts(store: &EntryStore) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for entry in store {
        *counts.entry(entry.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// `all` or a category present in the store.
#[must_use]
pub fn is_valid_selection(store: &EntryStore, value: &str) -> bool {
    match CategorySelection::parse(value) {
        CategorySelection::All => true,
        CategorySelection::Category(name) => store.iter().any(|entry| entry.category == name),
    }
}
