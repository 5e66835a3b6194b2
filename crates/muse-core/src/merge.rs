//! Remote-wins reconciliation of a remote batch against the local store.
//!
//! # Algorithm
//!
//! 1. Index local quotes by id and by text (first seen wins on duplicate text)
//! 2. Walk the remote batch in the order received:
//!    - id match: overwrite when text or category differ (`updated`)
//!    - text match: replace in place with the remote record, id included,
//!      when the category differs (`conflict`); the local id is kept only
//!      when the remote id is already taken
//!    - no match: append (`added`)
//! 3. Each local quote can be matched once; later records that would match
//!    it again are appended instead
//!
//! The input store is never modified. Callers swap in the returned store, so
//! a batch is either applied completely or not at all. Local quotes without
//! a remote counterpart are kept.

use std::collections::{HashMap, HashSet};

use crate::models::{ChangeReport, EntryChange, MergeConflict, QuoteEntry};
use crate::store::EntryStore;

/// Merged store plus the classification of every remote record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub store: EntryStore,
    pub report: ChangeReport,
}

#[derive(Clone, Copy)]
enum LocalMatch {
    Id(usize),
    Text(usize),
}

impl LocalMatch {
    const fn index(self) -> usize {
        match self {
            Self::Id(index) | Self::Text(index) => index,
        }
    }
}

/// Reconcile `batch` against `store`, remote values winning every mismatch.
#[must_use]
pub fn merge_remote_batch(store: &EntryStore, batch: &[QuoteEntry]) -> MergeOutcome {
    let local = store.all();

    let mut by_id = HashMap::with_capacity(local.len());
    let mut by_text = HashMap::with_capacity(local.len());
    for (index, entry) in local.iter().enumerate() {
        by_id.insert(entry.id.as_str(), index);
        by_text.entry(entry.text.as_str()).or_insert(index);
    }

    let mut merged = store.clone();
    let mut report = ChangeReport::default();
    let mut claimed = HashSet::new();

    for remote in batch {
        let matched = by_id
            .get(remote.id.as_str())
            .map(|&index| LocalMatch::Id(index))
            .or_else(|| {
                by_text
                    .get(remote.text.as_str())
                    .map(|&index| LocalMatch::Text(index))
            })
            .filter(|candidate| claimed.insert(candidate.index()));

        match matched {
            Some(LocalMatch::Id(index)) => {
                let previous = &local[index];
                if previous.same_content(remote) {
                    report.unchanged += 1;
                } else {
                    let current = merged.overwrite_at(index, &remote.text, &remote.category);
                    report.updated.push(EntryChange {
                        previous: previous.clone(),
                        current,
                    });
                }
            }
            Some(LocalMatch::Text(index)) => {
                let previous = &local[index];
                if previous.category == remote.category {
                    report.unchanged += 1;
                } else {
                    let adopted = if merged.contains_id(&remote.id) {
                        QuoteEntry::with_id(
                            previous.id.clone(),
                            remote.text.clone(),
                            remote.category.clone(),
                        )
                    } else {
                        remote.clone()
                    };
                    merged.put_at(index, adopted.clone());
                    report.conflicts.push(MergeConflict {
                        local: previous.clone(),
                        remote: adopted,
                    });
                }
            }
            None => {
                let appended = merged.append(remote.clone());
                report.added.push(appended);
            }
        }
    }

    debug_assert!(merged.has_unique_ids());
    MergeOutcome {
        store: merged,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quote(id: &str, text: &str, category: &str) -> QuoteEntry {
        QuoteEntry::with_id(id.into(), text, category)
    }

    fn store_of(entries: &[QuoteEntry]) -> EntryStore {
        EntryStore::from_entries(entries.to_vec())
    }

    #[test]
    fn id_match_with_changed_category_is_updated() {
        let store = store_of(&[quote("1", "A", "X")]);
        let outcome = merge_remote_batch(&store, &[quote("1", "A", "Y")]);

        assert_eq!(outcome.store.all(), &[quote("1", "A", "Y")]);
        assert_eq!(
            outcome.report.updated,
            vec![EntryChange {
                previous: quote("1", "A", "X"),
                current: quote("1", "A", "Y"),
            }]
        );
        assert!(outcome.report.added.is_empty());
        assert!(outcome.report.conflicts.is_empty());
    }

    #[test]
    fn text_match_with_changed_category_is_conflict() {
        let store = store_of(&[quote("local-a", "A", "X"), quote("local-b", "B", "Z")]);
        let outcome = merge_remote_batch(&store, &[quote("srv-9", "A", "Y")]);

        assert_eq!(outcome.store.all()[0], quote("srv-9", "A", "Y"));
        assert_eq!(outcome.store.all()[1], quote("local-b", "B", "Z"));
        assert_eq!(outcome.report.conflicts.len(), 1);
        let conflict = &outcome.report.conflicts[0];
        assert_eq!(conflict.local, quote("local-a", "A", "X"));
        assert_eq!(conflict.remote.category, "Y");
        assert_eq!(outcome.store.len(), 2);
    }

    #[test]
    fn text_match_with_same_category_is_unchanged() {
        let store = store_of(&[quote("local-a", "A", "X")]);
        let outcome = merge_remote_batch(&store, &[quote("srv-9", "A", "X")]);

        assert!(outcome.report.is_empty());
        assert_eq!(outcome.report.unchanged, 1);
        assert_eq!(outcome.store, store);
    }

    #[test]
    fn unmatched_record_is_appended() {
        let store = store_of(&[quote("local-a", "A", "X")]);
        let outcome = merge_remote_batch(&store, &[quote("srv-2", "B", "Server")]);

        assert_eq!(outcome.store.len(), 2);
        assert_eq!(outcome.store.all()[1], quote("srv-2", "B", "Server"));
        assert_eq!(outcome.report.added, vec![quote("srv-2", "B", "Server")]);
    }

    #[test]
    fn identical_batch_is_noop() {
        let entries = [quote("srv-1", "A", "X"), quote("srv-2", "B", "Y")];
        let store = store_of(&entries);
        let outcome = merge_remote_batch(&store, &entries);

        assert!(outcome.report.is_empty());
        assert_eq!(outcome.report.unchanged, 2);
        assert_eq!(outcome.store, store);
    }

    #[test]
    fn merge_is_deterministic() {
        let store = store_of(&[
            quote("srv-1", "A", "X"),
            quote("local-b", "B", "Y"),
            quote("local-c", "C", "Z"),
        ]);
        let batch = [
            quote("srv-1", "A2", "X"),
            quote("srv-5", "B", "Server"),
            quote("srv-6", "New", "Server"),
            quote("srv-7", "C", "Z"),
        ];

        let first = merge_remote_batch(&store, &batch);
        let second = merge_remote_batch(&store, &batch);

        assert_eq!(first.report.updated.len(), 1);
        assert_eq!(first.report.conflicts.len(), 1);
        assert_eq!(first.report.added.len(), 1);
        assert_eq!(first.report.unchanged, 1);
        assert_eq!(first.report, second.report);
        assert_eq!(first.store, second.store);
    }

    #[test]
    fn every_remote_record_is_classified_once() {
        let store = store_of(&[quote("srv-1", "A", "X"), quote("local-b", "B", "Y")]);
        let batch = [
            quote("srv-1", "A", "X"),
            quote("srv-2", "B", "Other"),
            quote("srv-3", "C", "Z"),
            quote("srv-4", "D", "Z"),
        ];
        let outcome = merge_remote_batch(&store, &batch);

        assert_eq!(outcome.report.record_count(), batch.len());
    }

    #[test]
    fn second_match_of_same_local_entry_is_appended() {
        let store = store_of(&[quote("srv-1", "A", "X")]);
        let batch = [quote("srv-1", "A", "Y"), quote("srv-1", "A", "Z")];
        let outcome = merge_remote_batch(&store, &batch);

        assert_eq!(outcome.report.updated.len(), 1);
        assert_eq!(outcome.report.added.len(), 1);
        assert_eq!(outcome.store.len(), 2);
        assert_eq!(outcome.store.all()[0], quote("srv-1", "A", "Y"));
        assert_eq!(outcome.store.all()[1].category, "Z");
        assert!(outcome.store.all()[1].id.is_local());
        assert!(outcome.store.has_unique_ids());
    }

    #[test]
    fn text_claimed_entry_is_not_overwritten_twice() {
        let store = store_of(&[quote("local-a", "A", "X")]);
        let batch = [quote("srv-1", "A", "Y"), quote("srv-2", "A", "Z")];
        let outcome = merge_remote_batch(&store, &batch);

        assert_eq!(outcome.report.conflicts.len(), 1);
        assert_eq!(outcome.report.added, vec![quote("srv-2", "A", "Z")]);
        assert_eq!(outcome.store.all()[0], quote("srv-1", "A", "Y"));
    }

    #[test]
    fn conflict_entry_tracks_later_remote_edits() {
        let store = store_of(&[quote("local-a", "A", "X")]);
        let first = merge_remote_batch(&store, &[quote("srv-9", "A", "Y")]);
        let second = merge_remote_batch(&first.store, &[quote("srv-9", "A2", "Y")]);

        assert_eq!(second.store.all(), &[quote("srv-9", "A2", "Y")]);
        assert_eq!(second.report.updated.len(), 1);
        assert!(second.report.added.is_empty());
    }

    #[test]
    fn conflict_keeps_local_id_when_remote_id_is_taken() {
        let store = store_of(&[quote("local-a", "A", "X")]);
        let batch = [quote("srv-5", "New", "Server"), quote("srv-5", "A", "Y")];
        let outcome = merge_remote_batch(&store, &batch);

        assert_eq!(outcome.store.all()[0], quote("local-a", "A", "Y"));
        assert_eq!(outcome.store.all()[1], quote("srv-5", "New", "Server"));
        assert_eq!(
            outcome.report.conflicts[0].remote,
            quote("local-a", "A", "Y")
        );
        assert!(outcome.store.has_unique_ids());
    }

    #[test]
    fn merge_never_removes_local_entries() {
        let store = store_of(&[quote("local-a", "A", "X"), quote("local-b", "B", "Y")]);
        let outcome = merge_remote_batch(&store, &[quote("srv-1", "C", "Z")]);

        assert_eq!(outcome.store.len(), 3);
        assert!(outcome.store.find_by_id(&"local-a".into()).is_some());
        assert!(outcome.store.find_by_id(&"local-b".into()).is_some());
    }

    #[test]
    fn input_store_is_untouched() {
        let store = store_of(&[quote("1", "A", "X")]);
        let snapshot = store.clone();
        let _ = merge_remote_batch(&store, &[quote("1", "A", "Y"), quote("2", "B", "Y")]);

        assert_eq!(store, snapshot);
    }
}
