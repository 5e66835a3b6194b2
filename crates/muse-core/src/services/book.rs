//! Quote book: the entry store bound to its persistence gateway.

use rand::Rng;

use crate::categories::is_valid_selection;
use crate::error::{Error, Result};
use crate::export::{import_batch, render_export, ExportFormat};
use crate::merge::merge_remote_batch;
use crate::models::{
    validate_fields, CategorySelection, ChangeReport, QuoteEntry, QuoteId, SelectionState,
};
use crate::persistence::PersistenceGateway;
use crate::selection::{filter_pool, pick_random};
use crate::store::{seed_entries, EntryStore};

/// Outcome of importing a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: Vec<QuoteEntry>,
    /// Records rejected by validation (empty text or category)
    pub skipped: usize,
}

/// Owns the quote store for the lifetime of the application and saves it
/// through the gateway before every mutation takes effect.
pub struct QuoteBook<G: PersistenceGateway> {
    store: EntryStore,
    selection: CategorySelection,
    gateway: G,
}

impl<G: PersistenceGateway> QuoteBook<G> {
    /// Load the book from `gateway`, seeding default quotes on first use.
    pub fn open(gateway: G) -> Result<Self> {
        let store = if let Some(entries) = gateway.load_entries()? {
            EntryStore::from_entries(entries)
        } else {
            let store = EntryStore::from_entries(seed_entries());
            gateway.save_entries(store.all())?;
            tracing::info!("Seeded quote book with {} default quotes", store.len());
            store
        };

        let selection = match gateway.load_selection()? {
            Some(selection) if is_valid_selection(&store, selection.as_str()) => selection,
            Some(stale) => {
                tracing::debug!("Saved category '{}' no longer exists; showing all", stale);
                CategorySelection::All
            }
            None => CategorySelection::All,
        };

        Ok(Self {
            store,
            selection,
            gateway,
        })
    }

    pub const fn store(&self) -> &EntryStore {
        &self.store
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    pub const fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn selection_state(&self) -> Result<SelectionState> {
        Ok(SelectionState {
            selected_category: self.selection.clone(),
            last_viewed: self.last_viewed()?,
        })
    }

    /// Add a quote typed by the user.
    pub fn add(&mut self, text: &str, category: &str) -> Result<QuoteEntry> {
        let mut next = self.store.clone();
        let quote = next.add(text, category)?;
        self.commit(next)?;
        Ok(quote)
    }

    /// Explicit edit. Returns the previous version.
    pub fn replace(&mut self, id: &QuoteId, new_entry: &QuoteEntry) -> Result<QuoteEntry> {
        let mut next = self.store.clone();
        let previous = next.replace(id, new_entry)?;
        self.commit(next)?;
        Ok(previous)
    }

    /// Append every valid record of an exported JSON payload.
    pub fn import_batch(&mut self, payload: &str) -> Result<ImportSummary> {
        let records = import_batch(payload)?;

        let mut next = self.store.clone();
        let mut summary = ImportSummary::default();
        for record in records {
            match validate_fields(&record.text, &record.category) {
                Ok((text, category)) => {
                    let quote = next.append(QuoteEntry::with_id(record.id, text, category));
                    summary.imported.push(quote);
                }
                Err(error) => {
                    tracing::warn!("Skipping imported record: {}", error);
                    summary.skipped += 1;
                }
            }
        }

        if !summary.imported.is_empty() {
            self.commit(next)?;
        }
        Ok(summary)
    }

    pub fn export(&self, format: ExportFormat) -> Result<String> {
        Ok(render_export(self.store.all(), format)?)
    }

    /// Merge a remote batch. Flushes only when something changed.
    pub fn apply_remote_batch(&mut self, batch: &[QuoteEntry]) -> Result<ChangeReport> {
        let outcome = merge_remote_batch(&self.store, batch);
        if outcome.report.is_empty() {
            return Ok(outcome.report);
        }

        self.commit(outcome.store)?;
        Ok(outcome.report)
    }

    /// Change the category filter; `all` or an existing category.
    pub fn select(&mut self, value: &str) -> Result<CategorySelection> {
        if !is_valid_selection(&self.store, value) {
            return Err(Error::Validation(format!(
                "unknown category '{}'",
                value.trim()
            )));
        }
        let selection = CategorySelection::parse(value);
        self.gateway.save_selection(&selection)?;
        self.selection = selection.clone();
        Ok(selection)
    }

    /// Quotes under the current selection.
    pub fn pool(&self) -> Vec<&QuoteEntry> {
        filter_pool(&self.store, &self.selection)
    }

    /// Pick a random quote from the current selection and remember it as
    /// last viewed.
    pub fn pick_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<QuoteEntry> {
        let pool = self.pool();
        let picked = match pick_random(&pool, rng) {
            Ok(quote) => quote.clone(),
            Err(Error::EmptyPool(_)) => {
                return Err(Error::EmptyPool(format!("category '{}'", self.selection)))
            }
            Err(error) => return Err(error),
        };
        self.remember_viewed(&picked)?;
        Ok(picked)
    }

    /// Record `quote` as the last viewed quote of this session.
    pub fn remember_viewed(&self, quote: &QuoteEntry) -> Result<()> {
        self.gateway.save_last_viewed(quote)
    }

    /// Current version of the last viewed quote. A merge that re-keyed it is
    /// followed by text; when it is gone altogether the session entry is
    /// cleared.
    pub fn last_viewed(&self) -> Result<Option<QuoteEntry>> {
        let Some(viewed) = self.gateway.load_last_viewed()? else {
            return Ok(None);
        };

        let current = self
            .store
            .find_by_id(&viewed.id)
            .or_else(|| self.store.find_by_text(&viewed.text));
        if let Some(current) = current {
            return Ok(Some(current.clone()));
        }

        tracing::debug!("Last viewed quote {} no longer exists", viewed.id);
        self.gateway.clear_last_viewed()?;
        Ok(None)
    }

    /// Persist `next` and only then make it the live store, so a failed save
    /// leaves memory and disk in agreement.
    fn commit(&mut self, next: EntryStore) -> Result<()> {
        self.gateway.save_entries(next.all())?;
        self.store = next;
        Ok(())
    }
}
