//! Category filtering and random pick.

use rand::Rng;

use crate::error::{Error, Result};
use crate::models::{CategorySelection, QuoteEntry};
use crate::store::EntryStore;

/// Quotes eligible for display under `selection`, in store order.
#[must_use]
pub fn filter_pool<'a>(store: &'a EntryStore, selection: &CategorySelection) -> Vec<&'a QuoteEntry> {
    store.iter().filter(|entry| selection.matches(entry)).collect()
}

/// Uniformly pick one quote from `pool`.
pub fn pick_random<'a, R>(pool: &[&'a QuoteEntry], rng: &mut R) -> Result<&'a QuoteEntry>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Err(Error::EmptyPool("the selected category".to_string()));
    }
    let index = rng.random_range(0..pool.len());
    Ok(pool[index])
}
