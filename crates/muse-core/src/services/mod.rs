//! Application services composing the store, gateway and remote.

mod book;
mod sync;

pub use book::{ImportSummary, QuoteBook};
pub use sync::{SyncOutcome, SyncService};
