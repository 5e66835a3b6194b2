//! Data models for Muse

mod change_report;
mod quote;
mod selection;

pub use change_report::{ChangeReport, EntryChange, MergeConflict};
pub use quote::{validate_fields, QuoteEntry, QuoteId, IMPORTED_CATEGORY};
pub use selection::{CategorySelection, SelectionState};
