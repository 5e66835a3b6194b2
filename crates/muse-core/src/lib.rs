//! muse-core - Core library for Muse
//!
//! This crate contains the quote models, the entry store, the remote-wins
//! merge engine, the import/export codec and the sync driver used by every
//! Muse interface.

pub mod categories;
pub mod config;
pub mod error;
pub mod export;
pub mod merge;
pub mod models;
pub mod persistence;
pub mod remote;
pub mod selection;
pub mod services;
pub mod state;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{CategorySelection, ChangeReport, QuoteEntry, QuoteId};
pub use store::EntryStore;
