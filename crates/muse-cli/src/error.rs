use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] muse_core::Error),
    #[error(transparent)]
    Transport(#[from] muse_core::remote::TransportError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No quote text provided")]
    EmptyText,
    #[error("Quote ID cannot be empty")]
    EmptyQuoteId,
    #[error("Nothing to edit; pass --text and/or --category")]
    NothingToEdit,
    #[error("Quote not found for id/prefix: {0}")]
    QuoteNotFound(String),
    #[error("{0}")]
    AmbiguousQuoteId(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Sync is not configured. Run `muse config init --remote-url <URL>` or set MUSE_REMOTE_URL."
    )]
    SyncNotConfigured,
}
