//! Persistence gateway for the quote list and view state.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{CategorySelection, QuoteEntry};

const QUOTES_FILE_NAME: &str = "quotes.json";
const SELECTION_FILE_NAME: &str = "selection.json";
const LAST_VIEWED_FILE_NAME: &str = "last-viewed.json";

/// Key-value storage for everything a quote book needs to survive a restart.
///
/// The last viewed quote is session-scoped: implementations keep it
/// separately from the durable quote list and selection.
pub trait PersistenceGateway: Send + Sync + 'static {
    /// `None` when nothing was stored yet.
    fn load_entries(&self) -> Result<Option<Vec<QuoteEntry>>>;
    fn save_entries(&self, entries: &[QuoteEntry]) -> Result<()>;

    fn load_selection(&self) -> Result<Option<CategorySelection>>;
    fn save_selection(&self, selection: &CategorySelection) -> Result<()>;

    fn load_last_viewed(&self) -> Result<Option<QuoteEntry>>;
    fn save_last_viewed(&self, entry: &QuoteEntry) -> Result<()>;
    fn clear_last_viewed(&self) -> Result<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: Option<Vec<QuoteEntry>>,
    selection: Option<CategorySelection>,
    last_viewed: Option<QuoteEntry>,
    entry_saves: usize,
}

/// In-process gateway. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that already holds `entries`.
    #[must_use]
    pub fn with_entries(entries: Vec<QuoteEntry>) -> Self {
        let gateway = Self::new();
        gateway.lock().entries = Some(entries);
        gateway
    }

    /// How many times the quote list was flushed.
    pub fn entry_saves(&self) -> usize {
        self.lock().entry_saves
    }

    /// Drop session-scoped state, as ending a session would.
    pub fn end_session(&self) {
        self.lock().last_viewed = None;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load_entries(&self) -> Result<Option<Vec<QuoteEntry>>> {
        Ok(self.lock().entries.clone())
    }

    fn save_entries(&self, entries: &[QuoteEntry]) -> Result<()> {
        let mut state = self.lock();
        state.entries = Some(entries.to_vec());
        state.entry_saves += 1;
        Ok(())
    }

    fn load_selection(&self) -> Result<Option<CategorySelection>> {
        Ok(self.lock().selection.clone())
    }

    fn save_selection(&self, selection: &CategorySelection) -> Result<()> {
        self.lock().selection = Some(selection.clone());
        Ok(())
    }

    fn load_last_viewed(&self) -> Result<Option<QuoteEntry>> {
        Ok(self.lock().last_viewed.clone())
    }

    fn save_last_viewed(&self, entry: &QuoteEntry) -> Result<()> {
        self.lock().last_viewed = Some(entry.clone());
        Ok(())
    }

    fn clear_last_viewed(&self) -> Result<()> {
        self.lock().last_viewed = None;
        Ok(())
    }
}

/// JSON files on disk: the quote list and selection under `data_dir`, the
/// last viewed quote under `session_dir`.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    data_dir: PathBuf,
    session_dir: PathBuf,
}

impl JsonFileGateway {
    pub fn new(data_dir: impl Into<PathBuf>, session_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            session_dir: session_dir.into(),
        }
    }

    /// Session files live in the system temp dir, which the OS clears
    /// between sessions.
    pub fn with_default_session_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(data_dir, default_session_dir())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn quotes_path(&self) -> PathBuf {
        self.data_dir.join(QUOTES_FILE_NAME)
    }

    fn selection_path(&self) -> PathBuf {
        self.data_dir.join(SELECTION_FILE_NAME)
    }

    fn last_viewed_path(&self) -> PathBuf {
        self.session_dir.join(LAST_VIEWED_FILE_NAME)
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn load_entries(&self) -> Result<Option<Vec<QuoteEntry>>> {
        read_json(&self.quotes_path())
    }

    fn save_entries(&self, entries: &[QuoteEntry]) -> Result<()> {
        write_json(&self.quotes_path(), entries)
    }

    fn load_selection(&self) -> Result<Option<CategorySelection>> {
        read_json(&self.selection_path())
    }

    fn save_selection(&self, selection: &CategorySelection) -> Result<()> {
        write_json(&self.selection_path(), selection)
    }

    fn load_last_viewed(&self) -> Result<Option<QuoteEntry>> {
        match read_json(&self.last_viewed_path()) {
            Ok(entry) => Ok(entry),
            Err(error) => {
                tracing::warn!("Ignoring unreadable session state: {}", error);
                Ok(None)
            }
        }
    }

    fn save_last_viewed(&self, entry: &QuoteEntry) -> Result<()> {
        write_json(&self.last_viewed_path(), entry)
    }

    fn clear_last_viewed(&self) -> Result<()> {
        match std::fs::remove_file(self.last_viewed_path()) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Per-user session directory inside the system temp dir.
pub fn default_session_dir() -> PathBuf {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "default".to_string());
    std::env::temp_dir().join(format!("muse-session-{user}"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(value)?;
    std::fs::write(path, serialized)?;
    Ok(())
}
