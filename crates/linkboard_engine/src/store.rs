use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use engine_logging::{engine_debug, engine_warn};
use linkboard_core::SelectionSet;
use thiserror::Error;

use crate::payload::parse_stored_selection;
use crate::persist::{AtomicFileWriter, PersistError};

pub const SELECTION_FILENAME: &str = "selected-links.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize selection: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write selection: {0}")]
    Persist(#[from] PersistError),
    #[error("selection store unavailable: {0}")]
    Unavailable(String),
}

/// Whole-set key-value storage for the selected URLs.
///
/// Writes replace the stored set entirely; concurrent writers race and the
/// last one to land wins.
pub trait SelectionStore: Send + Sync {
    fn load(&self) -> Result<SelectionSet, StoreError>;
    fn replace(&self, urls: &[String]) -> Result<(), StoreError>;
}

/// Pretty JSON array in `{dir}/selected-links.json`, replaced atomically.
///
/// A missing or unreadable file loads as the empty set.
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    writer: AtomicFileWriter,
}

impl FileSelectionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(SELECTION_FILENAME)
    }
}

impl SelectionStore for FileSelectionStore {
    fn load(&self) -> Result<SelectionSet, StoreError> {
        Ok(read_selection_file(&self.path()))
    }

    fn replace(&self, urls: &[String]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(urls)?;
        let path = self.writer.write(SELECTION_FILENAME, content)?;
        engine_debug!("Wrote {} selected urls to {:?}", urls.len(), path);
        Ok(())
    }
}

fn read_selection_file(path: &Path) -> SelectionSet {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return SelectionSet::new(),
        Err(err) => {
            engine_warn!("Failed to read selection from {:?}: {}", path, err);
            return SelectionSet::new();
        }
    };

    let parsed = serde_json::from_str(&content)
        .ok()
        .and_then(|value| parse_stored_selection(&value));
    match parsed {
        Some(selection) => selection,
        None => {
            engine_warn!("Ignoring unrecognised selection file {:?}", path);
            SelectionSet::new()
        }
    }
}

/// Process-local store; handy for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    selection: Mutex<SelectionSet>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selection: Mutex::new(urls.into_iter().collect()),
        }
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> Result<SelectionSet, StoreError> {
        self.selection
            .lock()
            .map(|guard| guard.clone())
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    fn replace(&self, urls: &[String]) -> Result<(), StoreError> {
        let mut guard = self
            .selection
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        *guard = urls.iter().map(String::as_str).collect();
        Ok(())
    }
}
