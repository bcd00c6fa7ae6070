//! Numbered-selection caches.
//!
//! Every listing command stores the full list it printed. A later command can
//! then refer to an entry by its number (`trigger 3`, `trigger cancel 2`)
//! without fetching again. The stored list is replaced wholesale on every
//! listing; there is no locking and no expiry, so a number is only as fresh as
//! the user's last listing.

use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Failure to persist a selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The cache file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The entries could not be serialized.
    #[error("failed to serialize selection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Storage for the last list shown to the user.
pub trait SelectionStore<T> {
    /// Replace the stored list.
    fn save(&self, entries: &[T]) -> Result<(), SelectionError>;

    /// Entry at 1-based position `ordinal` of the stored list.
    ///
    /// Returns `None` when nothing was stored yet, the store cannot be read,
    /// or the ordinal is out of range (including 0).
    fn resolve(&self, ordinal: usize) -> Option<T>;
}

/// Selection kept as a JSON array in a file.
pub struct FileSelection<T> {
    path: PathBuf,
    _entry: PhantomData<fn() -> T>,
}

impl<T> FileSelection<T> {
    /// Selection stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entry: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> SelectionStore<T> for FileSelection<T> {
    fn save(&self, entries: &[T]) -> Result<(), SelectionError> {
        let json = serde_json::to_vec(entries)?;
        fs::write(&self.path, json).map_err(|source| SelectionError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = entries.len(), "Saved selection");
        Ok(())
    }

    fn resolve(&self, ordinal: usize) -> Option<T> {
        let index = ordinal.checked_sub(1)?;

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No selection to resolve");
                return None;
            }
        };

        let entries: Vec<T> = match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Unreadable selection");
                return None;
            }
        };

        entries.into_iter().nth(index)
    }
}

/// Selection held in memory, for tests and embedding.
pub struct MemorySelection<T> {
    entries: Mutex<Option<Vec<T>>>,
}

impl<T> MemorySelection<T> {
    /// Empty selection, as before any listing.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(None),
        }
    }
}

impl<T> Default for MemorySelection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SelectionStore<T> for MemorySelection<T> {
    fn save(&self, entries: &[T]) -> Result<(), SelectionError> {
        let mut guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(entries.to_vec());
        Ok(())
    }

    fn resolve(&self, ordinal: usize) -> Option<T> {
        let index = ordinal.checked_sub(1)?;
        let guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref()?.get(index).cloned()
    }
}
