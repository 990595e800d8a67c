//! Keyed JSON persistence rooted at a single directory.
//!
//! Each key maps to one pretty-printed JSON document at
//! `<base_dir>/<key>.json`. Writes go through a temp-file-plus-rename
//! sequence so a crash mid-write never leaves a truncated document behind.
//! Reads are tolerant: a missing file reads as absent, and a corrupt file
//! is logged and also reads as absent rather than poisoning the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key under which the authenticated identity is persisted.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Key under which the ticket collection is persisted.
pub const TICKETS_KEY: &str = "tickets";

/// Key under which the audit log is persisted.
pub const TICKET_LOGS_KEY: &str = "ticketLogs";

/// Directory-backed key-value store holding one JSON document per key.
///
/// `Storage` is cheap to clone (it wraps a single `PathBuf`), so the
/// session and ticket stores each hold their own handle onto the same base
/// directory.
#[derive(Debug, Clone)]
pub struct Storage {
    base_dir: PathBuf,
}

impl Storage {
    /// Create a new `Storage` rooted at the given base directory.
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Root directory for all persisted documents.
    ///   The directory does not need to exist yet; it will be created
    ///   lazily on the first [`write`](Storage::write).
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the root directory of this storage.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the path of the document the given key maps to.
    ///
    /// # Returns
    ///
    /// `<base_dir>/<key>.json`
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// Reads and deserializes the document stored under `key`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no document exists for the key, or when one exists
    /// but no longer parses. Corruption is logged, never escalated; the
    /// caller reseeds or rebuilds as it sees fit.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` for filesystem failures other than the
    /// file being absent.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> io::Result<Option<T>> {
        let path = self.key_path(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        match serde_json::from_str(&data) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "stored document unreadable; treating as absent"
                );
                Ok(None)
            }
        }
    }

    /// Serializes `value` and writes it under `key`, replacing any
    /// previous document.
    ///
    /// The document is written to a temporary sibling first and renamed
    /// into place, so readers never observe a partially written file.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if the base directory cannot be created,
    /// the value fails to serialize, or the write or rename fails.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> io::Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.key_path(key);
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Deletes the document stored under `key`.
    ///
    /// Removing a key that has no document is not an error.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` for filesystem failures other than the
    /// file being absent.
    pub fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
