//! Flat string-keyed storage backends.
//!
//! Everything MDVie persists (document bodies, the file list, settings) is a
//! string under a string key. Front ends pick a backend at startup and hand a
//! [`SharedStore`] to the document and settings layers.

mod memory;
mod redb_store;
mod tables;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::config::Config;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// A single write inside an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Set { key: String, value: String },
    Remove { key: String },
}

impl WriteOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self::Remove { key: key.into() }
    }

    /// Key touched by this write.
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => key.as_str(),
        }
    }
}

/// Synchronous key-value store.
///
/// A `set` followed by `get` on the same key observes the new value. Single
/// writes are atomic per key; [`KeyValueStore::apply`] commits a whole batch or
/// nothing.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error when the write fails or exceeds the backend quota.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.apply(&[WriteOp::set(key, value)])
    }

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    /// Returns an error when the write fails.
    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.apply(&[WriteOp::remove(key)])
    }

    /// All keys currently stored, sorted ascending.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be read.
    fn keys(&self) -> Result<Vec<String>, AppError>;

    /// Apply every write in `ops` in order, atomically.
    ///
    /// # Errors
    /// Returns an error when any write fails; no write from the batch is
    /// visible afterwards.
    fn apply(&self, ops: &[WriteOp]) -> Result<(), AppError>;
}

/// Shared handle to whichever backend the front end opened.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Open the backend selected by `config`.
///
/// Ephemeral configs get an in-memory store that is lost on exit; otherwise
/// the redb file under `config.db_path` is opened (and created if missing).
///
/// # Errors
/// Propagates backend open failures, including another process holding the
/// database.
pub fn open_store(config: &Config) -> Result<SharedStore, AppError> {
    if config.ephemeral {
        info!("using in-memory store; nothing will persist");
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(RedbStore::open(&config.db_path)?))
}
