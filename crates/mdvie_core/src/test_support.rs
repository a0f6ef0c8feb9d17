//! Shared test-only helpers for mdvie_core.

use crate::storage::{MemoryStore, RedbStore, SharedStore};
use std::sync::{Arc, Mutex, OnceLock};
use tempfile::TempDir;

/// Fresh in-memory store without a quota.
pub(crate) fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

/// Creates an isolated redb-backed store and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing file.
///
/// # Panics
/// Panics if temp-dir creation or database initialization fails.
pub(crate) fn setup_temp_store() -> (RedbStore, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let store = RedbStore::open(db_path.to_str().expect("db path")).expect("store");
    (store, temp_dir)
}

/// Global lock serializing environment mutation across tests.
pub(crate) fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn write_env(key: &str, value: Option<&str>) {
    // SAFETY: callers hold `env_lock` while mutating the environment.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Restores an environment variable value on drop.
pub(crate) struct EnvGuard {
    key: String,
    previous: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        write_env(key, Some(value));
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_env(self.key.as_str(), self.previous.as_deref());
    }
}
