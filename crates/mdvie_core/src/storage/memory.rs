//! In-memory store used by tests and ephemeral sessions.

use super::{KeyValueStore, WriteOp};
use crate::error::AppError;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// `BTreeMap`-backed store with an optional byte quota.
///
/// The quota counts key and value bytes of every stored entry, mirroring how
/// browser storage limits are accounted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

fn entry_bytes(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes pushing total usage above `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Bytes currently accounted against the quota.
    pub fn used_bytes(&self) -> Result<usize, AppError> {
        let entries = self.lock()?;
        Ok(entries
            .iter()
            .map(|(key, value)| entry_bytes(key, value))
            .sum())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, AppError> {
        self.entries
            .lock()
            .map_err(|_| AppError::StorageMessage("Memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn apply(&self, ops: &[WriteOp]) -> Result<(), AppError> {
        let mut entries = self.lock()?;
        // Stage on a copy so a quota failure leaves the live map untouched.
        let mut staged = entries.clone();
        for op in ops {
            match op {
                WriteOp::Set { key, value } => {
                    staged.insert(key.clone(), value.clone());
                }
                WriteOp::Remove { key } => {
                    staged.remove(key);
                }
            }
        }
        if let Some(limit) = self.quota_bytes {
            let needed: usize = staged
                .iter()
                .map(|(key, value)| entry_bytes(key, value))
                .sum();
            if needed > limit {
                return Err(AppError::QuotaExceeded { needed, limit });
            }
        }
        *entries = staged;
        Ok(())
    }
}
