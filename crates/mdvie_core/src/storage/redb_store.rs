//! redb-backed persistent store.

use super::tables::{ENTRIES, REDB_FILE_NAME};
use super::{KeyValueStore, WriteOp};
use crate::error::AppError;
use redb::{ReadableDatabase, ReadableTable};
use std::path::{Path, PathBuf};
use tracing::info;

/// Store persisted in a single redb file under the configured directory.
pub struct RedbStore {
    db: redb::Database,
    path: PathBuf,
}

impl RedbStore {
    /// Open (or create) the store inside directory `path`.
    ///
    /// # Returns
    /// A store whose `entries` table is guaranteed to exist.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, redb cannot open
    /// the file (for example when another process holds it), or the table
    /// cannot be initialized.
    pub fn open(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir)?;
        let file = dir.join(REDB_FILE_NAME);
        let db = redb::Database::create(&file).map_err(|err| match err {
            redb::DatabaseError::DatabaseAlreadyOpen => AppError::StorageMessage(format!(
                "Database at {} is already open in another MDVie process.\n\
                 Close it first, or set DB_PATH to use a different location.",
                file.display()
            )),
            other => AppError::from(other),
        })?;

        let write_txn = db.begin_write()?;
        write_txn.open_table(ENTRIES)?;
        write_txn.commit()?;

        info!("opened document store at {}", file.display());
        Ok(Self { db, path: file })
    }

    /// Path of the backing redb file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let read_txn = self.db.begin_read()?;
        let entries = read_txn.open_table(ENTRIES)?;
        Ok(entries.get(key)?.map(|value| value.value().to_string()))
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        let read_txn = self.db.begin_read()?;
        let entries = read_txn.open_table(ENTRIES)?;
        let mut keys = Vec::new();
        for item in entries.iter()? {
            let (key, _) = item?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }

    fn apply(&self, ops: &[WriteOp]) -> Result<(), AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut entries = write_txn.open_table(ENTRIES)?;
            for op in ops {
                match op {
                    WriteOp::Set { key, value } => {
                        entries.insert(key.as_str(), value.as_str())?;
                    }
                    WriteOp::Remove { key } => {
                        entries.remove(key.as_str())?;
                    }
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}
