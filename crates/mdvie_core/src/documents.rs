//! Document persistence over the key-value store.
//!
//! Two kinds of rows are kept in sync here: one `doc:<name>` row per document
//! body and a single `doc-registry:files` row holding the ordered name list.
//! Operations that touch both go through one atomic batch.

use crate::constants::REGISTRY_FILES_KEY;
use crate::error::AppError;
use crate::naming::document_key;
use crate::storage::{SharedStore, WriteOp};
use tracing::warn;

/// Name → content mapping plus the ordered file list.
#[derive(Clone)]
pub struct DocumentStore {
    store: SharedStore,
}

fn encode_names(names: &[String]) -> Result<String, AppError> {
    Ok(serde_json::to_string(names)?)
}

impl DocumentStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Underlying key-value store, shared with settings.
    pub fn kv(&self) -> &SharedStore {
        &self.store
    }

    /// Content stored for `name`, if any.
    ///
    /// # Errors
    /// Propagates storage read failures.
    pub fn get(&self, name: &str) -> Result<Option<String>, AppError> {
        self.store.get(&document_key(name))
    }

    /// Store `content` for `name`, replacing previous content.
    ///
    /// # Errors
    /// Propagates storage write failures, including quota exhaustion.
    pub fn set(&self, name: &str, content: &str) -> Result<(), AppError> {
        self.store.set(&document_key(name), content)
    }

    /// Drop the content row for `name`.
    ///
    /// # Errors
    /// Propagates storage write failures.
    pub fn remove(&self, name: &str) -> Result<(), AppError> {
        self.store.remove(&document_key(name))
    }

    /// The persisted ordered file list, or `None` when it was never written.
    ///
    /// # Errors
    /// Returns an error when the row cannot be read or is not a JSON string
    /// array.
    pub fn stored_names(&self) -> Result<Option<Vec<String>>, AppError> {
        let Some(raw) = self.store.get(REGISTRY_FILES_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// The persisted ordered file list; empty when it was never written.
    ///
    /// # Errors
    /// See [`DocumentStore::stored_names`].
    pub fn list_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.stored_names()?.unwrap_or_default())
    }

    /// Return the stored list, seeding it with `defaults` on first access.
    ///
    /// A list row that fails to decode is replaced by `defaults` so a corrupt
    /// row cannot lock the user out of the sidebar; document rows are left
    /// untouched.
    ///
    /// # Errors
    /// Propagates storage read/write failures.
    pub fn list_names_or_init(&self, defaults: &[&str]) -> Result<Vec<String>, AppError> {
        match self.stored_names() {
            Ok(Some(names)) => return Ok(names),
            Ok(None) => {}
            Err(AppError::Serialization(err)) => {
                warn!("file list row is corrupt, reseeding: {}", err);
            }
            Err(err) => return Err(err),
        }
        let names: Vec<String> = defaults.iter().map(|name| name.to_string()).collect();
        self.set_names(&names)?;
        Ok(names)
    }

    /// Replace the persisted ordered file list.
    ///
    /// # Errors
    /// Propagates serialization or storage write failures.
    pub fn set_names(&self, names: &[String]) -> Result<(), AppError> {
        self.store.set(REGISTRY_FILES_KEY, &encode_names(names)?)
    }

    /// Move `old`'s content to `new` and persist `names` in one batch.
    ///
    /// Missing content under `old` moves as an empty document. An existing
    /// `new` row is overwritten.
    ///
    /// # Errors
    /// Propagates storage failures; on error neither content rows nor the
    /// list have changed.
    pub fn rename_document(&self, old: &str, new: &str, names: &[String]) -> Result<(), AppError> {
        let content = self.get(old)?.unwrap_or_default();
        self.store.apply(&[
            WriteOp::set(document_key(new), content),
            WriteOp::remove(document_key(old)),
            WriteOp::set(REGISTRY_FILES_KEY, encode_names(names)?),
        ])
    }

    /// Remove `name`'s content and persist `names` in one batch.
    ///
    /// # Errors
    /// Propagates storage failures; on error nothing has changed.
    pub fn delete_document(&self, name: &str, names: &[String]) -> Result<(), AppError> {
        self.store.apply(&[
            WriteOp::remove(document_key(name)),
            WriteOp::set(REGISTRY_FILES_KEY, encode_names(names)?),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::test_support::memory_store;
    use std::sync::Arc;

    #[test]
    fn content_rows_use_doc_prefix() {
        let kv = memory_store();
        let docs = DocumentStore::new(kv.clone());
        docs.set("a.md", "hello").expect("set");
        assert_eq!(kv.get("doc:a.md").expect("raw").as_deref(), Some("hello"));
        assert_eq!(docs.get("a.md").expect("get").as_deref(), Some("hello"));
        docs.remove("a.md").expect("remove");
        assert_eq!(docs.get("a.md").expect("get"), None);
    }

    #[test]
    fn names_round_trip_as_json_array() {
        let kv = memory_store();
        let docs = DocumentStore::new(kv.clone());
        assert!(docs.list_names().expect("list").is_empty());

        let names = vec!["template.md".to_string(), "b.md".to_string()];
        docs.set_names(&names).expect("set names");
        assert_eq!(
            kv.get(REGISTRY_FILES_KEY).expect("raw").as_deref(),
            Some(r#"["template.md","b.md"]"#)
        );
        assert_eq!(docs.list_names().expect("list"), names);
    }

    #[test]
    fn init_seeds_only_when_absent() {
        let docs = DocumentStore::new(memory_store());
        assert_eq!(
            docs.list_names_or_init(&["template.md"]).expect("init"),
            vec!["template.md".to_string()]
        );
        docs.set_names(&[]).expect("empty list");
        assert!(docs
            .list_names_or_init(&["template.md"])
            .expect("existing empty list")
            .is_empty());
    }

    #[test]
    fn init_reseeds_corrupt_list_row() {
        let kv = memory_store();
        kv.set(REGISTRY_FILES_KEY, "{not json").expect("corrupt");
        let docs = DocumentStore::new(kv);
        assert!(matches!(docs.list_names(), Err(AppError::Serialization(_))));
        assert_eq!(
            docs.list_names_or_init(&["template.md"]).expect("reseed"),
            vec!["template.md".to_string()]
        );
    }

    #[test]
    fn rename_is_all_or_nothing_under_quota() {
        let kv = Arc::new(MemoryStore::with_quota(64));
        let docs = DocumentStore::new(kv.clone());
        docs.set("a.md", "0123456789").expect("content");
        docs.set_names(&["a.md".to_string()]).expect("names");

        let long_name = "a-much-longer-name-that-blows-the-quota-when-listed.md";
        let err = docs
            .rename_document("a.md", long_name, &[long_name.to_string()])
            .expect_err("quota");
        assert!(matches!(err, AppError::QuotaExceeded { .. }));

        assert_eq!(docs.get("a.md").expect("get").as_deref(), Some("0123456789"));
        assert_eq!(docs.get(long_name).expect("get"), None);
        assert_eq!(docs.list_names().expect("list"), vec!["a.md".to_string()]);
    }

    #[test]
    fn delete_document_updates_both_rows() {
        let docs = DocumentStore::new(memory_store());
        docs.set("a.md", "x").expect("content");
        docs.set_names(&["a.md".to_string(), "b.md".to_string()])
            .expect("names");
        docs.delete_document("a.md", &["b.md".to_string()])
            .expect("delete");
        assert_eq!(docs.get("a.md").expect("get"), None);
        assert_eq!(docs.list_names().expect("list"), vec!["b.md".to_string()]);
    }
}
