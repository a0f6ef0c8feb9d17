//! redb table definitions for the file-backed store.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Every persisted key-value pair (document bodies, registry list, settings).
pub const ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("entries");
