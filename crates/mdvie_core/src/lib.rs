//! Core domain library for MDVie (config, storage, documents, editor session).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants (storage keys, timings, bounds).
pub mod constants;
/// Document persistence over the key-value store.
pub mod documents;
/// Application error types (storage/domain).
pub mod error;
/// Download payloads emitted by export and registry downloads.
pub mod export;
/// Key chord table for the editor.
pub mod keymap;
/// Resolving a file name to its initial editor content.
pub mod loader;
/// File name normalization and synthesis.
pub mod naming;
/// Markdown to preview blocks.
pub mod preview;
/// Sidebar file registry controller.
pub mod registry;
/// Cooperative periodic timers.
pub mod schedule;
/// Editor session state and operations.
pub mod session;
/// Persisted user settings.
pub mod settings;
/// Key-value storage backends.
pub mod storage;
/// Bootstrap template sources.
pub mod templates;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::*;
pub use documents::DocumentStore;
pub use error::AppError;
pub use export::Download;
pub use registry::FileRegistry;
pub use session::{CommandEffect, EditorSession, KeyOutcome, ViewMode};
pub use settings::Settings;
pub use storage::{open_store, KeyValueStore, MemoryStore, RedbStore, SharedStore, WriteOp};
