//! Root crate facade for the MDVie editor.

pub use mdvie_core::{
    config, documents, error, export, keymap, loader, naming, preview, registry, schedule,
    session, settings, storage, templates, AppError, Config, DocumentStore, Download,
    EditorSession, FileRegistry, Settings, SharedStore,
};

#[cfg(feature = "gui")]
/// Launch the desktop editor.
pub use mdvie_gui::run as run_gui;
