//! Sidebar file registry: the ordered file list and its row interactions.
//!
//! Every mutation updates the in-memory list and persists it before
//! returning. Row-level UI state (the open action menu and the inline rename
//! field) lives here too so front ends only render it.

use crate::constants::BOOTSTRAP_FILE_NAME;
use crate::documents::DocumentStore;
use crate::error::AppError;
use crate::export::Download;
use crate::naming::{next_untitled_name, normalize_file_name};
use tracing::info;

/// Inline rename field state for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    /// Name of the row being renamed.
    pub original: String,
    /// Current text of the rename field.
    pub draft: String,
}

/// Keys the rename field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameKey {
    Enter,
    Escape,
    Other,
}

/// Result of feeding a key to the rename field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The rename was committed; `new` is the normalized name.
    Renamed { old: String, new: String },
    Cancelled,
    /// No rename in progress, or the key is not a commit/cancel key.
    Ignored,
}

/// Ordered file list backed by the document store.
pub struct FileRegistry {
    docs: DocumentStore,
    files: Vec<String>,
    open_menu: Option<String>,
    rename: Option<RenameDraft>,
}

impl FileRegistry {
    /// Load the persisted list, seeding `[template.md]` on first run.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub fn load(docs: DocumentStore) -> Result<Self, AppError> {
        let files = docs.list_names_or_init(&[BOOTSTRAP_FILE_NAME])?;
        Ok(Self {
            docs,
            files,
            open_menu: None,
            rename: None,
        })
    }

    /// Re-read the list from storage, dropping row state for vanished names.
    ///
    /// # Errors
    /// Propagates storage or decode failures; the in-memory list is kept.
    pub fn refresh(&mut self) -> Result<(), AppError> {
        self.files = self.docs.list_names()?;
        if let Some(open) = &self.open_menu {
            if !self.contains(open) {
                self.open_menu = None;
            }
        }
        if let Some(rename) = &self.rename {
            if !self.contains(&rename.original) {
                self.rename = None;
            }
        }
        Ok(())
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|file| file == name)
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.docs
    }

    /// Append a fresh `Untitled-N.md` entry.
    ///
    /// No content row is written; the first load seeds it.
    ///
    /// # Returns
    /// The new file name.
    ///
    /// # Errors
    /// Propagates storage failures; the in-memory list is unchanged on error.
    pub fn create(&mut self) -> Result<String, AppError> {
        let name = next_untitled_name(&self.files);
        let mut files = self.files.clone();
        files.push(name.clone());
        self.docs.set_names(&files)?;
        self.files = files;
        info!("created file entry '{}'", name);
        Ok(name)
    }

    /// Rename `old` to `new`, keeping its position in the list.
    ///
    /// `new` is normalized to carry the `.md` extension. An existing file
    /// named `new` is overwritten and its list entry merged into the renamed
    /// row, so names stay unique.
    ///
    /// # Returns
    /// The normalized new name.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when `old` is not listed,
    /// [`AppError::BadRequest`] for an invalid `new`, or a storage error. On
    /// error neither storage nor the in-memory list changed.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<String, AppError> {
        let new_name = normalize_file_name(new)?;
        let Some(index) = self.files.iter().position(|file| file == old) else {
            return Err(AppError::NotFound);
        };
        if new_name == old {
            return Ok(new_name);
        }

        let mut files = Vec::with_capacity(self.files.len());
        for (idx, file) in self.files.iter().enumerate() {
            if idx == index {
                files.push(new_name.clone());
            } else if *file != new_name {
                files.push(file.clone());
            }
        }
        self.docs.rename_document(old, &new_name, &files)?;
        self.files = files;
        if self.open_menu.as_deref() == Some(old) {
            self.open_menu = None;
        }
        info!("renamed '{}' to '{}'", old, new_name);
        Ok(new_name)
    }

    /// Remove `name`'s content and list entry. Irreversible.
    ///
    /// # Errors
    /// Propagates storage failures; nothing changes on error.
    pub fn delete(&mut self, name: &str) -> Result<(), AppError> {
        let files: Vec<String> = self
            .files
            .iter()
            .filter(|file| file.as_str() != name)
            .cloned()
            .collect();
        self.docs.delete_document(name, &files)?;
        self.files = files;
        self.open_menu = None;
        if self
            .rename
            .as_ref()
            .is_some_and(|rename| rename.original == name)
        {
            self.rename = None;
        }
        info!("deleted '{}'", name);
        Ok(())
    }

    /// Current stored content of `name` as a markdown download.
    ///
    /// Missing content downloads as an empty file.
    ///
    /// # Errors
    /// Propagates storage read failures.
    pub fn download(&mut self, name: &str) -> Result<Download, AppError> {
        let content = self.docs.get(name)?.unwrap_or_default();
        self.open_menu = None;
        Ok(Download::markdown(name, content))
    }

    /// Row whose action menu is open, if any.
    pub fn open_menu(&self) -> Option<&str> {
        self.open_menu.as_deref()
    }

    /// Open `name`'s menu, or close it when it is already the open one.
    pub fn toggle_menu(&mut self, name: &str) {
        if self.open_menu.as_deref() == Some(name) {
            self.open_menu = None;
        } else {
            self.open_menu = Some(name.to_string());
        }
    }

    /// Close any open menu (click outside).
    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    /// Put `name`'s row into rename mode, seeded with its current name.
    pub fn start_rename(&mut self, name: &str) {
        self.open_menu = None;
        self.rename = Some(RenameDraft {
            original: name.to_string(),
            draft: name.to_string(),
        });
    }

    pub fn rename_draft(&self) -> Option<&RenameDraft> {
        self.rename.as_ref()
    }

    /// Mutable text of the rename field, for binding to an input widget.
    pub fn rename_text_mut(&mut self) -> Option<&mut String> {
        self.rename.as_mut().map(|rename| &mut rename.draft)
    }

    /// Feed a key press to the rename field.
    ///
    /// # Errors
    /// A failed commit returns the rename error and keeps the field open so
    /// the draft can be corrected.
    pub fn handle_rename_key(&mut self, key: RenameKey) -> Result<RenameOutcome, AppError> {
        match key {
            RenameKey::Escape => Ok(match self.rename.take() {
                Some(_) => RenameOutcome::Cancelled,
                None => RenameOutcome::Ignored,
            }),
            RenameKey::Enter => {
                let Some(RenameDraft { original, draft }) = self.rename.clone() else {
                    return Ok(RenameOutcome::Ignored);
                };
                let new = self.rename(&original, &draft)?;
                self.rename = None;
                Ok(RenameOutcome::Renamed { old: original, new })
            }
            RenameKey::Other => Ok(RenameOutcome::Ignored),
        }
    }
}
