//! Download payloads produced by editor export and registry download.

use crate::constants::MARKDOWN_MIME;
use crate::error::AppError;
use std::path::{Path, PathBuf};

/// A document ready to hand to the user as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub content: String,
}

impl Download {
    /// Markdown download named after the logical file name.
    pub fn markdown(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: MARKDOWN_MIME,
            content: content.into(),
        }
    }

    /// File name safe to use as a single path component.
    ///
    /// Path separators and characters Windows refuses are replaced with `_`.
    pub fn sanitized_file_name(&self) -> String {
        self.file_name
            .chars()
            .map(|ch| match ch {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                ch if ch.is_control() => '_',
                ch => ch,
            })
            .collect()
    }

    /// Write the content to `path`, replacing any existing file.
    ///
    /// # Errors
    /// Returns an I/O error when the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), AppError> {
        std::fs::write(path, self.content.as_bytes())?;
        Ok(())
    }

    /// Write into directory `dir` under the sanitized file name.
    ///
    /// # Returns
    /// The path that was written.
    ///
    /// # Errors
    /// Returns an I/O error when the directory cannot be created or the file
    /// cannot be written.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf, AppError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.sanitized_file_name());
        self.write_to(&path)?;
        Ok(path)
    }
}
