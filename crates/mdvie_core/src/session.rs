//! Editor session: the live buffer of the open file and what can be done to it.
//!
//! A session is built for one file name and lives until the front end
//! switches files. It owns the auto-save timer, so dropping or ending the
//! session is what stops periodic writes.

use crate::constants::{DEFAULT_FONT_SIZE, SAVE_ACK_TTL};
use crate::documents::DocumentStore;
use crate::error::AppError;
use crate::export::Download;
use crate::keymap::{command_for, EditorCommand, KeyChord, SnippetKind};
use crate::schedule::PeriodicTimer;
use chrono::{DateTime, Local, Utc};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Which panes the editor shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    Edit,
    Preview,
    #[default]
    Split,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Edit, ViewMode::Preview, ViewMode::Split];

    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Preview => "Preview",
            Self::Split => "Split",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            Self::Edit => "Edit mode (Ctrl+1)",
            Self::Preview => "Preview mode (Ctrl+2)",
            Self::Split => "Split mode (Ctrl+3)",
        }
    }

    pub fn shows_editor(self) -> bool {
        matches!(self, Self::Edit | Self::Split)
    }

    pub fn shows_preview(self) -> bool {
        matches!(self, Self::Preview | Self::Split)
    }
}

/// What executing a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEffect {
    Edited,
    ViewChanged(ViewMode),
    Saved,
    Exported(Download),
}

/// Whether a key chord was consumed by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled(CommandEffect),
    Ignored,
}

/// Live buffer, view mode and save bookkeeping for one open file.
pub struct EditorSession {
    docs: DocumentStore,
    name: String,
    buffer: String,
    view_mode: ViewMode,
    font_size: u8,
    revision: u64,
    saved_revision: u64,
    last_saved: Option<DateTime<Utc>>,
    save_ack_until: Option<Instant>,
    autosave: PeriodicTimer,
}

impl EditorSession {
    /// Open a session for `name` with already-resolved `content`.
    ///
    /// The auto-save timer starts immediately and first fires one
    /// `autosave_period` after `now`.
    pub fn new(
        docs: DocumentStore,
        name: impl Into<String>,
        content: impl Into<String>,
        autosave_period: Duration,
        now: Instant,
    ) -> Self {
        Self {
            docs,
            name: name.into(),
            buffer: content.into(),
            view_mode: ViewMode::default(),
            font_size: DEFAULT_FONT_SIZE,
            revision: 0,
            saved_revision: 0,
            last_saved: None,
            save_ack_until: None,
            autosave: PeriodicTimer::started(autosave_period, now),
        }
    }

    /// Switch to another file, replacing the buffer and restarting auto-save.
    ///
    /// The view mode is kept; save bookkeeping is reset.
    pub fn load(&mut self, name: impl Into<String>, content: impl Into<String>, now: Instant) {
        self.name = name.into();
        self.buffer = content.into();
        self.revision = 0;
        self.saved_revision = 0;
        self.last_saved = None;
        self.save_ack_until = None;
        self.autosave.start(now);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Buffer for in-place editing widgets. Call [`Self::mark_edited`] after
    /// changing it.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    pub fn mark_edited(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Replace the buffer verbatim.
    pub fn edit(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.buffer {
            self.buffer = text;
            self.mark_edited();
        }
    }

    /// Append `prefix + placeholder + suffix` to the end of the buffer.
    ///
    /// Insertion ignores the cursor position.
    pub fn insert_syntax(&mut self, prefix: &str, suffix: &str, placeholder: &str) {
        self.buffer.reserve(prefix.len() + placeholder.len() + suffix.len());
        self.buffer.push_str(prefix);
        self.buffer.push_str(placeholder);
        self.buffer.push_str(suffix);
        self.mark_edited();
    }

    /// Append a toolbar snippet.
    pub fn insert_snippet(&mut self, kind: SnippetKind) {
        let snippet = kind.snippet();
        self.insert_syntax(snippet.prefix, snippet.suffix, snippet.placeholder);
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: u8) {
        self.font_size = size;
    }

    /// Whether the buffer changed since the last successful write.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Last save time as local `HH:MM`, for the editor header.
    pub fn last_saved_label(&self) -> Option<String> {
        self.last_saved
            .map(|at| at.with_timezone(&Local).format("%H:%M").to_string())
    }

    /// Whether the manual-save acknowledgment is still showing at `now`.
    pub fn show_save_ack(&self, now: Instant) -> bool {
        self.save_ack_until.is_some_and(|until| now < until)
    }

    fn write_buffer(&mut self) -> Result<(), AppError> {
        self.docs.set(&self.name, &self.buffer)?;
        self.last_saved = Some(Utc::now());
        self.saved_revision = self.revision;
        Ok(())
    }

    /// Write the buffer under the current name and raise the acknowledgment.
    ///
    /// # Errors
    /// Propagates storage failures. The buffer is kept and no save time is
    /// recorded, so the caller can show a notice and retry.
    pub fn save(&mut self, now: Instant) -> Result<(), AppError> {
        self.write_buffer()?;
        self.save_ack_until = Some(now + SAVE_ACK_TTL);
        debug!("saved '{}' ({} bytes)", self.name, self.buffer.len());
        Ok(())
    }

    /// Poll the auto-save timer.
    ///
    /// Writes unconditionally when the timer fires, whether or not the buffer
    /// changed. No acknowledgment is raised.
    ///
    /// # Returns
    /// `true` when a write happened.
    ///
    /// # Errors
    /// Propagates storage failures; the timer stays armed for the next period.
    pub fn tick(&mut self, now: Instant) -> Result<bool, AppError> {
        if !self.autosave.poll(now) {
            return Ok(false);
        }
        if let Err(err) = self.write_buffer() {
            warn!("auto-save of '{}' failed: {}", self.name, err);
            return Err(err);
        }
        debug!("auto-saved '{}'", self.name);
        Ok(true)
    }

    /// Stop periodic writes. The session stays readable.
    pub fn end(&mut self) {
        self.autosave.stop();
    }

    pub fn autosave_running(&self) -> bool {
        self.autosave.is_running()
    }

    /// Earliest instant at which something time-driven changes: the next
    /// auto-save or the acknowledgment expiring.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let ack = self.save_ack_until.filter(|until| *until > now);
        match (self.autosave.deadline(), ack) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// The current buffer as a markdown download named after the file.
    pub fn export(&self) -> Download {
        Download::markdown(self.name.clone(), self.buffer.clone())
    }

    /// Run a toolbar or keyboard command.
    ///
    /// # Errors
    /// Only [`EditorCommand::Save`] can fail; see [`Self::save`].
    pub fn execute(
        &mut self,
        command: EditorCommand,
        now: Instant,
    ) -> Result<CommandEffect, AppError> {
        match command {
            EditorCommand::Insert(kind) => {
                self.insert_snippet(kind);
                Ok(CommandEffect::Edited)
            }
            EditorCommand::SetView(mode) => {
                self.set_view_mode(mode);
                Ok(CommandEffect::ViewChanged(mode))
            }
            EditorCommand::Save => {
                self.save(now)?;
                Ok(CommandEffect::Saved)
            }
            EditorCommand::Export => Ok(CommandEffect::Exported(self.export())),
        }
    }

    /// Dispatch a key chord through the shortcut table.
    ///
    /// # Returns
    /// [`KeyOutcome::Ignored`] when the chord is not bound; the front end
    /// must then leave the key to its default handling.
    ///
    /// # Errors
    /// A bound chord whose command fails is still consumed; the error is
    /// returned for display.
    pub fn handle_key(&mut self, chord: KeyChord, now: Instant) -> Result<KeyOutcome, AppError> {
        match command_for(chord) {
            Some(command) => self.execute(command, now).map(KeyOutcome::Handled),
            None => Ok(KeyOutcome::Ignored),
        }
    }
}

#[cfg(test)]
mod tests;
