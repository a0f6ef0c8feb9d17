//! State transitions driven by navigation, sidebar actions and the editor.

use super::{MdvieApp, Route, GIT_SAVED_TTL};
use mdvie_core::keymap::{EditorCommand, KeyChord};
use mdvie_core::loader::load_document;
use mdvie_core::registry::{RenameKey, RenameOutcome};
use mdvie_core::session::{CommandEffect, KeyOutcome};
use mdvie_core::{Download, EditorSession};
use std::time::Instant;
use tracing::{info, warn};

impl MdvieApp {
    pub(super) fn current_file(&self) -> Option<&str> {
        self.route.file_name()
    }

    /// Write the open buffer if it has unsaved edits.
    fn flush_session(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_dirty() {
            return;
        }
        if let Err(err) = session.save(Instant::now()) {
            let message = format!("Save of {} failed: {}", session.name(), err);
            warn!("{}", message);
            self.set_status(message);
        }
    }

    /// Flush the open buffer and stop its auto-save timer.
    pub(super) fn close_session(&mut self) {
        self.flush_session();
        if let Some(session) = self.session.as_mut() {
            session.end();
        }
    }

    /// Switch to `route`, ending the current editor session.
    ///
    /// Editor routes resolve their content through the loader, which seeds
    /// defaults for files that have never been saved. If that fails the
    /// current page stays open.
    pub(super) fn navigate(&mut self, route: Route, now: Instant) {
        if route == self.route && self.session.is_some() {
            return;
        }
        self.registry.close_menu();

        let Route::Editor(name) = &route else {
            self.close_session();
            self.session = None;
            self.route = route;
            return;
        };
        self.flush_session();
        let loaded = match load_document(self.registry.documents(), self.templates.as_ref(), name)
        {
            Ok(loaded) => loaded,
            Err(err) => {
                self.set_status(format!("Could not open {}: {}", name, err));
                return;
            }
        };
        match self.session.as_mut() {
            Some(session) => session.load(loaded.name, loaded.content, now),
            None => {
                let mut session = EditorSession::new(
                    self.registry.documents().clone(),
                    loaded.name,
                    loaded.content,
                    self.config.auto_save_period(),
                    now,
                );
                session.set_font_size(self.settings.font_size);
                self.session = Some(session);
            }
        }
        info!("opened {}", route);
        self.route = route;
    }

    pub(super) fn create_file(&mut self, now: Instant) {
        match self.registry.create() {
            Ok(name) => self.navigate(Route::Editor(name), now),
            Err(err) => self.set_status(format!("Could not create file: {}", err)),
        }
    }

    /// Feed a key to the inline rename field and follow the renamed file.
    pub(super) fn handle_rename_key(&mut self, key: RenameKey, now: Instant) {
        let renaming_current = self
            .registry
            .rename_draft()
            .is_some_and(|draft| Some(draft.original.as_str()) == self.current_file());
        if key == RenameKey::Enter && renaming_current {
            // The rename moves stored content, so store the latest buffer first.
            self.flush_session();
        }
        match self.registry.handle_rename_key(key) {
            Ok(RenameOutcome::Renamed { old, new }) => {
                // Renaming the open file, or onto it, replaces what the session
                // holds. Drop it unsaved and reload from storage.
                let current = self.current_file();
                if current == Some(old.as_str()) || current == Some(new.as_str()) {
                    self.session = None;
                    self.navigate(Route::Editor(new), now);
                }
            }
            Ok(RenameOutcome::Cancelled | RenameOutcome::Ignored) => {}
            Err(err) => self.set_status(format!("Rename failed: {}", err)),
        }
    }

    pub(super) fn delete_file(&mut self, name: &str, now: Instant) {
        if let Err(err) = self.registry.delete(name) {
            self.set_status(format!("Delete failed: {}", err));
            return;
        }
        self.set_status(format!("Deleted {}", name));
        if self.current_file() == Some(name) {
            // Dropping the session stops its timer without writing the
            // deleted name back.
            self.session = None;
            match self.registry.files().first().cloned() {
                Some(next) => self.navigate(Route::Editor(next), now),
                None => self.navigate(Route::Settings, now),
            }
        }
    }

    pub(super) fn download_file(&mut self, name: &str) {
        // Downloads read storage, so flush edits to the open file first.
        if self.current_file() == Some(name) {
            self.flush_session();
        }
        match self.registry.download(name) {
            Ok(download) => self.pending_downloads.push_back(download),
            Err(err) => self.set_status(format!("Download failed: {}", err)),
        }
    }

    pub(super) fn run_editor_command(&mut self, command: EditorCommand, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let result = session.execute(command, now);
        self.apply_command_result(result);
    }

    pub(super) fn handle_chord(&mut self, chord: KeyChord, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.handle_key(chord, now) {
            Ok(KeyOutcome::Handled(effect)) => self.apply_command_result(Ok(effect)),
            Ok(KeyOutcome::Ignored) => {}
            Err(err) => self.apply_command_result(Err(err)),
        }
    }

    fn apply_command_result(&mut self, result: Result<CommandEffect, mdvie_core::AppError>) {
        match result {
            Ok(CommandEffect::Exported(download)) => self.pending_downloads.push_back(download),
            Ok(_) => {}
            Err(err) => self.set_status(format!("Save failed: {}", err)),
        }
    }

    /// Poll the auto-save timer of the open session.
    pub(super) fn maybe_autosave(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Err(err) = session.tick(now) {
            self.set_status(format!("Auto-save failed: {}", err));
        }
    }

    pub(super) fn set_font_size(&mut self, size: i64) {
        match self.settings.set_font_size(&self.store, size) {
            Ok(size) => {
                if let Some(session) = self.session.as_mut() {
                    session.set_font_size(size);
                }
            }
            Err(err) => self.set_status(format!("Could not save font size: {}", err)),
        }
    }

    pub(super) fn submit_git_identity(&mut self, now: Instant) {
        let username = self.git_username_draft.clone();
        let email = self.git_email_draft.clone();
        match self
            .settings
            .submit_git_identity(&self.store, &username, &email)
        {
            Ok(()) => {
                self.git_username_draft = self.settings.git_username.clone();
                self.git_email_draft = self.settings.git_email.clone();
                self.git_saved_until = Some(now + GIT_SAVED_TTL);
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    /// Hand queued downloads to the native save dialog.
    pub(super) fn flush_downloads(&mut self) {
        while let Some(download) = self.pending_downloads.pop_front() {
            self.save_download_with_dialog(&download);
        }
    }

    fn save_download_with_dialog(&mut self, download: &Download) {
        let file_name = download.sanitized_file_name();
        let dialog = rfd::FileDialog::new()
            .set_directory(&self.config.download_dir)
            .set_file_name(file_name.as_str())
            .add_filter("Markdown", &["md"]);
        let Some(path) = dialog.save_file() else {
            return;
        };
        match download.write_to(&path) {
            Ok(()) => self.set_status(format!(
                "Downloaded {} to {}",
                download.file_name,
                path.to_string_lossy()
            )),
            Err(err) => self.set_status(format!("Download failed: {}", err)),
        }
    }
}
