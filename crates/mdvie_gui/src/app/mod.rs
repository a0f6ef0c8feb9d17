//! egui application shell: routing, the open editor session and feedback.

mod routes;
mod shortcuts;
mod state_feedback;
mod state_ops;
mod style;
mod ui;

pub use routes::Route;

use eframe::egui;
use mdvie_core::templates::{template_source, TemplateSource};
use mdvie_core::{
    open_store, AppError, Config, Download, EditorSession, FileRegistry, Settings, SharedStore,
    BOOTSTRAP_FILE_NAME,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use style::*;
use tracing::info;

/// Desktop application state.
///
/// Everything runs on the UI thread: storage calls are synchronous and the
/// auto-save timer is polled once per frame.
pub(crate) struct MdvieApp {
    store: SharedStore,
    config: Config,
    templates: Box<dyn TemplateSource>,
    registry: FileRegistry,
    route: Route,
    session: Option<EditorSession>,
    settings: Settings,
    git_username_draft: String,
    git_email_draft: String,
    git_saved_until: Option<Instant>,
    pending_downloads: VecDeque<Download>,
    menu_clicked: bool,
    status: Option<StatusMessage>,
    toasts: VecDeque<ToastMessage>,
    style_applied: bool,
}

struct StatusMessage {
    text: String,
    expires_at: Instant,
}

struct ToastMessage {
    text: String,
    expires_at: Instant,
}

const STATUS_TTL: Duration = Duration::from_secs(5);
const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_LIMIT: usize = 4;
const GIT_SAVED_TTL: Duration = Duration::from_secs(2);
#[doc = "Default initial window size for desktop startup."]
pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1200.0, 760.0];
#[doc = "Minimum window size that keeps the sidebar and split view usable."]
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [820.0, 520.0];
const SIDEBAR_WIDTH: f32 = 240.0;

impl MdvieApp {
    /// Construct the app from `config`, opening the configured store, and
    /// show `start`.
    ///
    /// # Errors
    /// Returns an error if the store cannot be opened or the file list cannot
    /// be read.
    pub(crate) fn new(config: Config, start: Route) -> Result<Self, AppError> {
        let store = open_store(&config)?;
        info!(
            "desktop shell using {} store at {}",
            if config.ephemeral { "memory" } else { "redb" },
            config.db_path
        );
        let templates = template_source(config.template_path.clone());
        Self::with_store(store, config, templates, start, Instant::now())
    }

    /// Construct the app over an already-open store and navigate to `start`.
    ///
    /// When `start` cannot be opened the app stays on the settings page.
    ///
    /// # Errors
    /// Returns an error if the file list or settings cannot be read.
    pub(crate) fn with_store(
        store: SharedStore,
        config: Config,
        templates: Box<dyn TemplateSource>,
        start: Route,
        now: Instant,
    ) -> Result<Self, AppError> {
        let registry = FileRegistry::load(mdvie_core::DocumentStore::new(store.clone()))?;
        let settings = Settings::load(&store)?;
        let mut app = Self {
            git_username_draft: settings.git_username.clone(),
            git_email_draft: settings.git_email.clone(),
            store,
            config,
            templates,
            registry,
            route: Route::Settings,
            session: None,
            settings,
            git_saved_until: None,
            pending_downloads: VecDeque::new(),
            menu_clicked: false,
            status: None,
            toasts: VecDeque::with_capacity(TOAST_LIMIT),
            style_applied: false,
        };
        app.navigate(start, now);
        Ok(app)
    }

    fn expire_feedback(&mut self, now: Instant) {
        if let Some(status) = &self.status {
            if now >= status.expires_at {
                self.status = None;
            }
        }
        while self
            .toasts
            .front()
            .map(|toast| now >= toast.expires_at)
            .unwrap_or(false)
        {
            self.toasts.pop_front();
        }
        if self.git_saved_until.is_some_and(|until| now >= until) {
            self.git_saved_until = None;
        }
    }

    /// Earliest instant at which the UI changes without input.
    fn next_wakeup(&self, now: Instant) -> Option<Instant> {
        let session = self
            .session
            .as_ref()
            .and_then(|session| session.next_deadline(now));
        let status = self.status.as_ref().map(|status| status.expires_at);
        let toast = self.toasts.front().map(|toast| toast.expires_at);
        [session, status, toast, self.git_saved_until]
            .into_iter()
            .flatten()
            .min()
    }
}

impl eframe::App for MdvieApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);
        let now = Instant::now();
        self.expire_feedback(now);
        self.maybe_autosave(now);

        if matches!(self.route, Route::Editor(_)) {
            let chords = ctx.input_mut(|input| shortcuts::take_bound_chords(&mut input.events));
            for chord in chords {
                self.handle_chord(chord, now);
            }
        }

        self.menu_clicked = false;
        self.render_sidebar(ctx);
        self.render_status_bar(ctx);
        match self.route {
            Route::Editor(_) => self.render_editor_panel(ctx),
            Route::Settings => self.render_settings_panel(ctx),
        }
        self.render_toasts(ctx);
        if !self.menu_clicked && ctx.input(|input| input.pointer.any_click()) {
            self.registry.close_menu();
        }

        self.flush_downloads();

        if let Some(wakeup) = self.next_wakeup(now) {
            ctx.request_repaint_after(wakeup.saturating_duration_since(Instant::now()));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.close_session();
    }
}

#[cfg(test)]
mod tests;
