//! Desktop shell for MDVie.
//!
//! Exposes a `run` helper so the workspace root binary can launch the editor
//! without duplicating initialization logic. An optional first argument picks
//! the starting page: `/edit/<percent-encoded name>` or `/settings`.

mod app;

pub use app::Route;

use app::MdvieApp;
use eframe::egui;
use mdvie_core::{Config, BOOTSTRAP_FILE_NAME};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "mdvie=warn,mdvie_core=warn,mdvie_gui=info";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from a host that already installed a subscriber)
    // is not an error for the editor.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Page to open first; unknown paths fall back to the bootstrap file.
fn start_route(arg: Option<&str>) -> Route {
    let fallback = || Route::Editor(BOOTSTRAP_FILE_NAME.to_string());
    let Some(path) = arg else {
        return fallback();
    };
    Route::parse(path).unwrap_or_else(|| {
        warn!("ignoring unknown start path '{}'", path);
        fallback()
    })
}

/// Start the desktop editor with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error, including app
/// creation failures when the document store cannot be opened.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = Config::from_env();
    let start = start_route(std::env::args().nth(1).as_deref());
    let app =
        MdvieApp::new(config, start).map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("MDVie"),
        ..Default::default()
    };

    eframe::run_native("MDVie", options, Box::new(|_cc| Ok(Box::new(app))))
}
