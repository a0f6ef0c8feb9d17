//! Configuration loading from environment variables.

use crate::constants::DEFAULT_AUTO_SAVE_INTERVAL_MS;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for MDVie front ends.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the redb file.
    pub db_path: String,
    /// Optional override for the bootstrap template asset.
    pub template_path: Option<PathBuf>,
    /// Auto-save period in milliseconds.
    pub auto_save_interval: u64,
    /// Default directory for downloads and exports.
    pub download_dir: PathBuf,
    /// Keep everything in memory and never touch `db_path`.
    pub ephemeral: bool,
}

fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Non-blank path read from `name`, with a leading `~/` resolved against home.
fn env_path(name: &str) -> Option<PathBuf> {
    let value = env::var(name).ok().filter(|value| !value.trim().is_empty())?;
    match (value.strip_prefix("~/"), home_dir()) {
        (Some(rest), Some(home)) => Some(home.join(rest)),
        _ => Some(PathBuf::from(value)),
    }
}

/// `1`, `true`, `yes` and `on` enable a flag, case-insensitively.
fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            db_path: env_path("DB_PATH")
                .unwrap_or_else(|| home.join(".cache").join("mdvie").join("db"))
                .to_string_lossy()
                .to_string(),
            template_path: env_path("MDVIE_TEMPLATE_PATH"),
            auto_save_interval: env::var("AUTO_SAVE_INTERVAL")
                .ok()
                .and_then(|value| value.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_AUTO_SAVE_INTERVAL_MS),
            download_dir: env_path("MDVIE_DOWNLOAD_DIR")
                .unwrap_or_else(|| home.join("Downloads")),
            ephemeral: env_flag("MDVIE_EPHEMERAL"),
        }
    }

    /// Auto-save period as a [`Duration`].
    pub fn auto_save_period(&self) -> Duration {
        Duration::from_millis(self.auto_save_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "db".to_string(),
            template_path: None,
            auto_save_interval: DEFAULT_AUTO_SAVE_INTERVAL_MS,
            download_dir: PathBuf::from("."),
            ephemeral: true,
        }
    }
}
