//! Persisted user settings: editor font size and git identity.

use crate::constants::{
    DEFAULT_FONT_SIZE, FONT_SIZE_KEY, GIT_EMAIL_KEY, GIT_USERNAME_KEY, MAX_FONT_SIZE,
    MIN_FONT_SIZE,
};
use crate::error::AppError;
use crate::storage::{SharedStore, WriteOp};
use serde::Serialize;
use tracing::{info, warn};

/// Values shown on the settings view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub font_size: u8,
    pub git_username: String,
    pub git_email: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            git_username: String::new(),
            git_email: String::new(),
        }
    }
}

/// Clamp a requested font size into the supported range.
pub fn clamp_font_size(size: i64) -> u8 {
    let clamped = size.clamp(i64::from(MIN_FONT_SIZE), i64::from(MAX_FONT_SIZE));
    u8::try_from(clamped).unwrap_or(DEFAULT_FONT_SIZE)
}

fn parse_font_size(raw: &str) -> Option<u8> {
    raw.trim().parse::<i64>().ok().map(clamp_font_size)
}

impl Settings {
    /// Read settings, using defaults for missing rows.
    ///
    /// # Errors
    /// Propagates storage read failures.
    pub fn load(store: &SharedStore) -> Result<Self, AppError> {
        let font_size = match store.get(FONT_SIZE_KEY)? {
            Some(raw) => parse_font_size(&raw).unwrap_or_else(|| {
                warn!(
                    "ignoring unparseable font size '{}', using {}",
                    raw, DEFAULT_FONT_SIZE
                );
                DEFAULT_FONT_SIZE
            }),
            None => DEFAULT_FONT_SIZE,
        };
        Ok(Self {
            font_size,
            git_username: store.get(GIT_USERNAME_KEY)?.unwrap_or_default(),
            git_email: store.get(GIT_EMAIL_KEY)?.unwrap_or_default(),
        })
    }

    /// Clamp and persist a new font size.
    ///
    /// # Returns
    /// The size actually stored.
    ///
    /// # Errors
    /// Propagates storage failures; `self` is unchanged on error.
    pub fn set_font_size(&mut self, store: &SharedStore, size: i64) -> Result<u8, AppError> {
        let size = clamp_font_size(size);
        store.set(FONT_SIZE_KEY, &size.to_string())?;
        self.font_size = size;
        Ok(size)
    }

    /// Validate and persist the git identity in one batch.
    ///
    /// Both fields are trimmed before storing.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] when either field is blank, or a
    /// storage error. Nothing is written on error.
    pub fn submit_git_identity(
        &mut self,
        store: &SharedStore,
        username: &str,
        email: &str,
    ) -> Result<(), AppError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() {
            return Err(AppError::BadRequest("Git username is required".to_string()));
        }
        if email.is_empty() {
            return Err(AppError::BadRequest("Git email is required".to_string()));
        }
        store.apply(&[
            WriteOp::set(GIT_USERNAME_KEY, username),
            WriteOp::set(GIT_EMAIL_KEY, email),
        ])?;
        self.git_username = username.to_string();
        self.git_email = email.to_string();
        info!("updated git identity for '{}'", username);
        Ok(())
    }
}
