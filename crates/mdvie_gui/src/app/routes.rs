//! In-app navigation paths.

use std::fmt;

const EDIT_PREFIX: &str = "/edit/";
const SETTINGS_PATH: &str = "/settings";

/// A page of the desktop shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Editor for one file, addressed by its full name.
    Editor(String),
    Settings,
}

impl Route {
    /// Parse `/edit/<percent-encoded name>` or `/settings`.
    ///
    /// # Returns
    /// `None` for any other path, an empty name, or invalid percent-encoding.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        if path == SETTINGS_PATH {
            return Some(Self::Settings);
        }
        let encoded = path.strip_prefix(EDIT_PREFIX)?;
        let name = urlencoding::decode(encoded).ok()?;
        if name.is_empty() {
            return None;
        }
        Some(Self::Editor(name.into_owned()))
    }

    pub fn path(&self) -> String {
        match self {
            Self::Editor(name) => format!("{}{}", EDIT_PREFIX, urlencoding::encode(name)),
            Self::Settings => SETTINGS_PATH.to_string(),
        }
    }

    /// File name for editor routes.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Editor(name) => Some(name),
            Self::Settings => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
