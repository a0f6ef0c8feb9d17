//! File name normalization and synthesis.

use crate::constants::{DOCUMENT_EXTENSION, DOC_KEY_PREFIX};
use crate::error::AppError;

/// Storage key for the content of `name`.
pub fn document_key(name: &str) -> String {
    format!("{}{}", DOC_KEY_PREFIX, name)
}

/// Name without its trailing document extension.
///
/// Only a single trailing `.md` is stripped, so `notes.md.md` keeps one.
pub fn base_name(name: &str) -> &str {
    name.strip_suffix(DOCUMENT_EXTENSION).unwrap_or(name)
}

/// Validate a user-supplied name and make sure it carries the extension.
///
/// # Returns
/// The trimmed name, suffixed with `.md` when it was missing.
///
/// # Errors
/// Returns [`AppError::BadRequest`] for empty names, names that are only the
/// extension, and names containing control characters.
pub fn normalize_file_name(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("File name cannot be empty".to_string()));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(AppError::BadRequest(format!(
            "File name '{}' contains control characters",
            trimmed.escape_default()
        )));
    }
    if trimmed == DOCUMENT_EXTENSION {
        return Err(AppError::BadRequest(
            "File name needs more than an extension".to_string(),
        ));
    }
    if trimmed.ends_with(DOCUMENT_EXTENSION) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}{}", trimmed, DOCUMENT_EXTENSION))
    }
}

/// Synthesize the next `Untitled-N.md` name for a registry of `existing` names.
///
/// Starts at `existing.len() + 1` and counts upward past any collision, which
/// only happens after deletes have shortened the list.
pub fn next_untitled_name<S: AsRef<str>>(existing: &[S]) -> String {
    let mut counter = existing.len() + 1;
    loop {
        let candidate = format!("Untitled-{}{}", counter, DOCUMENT_EXTENSION);
        if !existing.iter().any(|name| name.as_ref() == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_missing_extension() {
        assert_eq!(normalize_file_name("notes").expect("name"), "notes.md");
        assert_eq!(normalize_file_name("  notes.md ").expect("name"), "notes.md");
        assert_eq!(
            normalize_file_name("release notes").expect("name"),
            "release notes.md"
        );
    }

    #[test]
    fn normalize_rejects_degenerate_names() {
        for bad in ["", "   ", ".md", "a\nb"] {
            let err = normalize_file_name(bad).expect_err("must reject");
            assert!(matches!(err, AppError::BadRequest(_)), "input: {:?}", bad);
        }
    }

    #[test]
    fn base_name_strips_one_extension() {
        assert_eq!(base_name("notes.md"), "notes");
        assert_eq!(base_name("notes.md.md"), "notes.md");
        assert_eq!(base_name("README"), "README");
    }

    #[test]
    fn untitled_names_follow_count_and_skip_collisions() {
        let empty: [&str; 0] = [];
        assert_eq!(next_untitled_name(&empty), "Untitled-1.md");
        assert_eq!(next_untitled_name(&["template.md"]), "Untitled-2.md");
        assert_eq!(
            next_untitled_name(&["Untitled-2.md", "x.md"]),
            "Untitled-3.md"
        );
        assert_eq!(next_untitled_name(&["Untitled-2.md"]), "Untitled-3.md");
    }

    #[test]
    fn document_key_is_prefixed() {
        assert_eq!(document_key("a.md"), "doc:a.md");
    }
}
