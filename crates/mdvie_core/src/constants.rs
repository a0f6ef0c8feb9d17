//! Shared constants used across MDVie crates.

use std::time::Duration;

/// Storage key prefix for per-document content rows.
pub const DOC_KEY_PREFIX: &str = "doc:";

/// Storage key holding the JSON-encoded ordered file list.
pub const REGISTRY_FILES_KEY: &str = "doc-registry:files";
/// Storage key for the editor font size (integer points).
pub const FONT_SIZE_KEY: &str = "doc-registry:font-size";
/// Storage key for the git user name.
pub const GIT_USERNAME_KEY: &str = "doc-registry:git-username";
/// Storage key for the git email.
pub const GIT_EMAIL_KEY: &str = "doc-registry:git-email";

/// Extension every document name carries.
pub const DOCUMENT_EXTENSION: &str = ".md";
/// MIME type attached to exported and downloaded documents.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Distinguished file name that seeds an empty registry and loads the template asset.
pub const BOOTSTRAP_FILE_NAME: &str = "template.md";

/// Default auto-save period in milliseconds.
pub const DEFAULT_AUTO_SAVE_INTERVAL_MS: u64 = 5_000;
/// How long the "Saved" acknowledgment stays visible after a manual save.
pub const SAVE_ACK_TTL: Duration = Duration::from_secs(2);

/// Smallest selectable editor font size.
pub const MIN_FONT_SIZE: u8 = 12;
/// Largest selectable editor font size.
pub const MAX_FONT_SIZE: u8 = 24;
/// Font size used when nothing is stored.
pub const DEFAULT_FONT_SIZE: u8 = 14;
