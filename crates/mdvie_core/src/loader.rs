//! Resolve a file name to the content an editor session starts with.

use crate::constants::BOOTSTRAP_FILE_NAME;
use crate::documents::DocumentStore;
use crate::error::AppError;
use crate::templates::{default_document, TemplateSource};
use serde::Serialize;
use tracing::{info, warn};

/// Where the loaded content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentOrigin {
    Stored,
    Template,
    Synthesized,
}

/// Content resolved for an editor session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedDocument {
    pub name: String,
    pub content: String,
    pub origin: ContentOrigin,
}

/// Resolve `name` to its content, persisting a default when nothing is stored.
///
/// Stored content wins, including an empty string. Otherwise the bootstrap
/// file reads the template asset and every other name gets a synthesized
/// document titled with its base name. A failed template read falls back to
/// the synthesized default. Defaults are written back immediately so the
/// next load sees them as stored content.
///
/// # Errors
/// Propagates storage read/write failures. Template failures never surface.
pub fn load_document(
    docs: &DocumentStore,
    templates: &dyn TemplateSource,
    name: &str,
) -> Result<LoadedDocument, AppError> {
    if let Some(content) = docs.get(name)? {
        return Ok(LoadedDocument {
            name: name.to_string(),
            content,
            origin: ContentOrigin::Stored,
        });
    }

    let (content, origin) = if name == BOOTSTRAP_FILE_NAME {
        match templates.fetch() {
            Ok(content) => (content, ContentOrigin::Template),
            Err(err) => {
                warn!("template load failed, using default content: {}", err);
                (default_document(name), ContentOrigin::Synthesized)
            }
        }
    } else {
        (default_document(name), ContentOrigin::Synthesized)
    };

    docs.set(name, &content)?;
    info!("seeded '{}' with {:?} content", name, origin);
    Ok(LoadedDocument {
        name: name.to_string(),
        content,
        origin,
    })
}
