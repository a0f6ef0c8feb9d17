//! Bootstrap template sources and the synthesized default document.

use crate::error::AppError;
use crate::naming::base_name;
use std::path::PathBuf;

/// Template shipped with the binary.
pub const BUNDLED_TEMPLATE: &str = include_str!("../assets/template.md");

/// Where the bootstrap document's initial content comes from.
pub trait TemplateSource {
    /// Fetch the template body.
    ///
    /// # Errors
    /// Returns an error when the asset cannot be read.
    fn fetch(&self) -> Result<String, AppError>;
}

/// Compiled-in template asset.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledTemplate;

impl TemplateSource for BundledTemplate {
    fn fetch(&self) -> Result<String, AppError> {
        Ok(BUNDLED_TEMPLATE.to_string())
    }
}

/// Template read from a file on disk at fetch time.
#[derive(Debug, Clone)]
pub struct FileTemplate {
    path: PathBuf,
}

impl FileTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateSource for FileTemplate {
    fn fetch(&self) -> Result<String, AppError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Pick the configured file template, or the bundled one when none is set.
pub fn template_source(path: Option<PathBuf>) -> Box<dyn TemplateSource> {
    match path {
        Some(path) => Box::new(FileTemplate::new(path)),
        None => Box::new(BundledTemplate),
    }
}

/// Starter content for a document that has never been saved.
pub fn default_document(name: &str) -> String {
    format!(
        "# {title}\n\
         \n\
         Start writing markdown with MDVie!\n\
         \n\
         ## What can you do?\n\
         \n\
         - Create lists\n\
         - Write **bold** or *italic* text\n\
         - Add [links](https://github.com)\n\
         - And much more...\n\
         \n\
         ```rust\n\
         // Code blocks work too\n\
         fn hello() {{\n\
         \x20   println!(\"Hello, world!\");\n\
         }}\n\
         ```\n",
        title = base_name(name)
    )
}
