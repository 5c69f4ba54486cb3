use anyhow::{Context, Result};
use std::path::Path;

/// Something that can show a document to the user
pub trait Viewer {
    fn open(&self, path: &Path) -> Result<()>;
}

/// The OS default application for the file type
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<()> {
        open::that(path).with_context(|| format!("failed to open {}", path.display()))
    }
}

/// Best-effort launch after saving. A failure is reported as a warning and
/// never turned into an error.
pub fn show_document(viewer: &dyn Viewer, path: &Path) -> bool {
    match viewer.open(path) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(path = %path.display(), "viewer launch failed: {error:#}");
            println!("⚠️  Could not open the document: {error:#}");
            println!("   Open {} manually to review the findings.", path.display());
            false
        }
    }
}
