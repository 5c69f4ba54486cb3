use crate::docx::DocxPackage;
use anyhow::{Context, Result};
use std::path::Path;

/// Storage abstraction for loading and persisting documents
pub trait DocumentStore {
    fn load(&self, path: &Path) -> Result<DocxPackage>;

    /// Persist the package; returns whether anything was written
    fn save(&self, path: &Path, package: &DocxPackage) -> Result<bool>;

    /// Store name for debugging/logging
    fn name(&self) -> &str;
}

/// Reads and writes documents in place on the local file system
pub struct FileStore;

impl DocumentStore for FileStore {
    fn load(&self, path: &Path) -> Result<DocxPackage> {
        DocxPackage::open(path).with_context(|| format!("failed to open {}", path.display()))
    }

    fn save(&self, path: &Path, package: &DocxPackage) -> Result<bool> {
        package
            .save(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        Ok(true)
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Loads from disk but never writes back (dry runs)
pub struct DryRunStore;

impl DocumentStore for DryRunStore {
    fn load(&self, path: &Path) -> Result<DocxPackage> {
        FileStore.load(path)
    }

    fn save(&self, path: &Path, _package: &DocxPackage) -> Result<bool> {
        tracing::info!(path = %path.display(), "dry run, not saving");
        Ok(false) // No-op
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
