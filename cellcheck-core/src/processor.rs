use crate::config::ScanConfig;
use crate::rules::TableScanner;
use crate::storage::{DocumentStore, DryRunStore, FileStore};
use crate::types::ScanReport;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of processing one document
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub path: PathBuf,
    pub scanned_at: DateTime<Utc>,
    /// Whether the annotated document was written back
    pub saved: bool,
    #[serde(flatten)]
    pub report: ScanReport,
}

impl ScanSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load → scan → save-if-modified, for one document at a time
pub struct DocumentProcessor {
    store: Box<dyn DocumentStore>,
    scanner: TableScanner,
}

impl DocumentProcessor {
    /// Create DocumentProcessor with full dependency injection
    pub fn new_with_dependencies(store: Box<dyn DocumentStore>, scanner: TableScanner) -> Self {
        Self { store, scanner }
    }

    /// Convenience constructor for CLI usage: rewrites documents in place
    pub fn new_cli(config: ScanConfig) -> Self {
        Self::new_with_dependencies(Box::new(FileStore), TableScanner::new(config))
    }

    /// Scans and reports without touching the file
    pub fn new_dry_run(config: ScanConfig) -> Self {
        Self::new_with_dependencies(Box::new(DryRunStore), TableScanner::new(config))
    }

    pub fn process(&self, path: &Path) -> Result<ScanSummary> {
        tracing::info!(path = %path.display(), store = self.store.name(), "processing document");

        let mut package = self.store.load(path)?;
        let report = self.scanner.scan_document(package.document_mut());

        // Earlier annotations alone never trigger a save
        let saved = if report.modified() {
            self.store.save(path, &package)?
        } else {
            false
        };

        Ok(ScanSummary {
            path: path.to_path_buf(),
            scanned_at: Utc::now(),
            saved,
            report,
        })
    }
}
