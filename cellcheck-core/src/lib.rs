// Cellcheck Core Library
//
// Checks the tables of a Word document against a fixed set of formatting
// conventions and writes each finding into the offending cell, in a form the
// next run recognizes so findings are never duplicated.

pub mod annotator;
pub mod classifier;
pub mod config;
pub mod docx;
pub mod model;
pub mod processor;
pub mod rules;
pub mod source;
pub mod storage;
pub mod types;

// Re-export main types and functions for easy use
pub use annotator::{Annotator, FindingMarker, StyledMarker, ALERT_COLOR};
pub use config::{ConfigOrigin, ConventionConfig, ScanConfig, ScanOptions};
pub use docx::{DocxError, DocxPackage};
pub use model::Document;
pub use processor::{DocumentProcessor, ScanSummary};
pub use rules::{locate_hyphen_column, TableScanner};
pub use source::{resolve_input, DocumentSource, RemoteFetcher, SourceError, UnimplementedFetcher};
pub use storage::{DocumentStore, DryRunStore, FileStore};
pub use types::*;
