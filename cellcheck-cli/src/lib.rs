// All checking is in cellcheck-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod report;
pub mod viewer;

// Re-export core types for convenience
pub use cellcheck_core::*;

// Re-export CLI utilities
pub use report::write_report;
pub use viewer::{show_document, SystemViewer, Viewer};
