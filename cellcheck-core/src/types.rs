use serde::{Deserialize, Serialize};
use std::fmt;

// ===== FINDING TYPES =====
// A finding is never stored on its own: it exists only as a styled run inside
// the cell it was written to. These types describe findings while a scan runs
// and in the report it produces.

/// The fixed set of conventions a table cell can violate.
///
/// Each kind has one upper-case label; the label is the text written into the
/// document and the text matched when looking for an earlier annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    Empty,
    RedundantSpaces,
    DashInsteadOfHyphen,
    MissingHyphen,
    CheckLineBreaks,
    MissingAlignmentComment,
}

impl FindingKind {
    pub const ALL: [FindingKind; 6] = [
        FindingKind::Empty,
        FindingKind::RedundantSpaces,
        FindingKind::DashInsteadOfHyphen,
        FindingKind::MissingHyphen,
        FindingKind::CheckLineBreaks,
        FindingKind::MissingAlignmentComment,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            FindingKind::Empty => "EMPTY",
            FindingKind::RedundantSpaces => "REDUNDANT SPACES",
            FindingKind::DashInsteadOfHyphen => "DASH INSTEAD OF HYPHEN",
            FindingKind::MissingHyphen => "MISSING HYPHEN",
            FindingKind::CheckLineBreaks => "CHECK LINE BREAKS",
            FindingKind::MissingAlignmentComment => "MISSING ALIGNMENT/FORMATTING COMMENT",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a finding sits: zero-based table, row and column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLocation {
    pub table: usize,
    pub row: usize,
    pub column: usize,
}

impl CellLocation {
    pub fn new(table: usize, row: usize, column: usize) -> Self {
        Self { table, row, column }
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One-based for people reading the console
        write!(
            f,
            "table {}, row {}, column {}",
            self.table + 1,
            self.row + 1,
            self.column + 1
        )
    }
}

/// A finding written by this run, or one found from an earlier run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingRecord {
    #[serde(flatten)]
    pub location: CellLocation,
    /// Annotation text as it appears in the document
    pub label: String,
}

// ===== SCAN REPORT =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub tables_scanned: usize,
    /// Findings annotated by this scan
    pub added: Vec<FindingRecord>,
    /// Annotations already present before this scan
    pub existing: Vec<FindingRecord>,
}

impl ScanReport {
    /// True once at least one annotation was added; never goes back to false
    pub fn modified(&self) -> bool {
        !self.added.is_empty()
    }

    pub fn record_added(&mut self, location: CellLocation, kind: FindingKind) {
        self.added.push(FindingRecord {
            location,
            label: kind.label().to_string(),
        });
    }

    pub fn record_existing(&mut self, location: CellLocation, label: String) {
        self.existing.push(FindingRecord { location, label });
    }

    pub fn added_count(&self, kind: FindingKind) -> usize {
        self.added
            .iter()
            .filter(|record| record.label == kind.label())
            .count()
    }
}
