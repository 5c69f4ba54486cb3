use crate::annotator::Annotator;
use crate::config::ScanConfig;
use crate::model::{Cell, Document, Table};
use crate::types::*;

use super::cell_findings::CellFindingsRule;
use super::hyphen_column::HyphenColumnRule;
use super::row_formatting::RowFormattingRule;

/// What every rule sees while a table is scanned
pub struct ScanContext<'a> {
    pub table_index: usize,
    pub config: &'a ScanConfig,
    pub annotator: &'a Annotator,
}

impl ScanContext<'_> {
    /// Annotate `cell` with `kind` unless it already carries that annotation,
    /// recording what was written
    pub fn annotate(
        &self,
        cell: &mut Cell,
        row: usize,
        column: usize,
        kind: FindingKind,
        report: &mut ScanReport,
    ) -> bool {
        if !self.annotator.annotate_once(cell, kind) {
            return false;
        }
        let location = CellLocation::new(self.table_index, row, column);
        tracing::debug!(%location, %kind, "finding added");
        report.record_added(location, kind);
        true
    }
}

/// One pass over a table.
///
/// Rules run in a fixed order and see the annotations earlier rules wrote.
pub trait TableRule {
    fn apply(&self, table: &mut Table, context: &ScanContext<'_>, report: &mut ScanReport);
    fn name(&self) -> &str;
}

/// Drives the table rules across a document
pub struct TableScanner {
    config: ScanConfig,
    annotator: Annotator,
    rules: Vec<Box<dyn TableRule>>,
}

impl TableScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self::with_annotator(config, Annotator::default())
    }

    pub fn with_annotator(config: ScanConfig, annotator: Annotator) -> Self {
        Self {
            config,
            annotator,
            rules: vec![
                Box::new(CellFindingsRule),
                Box::new(HyphenColumnRule),
                Box::new(RowFormattingRule),
            ],
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every top-level table, annotating findings in place
    pub fn scan_document(&self, document: &mut Document) -> ScanReport {
        let mut report = ScanReport::default();
        for (table_index, table) in document.tables_mut().enumerate() {
            self.scan_table(table_index, table, &mut report);
        }

        tracing::info!(
            tables = report.tables_scanned,
            added = report.added.len(),
            existing = report.existing.len(),
            "scan complete"
        );
        report
    }

    /// Scan one table. Returns whether this table received new annotations.
    pub fn scan_table(&self, table_index: usize, table: &mut Table, report: &mut ScanReport) -> bool {
        let before = report.added.len();
        report.tables_scanned += 1;

        if table.row_count() == 0 {
            tracing::debug!(table = table_index, "table has no rows, skipping");
            return false;
        }

        let context = ScanContext {
            table_index,
            config: &self.config,
            annotator: &self.annotator,
        };
        for rule in &self.rules {
            tracing::trace!(table = table_index, rule = rule.name(), "applying rule");
            rule.apply(table, &context, report);
        }

        report.added.len() > before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &[&[&str]]) -> Table {
        let mut xml = String::from("<w:tbl><w:tblPr/>");
        for row in rows {
            xml.push_str("<w:tr>");
            for text in *row {
                xml.push_str(&format!(
                    r#"<w:tc><w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p></w:tc>"#
                ));
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        Table::parse(&xml).unwrap()
    }

    fn labels(report: &ScanReport) -> Vec<(usize, usize, String)> {
        report
            .added
            .iter()
            .map(|r| (r.location.row, r.location.column, r.label.clone()))
            .collect()
    }

    #[test]
    fn test_empty_table_is_skipped() {
        let scanner = TableScanner::new(ScanConfig::default());
        let mut t = Table::parse("<w:tbl><w:tblPr/></w:tbl>").unwrap();
        let mut report = ScanReport::default();

        assert!(!scanner.scan_table(0, &mut t, &mut report));
        assert_eq!(report.tables_scanned, 1);
        assert!(!report.modified());
    }

    #[test]
    fn test_rules_run_in_order() {
        let scanner = TableScanner::new(ScanConfig::default());
        let mut t = table(&[
            &["Name", "CDASH Variable", "Comment"],
            &["Age", "", "ok"],
            &["Sex", "SEX", "ok"],
        ]);
        let mut report = ScanReport::default();

        assert!(scanner.scan_table(0, &mut t, &mut report));
        // the empty hyphen cell gets EMPTY only; MISSING HYPHEN is not piled on
        assert_eq!(
            labels(&report),
            vec![
                (1, 1, "EMPTY".to_string()),
                (2, 1, "MISSING HYPHEN".to_string()),
            ]
        );
    }

    #[test]
    fn test_scan_is_idempotent() {
        let scanner = TableScanner::new(ScanConfig::default());
        let mut t = table(&[
            &["Label", "CDASH", "Notes"],
            &["a", "foo - bar", ""],
            &["b", "x\u{2014}y", "n"],
        ]);

        let mut first = ScanReport::default();
        assert!(scanner.scan_table(0, &mut t, &mut first));
        let after_first = t.clone();

        let mut second = ScanReport::default();
        assert!(!scanner.scan_table(0, &mut t, &mut second));
        assert!(!second.modified());
        assert_eq!(second.existing.len(), first.added.len());

        // only the seen-marker differs between the two passes
        let mut third = ScanReport::default();
        let after_second = t.clone();
        assert!(!scanner.scan_table(0, &mut t, &mut third));
        assert_eq!(t, after_second);
        assert_ne!(after_first, after_second);
    }
}
