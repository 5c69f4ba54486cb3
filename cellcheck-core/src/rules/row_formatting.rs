use super::engine::{ScanContext, TableRule};
use crate::classifier;
use crate::model::{Cell, Row, Table};
use crate::types::*;

/// Data rows: line breaks and centered text in any cell but the last are
/// reported in the row's last cell, which holds the row's comments.
/// Columns are grid columns, so a spanned cell counts once.
pub struct RowFormattingRule;

impl RowFormattingRule {
    /// Findings the row's sources call for, in the order they are found
    fn row_findings(
        &self,
        row: &Row,
        target: &Cell,
        last: usize,
        context: &ScanContext<'_>,
    ) -> Vec<FindingKind> {
        let options = context.config.options;
        let mut kinds = Vec::new();

        for (column, cell) in row.grid_cells() {
            // the cell covering the last grid column is the target itself
            if column + cell.grid_span() > last {
                break;
            }
            if cell.is_merge_continuation() || context.annotator.detect(cell, None) {
                continue;
            }

            let line_break =
                !options.skip_line_breaks && classifier::line_break_violation(&cell.text());
            let misaligned = !options.skip_formatting
                && classifier::alignment_violation(
                    cell,
                    target,
                    &context.config.conventions,
                    context.annotator,
                );

            if line_break && !kinds.contains(&FindingKind::CheckLineBreaks) {
                kinds.push(FindingKind::CheckLineBreaks);
            }
            if misaligned && !kinds.contains(&FindingKind::MissingAlignmentComment) {
                kinds.push(FindingKind::MissingAlignmentComment);
            }
        }
        kinds
    }
}

impl TableRule for RowFormattingRule {
    fn apply(&self, table: &mut Table, context: &ScanContext<'_>, report: &mut ScanReport) {
        let options = context.config.options;
        if options.skip_line_breaks && options.skip_formatting {
            return;
        }

        for row_index in 1..table.row_count() {
            let Some(row) = table.row(row_index) else {
                continue;
            };
            let width = row.grid_width();
            if width < 2 {
                continue;
            }
            let last = width - 1;

            // A merged comment cell is written through its top cell
            let target_row = table.merge_origin(row_index, last);
            let Some(target) = table.row(target_row).and_then(|r| r.cell(last)) else {
                continue;
            };

            let kinds = self.row_findings(row, target, last, context);
            if kinds.is_empty() {
                continue;
            }

            let Some(target) = table.row_mut(target_row).and_then(|r| r.cell_mut(last)) else {
                continue;
            };
            for kind in kinds {
                context.annotate(target, target_row, last, kind, report);
            }
        }
    }

    fn name(&self) -> &str {
        "RowFormatting"
    }
}
