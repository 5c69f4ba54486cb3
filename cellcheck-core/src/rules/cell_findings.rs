use super::engine::{ScanContext, TableRule};
use crate::classifier;
use crate::model::Table;
use crate::types::*;

/// Every cell, header row included: remember annotations left by an earlier
/// run, then flag empty cells.
///
/// A cell that already carries any annotation gets no further checks from
/// this rule or the ones after it. Continuations of a vertical merge are
/// skipped; the merge's top cell stands for them.
pub struct CellFindingsRule;

impl TableRule for CellFindingsRule {
    fn apply(&self, table: &mut Table, context: &ScanContext<'_>, report: &mut ScanReport) {
        for (row_index, row) in table.rows_mut().enumerate() {
            for (column, cell) in row.grid_cells_mut() {
                if cell.is_merge_continuation() {
                    continue;
                }

                let existing = context.annotator.mark_existing(cell, None);
                if !existing.is_empty() {
                    let location = CellLocation::new(context.table_index, row_index, column);
                    for label in existing {
                        report.record_existing(location, label);
                    }
                    continue;
                }

                if classifier::is_empty(cell) {
                    context.annotate(cell, row_index, column, FindingKind::Empty, report);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "CellFindings"
    }
}
