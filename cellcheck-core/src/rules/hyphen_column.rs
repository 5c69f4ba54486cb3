use super::engine::{ScanContext, TableRule};
use crate::classifier;
use crate::model::Table;
use crate::types::*;

/// Grid column of the first header cell whose text contains `marker`,
/// ignoring case. A spanned header cell yields its first column.
pub fn locate_hyphen_column(table: &Table, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    let marker = marker.to_uppercase();
    table
        .row(0)?
        .grid_cells()
        .find(|(_, cell)| cell.text().to_uppercase().contains(&marker))
        .map(|(column, _)| column)
}

/// Data rows of the hyphen-convention column get at most one hyphen finding,
/// the first violated rule in priority order
pub struct HyphenColumnRule;

impl TableRule for HyphenColumnRule {
    fn apply(&self, table: &mut Table, context: &ScanContext<'_>, report: &mut ScanReport) {
        let conventions = &context.config.conventions;
        let Some(column) = locate_hyphen_column(table, &conventions.hyphen_column_marker) else {
            tracing::trace!(table = context.table_index, "no hyphen-convention column");
            return;
        };

        for (row_index, row) in table.rows_mut().enumerate().skip(1) {
            // Short rows simply don't reach the column
            let Some(cell) = row.cell_mut(column) else {
                continue;
            };
            if cell.is_merge_continuation() || context.annotator.detect(cell, None) {
                continue;
            }
            if let Some(kind) =
                classifier::hyphen_convention_violation(&cell.text(), &conventions.na_sentinel)
            {
                context.annotate(cell, row_index, column, kind, report);
            }
        }
    }

    fn name(&self) -> &str {
        "HyphenColumn"
    }
}
