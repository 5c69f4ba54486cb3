// Table rules module - the scanner and the passes it runs
// - engine.rs: TableScanner, ScanContext and the TableRule trait
// - cell_findings.rs: earlier annotations and empty cells (every cell)
// - hyphen_column.rs: hyphen convention in the designated column
// - row_formatting.rs: line breaks and alignment comments per data row

pub mod cell_findings;
pub mod engine;
pub mod hyphen_column;
pub mod row_formatting;

pub use engine::*;
pub use hyphen_column::locate_hyphen_column;
