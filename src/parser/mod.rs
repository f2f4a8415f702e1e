pub mod assemble;
pub mod cells;
pub mod extract;
pub mod grid;
pub mod template;

use assemble::{Assembler, FileDocument};
use crate::workbook::Sheet;

/// Sheets → file document, keeping sheets whose name is a number.
pub fn process_workbook(assembler: &Assembler, sheets: &[Sheet]) -> FileDocument {
    assembler.assemble_file(
        sheets.iter().map(|s| (s.name.as_str(), &s.grid)),
        cells::is_numeric,
    )
}
