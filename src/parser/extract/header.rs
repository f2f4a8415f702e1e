use serde_json::Value;

use super::Fragment;
use crate::parser::cells::compact;

/// Page identity from the first row: `label → value`, then the date.
///
/// The row mixes a label, its value and an optional date with blank spacer
/// cells in between, so positions are taken after compaction.
pub fn extract(first_row: &[String], date_key: &str) -> Fragment {
    let cells = compact(first_row);
    let mut out = Fragment::new();

    if cells.len() > 1 {
        out.insert(cells[0].to_string(), Value::from(cells[1]));
    }
    if cells.len() > 2 {
        out.insert(date_key.to_string(), Value::from(cells[2]));
    }

    out
}
