use serde_json::Value;

use super::Fragment;
use crate::parser::cells::{compact, is_blank};
use crate::parser::grid::Grid;

/// Sign-off record from the last row that has any text.
///
/// The compacted row is read as: a leading `key, value` pair, a trailing
/// `key, value` pair, and whatever sits between them as `key → [values]`.
/// The three reads share one window over the row, each narrowing it.
pub fn extract(grid: &Grid) -> Fragment {
    let mut out = Fragment::new();

    let Some(row) = grid.rows().rev().find(|r| !r.iter().all(|c| is_blank(c))) else {
        return out;
    };
    let cells = compact(row);
    let (mut front, mut back) = (0, cells.len());

    if back - front > 1 {
        out.insert(cells[front].to_string(), Value::from(cells[front + 1]));
        front += 2;
    }

    if back - front > 1 {
        out.insert(cells[back - 2].to_string(), Value::from(cells[back - 1]));
        back -= 2;
    }

    if back - front > 1 {
        let rest: Vec<Value> = cells[front + 1..back].iter().map(|&c| Value::from(c)).collect();
        out.insert(cells[front].to_string(), Value::Array(rest));
    }

    out
}
