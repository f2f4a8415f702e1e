use serde_json::Value;

use super::{Fragment, Region};
use crate::parser::cells::is_blank;
use crate::parser::grid::Grid;

// Vertical table: one entry per row, headers across the top.
/*
  | name  | key1 | key2 | key3 |
  | name1 | val  | val  | val  |
  | name2 | val  | val  | val  |
*/
pub fn vertical(grid: &Grid, region: Region) -> (String, Fragment) {
    let Region { x, y, width, height } = region.clamped(grid);
    let mut table = Fragment::new();

    for i in 1..height {
        let name = grid.cell(x, y + i);
        if is_blank(name) {
            continue;
        }

        let mut row = Fragment::new();
        for j in 1..width {
            let key = grid.cell(x + j, y);
            let val = grid.cell(x + j, y + i);
            if !is_blank(key) || !is_blank(val) {
                row.insert(key.to_string(), Value::from(val));
            }
        }
        table.insert(name.to_string(), Value::Object(row));
    }

    (grid.cell(x, y).to_string(), table)
}

// Horizontal table: one entry per column, row keys down the left.
/*
  | name | name1 | name2 | name3 |
  | key1 | val   | val   | val   |
  | key2 | val   | val   | val   |
*/
pub fn horizontal(grid: &Grid, region: Region) -> (String, Fragment) {
    let Region { x, y, width, height } = region.clamped(grid);
    let mut table = Fragment::new();

    for i in 1..height {
        let key = grid.cell(x, y + i);
        for j in 1..width {
            // A row that stops short contributes nothing past its end.
            let Some(val) = grid.get(x + j, y + i) else {
                continue;
            };
            let name = grid.cell(x + j, y);
            if is_blank(name) {
                continue;
            }

            let column = table
                .entry(name.to_string())
                .or_insert_with(|| Value::Object(Fragment::new()));
            if !is_blank(key) || !is_blank(val) {
                if let Value::Object(column) = column {
                    column.insert(key.to_string(), Value::from(val));
                }
            }
        }
    }

    (grid.cell(x, y).to_string(), table)
}
