use serde_json::Value;

use super::{Fragment, Region};
use crate::parser::cells::{compact, is_blank};
use crate::parser::grid::Grid;

fn insert_pair(out: &mut Fragment, key: &str, val: &str) {
    if !is_blank(key) || !is_blank(val) {
        out.insert(key.to_string(), Value::from(val));
    }
}

/// Keys on row `y`, values directly below them, `width` columns wide.
pub fn horizontal(grid: &Grid, region: Region) -> Fragment {
    let Region { x, y, width, .. } = region.clamped(grid);
    let mut out = Fragment::new();
    for i in 0..width {
        insert_pair(&mut out, grid.cell(x + i, y), grid.cell(x + i, y.saturating_add(1)));
    }
    out
}

/// Keys in column `x`, values directly right of them, `height` rows tall.
pub fn vertical(grid: &Grid, region: Region) -> Fragment {
    let Region { x, y, height, .. } = region.clamped(grid);
    let mut out = Fragment::new();
    for i in 0..height {
        insert_pair(&mut out, grid.cell(x, y + i), grid.cell(x.saturating_add(1), y + i));
    }
    out
}

/// One `key → value` per row where spacer cells separate the two.
pub fn multi_column(grid: &Grid, region: Region) -> Fragment {
    let Region { x, y, width, height } = region.clamped(grid);
    let mut out = Fragment::new();
    for i in 0..height {
        let cells = compact(grid.row_span(x, y + i, width));
        if let [key, val, ..] = cells[..] {
            out.insert(key.to_string(), Value::from(val));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid(rows: Vec<Vec<&str>>) -> Grid {
        rows.into_iter().collect()
    }

    #[test]
    fn horizontal_emits_when_either_side_filled() {
        let g = grid(vec![vec!["a", "b", ""], vec!["1", "", "2"]]);
        let out = horizontal(&g, Region::new(0, 0, 3, 2));
        assert_eq!(Value::Object(out), json!({"a": "1", "b": "", "": "2"}));
    }

    #[test]
    fn horizontal_skips_empty_columns_and_short_rows() {
        let g = grid(vec![vec!["", "炉号", "", "钢种"], vec!["", "A1"]]);
        let out = horizontal(&g, Region::new(0, 0, 6, 2));
        assert_eq!(Value::Object(out), json!({"炉号": "A1", "钢种": ""}));
    }

    #[test]
    fn vertical_pairs_by_row() {
        let g = grid(vec![
            vec!["x", "k1", "v1"],
            vec!["x", "k2"],
            vec!["x", "", ""],
            vec!["x", "", "v4"],
        ]);
        let out = vertical(&g, Region::new(1, 0, 2, 5));
        assert_eq!(Value::Object(out), json!({"k1": "v1", "k2": "", "": "v4"}));
    }

    #[test]
    fn multi_column_compacts_each_row() {
        let g = grid(vec![
            vec!["k1", "", "v1", ""],
            vec!["", "", ""],
            vec!["k2", "", "", "v2", "ignored"],
            vec!["alone"],
        ]);
        let out = multi_column(&g, Region::new(0, 0, 4, 4));
        assert_eq!(Value::Object(out), json!({"k1": "v1", "k2": "v2"}));
    }

    #[test]
    fn multi_column_respects_width() {
        let g = grid(vec![vec!["k", "", "", "v"]]);
        assert!(multi_column(&g, Region::new(0, 0, 3, 1)).is_empty());
        assert_eq!(
            Value::Object(multi_column(&g, Region::new(0, 0, 4, 1))),
            json!({"k": "v"})
        );
    }
}
