use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveTime, Timelike};
use tracing::debug;

use crate::error::{Error, Result};
use crate::parser::grid::Grid;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
}

/// Workbook files directly inside the input directory, sorted by name.
pub fn scan(settings: &Settings) -> Result<Vec<PathBuf>> {
    let dir = &settings.input_dir;
    let io_err = |source| Error::Io {
        path: dir.clone(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        if settings.matches_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Every sheet of the workbook, in workbook order.
pub fn read_sheets(path: &Path) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path).map_err(|source| Error::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name).map_err(|source| Error::Sheet {
            path: path.to_path_buf(),
            sheet: name.clone(),
            source,
        })?;
        let grid = grid_from_range(&range);
        if grid.is_empty() {
            debug!(sheet = %name, "read empty sheet");
        } else {
            debug!(sheet = %name, rows = grid.height(), "read sheet");
        }
        sheets.push(Sheet { name, grid });
    }
    Ok(sheets)
}

/// Row 0 / column 0 of the grid is A1, even when the used range starts further in.
fn grid_from_range(range: &Range<Data>) -> Grid {
    let Some((top, left)) = range.start() else {
        return Grid::default();
    };
    let (top, left) = (top as usize, left as usize);

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); top];
    for row in range.rows() {
        let mut cells = vec![String::new(); left];
        cells.extend(row.iter().map(render_cell));
        rows.push(cells);
    }
    Grid::new(rows)
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::DateTime(dt) => match dt.as_datetime() {
            // Serials below one day carry no date part: a time of day.
            Some(t) if dt.as_f64() < 1.0 => render_time(t.time()),
            Some(t) if t.time() == NaiveTime::MIN => t.format("%Y-%m-%d").to_string(),
            Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => cell.to_string(),
        },
        other => other.to_string(),
    }
}

fn render_time(t: NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}
