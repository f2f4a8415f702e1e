/// A sheet as ragged rows of cell text. `x` is the column, `y` the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Grid { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text, or `""` outside the row or the grid.
    pub fn cell(&self, x: usize, y: usize) -> &str {
        self.get(x, y).unwrap_or("")
    }

    /// Cell text only where the physical row reaches column `x`.
    pub fn get(&self, x: usize, y: usize) -> Option<&str> {
        self.rows.get(y)?.get(x).map(String::as_str)
    }

    /// Row `y`, empty past the last row.
    pub fn row(&self, y: usize) -> &[String] {
        self.rows.get(y).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Up to `width` cells of row `y` starting at column `x`; shorter when the row is.
    pub fn row_span(&self, x: usize, y: usize, width: usize) -> &[String] {
        let row = self.row(y);
        let start = x.min(row.len());
        let end = x.saturating_add(width).min(row.len());
        &row[start..end]
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl<S: Into<String>> FromIterator<Vec<S>> for Grid {
    fn from_iter<T: IntoIterator<Item = Vec<S>>>(iter: T) -> Self {
        Grid::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}
