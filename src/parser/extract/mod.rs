pub mod header;
pub mod operator;
pub mod pairs;
pub mod tables;

use super::grid::Grid;

/// One extractor's output: string values, nested tables, or (operator
/// records only) string lists.
pub type Fragment = serde_json::Map<String, serde_json::Value>;

/// A rectangle anchored at column `x`, row `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Region { x, y, width, height }
    }

    /// False when the far edge would not fit in `usize`.
    pub fn is_addressable(&self) -> bool {
        self.x.checked_add(self.width).is_some() && self.y.checked_add(self.height).is_some()
    }

    /// Shrunk to the cells the grid actually has. Everything cut off reads blank.
    pub fn clamped(self, grid: &Grid) -> Region {
        Region {
            width: self.width.min(grid.width().saturating_sub(self.x)),
            height: self.height.min(grid.height().saturating_sub(self.y)),
            ..self
        }
    }
}

// ── Tests ──
