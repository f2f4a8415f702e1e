use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::extract::{header, operator, pairs, tables, Fragment, Region};
use super::grid::Grid;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    /// First row of the sheet; coordinates unused.
    Header,
    /// Last row with text; coordinates unused.
    Operator,
    HorizontalPairs,
    VerticalPairs,
    MultiColumnPairs,
    VerticalTable,
    HorizontalTable,
}

impl ExtractorKind {
    fn uses_region(self) -> bool {
        !matches!(self, ExtractorKind::Header | ExtractorKind::Operator)
    }

    fn uses_height(self) -> bool {
        !matches!(self, ExtractorKind::HorizontalPairs) && self.uses_region()
    }
}

/// Binds one extractor and its region to a section of the page document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub section: String,
    pub kind: ExtractorKind,
    #[serde(default)]
    pub x: usize,
    #[serde(default)]
    pub y: usize,
    #[serde(default)]
    pub width: usize,
    #[serde(default)]
    pub height: usize,
}

impl Template {
    pub fn new(section: &str, kind: ExtractorKind, x: usize, y: usize, width: usize, height: usize) -> Self {
        Template {
            section: section.to_string(),
            kind,
            x,
            y,
            width,
            height,
        }
    }

    pub fn region(&self) -> Region {
        Region::new(self.x, self.y, self.width, self.height)
    }

    /// Run the bound extractor. Table names are dropped; the section name replaces them.
    pub fn apply(&self, grid: &Grid, date_key: &str) -> Fragment {
        let region = self.region();
        match self.kind {
            ExtractorKind::Header => header::extract(grid.row(0), date_key),
            ExtractorKind::Operator => operator::extract(grid),
            ExtractorKind::HorizontalPairs => pairs::horizontal(grid, region),
            ExtractorKind::VerticalPairs => pairs::vertical(grid, region),
            ExtractorKind::MultiColumnPairs => pairs::multi_column(grid, region),
            ExtractorKind::VerticalTable => tables::vertical(grid, region).1,
            ExtractorKind::HorizontalTable => tables::horizontal(grid, region).1,
        }
    }
}

/// Ordered templates; sections appear in the page document in this order.
/// Deserializing goes through [`Layout::new`], so a parsed layout is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Template>", into = "Vec<Template>")]
pub struct Layout(Vec<Template>);

impl Layout {
    pub fn new(templates: Vec<Template>) -> Result<Self> {
        let layout = Layout(templates);
        layout.validate()?;
        Ok(layout)
    }

    pub fn templates(&self) -> &[Template] {
        &self.0
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for t in &self.0 {
            if t.section.trim().is_empty() {
                return Err(Error::Layout("template with an empty section name".to_string()));
            }
            if !seen.insert(t.section.as_str()) {
                return Err(Error::Layout(format!("section {:?} is bound more than once", t.section)));
            }
            if !t.kind.uses_region() {
                continue;
            }
            if t.width == 0 || (t.kind.uses_height() && t.height == 0) {
                return Err(Error::Layout(format!("section {:?}: region must be at least 1x1", t.section)));
            }
            // Pair rows read one row below the region's origin.
            if !t.region().is_addressable() || t.y.checked_add(2).is_none() || t.x.checked_add(2).is_none() {
                return Err(Error::Layout(format!(
                    "section {:?}: region does not fit the grid address space",
                    t.section
                )));
            }
        }
        Ok(())
    }

    /// The smelting record layout the sheets are produced with.
    pub fn furnace() -> Self {
        use ExtractorKind::*;
        Layout(vec![
            Template::new("基础信息", Header, 0, 0, 0, 0),
            Template::new("操作人员", Operator, 0, 0, 0, 0),
            Template::new("炉号工艺卡", HorizontalPairs, 0, 1, 26, 2),
            Template::new("成分表", HorizontalTable, 0, 3, 26, 10),
            Template::new("操作时间", VerticalTable, 0, 14, 4, 16),
            Template::new("治炼时间", VerticalTable, 4, 14, 3, 16),
            Template::new("操作造渣参数", VerticalTable, 7, 14, 3, 5),
            Template::new("治炼造渣参数", VerticalTable, 10, 14, 4, 5),
            Template::new("操作温度参数", VerticalTable, 7, 20, 3, 5),
            Template::new("治炼温度参数", VerticalTable, 10, 20, 4, 5),
            Template::new("电能消耗", MultiColumnPairs, 7, 26, 7, 4),
            Template::new("成分调整时间", VerticalTable, 14, 14, 6, 16),
            Template::new("渣料统计", VerticalTable, 20, 14, 5, 8),
            Template::new("治炼结果", HorizontalTable, 0, 30, 10, 8),
        ])
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::furnace()
    }
}

impl TryFrom<Vec<Template>> for Layout {
    type Error = Error;

    fn try_from(templates: Vec<Template>) -> Result<Self> {
        Layout::new(templates)
    }
}

impl From<Layout> for Vec<Template> {
    fn from(layout: Layout) -> Self {
        layout.0
    }
}
