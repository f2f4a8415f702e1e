use serde_json::Value;
use tracing::debug;

use super::extract::Fragment;
use super::grid::Grid;
use super::template::Layout;

pub const DEFAULT_DATE_KEY: &str = "日期";

/// Section name → fragment for one sheet.
pub type PageDocument = serde_json::Map<String, Value>;
/// Sheet name → page document for one workbook, in sheet order.
pub type FileDocument = serde_json::Map<String, Value>;

/// Runs a layout over sheet grids.
#[derive(Debug, Clone)]
pub struct Assembler {
    layout: Layout,
    date_key: String,
}

impl Default for Assembler {
    fn default() -> Self {
        Assembler::new(Layout::furnace(), DEFAULT_DATE_KEY)
    }
}

impl Assembler {
    pub fn new(layout: Layout, date_key: &str) -> Self {
        Assembler {
            layout,
            date_key: date_key.to_string(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn assemble_page(&self, grid: &Grid) -> PageDocument {
        let mut page = PageDocument::new();
        for template in self.layout.templates() {
            let fragment: Fragment = template.apply(grid, &self.date_key);
            page.insert(template.section.clone(), Value::Object(fragment));
        }
        page
    }

    /// Assemble every sheet whose name passes `qualifies`; others are skipped.
    pub fn assemble_file<'a, I, F>(&self, sheets: I, qualifies: F) -> FileDocument
    where
        I: IntoIterator<Item = (&'a str, &'a Grid)>,
        F: Fn(&str) -> bool,
    {
        let mut doc = FileDocument::new();
        for (name, grid) in sheets {
            if !qualifies(name) {
                debug!(sheet = name, "skipping sheet");
                continue;
            }
            doc.insert(name.to_string(), Value::Object(self.assemble_page(grid)));
        }
        doc
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::cells::is_numeric;
    use crate::parser::template::{ExtractorKind, Template};
    use serde_json::json;

    fn fixture(name: &str) -> Grid {
        let raw = std::fs::read_to_string(format!("tests/fixtures/{}.json", name)).unwrap();
        let rows: Vec<Vec<String>> = serde_json::from_str(&raw).unwrap();
        Grid::new(rows)
    }

    #[test]
    fn furnace_sheet_sections_in_layout_order() {
        let page = Assembler::default().assemble_page(&fixture("furnace_sheet"));
        let sections: Vec<&str> = page.keys().map(String::as_str).collect();
        let furnace = Layout::furnace();
        let expected: Vec<&str> = furnace
            .templates()
            .iter()
            .map(|t| t.section.as_str())
            .collect();
        assert_eq!(sections, expected);
    }

    #[test]
    fn furnace_sheet_values() {
        let page = Assembler::default().assemble_page(&fixture("furnace_sheet"));

        assert_eq!(page["基础信息"], json!({"炉号": "19A0312", "日期": "2019-03-12"}));
        assert_eq!(
            page["操作人员"],
            json!({"冶炼工": "张三", "组长": "李四", "配料": ["王五", "赵六"]})
        );
        assert_eq!(page["炉号工艺卡"]["钢种"], "45#");
        assert_eq!(page["炉号工艺卡"]["出钢量"], "52.3");
        assert_eq!(page["成分表"]["C"]["熔清"], "0.31");
        assert_eq!(page["成分表"]["Mn"]["出钢"], "0.68");
        assert_eq!(page["操作时间"]["装料"]["开始"], "08:05");
        assert_eq!(page["操作时间"].as_object().map(|t| t.contains_key("")), Some(false));
        assert_eq!(page["电能消耗"], json!({"电耗": "412", "氧耗": "38"}));
        assert_eq!(page["治炼结果"]["终点"]["温度"], "1635");
    }

    #[test]
    fn page_round_trips_through_json() {
        let page = Assembler::default().assemble_page(&fixture("furnace_sheet"));
        let text = serde_json::to_string_pretty(&page).unwrap();
        let back: PageDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(back, page);
        assert_eq!(
            back.keys().collect::<Vec<_>>(),
            page.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn reassembly_is_stable() {
        let grid = fixture("furnace_sheet");
        let assembler = Assembler::default();
        assert_eq!(assembler.assemble_page(&grid), assembler.assemble_page(&grid));
    }

    #[test]
    fn empty_grid_yields_empty_sections() {
        let page = Assembler::default().assemble_page(&Grid::default());
        assert_eq!(page.len(), 14);
        assert!(page.values().all(|v| v.as_object().is_some_and(|o| o.is_empty())));
    }

    #[test]
    fn only_numeric_sheet_names_qualify() {
        let grid = fixture("furnace_sheet");
        let sheets = [("1", &grid), ("说明", &grid), ("2", &grid), ("Sheet3", &grid)];
        let doc = Assembler::default().assemble_file(sheets, is_numeric);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn qualification_policy_is_pluggable() {
        let grid: Grid = vec![vec!["名称", "值"]].into_iter().collect();
        let assembler = Assembler::new(
            Layout::new(vec![Template::new("头", ExtractorKind::Header, 0, 0, 0, 0)]).unwrap(),
            "date",
        );
        let doc = assembler.assemble_file([("a", &grid), ("12", &grid)], |name| name.starts_with('a'));
        assert_eq!(Value::Object(doc), json!({"a": {"头": {"名称": "值"}}}));
    }
}
