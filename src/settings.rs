use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::assemble::{Assembler, DEFAULT_DATE_KEY};
use crate::parser::template::{Layout, Template};

const CONFIG_STEM: &str = "sheet_extract";
const ENV_PREFIX: &str = "SHEET_EXTRACT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// File name suffixes to pick up, without the dot.
    pub extensions: Vec<String>,
    pub date_key: String,
    pub parallel: bool,
    /// Stop at the first file that fails instead of logging and moving on.
    pub fail_fast: bool,
    /// Empty means the built-in furnace layout.
    pub templates: Vec<Template>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            extensions: vec!["xlsx".to_string()],
            date_key: DEFAULT_DATE_KEY.to_string(),
            parallel: true,
            fail_fast: true,
            templates: Vec::new(),
        }
    }
}

impl Settings {
    /// Defaults, then `sheet_extract.{toml,json,yaml}` (or `explicit`), then `SHEET_EXTRACT_*`.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_STEM).required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("extensions"),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn layout(&self) -> Result<Layout> {
        if self.templates.is_empty() {
            return Ok(Layout::furnace());
        }
        Layout::new(self.templates.clone())
    }

    pub fn assembler(&self) -> Result<Assembler> {
        Ok(Assembler::new(self.layout()?, &self.date_key))
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|want| want.eq_ignore_ascii_case(e)))
    }
}
