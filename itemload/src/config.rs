//! Loader configuration.
//!
//! Layered lowest to highest: built-in defaults, a JSON config file,
//! `ITEMLOAD_*` environment variables (a `.env` file is honoured by the CLI),
//! then command-line flags.
//!
//! ```json
//! {
//!   "input": "MERCANCIA+todos.xlsx",
//!   "sheet": "Sheet1",
//!   "picture_base_url": "http://190.140.249.241/hungfazl/fotos/",
//!   "output": "insert_statements.txt"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::sql::{check_identifier, Placeholder};
use crate::transform::converter::{ConvertConfig, DEFAULT_PICTURE_BASE_URL, DEFAULT_TABLE};
use crate::transform::mapping::ColumnMapping;
use crate::transform::reshape::SheetLayout;
use crate::writer::OutputFormat;

pub const DEFAULT_INPUT: &str = "MERCANCIA+todos.xlsx";
pub const DEFAULT_SHEET: &str = "Sheet1";
pub const DEFAULT_OUTPUT: &str = "insert_statements.txt";

pub const ENV_INPUT: &str = "ITEMLOAD_INPUT";
pub const ENV_SHEET: &str = "ITEMLOAD_SHEET";
pub const ENV_PICTURE_BASE_URL: &str = "ITEMLOAD_PICTURE_BASE_URL";
pub const ENV_OUTPUT: &str = "ITEMLOAD_OUTPUT";
pub const ENV_TABLE: &str = "ITEMLOAD_TABLE";
pub const ENV_SKIP_ROWS: &str = "ITEMLOAD_SKIP_ROWS";

/// Everything one conversion run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Spreadsheet to read
    pub input: PathBuf,
    /// Sheet name; the first sheet when `None`
    pub sheet: Option<String>,
    /// CSV delimiter; detected when `None`
    pub delimiter: Option<char>,
    pub layout: SheetLayout,
    pub table: String,
    /// Prefix of every picture URL
    pub picture_base_url: String,
    pub mapping: ColumnMapping,
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Placeholder style for `jsonl` output
    pub placeholder: Placeholder,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            sheet: Some(DEFAULT_SHEET.to_string()),
            delimiter: None,
            layout: SheetLayout::default(),
            table: DEFAULT_TABLE.to_string(),
            picture_base_url: DEFAULT_PICTURE_BASE_URL.to_string(),
            mapping: ColumnMapping::item_table(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: OutputFormat::Sql,
            placeholder: Placeholder::Numbered,
        }
    }
}

impl LoaderConfig {
    /// Parse a JSON config; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply `ITEMLOAD_*` variables from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_INPUT) {
            self.input = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_SHEET) {
            // Empty means "first sheet"
            self.sheet = if v.is_empty() { None } else { Some(v) };
        }
        if let Some(v) = lookup(ENV_PICTURE_BASE_URL) {
            self.picture_base_url = v;
        }
        if let Some(v) = lookup(ENV_OUTPUT) {
            self.output = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_TABLE) {
            self.table = v;
        }
        if let Some(v) = lookup(ENV_SKIP_ROWS) {
            self.layout.skip_rows = v.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_SKIP_ROWS.to_string(),
                value: v.clone(),
            })?;
        }
        Ok(())
    }

    /// Check table name and column mapping against the layout
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_identifier(&self.table)?;
        self.mapping.validate(Some(&self.layout.columns))?;
        Ok(())
    }

    /// The converter's view of this config
    pub fn convert_config(&self) -> ConvertConfig {
        ConvertConfig {
            table: self.table.clone(),
            picture_base_url: self.picture_base_url.clone(),
            mapping: self.mapping.clone(),
        }
    }
}
