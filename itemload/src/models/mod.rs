//! Domain models shared by the parser, reshape and converter stages.
//!
//! - [`Cell`] - A single spreadsheet value
//! - [`RawTable`] - Every row of a sheet, before any header handling
//! - [`InputRow`] - One data row with named, string-coerced fields

use serde::ser::{Serialize, SerializeMap, Serializer};

// =============================================================================
// Cell
// =============================================================================

/// A spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// String form used for SQL values.
    ///
    /// Whole floats print without a fractional part, since spreadsheets store
    /// product codes like `100` as `100.0`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() && f.abs() < 1e15 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

// =============================================================================
// Raw Table
// =============================================================================

/// Where a table came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceInfo {
    Sheet { name: String },
    Csv { encoding: String, delimiter: char },
}

impl std::fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceInfo::Sheet { name } => write!(f, "sheet '{}'", name),
            SourceInfo::Csv { encoding, delimiter } => {
                let delim = match delimiter {
                    '\t' => "TAB".to_string(),
                    c => c.to_string(),
                };
                write!(f, "csv ({}, '{}')", encoding, delim)
            }
        }
    }
}

/// All rows of a sheet, starting at the sheet's first row.
///
/// Row `i` is spreadsheet line `i + 1`. Rows may have different lengths.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub rows: Vec<Vec<Cell>>,
    pub source: SourceInfo,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>, source: SourceInfo) -> Self {
        Self { rows, source }
    }

    /// Widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

// =============================================================================
// Input Row
// =============================================================================

/// One data row after reshape: ordered `(column, value)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    /// 1-based line in the source document
    pub line: usize,
    fields: Vec<(String, String)>,
}

impl InputRow {
    pub fn new(line: usize, fields: Vec<(String, String)>) -> Self {
        Self { line, fields }
    }

    /// Build a row from `(column, value)` pairs, mostly for tests and callers
    /// that already have named data.
    pub fn from_pairs<K, V>(line: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { line, fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Field value, or `""` when the column is absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for InputRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
