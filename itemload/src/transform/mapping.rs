//! Target column mapping
//!
//! Describes, for every column of the target table, where its value comes
//! from: an input field, the computed picture URL, or a constant.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::MappingError;
use crate::models::InputRow;
use crate::sql::{check_identifier, SqlValue};

/// Input column holding the product code
pub const CODE_COLUMN: &str = "CODIGO";

/// Where a target column's value comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum ValueSource {
    /// Copy an input field as text (missing field → `''`)
    Field { column: String },
    /// Picture base URL followed by the product code
    Picture,
    /// Fixed value for every row
    Constant { value: SqlValue },
}

impl ValueSource {
    pub fn field(column: impl Into<String>) -> Self {
        ValueSource::Field { column: column.into() }
    }

    pub fn constant(value: SqlValue) -> Self {
        ValueSource::Constant { value }
    }

    /// Resolve the value for one row
    pub fn resolve(&self, row: &InputRow, picture_base_url: &str) -> SqlValue {
        match self {
            ValueSource::Field { column } => SqlValue::text(row.value(column)),
            ValueSource::Picture => SqlValue::Text(picture_url(picture_base_url, row.value(CODE_COLUMN))),
            ValueSource::Constant { value } => value.clone(),
        }
    }
}

/// `base_url` immediately followed by the product code, no separator added.
pub fn picture_url(base_url: &str, code: &str) -> String {
    format!("{}{}", base_url, code)
}

/// One column of the target table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetColumn {
    pub name: String,
    #[serde(flatten)]
    pub source: ValueSource,
}

impl TargetColumn {
    pub fn new(name: impl Into<String>, source: ValueSource) -> Self {
        Self { name: name.into(), source }
    }
}

/// Ordered target columns for the INSERT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    pub columns: Vec<TargetColumn>,
}

impl ColumnMapping {
    pub fn new(columns: Vec<TargetColumn>) -> Self {
        Self { columns }
    }

    /// Layout of the `item` inventory table.
    ///
    /// p_c, p_d, inve, un_ctn and ctns have no spreadsheet counterpart and
    /// are written as empty strings; `visible` is always 1.
    pub fn item_table() -> Self {
        let empty = || ValueSource::constant(SqlValue::text(""));
        Self::new(vec![
            TargetColumn::new("picture", ValueSource::Picture),
            TargetColumn::new("codigo", ValueSource::field("CODIGO")),
            TargetColumn::new("discripcion", ValueSource::field("DESCRIPCION")),
            TargetColumn::new("marca", ValueSource::field("MARCA")),
            TargetColumn::new("grupo", ValueSource::field("GRUPO")),
            TargetColumn::new("unidad", ValueSource::field("UNIDA")),
            TargetColumn::new("costo", ValueSource::field("COSTO")),
            TargetColumn::new("p_a", ValueSource::field("P-A")),
            TargetColumn::new("p_b", ValueSource::field("P-B")),
            TargetColumn::new("p_c", empty()),
            TargetColumn::new("p_d", empty()),
            TargetColumn::new("inve", empty()),
            TargetColumn::new("un_ctn", empty()),
            TargetColumn::new("ctns", empty()),
            TargetColumn::new("visible", ValueSource::constant(SqlValue::Integer(1))),
        ])
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check target names and, when given, that field sources exist among
    /// the input columns.
    pub fn validate(&self, input_columns: Option<&[String]>) -> Result<(), MappingError> {
        if self.columns.is_empty() {
            return Err(MappingError::Empty);
        }

        let mut seen = HashSet::new();
        for target in &self.columns {
            check_identifier(&target.name)?;
            if !seen.insert(target.name.as_str()) {
                return Err(MappingError::DuplicateColumn(target.name.clone()));
            }

            if let (ValueSource::Field { column }, Some(inputs)) = (&target.source, input_columns) {
                if !inputs.iter().any(|c| c == column) {
                    return Err(MappingError::UnknownSource {
                        target: target.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::item_table()
    }
}
