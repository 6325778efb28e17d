//! SQL statement construction.
//!
//! Statements are built as a column list plus bound values and only turned
//! into text at the edge: either as parameterized SQL (`$1`, `?`) with a
//! separate parameter list, or as literal SQL where string values are quoted
//! with embedded `'` doubled.
//!
//! ```
//! use itemload::sql::{SqlValue, Statement};
//!
//! let stmt = Statement::insert(
//!     "item",
//!     vec![("codigo".into(), SqlValue::text("A'1")), ("visible".into(), SqlValue::Integer(1))],
//! );
//! assert_eq!(stmt.to_sql(), "INSERT INTO item (codigo, visible) VALUES ('A''1', 1);");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MappingError;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

// =============================================================================
// Values
// =============================================================================

/// A value bound to a statement parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SqlValue {
    pub fn text(s: impl Into<String>) -> Self {
        SqlValue::Text(s.into())
    }

    /// Literal SQL form of this value
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(i) => i.to_string(),
            SqlValue::Text(s) => quote_literal(s),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Quote a string as a SQL literal, doubling embedded single quotes.
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

// =============================================================================
// Identifiers
// =============================================================================

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Accept plain identifiers only; they are emitted unquoted.
pub fn check_identifier(name: &str) -> Result<&str, MappingError> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(MappingError::InvalidIdentifier(name.to_string()))
    }
}

// =============================================================================
// Statements
// =============================================================================

/// Placeholder syntax for parameterized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placeholder {
    /// PostgreSQL style `$1, $2, ...`
    #[default]
    Numbered,
    /// MySQL / SQLite style `?`
    Question,
}

/// SQL text with its bound parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterizedSql {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// A single-row INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    table: String,
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Statement {
    /// Build an INSERT from ordered `(column, value)` pairs.
    ///
    /// Table and column names are expected to be checked by the caller
    /// (see [`crate::transform::mapping::ColumnMapping::validate`]).
    pub fn insert(table: impl Into<String>, pairs: Vec<(String, SqlValue)>) -> Self {
        let (columns, values) = pairs.into_iter().unzip();
        Self {
            table: table.into(),
            columns,
            values,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Value bound to `column`
    pub fn value(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    fn head(&self) -> String {
        format!("INSERT INTO {} ({})", self.table, self.columns.join(", "))
    }

    /// Single-line literal SQL, terminated by `;`.
    pub fn to_sql(&self) -> String {
        let values: Vec<String> = self.values.iter().map(SqlValue::to_literal).collect();
        format!("{} VALUES ({});", self.head(), values.join(", "))
    }

    /// SQL with placeholders and the values to bind, in order.
    pub fn to_parameterized(&self, style: Placeholder) -> ParameterizedSql {
        let placeholders: Vec<String> = (1..=self.values.len())
            .map(|i| match style {
                Placeholder::Numbered => format!("${}", i),
                Placeholder::Question => "?".to_string(),
            })
            .collect();

        ParameterizedSql {
            sql: format!("{} VALUES ({});", self.head(), placeholders.join(", ")),
            params: self.values.clone(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
