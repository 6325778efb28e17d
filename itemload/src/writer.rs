//! Output sink for generated statements.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::WriteError;
use crate::sql::{Placeholder, Statement};

/// How statements are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One literal `INSERT ...;` per line
    #[default]
    Sql,
    /// One `{"sql": ..., "params": [...]}` object per line
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sql" => Ok(OutputFormat::Sql),
            "jsonl" | "json" => Ok(OutputFormat::Jsonl),
            other => Err(format!("unknown output format '{}' (expected sql or jsonl)", other)),
        }
    }
}

/// Write statements to any sink, one per line
pub fn write_to<W: Write>(
    mut out: W,
    statements: &[Statement],
    format: OutputFormat,
    placeholder: Placeholder,
) -> Result<(), WriteError> {
    for stmt in statements {
        match format {
            OutputFormat::Sql => writeln!(out, "{}", stmt.to_sql())?,
            OutputFormat::Jsonl => {
                serde_json::to_writer(&mut out, &stmt.to_parameterized(placeholder))?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the statements to it
pub fn write_statements(
    path: &Path,
    statements: &[Statement],
    format: OutputFormat,
    placeholder: Placeholder,
) -> Result<(), WriteError> {
    let file = File::create(path)?;
    write_to(BufWriter::new(file), statements, format, placeholder)
}
