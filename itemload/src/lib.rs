//! # itemload - Merchandise spreadsheets to SQL INSERT statements
//!
//! Reads a merchandise list (xlsx, xls, ods or csv) and emits one
//! `INSERT INTO item (...)` statement per row for the inventory database.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Spreadsheet │────▶│   Parser    │────▶│   Reshape   │────▶│  Converter  │────▶ insert_statements.txt
//! │ (xlsx/csv)  │     │ (RawTable)  │     │ (InputRow)  │     │ (Statement) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use itemload::{run, LoaderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LoaderConfig {
//!         picture_base_url: "http://cdn.example.com/fotos/".into(),
//!         ..LoaderConfig::default()
//!     };
//!     let summary = run(&config)?;
//!     println!("Wrote {} statements", summary.statements);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`config`] - Loader configuration (file, env, defaults)
//! - [`models`] - Cells, raw tables and input rows
//! - [`parser`] - Workbook and CSV readers
//! - [`transform`] - Reshape, mapping, converter and pipeline
//! - [`sql`] - Values, quoting and statements
//! - [`writer`] - Output sink
//! - [`logs`] - Progress logging

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Reading
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod sql;
pub mod writer;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    ConfigError, MappingError, PipelineError, ReshapeError, SheetError, WriteError,
};

// =============================================================================
// Re-exports - Models & Config
// =============================================================================

pub use config::LoaderConfig;
pub use models::{Cell, InputRow, RawTable, SourceInfo};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{list_sheets, read_table, InputFormat, ReadOptions};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    convert, convert_file, convert_row, convert_with_base_url, picture_url, reshape, run,
    ColumnMapping, ConvertConfig, RunSummary, SheetLayout, TargetColumn, ValueSource,
    ITEM_COLUMNS,
};

// =============================================================================
// Re-exports - SQL & Output
// =============================================================================

pub use sql::{ParameterizedSql, Placeholder, SqlValue, Statement};
pub use writer::{write_statements, write_to, OutputFormat};
