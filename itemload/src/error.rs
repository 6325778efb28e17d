//! Error types for the itemload pipeline.
//!
//! One enum per stage, converted upward into [`PipelineError`]:
//!
//! - [`SheetError`] - Reading spreadsheets and CSV files
//! - [`ReshapeError`] - Header skip / column drop / rename
//! - [`MappingError`] - Target column mapping
//! - [`ConfigError`] - Loader configuration
//! - [`WriteError`] - Writing the output artifact
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Conversion is automatic via `From`, so `?` works across stages.

use thiserror::Error;

// =============================================================================
// Sheet Reading Errors
// =============================================================================

/// Errors while reading the input document.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be opened or parsed.
    #[error("Cannot open workbook '{path}': {message}")]
    Workbook { path: String, message: String },

    /// The requested sheet does not exist.
    #[error("Sheet '{name}' not found (available: {})", available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    /// The workbook contains no sheets at all.
    #[error("Workbook has no sheets")]
    NoSheets,

    /// Malformed CSV content.
    #[error("Invalid CSV at line {line}: {message}")]
    Csv { line: usize, message: String },

    /// File extension we don't know how to read.
    #[error("Unsupported input format: '{0}'")]
    UnsupportedFormat(String),
}

// =============================================================================
// Reshape Errors
// =============================================================================

/// Errors while turning the raw table into named rows.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// The sheet ends before the header row.
    #[error("No header row found after skipping {skipped} row(s)")]
    MissingHeader { skipped: usize },

    /// Header width does not match the configured column names.
    #[error("Length mismatch: expected {expected} columns after dropping {dropped}, found {found}")]
    ColumnCountMismatch {
        expected: usize,
        found: usize,
        dropped: usize,
    },
}

// =============================================================================
// Mapping Errors
// =============================================================================

/// Errors in the target column mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Not a plain SQL identifier.
    #[error("Invalid SQL identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Same target column mapped twice.
    #[error("Duplicate target column: '{0}'")]
    DuplicateColumn(String),

    /// Mapping has no columns.
    #[error("Column mapping is empty")]
    Empty,

    /// A mapped source field is not among the configured input columns.
    #[error("Target '{target}' reads unknown input column '{column}'")]
    UnknownSource { target: String, column: String },
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading or checking the loader configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`crate::config::LoaderConfig`].
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Mapping or table name rejected.
    #[error("Invalid mapping: {0}")]
    Mapping(#[from] MappingError),

    /// A numeric environment override could not be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while writing statements out.
#[derive(Debug, Error)]
pub enum WriteError {
    /// IO failure on the sink.
    #[error("Cannot write output: {0}")]
    Io(#[from] std::io::Error),

    /// JSON lines serialization failed.
    #[error("Cannot serialize statement: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    #[error("Reshape error: {0}")]
    Reshape(#[from] ReshapeError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type SheetResult<T> = Result<T, SheetError>;

pub type ReshapeResult<T> = Result<T, ReshapeError>;

pub type PipelineResult<T> = Result<T, PipelineError>;
