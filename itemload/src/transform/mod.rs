//! Transformation module.
//!
//! - Reshape: header skip, column drop and rename
//! - Mapping: where each target column's value comes from
//! - Converter: rows to INSERT statements
//! - Pipeline: the full read → convert → write run

pub mod converter;
pub mod mapping;
pub mod pipeline;
pub mod reshape;

pub use converter::{convert, convert_row, convert_with_base_url, ConvertConfig};
pub use mapping::{picture_url, ColumnMapping, TargetColumn, ValueSource};
pub use pipeline::{build_statements, convert_file, load_rows, run, RunSummary};
pub use reshape::{reshape, Reshaped, SheetLayout, ITEM_COLUMNS};
