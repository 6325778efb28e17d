//! Spreadsheet readers.
//!
//! Every reader returns a [`RawTable`]: all rows of the sheet, untouched.
//! Header handling and renaming happen later in [`crate::transform::reshape`].

pub mod csv;
pub mod excel;

use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::models::RawTable;

pub use self::csv::{decode_content, detect_delimiter, detect_encoding, read_csv_file};
pub use self::excel::{read_workbook, sheet_names};

/// Input document kind, from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Workbook,
    Delimited,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> SheetResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Workbook),
            "csv" | "tsv" | "txt" => Ok(InputFormat::Delimited),
            _ => Err(SheetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read options shared by all formats
#[derive(Debug, Clone, Default)]
pub struct ReadOptions<'a> {
    /// Sheet to read (workbooks only); first sheet when `None`
    pub sheet: Option<&'a str>,
    /// Field delimiter (delimited text only); detected when `None`
    pub delimiter: Option<char>,
}

/// Read any supported input into a table
pub fn read_table(path: &Path, options: &ReadOptions<'_>) -> SheetResult<RawTable> {
    match InputFormat::from_path(path)? {
        InputFormat::Workbook => read_workbook(path, options.sheet),
        InputFormat::Delimited => read_csv_file(path, options.delimiter),
    }
}

/// Sheet names of a document; delimited files have a single unnamed sheet
pub fn list_sheets(path: &Path) -> SheetResult<Vec<String>> {
    match InputFormat::from_path(path)? {
        InputFormat::Workbook => sheet_names(path),
        InputFormat::Delimited => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("data")
                .to_string();
            Ok(vec![stem])
        }
    }
}
