//! Workbook input (xlsx, xlsm, xls, ods) via calamine.

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::models::{Cell, RawTable, SourceInfo};

fn open(path: &Path) -> SheetResult<Sheets<BufReader<File>>> {
    open_workbook_auto(path).map_err(|e| SheetError::Workbook {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Sheet names in workbook order
pub fn sheet_names(path: &Path) -> SheetResult<Vec<String>> {
    Ok(open(path)?.sheet_names())
}

/// Read one sheet, or the first sheet when `sheet` is `None`.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> SheetResult<RawTable> {
    let mut workbook = open(path)?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| SheetError::SheetNotFound {
                name: wanted.to_string(),
                available: names.clone(),
            })?,
        None => names.first().cloned().ok_or(SheetError::NoSheets)?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| SheetError::Workbook {
            path: path.display().to_string(),
            message: format!("cannot read sheet '{}': {}", name, e),
        })?;

    Ok(RawTable::new(range_rows(&range), SourceInfo::Sheet { name }))
}

/// Rows anchored at A1.
///
/// calamine ranges start at the first used cell; leading empty rows and
/// columns are restored so row/column positions match the sheet.
fn range_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let (row_offset, col_offset) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Vec::new(),
    };

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(to_cell));
        rows.push(cells);
    }
    rows
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cell() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::String("ACME".into())), Cell::from("ACME"));
        assert_eq!(to_cell(&Data::String(String::new())), Cell::Empty);
        assert_eq!(to_cell(&Data::Float(5.5)), Cell::Float(5.5));
        assert_eq!(to_cell(&Data::Int(3)), Cell::Int(3));
    }

    #[test]
    fn test_range_rows_restores_offset() {
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("a".into()));
        range.set_value((2, 2), Data::Float(2.0));

        let rows = range_rows(&range);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec![Cell::Empty, Cell::from("a"), Cell::Empty]);
        assert_eq!(rows[2][2], Cell::Float(2.0));
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(range_rows(&range).is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = read_workbook(Path::new("/nonexistent/MERCANCIA.xlsx"), None).unwrap_err();
        assert!(matches!(err, SheetError::Workbook { .. }));
    }
}
