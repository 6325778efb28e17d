//! Header handling and column renaming.
//!
//! Turns a [`RawTable`] into named [`InputRow`]s: skip the leading rows, take
//! the next row as header, drop the leading columns and rename the remaining
//! ones positionally.

use serde::{Deserialize, Serialize};

use crate::error::{ReshapeError, ReshapeResult};
use crate::models::{Cell, InputRow, RawTable};

/// Column names of the merchandise sheet after the first column is dropped
pub const ITEM_COLUMNS: [&str; 8] = [
    "CODIGO",
    "DESCRIPCION",
    "MARCA",
    "GRUPO",
    "UNIDA",
    "COSTO",
    "P-A",
    "P-B",
];

/// How the data sits in the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Rows above the header row
    pub skip_rows: usize,
    /// Leading columns to discard
    pub drop_columns: usize,
    /// Names given to the remaining columns, in order
    pub columns: Vec<String>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            drop_columns: 1,
            columns: ITEM_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Result of reshaping: renamed rows plus the original header text
#[derive(Debug, Clone)]
pub struct Reshaped {
    /// Header cells as found in the sheet (after the column drop)
    pub original_headers: Vec<String>,
    pub rows: Vec<InputRow>,
    /// Fully empty rows that were skipped
    pub blank_rows: usize,
}

/// Apply `layout` to `table`.
///
/// The header width after the drop must match `layout.columns`. Data rows
/// are padded with empty values or truncated to that width; fully empty
/// rows are skipped.
pub fn reshape(table: &RawTable, layout: &SheetLayout) -> ReshapeResult<Reshaped> {
    let mut rows = table.rows.iter().enumerate().skip(layout.skip_rows);

    let (_, header) = rows
        .find(|(_, r)| !r.iter().all(Cell::is_empty))
        .ok_or(ReshapeError::MissingHeader { skipped: layout.skip_rows })?;

    let original_headers = header_names(header, layout.drop_columns);
    if original_headers.len() != layout.columns.len() {
        return Err(ReshapeError::ColumnCountMismatch {
            expected: layout.columns.len(),
            found: original_headers.len(),
            dropped: layout.drop_columns,
        });
    }

    let mut out = Vec::new();
    let mut blank_rows = 0;

    for (idx, cells) in rows {
        if cells.iter().all(Cell::is_empty) {
            blank_rows += 1;
            continue;
        }

        let fields = layout
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = cells
                    .get(layout.drop_columns + i)
                    .map(Cell::to_text)
                    .unwrap_or_default();
                (name.clone(), value)
            })
            .collect();

        out.push(InputRow::new(idx + 1, fields));
    }

    Ok(Reshaped {
        original_headers,
        rows: out,
        blank_rows,
    })
}

/// Header text after dropping `drop` columns, with trailing empty cells trimmed
fn header_names(header: &[Cell], drop: usize) -> Vec<String> {
    let mut names: Vec<String> = header
        .iter()
        .skip(drop)
        .map(|c| c.to_text().trim().to_string())
        .collect();

    while names.last().is_some_and(|n| n.is_empty()) {
        names.pop();
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceInfo;

    fn text_row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    fn sheet(rows: Vec<Vec<Cell>>) -> RawTable {
        RawTable::new(rows, SourceInfo::Sheet { name: "Sheet1".into() })
    }

    fn merchandise() -> RawTable {
        sheet(vec![
            text_row(&["LISTA DE MERCANCIA"]),
            text_row(&["#", "Codigo", "Descripcion", "Marca", "Grupo", "Unid", "Costo", "PA", "PB"]),
            vec![
                Cell::Int(1),
                Cell::Float(100.0),
                Cell::from("Tornillo"),
                Cell::from("ACME"),
                Cell::from("G1"),
                Cell::from("PZA"),
                Cell::Float(5.5),
                Cell::Float(6.0),
                Cell::Float(7.25),
            ],
            vec![],
            text_row(&["2", "B200", "Tuerca"]),
        ])
    }

    #[test]
    fn test_reshape_renames_and_drops_first_column() {
        let result = reshape(&merchandise(), &SheetLayout::default()).unwrap();

        assert_eq!(result.original_headers[0], "Codigo");
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.blank_rows, 1);

        let first = &result.rows[0];
        assert_eq!(first.line, 3);
        assert_eq!(first.value("CODIGO"), "100");
        assert_eq!(first.value("DESCRIPCION"), "Tornillo");
        assert_eq!(first.value("COSTO"), "5.5");
        assert_eq!(first.value("P-A"), "6");
        assert_eq!(first.columns().collect::<Vec<_>>(), ITEM_COLUMNS.to_vec());
    }

    #[test]
    fn test_short_rows_are_padded() {
        let result = reshape(&merchandise(), &SheetLayout::default()).unwrap();
        let short = &result.rows[1];
        assert_eq!(short.line, 5);
        assert_eq!(short.value("CODIGO"), "B200");
        assert_eq!(short.get("P-B"), Some(""));
        assert_eq!(short.len(), 8);
    }

    #[test]
    fn test_column_count_mismatch() {
        let table = sheet(vec![
            text_row(&["title"]),
            text_row(&["#", "Codigo", "Descripcion"]),
            text_row(&["1", "A", "B"]),
        ]);
        let err = reshape(&table, &SheetLayout::default()).unwrap_err();
        assert!(matches!(
            err,
            ReshapeError::ColumnCountMismatch { expected: 8, found: 2, dropped: 1 }
        ));
    }

    #[test]
    fn test_missing_header() {
        let table = sheet(vec![text_row(&["only a title"])]);
        let err = reshape(&table, &SheetLayout::default()).unwrap_err();
        assert!(matches!(err, ReshapeError::MissingHeader { skipped: 1 }));
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let table = sheet(vec![
            text_row(&["title"]),
            text_row(&["#", "a", "b", "c", "d", "e", "f", "g", "h"]),
        ]);
        let result = reshape(&table, &SheetLayout::default()).unwrap();
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_custom_layout() {
        let table = sheet(vec![text_row(&["code", "name"]), text_row(&["X1", "Bolt"])]);
        let layout = SheetLayout {
            skip_rows: 0,
            drop_columns: 0,
            columns: vec!["CODIGO".into(), "DESCRIPCION".into()],
        };
        let result = reshape(&table, &layout).unwrap();
        assert_eq!(result.rows[0].value("DESCRIPCION"), "Bolt");
        assert_eq!(result.rows[0].line, 2);
    }
}
