//! Row to INSERT statement conversion.
//!
//! Pure and order-preserving: `statements[i]` is built from `rows[i]`, and
//! every input row yields exactly one statement.

use serde::{Deserialize, Serialize};

use super::mapping::ColumnMapping;
use crate::models::InputRow;
use crate::sql::Statement;

/// Default picture location for product photos
pub const DEFAULT_PICTURE_BASE_URL: &str = "http://190.140.249.241/hungfazl/fotos/";

/// Default target table
pub const DEFAULT_TABLE: &str = "item";

/// Everything the converter needs besides the rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub table: String,
    pub picture_base_url: String,
    pub mapping: ColumnMapping,
}

impl ConvertConfig {
    pub fn new(picture_base_url: impl Into<String>) -> Self {
        Self {
            picture_base_url: picture_base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            picture_base_url: DEFAULT_PICTURE_BASE_URL.to_string(),
            mapping: ColumnMapping::item_table(),
        }
    }
}

/// Build one statement for a row
pub fn convert_row(row: &InputRow, config: &ConvertConfig) -> Statement {
    let pairs = config
        .mapping
        .columns
        .iter()
        .map(|target| {
            let value = target.source.resolve(row, &config.picture_base_url);
            (target.name.clone(), value)
        })
        .collect();

    Statement::insert(config.table.clone(), pairs)
}

/// Build one statement per row, in input order
pub fn convert(rows: &[InputRow], config: &ConvertConfig) -> Vec<Statement> {
    rows.iter().map(|row| convert_row(row, config)).collect()
}

/// [`convert`] against the `item` table with the given picture base URL
pub fn convert_with_base_url(rows: &[InputRow], base_url: &str) -> Vec<Statement> {
    convert(rows, &ConvertConfig::new(base_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlValue;

    fn widget() -> InputRow {
        InputRow::from_pairs(
            3,
            [
                ("CODIGO", "A100"),
                ("DESCRIPCION", "Widget"),
                ("MARCA", "ACME"),
                ("GRUPO", "G1"),
                ("UNIDA", "PZA"),
                ("COSTO", "5.00"),
                ("P-A", "6.00"),
                ("P-B", "7.00"),
            ],
        )
    }

    fn row_with_code(code: &str) -> InputRow {
        InputRow::from_pairs(2, [("CODIGO", code), ("DESCRIPCION", "x")])
    }

    #[test]
    fn test_widget_statement() {
        let stmts = convert_with_base_url(&[widget()], "http://host/fotos/");
        assert_eq!(stmts.len(), 1);

        let stmt = &stmts[0];
        assert_eq!(stmt.value("picture"), Some(&SqlValue::text("http://host/fotos/A100")));
        assert_eq!(stmt.value("codigo"), Some(&SqlValue::text("A100")));
        assert_eq!(stmt.value("p_a"), Some(&SqlValue::text("6.00")));
        for col in ["p_c", "p_d", "inve", "un_ctn", "ctns"] {
            assert_eq!(stmt.value(col), Some(&SqlValue::text("")), "column {}", col);
        }
        assert_eq!(stmt.value("visible"), Some(&SqlValue::Integer(1)));

        let sql = stmt.to_sql();
        assert!(sql.contains("'http://host/fotos/A100'"));
        assert!(sql.contains("'A100'"));
        assert_eq!(
            sql,
            "INSERT INTO item (picture, codigo, discripcion, marca, grupo, unidad, costo, p_a, p_b, p_c, p_d, inve, un_ctn, ctns, visible) \
             VALUES ('http://host/fotos/A100', 'A100', 'Widget', 'ACME', 'G1', 'PZA', '5.00', '6.00', '7.00', '', '', '', '', '', 1);"
        );
    }

    #[test]
    fn test_one_statement_per_row_in_order() {
        let codes = ["Z1", "A2", "M3", "B4"];
        let rows: Vec<InputRow> = codes.iter().map(|c| row_with_code(c)).collect();
        let stmts = convert_with_base_url(&rows, "u/");

        assert_eq!(stmts.len(), rows.len());
        for (stmt, code) in stmts.iter().zip(codes) {
            assert_eq!(stmt.value("codigo"), Some(&SqlValue::text(code)));
            assert_eq!(stmt.value("picture"), Some(&SqlValue::text(format!("u/{}", code))));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(convert(&[], &ConvertConfig::default()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let rows = vec![widget(), row_with_code("Q'7")];
        let config = ConvertConfig::new("http://host/");
        let a: Vec<String> = convert(&rows, &config).iter().map(Statement::to_sql).collect();
        let b: Vec<String> = convert(&rows, &config).iter().map(Statement::to_sql).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let stmts = convert(&[row_with_code("C1")], &ConvertConfig::default());
        assert_eq!(stmts[0].value("marca"), Some(&SqlValue::text("")));
        assert_eq!(stmts[0].values().len(), 15);
    }

    #[test]
    fn test_quote_in_description_is_escaped() {
        let row = InputRow::from_pairs(2, [("CODIGO", "T1"), ("DESCRIPCION", "Llave 3/4' O'Neil")]);
        let sql = convert_with_base_url(&[row], "http://h/")[0].to_sql();
        assert!(sql.contains("'Llave 3/4'' O''Neil'"));
    }

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert_eq!(config.table, "item");
        assert_eq!(config.picture_base_url, DEFAULT_PICTURE_BASE_URL);
        assert_eq!(config.mapping.len(), 15);
    }
}
