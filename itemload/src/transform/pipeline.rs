//! High-level pipeline: spreadsheet in, INSERT statements out.
//!
//! ```rust,ignore
//! use itemload::{run, LoaderConfig};
//!
//! let summary = run(&LoaderConfig::default())?;
//! println!("{} statements written to {}", summary.statements, summary.output.display());
//! ```

use serde::Serialize;
use std::path::PathBuf;

use super::converter::convert;
use super::reshape::{reshape, Reshaped};
use crate::config::LoaderConfig;
use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::InputRow;
use crate::parser::{read_table, ReadOptions};
use crate::sql::Statement;
use crate::writer::write_statements;

/// What a run did
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Data rows read after reshape
    pub rows: usize,
    /// Statements written
    pub statements: usize,
    /// Fully empty rows skipped
    pub blank_rows: usize,
    /// Sheet or CSV description
    pub source: String,
    pub output: PathBuf,
}

/// Read and reshape the configured input
pub fn load_rows(config: &LoaderConfig) -> PipelineResult<(Reshaped, String)> {
    log_info(format!("📖 Reading {}...", config.input.display()));

    let options = ReadOptions {
        sheet: config.sheet.as_deref(),
        delimiter: config.delimiter,
    };
    let table = read_table(&config.input, &options)?;
    let source = table.source.to_string();
    log_success(format!(
        "Loaded {} ({} raw rows, {} columns)",
        source,
        table.rows.len(),
        table.width()
    ));

    let reshaped = reshape(&table, &config.layout)?;
    log_info(format!("📋 {} columns mapped:", reshaped.original_headers.len()));
    for (original, renamed) in reshaped.original_headers.iter().zip(&config.layout.columns) {
        log_info_indent(format!("{} → {}", original, renamed), 1);
    }
    if reshaped.blank_rows > 0 {
        log_warning(format!("{} empty rows skipped", reshaped.blank_rows));
    }
    log_success(format!("Read {} rows", reshaped.rows.len()));

    Ok((reshaped, source))
}

/// Build statements for `rows` with the config's mapping
pub fn build_statements(rows: &[InputRow], config: &LoaderConfig) -> Vec<Statement> {
    log_info("⚙️  Building INSERT statements...");
    let statements = convert(rows, &config.convert_config());
    log_success(format!("Built {} statements for table '{}'", statements.len(), config.table));
    statements
}

/// Everything except writing: load, reshape, convert
pub fn convert_file(config: &LoaderConfig) -> PipelineResult<Vec<Statement>> {
    config.validate()?;
    let (reshaped, _) = load_rows(config)?;
    Ok(build_statements(&reshaped.rows, config))
}

/// Full run: load, reshape, convert and write to `config.output`
pub fn run(config: &LoaderConfig) -> PipelineResult<RunSummary> {
    config.validate()?;

    let (reshaped, source) = load_rows(config)?;
    if reshaped.rows.is_empty() {
        log_warning("No data rows found; output will be empty");
    }

    let statements = build_statements(&reshaped.rows, config);

    log_info(format!("💾 Writing {}...", config.output.display()));
    write_statements(&config.output, &statements, config.format, config.placeholder)?;
    log_success(format!("{} statements written", statements.len()));

    Ok(RunSummary {
        rows: reshaped.rows.len(),
        statements: statements.len(),
        blank_rows: reshaped.blank_rows,
        source,
        output: config.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, SheetError};
    use crate::logs::LOG_BROADCASTER;
    use tempfile::tempdir;

    const SHEET: &str = "\
LISTA DE MERCANCIA;;;;;;;;
#;CODIGO;DESCRIPCION;MARCA;GRUPO;UNIDAD;COSTO;P-A;P-B
1;A100;Widget;ACME;G1;PZA;5.00;6.00;7.00
2;B200;Llave 3/4' O'Neil;TRUPER;G2;PZA;1.50;2.00;2.50
";

    fn config_in(dir: &std::path::Path, body: &str) -> LoaderConfig {
        LOG_BROADCASTER.set_quiet(true);
        let input = dir.join("mercancia.csv");
        std::fs::write(&input, body).unwrap();
        LoaderConfig {
            input,
            sheet: None,
            picture_base_url: "http://host/fotos/".into(),
            output: dir.join("insert_statements.txt"),
            ..LoaderConfig::default()
        }
    }

    #[test]
    fn test_run_writes_one_line_per_row() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), SHEET);

        let summary = run(&config).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.statements, 2);

        let text = std::fs::read_to_string(&config.output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(text.ends_with(";\n"));
        assert!(lines[0].starts_with("INSERT INTO item (picture, codigo,"));
        assert!(lines[0].contains("'http://host/fotos/A100', 'A100', 'Widget'"));
        assert!(lines[1].contains("'Llave 3/4'' O''Neil'"));
    }

    #[test]
    fn test_run_is_deterministic() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), SHEET);

        run(&config).unwrap();
        let first = std::fs::read(&config.output).unwrap();
        run(&config).unwrap();
        let second = std::fs::read(&config.output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_only_gives_empty_output() {
        let dir = tempdir().unwrap();
        let body: String = SHEET.lines().take(2).map(|l| format!("{}\n", l)).collect();
        let config = config_in(dir.path(), &body);

        let summary = run(&config).unwrap();
        assert_eq!(summary.statements, 0);
        assert_eq!(std::fs::read_to_string(&config.output).unwrap(), "");
    }

    #[test]
    fn test_convert_file_without_writing() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), SHEET);

        let statements = convert_file(&config).unwrap();
        assert_eq!(statements.len(), 2);
        assert!(!config.output.exists());
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        let config = LoaderConfig {
            input: dir.path().join("missing.csv"),
            ..LoaderConfig::default()
        };
        assert!(matches!(
            run(&config),
            Err(PipelineError::Sheet(SheetError::Io(_)))
        ));
    }
}
