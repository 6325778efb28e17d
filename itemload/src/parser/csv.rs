//! Delimited text input with encoding and delimiter auto-detection.

use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::models::{Cell, RawTable, SourceInfo};

const DELIMITER_SAMPLE_LINES: usize = 5;

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string. Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match encoding {
        "iso-8859-1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Pick the separator that appears most often in the first lines.
///
/// Several lines are sampled since merchandise sheets often start with a
/// title line that has no separators at all.
pub fn detect_delimiter(content: &str) -> char {
    let sample: Vec<&str> = content.lines().take(DELIMITER_SAMPLE_LINES).collect();

    let mut best_sep = ',';
    let mut best_count = 0;

    for sep in [',', ';', '\t', '|'] {
        let count: usize = sample.iter().map(|line| line.matches(sep).count()).sum();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse decoded text into a table. Every line is kept, headers included.
pub fn parse_str(content: &str, delimiter: char, encoding: impl Into<String>) -> SheetResult<RawTable> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| SheetError::Csv {
            line: e.position().map(|p| p.line() as usize).unwrap_or(0),
            message: e.to_string(),
        })?;

        let line = record.position().map(|p| p.line() as usize).unwrap_or(rows.len() + 1);
        // Keep row index == line - 1 so line numbers survive blank lines
        while rows.len() + 1 < line {
            rows.push(Vec::new());
        }

        rows.push(record.iter().map(|v| Cell::from(v.trim())).collect());
    }

    Ok(RawTable::new(
        rows,
        SourceInfo::Csv {
            encoding: encoding.into(),
            delimiter,
        },
    ))
}

/// Parse CSV bytes, detecting encoding and (unless given) the delimiter
pub fn parse_bytes(bytes: &[u8], delimiter: Option<char>) -> SheetResult<RawTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    parse_str(&content, delimiter, encoding)
}

/// Parse a CSV file, detecting encoding and (unless given) the delimiter
pub fn read_csv_file(path: &Path, delimiter: Option<char>) -> SheetResult<RawTable> {
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("a|b|c"), '|');
        assert_eq!(detect_delimiter("single"), ',');
        assert_eq!(detect_delimiter("LISTA DE PRECIOS\n#;code;name\n1;A;B"), ';');
    }

    #[test]
    fn test_parse_keeps_all_rows() {
        let table = parse_str("title\n#,code,name\n1,A1,Bolt\n", ',', "utf-8").unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0], vec![Cell::from("title")]);
        assert_eq!(table.rows[2][1], Cell::from("A1"));
    }

    #[test]
    fn test_quoted_fields_keep_delimiters_and_quotes() {
        let table = parse_str("a;b\n\"x;y\";\"O'Brien \"\"Jr\"\"\"\n", ';', "utf-8").unwrap();
        assert_eq!(table.rows[1][0], Cell::from("x;y"));
        assert_eq!(table.rows[1][1], Cell::from("O'Brien \"Jr\""));
    }

    #[test]
    fn test_empty_values_are_empty_cells() {
        let table = parse_str("a,b,c\n1,,3", ',', "utf-8").unwrap();
        assert_eq!(table.rows[1][1], Cell::Empty);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Tubería" in ISO-8859-1
        let bytes: &[u8] = &[0x54, 0x75, 0x62, 0x65, 0x72, 0xED, 0x61];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Tubería");
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = parse_bytes(b"\xEF\xBB\xBFcode;name\nA1;Bolt", None).unwrap();
        assert_eq!(table.rows[0][0], Cell::from("code"));
        assert!(matches!(table.source, SourceInfo::Csv { delimiter: ';', .. }));
    }
}
