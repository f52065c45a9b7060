//! CSV parsing
//!
//! Turns a raw file into a header row plus positional data rows, with a
//! configurable number of leading rows to skip before the header. A
//! malformed file or an empty table after the skip is a fatal error:
//! the import halts here, before any writes.

use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// One raw data row, positionally aligned with the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// 1-based data row number (first row after the header is 1)
    pub row: usize,
    /// Cell values, one per header column; short records are padded
    pub values: Vec<String>,
}

/// A parsed CSV file: headers plus data rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    /// Raw header strings, trimmed
    pub headers: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<ParsedRow>,
}

impl ParsedTable {
    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse a CSV file, skipping `skip_rows` leading rows before the header
pub fn parse_file(path: &Path, skip_rows: usize) -> Result<ParsedTable, ParseError> {
    let file = File::open(path).map_err(|e| ParseError::Open(path.display().to_string(), e.to_string()))?;
    parse_reader(BufReader::new(file), skip_rows)
}

/// Parse CSV from any reader, skipping `skip_rows` leading rows before the header
pub fn parse_reader<R: Read>(reader: R, skip_rows: usize) -> Result<ParsedTable, ParseError> {
    // Headers are handled manually so leading junk rows can be skipped.
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = rdr.records();

    for skipped in 0..skip_rows {
        match records.next() {
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(ParseError::Malformed(skipped + 1, e.to_string())),
            None => return Err(ParseError::NotEnoughRows { skip: skip_rows }),
        }
    }

    let headers: Vec<String> = match records.next() {
        Some(Ok(record)) => record.iter().map(|h| h.trim().to_string()).collect(),
        Some(Err(e)) => return Err(ParseError::Malformed(skip_rows + 1, e.to_string())),
        None => return Err(ParseError::NotEnoughRows { skip: skip_rows }),
    };

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ParseError::EmptyHeader);
    }

    let mut rows = Vec::new();
    for (i, result) in records.enumerate() {
        let file_row = skip_rows + 2 + i;
        let record = result.map_err(|e| ParseError::Malformed(file_row, e.to_string()))?;

        let mut values: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
        values.resize(headers.len(), String::new());

        // Fully blank lines are common in hand-edited sheets; drop them.
        if values.iter().all(|v| v.is_empty()) {
            continue;
        }

        rows.push(ParsedRow {
            row: rows.len() + 1,
            values,
        });
    }

    if rows.is_empty() {
        return Err(ParseError::NoDataRows);
    }

    Ok(ParsedTable { headers, rows })
}

/// Errors that halt an import before any writes
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot open {0}: {1}")]
    Open(String, String),

    #[error("malformed CSV at file row {0}: {1}")]
    Malformed(usize, String),

    #[error("file has no header row after skipping {skip} leading rows")]
    NotEnoughRows { skip: usize },

    #[error("header row is empty")]
    EmptyHeader,

    #[error("file contains no data rows")]
    NoDataRows,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_basic() {
        let csv = "project,area,item\nMaple,Kitchen,Cabinets\nMaple,Kitchen,Counters\n";
        let table = parse_reader(Cursor::new(csv), 0).unwrap();
        assert_eq!(table.headers, vec!["project", "area", "item"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].row, 1);
        assert_eq!(table.rows[1].values[2], "Counters");
    }

    #[test]
    fn test_parse_skips_leading_rows() {
        let csv = "Exported 2024-05-01\n,,\nproject,area,item\nMaple,Kitchen,Cabinets\n";
        let table = parse_reader(Cursor::new(csv), 2).unwrap();
        assert_eq!(table.headers[0], "project");
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let csv = "a,b,c\n1,2\n";
        let table = parse_reader(Cursor::new(csv), 0).unwrap();
        assert_eq!(table.rows[0].values, vec!["1", "2", ""]);
    }

    #[test]
    fn test_parse_drops_blank_lines() {
        let csv = "a,b\n1,2\n,\n3,4\n";
        let table = parse_reader(Cursor::new(csv), 0).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1].row, 2);
    }

    #[test]
    fn test_parse_fails_without_header() {
        let csv = "only row\n";
        let err = parse_reader(Cursor::new(csv), 3).unwrap_err();
        assert!(matches!(err, ParseError::NotEnoughRows { skip: 3 }));
    }

    #[test]
    fn test_parse_fails_without_data_rows() {
        let csv = "a,b,c\n";
        let err = parse_reader(Cursor::new(csv), 0).unwrap_err();
        assert!(matches!(err, ParseError::NoDataRows));
    }
}
