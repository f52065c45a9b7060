//! CSV import pipeline
//!
//! Staged, typed pipeline: parse → detect columns → map → validate →
//! batch import. Each stage has its own output type so contracts are
//! checked at compile time rather than by runtime field-presence checks:
//!
//! ```text
//! CSV file --parse--> ParsedTable --detect--> ColumnMap
//!          --apply--> Vec<MappedRow> --validate--> ValidationOutcome
//!          --batch import--> ImportOutcome
//! ```
//!
//! Validation errors are collected per row and never abort the run; only
//! a whole-file parse failure stops the import before any writes.

pub mod batch;
pub mod catalog;
pub mod detect;
pub mod parse;
pub mod validate;

pub use batch::{BatchImporter, ImportOutcome};
pub use catalog::{FieldKind, FieldSpec, ImportKind};
pub use detect::ColumnMap;
pub use parse::{ParseError, ParsedRow, ParsedTable};
pub use validate::{ImportRow, RowError, ValidationOutcome};

use std::collections::HashMap;

/// A row translated from raw header keys to canonical field keys.
///
/// Values are kept as raw strings; coercion happens in validation.
/// `row` is the 1-based data row number (first row after headers and
/// skipped rows is row 1), carried through to error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    /// 1-based data row number
    pub row: usize,
    /// Canonical field key → raw cell value
    pub fields: HashMap<String, String>,
}

impl MappedRow {
    /// Get a field value, treating missing and empty as absent
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}
