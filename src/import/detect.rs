//! Column auto-detection
//!
//! Proposes a header → field mapping for a target import kind by
//! normalizing both the catalog aliases and the raw headers and taking
//! the first exact match. Detection is deterministic and pure:
//! first-match-wins follows the field list order (not the header order),
//! a source column is never claimed by two fields, and a field with no
//! matching alias simply gets no entry.

use std::collections::HashSet;

use super::catalog::{fields, ImportKind};
use super::MappedRow;
use super::ParsedTable;

/// One detected association between a catalog field and a source column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// Canonical field key
    pub field: &'static str,
    /// Index into the header row
    pub column: usize,
    /// The raw header that matched, for display
    pub header: String,
}

/// A partial header → field mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: Vec<MapEntry>,
}

impl ColumnMap {
    /// The detected entries, in field list order
    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Column index for a field, if detected
    pub fn column(&self, field: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.column)
    }

    /// Whether any columns were detected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field keys from the catalog that found no matching column
    pub fn missing(&self, kind: ImportKind) -> Vec<&'static str> {
        fields(kind)
            .iter()
            .filter(|f| self.column(f.key).is_none())
            .map(|f| f.key)
            .collect()
    }
}

/// Normalize a header or alias for matching: lowercase, strip spaces,
/// underscores, and hyphens.
pub fn normalize_header(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect()
}

/// Detect a column mapping for the given headers and import kind
pub fn detect(headers: &[String], kind: ImportKind) -> ColumnMap {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut entries = Vec::new();

    for spec in fields(kind) {
        let hit = spec.aliases.iter().find_map(|alias| {
            let alias_norm = normalize_header(alias);
            normalized
                .iter()
                .enumerate()
                .find(|(i, h)| !claimed.contains(i) && **h == alias_norm)
                .map(|(i, _)| i)
        });

        if let Some(column) = hit {
            claimed.insert(column);
            entries.push(MapEntry {
                field: spec.key,
                column,
                header: headers[column].clone(),
            });
        }
    }

    ColumnMap { entries }
}

/// Apply a mapping to a parsed table, translating rows from raw-header
/// keys to canonical field keys. Values pass through untouched.
pub fn apply(table: &ParsedTable, map: &ColumnMap) -> Vec<MappedRow> {
    table
        .rows
        .iter()
        .map(|row| {
            let fields = map
                .entries
                .iter()
                .filter_map(|e| {
                    row.values
                        .get(e.column)
                        .map(|v| (e.field.to_string(), v.clone()))
                })
                .collect();
            MappedRow {
                row: row.row,
                fields,
            }
        })
        .collect()
}
