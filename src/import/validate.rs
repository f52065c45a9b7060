//! Row validation and type coercion
//!
//! Applies the per-field coercion rules from the catalog to mapped rows,
//! splitting the input into typed valid rows and field-level errors.
//! Errors never abort the run: a failing row is excluded from the valid
//! set but every one of its field errors is retained for display.
//!
//! Enum fields are deliberately lenient: an unrecognized status/priority
//! falls back to the default value, but the fallback is surfaced as a
//! warning instead of being silently coerced.

use crate::core::entity::{Priority, ProjectStatus, Rating, TaskStatus};

use super::catalog::{fields, FieldKind, ImportKind};
use super::MappedRow;

/// A structured field-level error or warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row number
    pub row: usize,
    /// Field the problem was found in
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}: {}", self.row, self.field, self.message)
    }
}

/// A validated project row
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
    pub row: usize,
    pub name: String,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub address: Option<String>,
    pub status: ProjectStatus,
    pub total_budget: Option<f64>,
}

/// A validated task row; `project` is the parent name, resolved at import
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub row: usize,
    pub project: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub blocking: bool,
    pub follow_up_days: Option<u32>,
    pub notes: Option<String>,
}

/// A validated budget line item row; parent names resolved at import
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetItemRow {
    pub row: usize,
    pub project: String,
    pub area: String,
    pub item: String,
    pub budgeted: Option<f64>,
    pub actual: Option<f64>,
}

/// A validated vendor row; trade names resolved at import
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow {
    pub row: usize,
    pub company: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub rating: Rating,
    pub trades: Vec<String>,
}

/// A validated row of any import kind
#[derive(Debug, Clone, PartialEq)]
pub enum ImportRow {
    Project(ProjectRow),
    Task(TaskRow),
    BudgetItem(BudgetItemRow),
    Vendor(VendorRow),
}

impl ImportRow {
    /// The 1-based data row this came from
    pub fn row(&self) -> usize {
        match self {
            ImportRow::Project(r) => r.row,
            ImportRow::Task(r) => r.row,
            ImportRow::BudgetItem(r) => r.row,
            ImportRow::Vendor(r) => r.row,
        }
    }
}

/// The result of validating a batch of mapped rows
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Rows that passed validation, in input order
    pub valid: Vec<ImportRow>,
    /// Field-level errors from excluded rows
    pub errors: Vec<RowError>,
    /// Non-fatal warnings (e.g. enum fallbacks) from any row
    pub warnings: Vec<RowError>,
    /// Total rows examined
    pub total: usize,
}

impl ValidationOutcome {
    /// Number of rows that passed validation
    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }

    /// Number of rows excluded; always `total - valid_count`
    pub fn error_count(&self) -> usize {
        self.total - self.valid.len()
    }
}

/// Coerce a money string: strip currency symbols, thousands separators,
/// and whitespace. Invalid or empty input coerces to None.
pub fn coerce_money(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Coerce a boolean string via membership in {true, 1, yes, y},
/// case-insensitive. Empty input coerces to false.
pub fn coerce_bool(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "y")
}

/// Coerce optional text: empty becomes None, otherwise trimmed
pub fn coerce_text(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Coerce an email: lowercase; values without '@' are rejected
pub fn coerce_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    if email.contains('@') {
        Some(email)
    } else {
        None
    }
}

/// Validate a batch of mapped rows against an import kind's catalog
pub fn validate(kind: ImportKind, rows: &[MappedRow]) -> ValidationOutcome {
    let mut outcome = ValidationOutcome {
        total: rows.len(),
        ..Default::default()
    };

    for row in rows {
        let mut row_errors = Vec::new();

        for spec in fields(kind) {
            if spec.required && row.get(spec.key).is_none() {
                row_errors.push(RowError {
                    row: row.row,
                    field: spec.key.to_string(),
                    message: format!("Missing required field '{}'", spec.key),
                });
            }
        }

        // Emails get a field-level error rather than silent null: a typo
        // in a supplied address should surface, not vanish.
        for spec in fields(kind) {
            if spec.kind == FieldKind::Email {
                if let Some(raw) = row.get(spec.key) {
                    if coerce_email(raw).is_none() {
                        row_errors.push(RowError {
                            row: row.row,
                            field: spec.key.to_string(),
                            message: format!("Invalid email address: '{}'", raw),
                        });
                    }
                }
            }
        }

        if !row_errors.is_empty() {
            outcome.errors.extend(row_errors);
            continue;
        }

        let valid = match kind {
            ImportKind::Projects => ImportRow::Project(project_row(row, &mut outcome.warnings)),
            ImportKind::Tasks => ImportRow::Task(task_row(row, &mut outcome.warnings)),
            ImportKind::BudgetItems => ImportRow::BudgetItem(budget_item_row(row)),
            ImportKind::Vendors => ImportRow::Vendor(vendor_row(row, &mut outcome.warnings)),
        };
        outcome.valid.push(valid);
    }

    outcome
}

/// Parse an enum field, falling back to its default with a warning
fn coerce_enum<T>(
    row: &MappedRow,
    field: &str,
    label: &str,
    warnings: &mut Vec<RowError>,
) -> T
where
    T: std::str::FromStr + Default + std::fmt::Display,
{
    let Some(raw) = row.get(field) else {
        return T::default();
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            let fallback = T::default();
            warnings.push(RowError {
                row: row.row,
                field: field.to_string(),
                message: format!(
                    "Unknown {} '{}', defaulting to '{}'",
                    label, raw, fallback
                ),
            });
            fallback
        }
    }
}

fn project_row(row: &MappedRow, warnings: &mut Vec<RowError>) -> ProjectRow {
    ProjectRow {
        row: row.row,
        name: row.get("name").unwrap_or_default().to_string(),
        client_name: coerce_text(row.get("client_name")),
        client_email: row.get("client_email").and_then(coerce_email),
        client_phone: coerce_text(row.get("client_phone")),
        address: coerce_text(row.get("address")),
        status: coerce_enum(row, "status", "project status", warnings),
        total_budget: row.get("total_budget").and_then(coerce_money),
    }
}

fn task_row(row: &MappedRow, warnings: &mut Vec<RowError>) -> TaskRow {
    let follow_up_days = row.get("follow_up_days").and_then(|s| s.parse().ok());
    TaskRow {
        row: row.row,
        project: row.get("project").unwrap_or_default().to_string(),
        title: row.get("title").unwrap_or_default().to_string(),
        status: coerce_enum(row, "status", "task status", warnings),
        priority: coerce_enum(row, "priority", "priority", warnings),
        blocking: row.get("blocking").map(coerce_bool).unwrap_or(false),
        follow_up_days,
        notes: coerce_text(row.get("notes")),
    }
}

fn budget_item_row(row: &MappedRow) -> BudgetItemRow {
    BudgetItemRow {
        row: row.row,
        project: row.get("project").unwrap_or_default().to_string(),
        area: row.get("area").unwrap_or_default().to_string(),
        item: row.get("item").unwrap_or_default().to_string(),
        budgeted: row.get("budgeted").and_then(coerce_money),
        actual: row.get("actual").and_then(coerce_money),
    }
}

fn vendor_row(row: &MappedRow, warnings: &mut Vec<RowError>) -> VendorRow {
    let trades = row
        .get("trades")
        .map(|raw| {
            raw.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    VendorRow {
        row: row.row,
        company: row.get("company").unwrap_or_default().to_string(),
        contact_name: coerce_text(row.get("contact_name")),
        contact_email: row.get("contact_email").and_then(coerce_email),
        contact_phone: coerce_text(row.get("contact_phone")),
        rating: coerce_enum(row, "rating", "rating", warnings),
        trades,
    }
}
