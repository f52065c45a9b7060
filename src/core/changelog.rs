//! Append-only change log
//!
//! Every field-level edit (quote diffs, task status transitions) is
//! appended as one JSON line to `logs/changelog.jsonl`. Entries are
//! immutable; nothing in the toolkit rewrites or deletes them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use thiserror::Error;

use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::workspace::Workspace;

/// Record types that appear in the change log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Project,
    Task,
    Quote,
    Vendor,
    BudgetItem,
}

impl RecordType {
    /// Human label for report output
    pub fn label(&self) -> &'static str {
        match self {
            RecordType::Project => "Project",
            RecordType::Task => "Task",
            RecordType::Quote => "Quote",
            RecordType::Vendor => "Vendor",
            RecordType::BudgetItem => "Budget Item",
        }
    }
}

/// One immutable field-level change record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEntry {
    /// Unique identifier
    pub id: EntityId,

    /// Type of the record that changed
    pub record_type: RecordType,

    /// ID of the record that changed
    pub record_id: EntityId,

    /// Field that changed
    pub field: String,

    /// Previous value (empty for unset)
    pub old: String,

    /// New value
    pub new: String,

    /// Who made the change
    pub author: String,

    /// When the change was made
    pub at: DateTime<Utc>,
}

impl ChangeEntry {
    /// Create a new change entry stamped now
    pub fn new(
        record_type: RecordType,
        record_id: EntityId,
        field: impl Into<String>,
        old: impl Into<String>,
        new: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Chg),
            record_type,
            record_id,
            field: field.into(),
            old: old.into(),
            new: new.into(),
            author: author.into(),
            at: Utc::now(),
        }
    }

    /// Human label for this entry's field, via the static lookup table
    pub fn field_label(&self) -> &'static str {
        field_label(self.record_type, &self.field)
    }
}

/// Resolve a record type + field name to a human label.
///
/// Unknown fields fall back to a generic label rather than erroring, so
/// log rendering never fails on a field added later.
pub fn field_label(record_type: RecordType, field: &str) -> &'static str {
    match (record_type, field) {
        (RecordType::Task, "status") => "Task status",
        (RecordType::Task, "priority") => "Task priority",
        (RecordType::Task, "blocking") => "Blocking flag",
        (RecordType::Quote, "status") => "Quote status",
        (RecordType::Quote, "amount") => "Quoted amount",
        (RecordType::Quote, "budget_amount") => "Budget amount",
        (RecordType::Quote, "vendor") => "Vendor",
        (RecordType::Quote, "trade") => "Trade",
        (RecordType::Quote, "title") => "Quote title",
        (RecordType::Quote, "notes") => "Quote notes",
        (RecordType::Project, "status") => "Project status",
        (RecordType::Project, "total_budget") => "Project budget",
        (RecordType::Vendor, "rating") => "Vendor rating",
        (RecordType::BudgetItem, "budgeted_amount") => "Budgeted amount",
        (RecordType::BudgetItem, "actual_amount") => "Actual amount",
        _ => "Field",
    }
}

/// The append-only change log for a workspace
pub struct ChangeLog<'a> {
    workspace: &'a Workspace,
}

impl<'a> ChangeLog<'a> {
    /// Open the change log for a workspace
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Append one entry as a JSON line
    pub fn append(&self, entry: &ChangeEntry) -> Result<(), ChangeLogError> {
        let path = self.workspace.changelog_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ChangeLogError::Io(e.to_string()))?;
        }

        let line =
            serde_json::to_string(entry).map_err(|e| ChangeLogError::Serialize(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ChangeLogError::Io(e.to_string()))?;
        writeln!(file, "{}", line).map_err(|e| ChangeLogError::Io(e.to_string()))?;
        Ok(())
    }

    /// Append one entry per changed field
    pub fn append_all(
        &self,
        record_type: RecordType,
        record_id: &EntityId,
        changes: &[(String, String, String)],
        author: &str,
    ) -> Result<(), ChangeLogError> {
        for (field, old, new) in changes {
            self.append(&ChangeEntry::new(
                record_type,
                record_id.clone(),
                field.clone(),
                old.clone(),
                new.clone(),
                author,
            ))?;
        }
        Ok(())
    }

    /// Load all entries. Lines that fail to parse are skipped.
    pub fn load_all(&self) -> Result<Vec<ChangeEntry>, ChangeLogError> {
        let path = self.workspace.changelog_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| ChangeLogError::Io(e.to_string()))?;
        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .filter_map(|l| serde_json::from_str(l).ok())
            .collect())
    }

    /// Load entries from the last `days` days, newest first
    pub fn recent(&self, days: i64) -> Result<Vec<ChangeEntry>, ChangeLogError> {
        let cutoff = Utc::now() - Duration::days(days);
        let mut entries: Vec<ChangeEntry> = self
            .load_all()?
            .into_iter()
            .filter(|e| e.at >= cutoff)
            .collect();
        entries.sort_by(|a, b| b.at.cmp(&a.at));
        Ok(entries)
    }
}

/// Errors that can occur reading or writing the change log
#[derive(Debug, Error)]
pub enum ChangeLogError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("failed to serialize change entry: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(field: &str) -> ChangeEntry {
        ChangeEntry::new(
            RecordType::Quote,
            EntityId::new(EntityPrefix::Quot),
            field,
            "pending",
            "quoted",
            "test",
        )
    }

    #[test]
    fn test_append_and_load() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let log = ChangeLog::new(&ws);

        log.append(&entry("status")).unwrap();
        log.append(&entry("amount")).unwrap();

        let entries = log.load_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].field, "status");
    }

    #[test]
    fn test_recent_sorts_newest_first() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let log = ChangeLog::new(&ws);

        let mut old = entry("status");
        old.at = Utc::now() - Duration::days(30);
        log.append(&old).unwrap();

        let recent = entry("amount");
        log.append(&recent).unwrap();

        let entries = log.recent(14).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field, "amount");
    }

    #[test]
    fn test_field_label_lookup() {
        assert_eq!(field_label(RecordType::Task, "status"), "Task status");
        assert_eq!(field_label(RecordType::Quote, "amount"), "Quoted amount");
        assert_eq!(field_label(RecordType::Quote, "unmapped"), "Field");
    }
}
