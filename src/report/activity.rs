//! Recent activity view
//!
//! Change-log entries (quote edits and task status transitions alike)
//! from the last two weeks, resolved to human labels via the static
//! lookup tables in the change log module, newest first.

use chrono::{DateTime, Duration, Utc};

use super::ReportData;

/// Window for the recent activity view, in days
pub const RECENT_ACTIVITY_DAYS: i64 = 14;

/// One rendered activity line
#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub at: DateTime<Utc>,
    /// Record type label ("Quote", "Task", ...)
    pub record_label: &'static str,
    /// Field label from the static lookup table
    pub field_label: &'static str,
    pub old: String,
    pub new: String,
    pub author: String,
}

/// Derive recent activity rows, sorted descending by timestamp
pub fn recent_activity(data: &ReportData, now: DateTime<Utc>) -> Vec<ActivityRow> {
    let cutoff = now - Duration::days(RECENT_ACTIVITY_DAYS);

    let mut rows: Vec<ActivityRow> = data
        .changes
        .iter()
        .filter(|entry| entry.at >= cutoff)
        .map(|entry| ActivityRow {
            at: entry.at,
            record_label: entry.record_type.label(),
            field_label: entry.field_label(),
            old: entry.old.clone(),
            new: entry.new.clone(),
            author: entry.author.clone(),
        })
        .collect();

    rows.sort_by(|a, b| b.at.cmp(&a.at));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::changelog::{ChangeEntry, RecordType};
    use crate::core::identity::{EntityId, EntityPrefix};

    fn entry(record_type: RecordType, field: &str, days_ago: i64) -> ChangeEntry {
        let mut e = ChangeEntry::new(
            record_type,
            EntityId::new(EntityPrefix::Quot),
            field,
            "old",
            "new",
            "test",
        );
        e.at = Utc::now() - Duration::days(days_ago);
        e
    }

    #[test]
    fn test_merges_sources_within_window_sorted_desc() {
        let data = ReportData {
            changes: vec![
                entry(RecordType::Quote, "amount", 10),
                entry(RecordType::Task, "status", 1),
                entry(RecordType::Quote, "status", 20), // outside window
                entry(RecordType::Task, "status", 5),
            ],
            ..Default::default()
        };

        let rows = recent_activity(&data, Utc::now());
        assert_eq!(rows.len(), 3);
        assert!(rows[0].at >= rows[1].at && rows[1].at >= rows[2].at);
        assert_eq!(rows[0].field_label, "Task status");
        assert_eq!(rows[2].field_label, "Quoted amount");
    }
}
