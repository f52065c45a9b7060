//! Task / RFI entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Priority, TaskStatus};
use crate::core::identity::{EntityId, EntityPrefix};

/// A task or RFI tied to exactly one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: EntityId,

    /// Owning project
    pub project: EntityId,

    /// Short title
    pub title: String,

    /// Who the task is currently waiting on
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (P1 most urgent)
    #[serde(default)]
    pub priority: Priority,

    /// Whether this task blocks progress on the project
    #[serde(default)]
    pub blocking: bool,

    /// Follow-up cadence in days; a task is overdue when this many days
    /// have elapsed since last contact (or creation if never contacted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_days: Option<u32>,

    /// When we last chased this task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<DateTime<Utc>>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this task)
    pub author: String,
}

impl Entity for Task {
    const PREFIX: &'static str = "TASK";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Task {
    /// Create a new open task on a project
    pub fn new(project: EntityId, title: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Task),
            project,
            title,
            status: TaskStatus::Open,
            priority: Priority::default(),
            blocking: false,
            follow_up_days: None,
            last_contact: None,
            notes: None,
            created: Utc::now(),
            author,
        }
    }

    /// Whether the follow-up cadence has elapsed as of `now`.
    ///
    /// Resolved tasks are never overdue. Tasks without a cadence are
    /// never overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        if !self.status.is_open() {
            return false;
        }
        let Some(days) = self.follow_up_days else {
            return false;
        };
        let since = self.last_contact.unwrap_or(self.created);
        now.signed_duration_since(since) > chrono::Duration::days(days as i64)
    }

    /// Days since creation or last contact, whichever is later
    pub fn days_waiting(&self, now: DateTime<Utc>) -> i64 {
        let since = self.last_contact.unwrap_or(self.created);
        now.signed_duration_since(since).num_days().max(0)
    }
}
