//! Quote entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, QuoteStatus};
use crate::core::identity::{EntityId, EntityPrefix};

/// A vendor quote for work on a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier
    pub id: EntityId,

    /// Owning project
    pub project: EntityId,

    /// Short title (e.g. "Kitchen electrical rough-in")
    pub title: String,

    /// Trade category, if classified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade: Option<EntityId>,

    /// Quoting vendor, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<EntityId>,

    /// Quoted amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Budgeted amount this quote is measured against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_amount: Option<f64>,

    /// Contract progression status
    #[serde(default)]
    pub status: QuoteStatus,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this quote)
    pub author: String,
}

impl Entity for Quote {
    const PREFIX: &'static str = "QUOT";

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

impl Quote {
    /// Create a new pending quote on a project
    pub fn new(project: EntityId, title: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Quot),
            project,
            title,
            trade: None,
            vendor: None,
            amount: None,
            budget_amount: None,
            status: QuoteStatus::Pending,
            notes: None,
            created: Utc::now(),
            author,
        }
    }

    /// Variance of the quoted amount over budget (null-safe).
    /// Positive means over budget.
    pub fn variance(&self) -> Option<f64> {
        match (self.amount, self.budget_amount) {
            (Some(amount), Some(budget)) => Some(amount - budget),
            _ => None,
        }
    }

    /// Field-by-field diff against an older version, for the change log.
    /// Returns (field, old value, new value) triples for changed fields.
    pub fn diff(old: &Quote, new: &Quote) -> Vec<(String, String, String)> {
        fn opt_f64(v: Option<f64>) -> String {
            v.map(|x| format!("{:.2}", x)).unwrap_or_default()
        }
        fn opt_id(v: &Option<EntityId>) -> String {
            v.as_ref().map(|id| id.to_string()).unwrap_or_default()
        }
        fn opt_str(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }

        let mut changes = Vec::new();
        let mut push = |field: &str, old: String, new: String| {
            if old != new {
                changes.push((field.to_string(), old, new));
            }
        };

        push("title", old.title.clone(), new.title.clone());
        push("trade", opt_id(&old.trade), opt_id(&new.trade));
        push("vendor", opt_id(&old.vendor), opt_id(&new.vendor));
        push("amount", opt_f64(old.amount), opt_f64(new.amount));
        push(
            "budget_amount",
            opt_f64(old.budget_amount),
            opt_f64(new.budget_amount),
        );
        push("status", old.status.to_string(), new.status.to_string());
        push("notes", opt_str(&old.notes), opt_str(&new.notes));
        changes
    }
}
