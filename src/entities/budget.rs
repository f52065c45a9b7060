//! Budget area and line item entity types
//!
//! Two-level hierarchy under a project: areas group line items. Variance
//! and variance-percent are always computed at read time from the
//! budgeted/actual pair; no record stores a denormalized variance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// A budget area under a project (e.g. Kitchen, Exterior)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetArea {
    /// Unique identifier
    pub id: EntityId,

    /// Owning project
    pub project: EntityId,

    /// Area name
    pub name: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this area)
    pub author: String,
}

impl Entity for BudgetArea {
    const PREFIX: &'static str = "AREA";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl BudgetArea {
    /// Create a new budget area under a project
    pub fn new(project: EntityId, name: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Area),
            project,
            name,
            created: Utc::now(),
            author,
        }
    }
}

/// A budget line item under an area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Unique identifier
    pub id: EntityId,

    /// Owning area
    pub area: EntityId,

    /// Owning project (denormalized for single-load reporting)
    pub project: EntityId,

    /// Line item name
    pub name: String,

    /// Budgeted amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted_amount: Option<f64>,

    /// Actual amount spent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_amount: Option<f64>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this item)
    pub author: String,
}

impl Entity for BudgetItem {
    const PREFIX: &'static str = "ITEM";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl BudgetItem {
    /// Create a new line item
    pub fn new(area: EntityId, project: EntityId, name: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Item),
            area,
            project,
            name,
            budgeted_amount: None,
            actual_amount: None,
            created: Utc::now(),
            author,
        }
    }

    /// Actual minus budgeted; positive means over budget. Null-safe.
    pub fn variance(&self) -> Option<f64> {
        match (self.budgeted_amount, self.actual_amount) {
            (Some(budgeted), Some(actual)) => Some(actual - budgeted),
            _ => None,
        }
    }
}

/// Variance of an (budgeted, actual) pair; positive means over budget
pub fn variance(budgeted: f64, actual: f64) -> f64 {
    actual - budgeted
}

/// Variance as a percentage of budget; None when budgeted is zero
pub fn variance_percent(budgeted: f64, actual: f64) -> Option<f64> {
    if budgeted == 0.0 {
        None
    } else {
        Some((actual - budgeted) / budgeted * 100.0)
    }
}
