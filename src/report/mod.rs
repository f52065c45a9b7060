//! Report aggregation and export
//!
//! All derivations are pure functions over [`ReportData`], which is
//! loaded once up front. Nothing is cached or stored; every view is
//! re-derivable at any time from the source collections.

pub mod activity;
pub mod budget;
pub mod decisions;
pub mod quotes;
pub mod summary;
pub mod workbook;

pub use activity::{recent_activity, ActivityRow, RECENT_ACTIVITY_DAYS};
pub use budget::{budget_detail, BudgetDetailRow};
pub use decisions::{decisions_needed, DecisionKind, DecisionRow};
pub use quotes::{quote_comparison, QuoteComparisonRow};
pub use summary::{executive_summary, ExecutiveSummaryRow, Health};

use std::collections::HashMap;
use thiserror::Error;

use crate::core::changelog::{ChangeEntry, ChangeLog, ChangeLogError};
use crate::core::identity::EntityId;
use crate::core::store::{Store, StoreError};
use crate::core::Workspace;
use crate::entities::{BudgetArea, BudgetItem, Project, Quote, Task, Trade, Vendor};

/// The source collections every report derives from
#[derive(Debug, Default)]
pub struct ReportData {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub quotes: Vec<Quote>,
    pub vendors: Vec<Vendor>,
    pub trades: Vec<Trade>,
    pub areas: Vec<BudgetArea>,
    pub items: Vec<BudgetItem>,
    pub changes: Vec<ChangeEntry>,
}

impl ReportData {
    /// Load all collections from a workspace
    pub fn load(workspace: &Workspace) -> Result<Self, ReportError> {
        let store = Store::new(workspace);
        let log = ChangeLog::new(workspace);

        Ok(Self {
            projects: store.load_all()?,
            tasks: store.load_all()?,
            quotes: store.load_all()?,
            vendors: store.load_all()?,
            trades: store.load_all()?,
            areas: store.load_all()?,
            items: store.load_all()?,
            changes: log.load_all()?,
        })
    }

    /// Project lookup by id
    pub fn project_by_id(&self) -> HashMap<&EntityId, &Project> {
        self.projects.iter().map(|p| (&p.id, p)).collect()
    }

    /// Vendor lookup by id
    pub fn vendor_by_id(&self) -> HashMap<&EntityId, &Vendor> {
        self.vendors.iter().map(|v| (&v.id, v)).collect()
    }

    /// Trade lookup by id
    pub fn trade_by_id(&self) -> HashMap<&EntityId, &Trade> {
        self.trades.iter().map(|t| (&t.id, t)).collect()
    }
}

/// Errors that can occur assembling or exporting reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    ChangeLog(#[from] ChangeLogError),

    #[error("failed to write workbook: {0}")]
    Workbook(String),
}
