//! Decisions-needed view
//!
//! Merges three independent sources into one list: quotes awaiting
//! approval, quotes over budget, and blocking tasks. Each item carries
//! a days-waiting figure from its creation or last-contact timestamp,
//! and the list is sorted descending by days waiting so the longest
//! stall is always on top.

use chrono::{DateTime, Utc};

use crate::core::entity::QuoteStatus;

use super::ReportData;

/// Why an item needs a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    QuoteAwaitingApproval,
    QuoteOverBudget,
    BlockingTask,
}

impl DecisionKind {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            DecisionKind::QuoteAwaitingApproval => "Quote awaiting approval",
            DecisionKind::QuoteOverBudget => "Quote over budget",
            DecisionKind::BlockingTask => "Blocking task",
        }
    }
}

/// One item awaiting a decision
#[derive(Debug, Clone)]
pub struct DecisionRow {
    pub kind: DecisionKind,
    pub project_name: String,
    pub title: String,
    pub days_waiting: i64,
    /// Quoted amount or over-budget variance, when relevant
    pub amount: Option<f64>,
}

/// Derive the decisions-needed list, sorted descending by days waiting
pub fn decisions_needed(data: &ReportData, now: DateTime<Utc>) -> Vec<DecisionRow> {
    let projects = data.project_by_id();
    let project_name = |id: &crate::core::identity::EntityId| {
        projects
            .get(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let mut rows = Vec::new();

    for quote in data.quotes.iter().filter(|q| q.status == QuoteStatus::Quoted) {
        rows.push(DecisionRow {
            kind: DecisionKind::QuoteAwaitingApproval,
            project_name: project_name(&quote.project),
            title: quote.title.clone(),
            days_waiting: now.signed_duration_since(quote.created).num_days().max(0),
            amount: quote.amount,
        });
    }

    for quote in data.quotes.iter() {
        if let Some(variance) = quote.variance() {
            if variance > 0.0 {
                rows.push(DecisionRow {
                    kind: DecisionKind::QuoteOverBudget,
                    project_name: project_name(&quote.project),
                    title: quote.title.clone(),
                    days_waiting: now.signed_duration_since(quote.created).num_days().max(0),
                    amount: Some(variance),
                });
            }
        }
    }

    for task in data
        .tasks
        .iter()
        .filter(|t| t.blocking && t.status.is_open())
    {
        rows.push(DecisionRow {
            kind: DecisionKind::BlockingTask,
            project_name: project_name(&task.project),
            title: task.title.clone(),
            days_waiting: task.days_waiting(now),
            amount: None,
        });
    }

    rows.sort_by(|a, b| b.days_waiting.cmp(&a.days_waiting));
    rows
}
