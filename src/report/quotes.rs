//! Quote comparison rows

use crate::core::entity::QuoteStatus;

use super::ReportData;

/// One row per quote, with derived variance and approval flag
#[derive(Debug, Clone)]
pub struct QuoteComparisonRow {
    pub project_name: String,
    pub title: String,
    pub vendor_name: Option<String>,
    pub trade_name: Option<String>,
    pub amount: Option<f64>,
    pub budget_amount: Option<f64>,
    /// quoted − budget; None when either side is unset
    pub variance: Option<f64>,
    pub status: QuoteStatus,
    /// Membership in the late-stage status set
    pub approved: bool,
}

/// Derive one comparison row per quote, sorted by project then title
pub fn quote_comparison(data: &ReportData) -> Vec<QuoteComparisonRow> {
    let projects = data.project_by_id();
    let vendors = data.vendor_by_id();
    let trades = data.trade_by_id();

    let mut rows: Vec<QuoteComparisonRow> = data
        .quotes
        .iter()
        .map(|quote| QuoteComparisonRow {
            project_name: projects
                .get(&quote.project)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| quote.project.to_string()),
            title: quote.title.clone(),
            vendor_name: quote
                .vendor
                .as_ref()
                .and_then(|id| vendors.get(id))
                .map(|v| v.company.clone()),
            trade_name: quote
                .trade
                .as_ref()
                .and_then(|id| trades.get(id))
                .map(|t| t.name.clone()),
            amount: quote.amount,
            budget_amount: quote.budget_amount,
            variance: quote.variance(),
            status: quote.status,
            approved: quote.status.is_approved(),
        })
        .collect();

    rows.sort_by(|a, b| {
        a.project_name
            .cmp(&b.project_name)
            .then(a.title.cmp(&b.title))
    });
    rows
}
