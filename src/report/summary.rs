//! Executive summary per project

use chrono::{DateTime, Utc};

use crate::core::entity::{ProjectStatus, QuoteStatus};
use crate::entities::budget::variance_percent;

use super::ReportData;

/// Project health classification.
///
/// Precedence is strict: any blocking task makes a project Blocked, even
/// when the budget looks healthy; only then do overdue/variance signals
/// classify it At Risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    OnTrack,
    AtRisk,
    Blocked,
}

impl Health {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Health::OnTrack => "On Track",
            Health::AtRisk => "At Risk",
            Health::Blocked => "Blocked",
        }
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One derived summary row per project
#[derive(Debug, Clone)]
pub struct ExecutiveSummaryRow {
    pub project_name: String,
    pub status: ProjectStatus,
    pub budgeted: f64,
    pub actual: f64,
    pub variance: f64,
    /// None when nothing is budgeted
    pub variance_percent: Option<f64>,
    pub open_tasks: usize,
    pub overdue_tasks: usize,
    pub blocking_tasks: usize,
    pub decisions_needed: usize,
    pub health: Health,
}

/// Derive the executive summary, one row per non-archived project,
/// sorted by project name.
pub fn executive_summary(data: &ReportData, now: DateTime<Utc>) -> Vec<ExecutiveSummaryRow> {
    let mut rows: Vec<ExecutiveSummaryRow> = data
        .projects
        .iter()
        .filter(|p| p.status != ProjectStatus::Archived)
        .map(|project| {
            let budgeted: f64 = data
                .items
                .iter()
                .filter(|i| i.project == project.id)
                .filter_map(|i| i.budgeted_amount)
                .sum();
            let actual: f64 = data
                .items
                .iter()
                .filter(|i| i.project == project.id)
                .filter_map(|i| i.actual_amount)
                .sum();
            let variance = actual - budgeted;
            let variance_pct = variance_percent(budgeted, actual);

            let project_tasks: Vec<_> = data
                .tasks
                .iter()
                .filter(|t| t.project == project.id)
                .collect();
            let open_tasks = project_tasks.iter().filter(|t| t.status.is_open()).count();
            let overdue_tasks = project_tasks.iter().filter(|t| t.is_overdue(now)).count();
            let blocking_tasks = project_tasks
                .iter()
                .filter(|t| t.blocking && t.status.is_open())
                .count();

            let decisions_needed = data
                .quotes
                .iter()
                .filter(|q| q.project == project.id)
                .filter(|q| {
                    q.status == QuoteStatus::Quoted || q.variance().is_some_and(|v| v > 0.0)
                })
                .count();

            let health = classify_health(blocking_tasks, overdue_tasks, variance_pct);

            ExecutiveSummaryRow {
                project_name: project.name.clone(),
                status: project.status,
                budgeted,
                actual,
                variance,
                variance_percent: variance_pct,
                open_tasks,
                overdue_tasks,
                blocking_tasks,
                decisions_needed,
                health,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.project_name.cmp(&b.project_name));
    rows
}

/// Classify health: Blocked > At Risk > On Track, in that order
fn classify_health(
    blocking_tasks: usize,
    overdue_tasks: usize,
    variance_pct: Option<f64>,
) -> Health {
    if blocking_tasks > 0 {
        Health::Blocked
    } else if overdue_tasks > 2 || variance_pct.is_some_and(|v| v > 10.0) {
        Health::AtRisk
    } else {
        Health::OnTrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BudgetArea, BudgetItem, Project, Task};

    fn data_with_budget(budgeted: f64, actual: f64) -> ReportData {
        let project = Project::new("Maple".to_string(), "test".to_string());
        let area = BudgetArea::new(project.id.clone(), "Kitchen".to_string(), "test".to_string());
        let mut item = BudgetItem::new(
            area.id.clone(),
            project.id.clone(),
            "Cabinets".to_string(),
            "test".to_string(),
        );
        item.budgeted_amount = Some(budgeted);
        item.actual_amount = Some(actual);

        ReportData {
            projects: vec![project],
            areas: vec![area],
            items: vec![item],
            ..Default::default()
        }
    }

    #[test]
    fn test_variance_scenario_at_risk() {
        // budgeted=100000, actual=120000 => variance=20000, 20%, At Risk
        let data = data_with_budget(100_000.0, 120_000.0);
        let rows = executive_summary(&data, Utc::now());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].variance, 20_000.0);
        assert_eq!(rows[0].variance_percent, Some(20.0));
        assert_eq!(rows[0].health, Health::AtRisk);
        assert_eq!(rows[0].health.label(), "At Risk");
    }

    #[test]
    fn test_blocking_task_overrides_budget_health() {
        let mut data = data_with_budget(100_000.0, 120_000.0);
        let project_id = data.projects[0].id.clone();
        let mut task = Task::new(project_id, "Waiting on permit".to_string(), "test".to_string());
        task.blocking = true;
        data.tasks.push(task);

        let rows = executive_summary(&data, Utc::now());
        assert_eq!(rows[0].health, Health::Blocked);
    }

    #[test]
    fn test_healthy_project_on_track() {
        let data = data_with_budget(100_000.0, 90_000.0);
        let rows = executive_summary(&data, Utc::now());
        assert_eq!(rows[0].health, Health::OnTrack);
        assert_eq!(rows[0].variance_percent, Some(-10.0));
    }

    #[test]
    fn test_zero_budget_has_no_variance_percent() {
        let data = data_with_budget(0.0, 500.0);
        let rows = executive_summary(&data, Utc::now());
        assert_eq!(rows[0].variance_percent, None);
        // variance% unknown, no overdue, no blockers: stays On Track
        assert_eq!(rows[0].health, Health::OnTrack);
    }

    #[test]
    fn test_overdue_threshold() {
        assert_eq!(classify_health(0, 2, None), Health::OnTrack);
        assert_eq!(classify_health(0, 3, None), Health::AtRisk);
        assert_eq!(classify_health(0, 0, Some(10.0)), Health::OnTrack);
        assert_eq!(classify_health(0, 0, Some(10.1)), Health::AtRisk);
        assert_eq!(classify_health(1, 0, Some(0.0)), Health::Blocked);
    }

    #[test]
    fn test_archived_projects_excluded() {
        let mut data = data_with_budget(100.0, 100.0);
        data.projects[0].status = ProjectStatus::Archived;
        assert!(executive_summary(&data, Utc::now()).is_empty());
    }

    #[test]
    fn test_decisions_needed_counts_quoted_and_over_budget() {
        use crate::core::entity::QuoteStatus;
        use crate::entities::Quote;

        let mut data = data_with_budget(1_000.0, 900.0);
        let project_id = data.projects[0].id.clone();

        let mut quoted = Quote::new(project_id.clone(), "Electrical".to_string(), "t".to_string());
        quoted.status = QuoteStatus::Quoted;

        let mut over = Quote::new(project_id.clone(), "Plumbing".to_string(), "t".to_string());
        over.amount = Some(5_000.0);
        over.budget_amount = Some(4_000.0);
        over.status = QuoteStatus::Approved;

        let mut fine = Quote::new(project_id, "Paint".to_string(), "t".to_string());
        fine.amount = Some(1_000.0);
        fine.budget_amount = Some(2_000.0);

        data.quotes = vec![quoted, over, fine];
        let rows = executive_summary(&data, Utc::now());
        assert_eq!(rows[0].decisions_needed, 2);
    }
}
