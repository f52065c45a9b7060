//! Budget detail rows
//!
//! Flattens line items into a display order interleaved with area
//! subtotal rows and a project total row. Subtotals are running sums
//! reset per area and per project; nothing is read from stored
//! aggregates.

use super::ReportData;

/// One row of the budget detail view
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetDetailRow {
    /// A single line item
    Item {
        project: String,
        area: String,
        name: String,
        budgeted: Option<f64>,
        actual: Option<f64>,
        variance: Option<f64>,
    },
    /// Subtotal across one area's items
    AreaSubtotal {
        project: String,
        area: String,
        budgeted: f64,
        actual: f64,
        variance: f64,
    },
    /// Total across one project's items
    ProjectTotal {
        project: String,
        budgeted: f64,
        actual: f64,
        variance: f64,
    },
}

/// Derive the flattened budget detail rows, projects and areas sorted
/// by name, items in creation order within an area.
pub fn budget_detail(data: &ReportData) -> Vec<BudgetDetailRow> {
    let mut rows = Vec::new();

    let mut projects: Vec<_> = data.projects.iter().collect();
    projects.sort_by(|a, b| a.name.cmp(&b.name));

    for project in projects {
        let mut project_budgeted = 0.0;
        let mut project_actual = 0.0;
        let mut had_items = false;

        let mut areas: Vec<_> = data
            .areas
            .iter()
            .filter(|a| a.project == project.id)
            .collect();
        areas.sort_by(|a, b| a.name.cmp(&b.name));

        for area in areas {
            let mut area_budgeted = 0.0;
            let mut area_actual = 0.0;
            let mut area_rows = Vec::new();

            let mut items: Vec<_> = data.items.iter().filter(|i| i.area == area.id).collect();
            items.sort_by_key(|i| i.created);

            for item in items {
                area_budgeted += item.budgeted_amount.unwrap_or(0.0);
                area_actual += item.actual_amount.unwrap_or(0.0);
                area_rows.push(BudgetDetailRow::Item {
                    project: project.name.clone(),
                    area: area.name.clone(),
                    name: item.name.clone(),
                    budgeted: item.budgeted_amount,
                    actual: item.actual_amount,
                    variance: item.variance(),
                });
            }

            if area_rows.is_empty() {
                continue;
            }

            had_items = true;
            rows.extend(area_rows);
            rows.push(BudgetDetailRow::AreaSubtotal {
                project: project.name.clone(),
                area: area.name.clone(),
                budgeted: area_budgeted,
                actual: area_actual,
                variance: area_actual - area_budgeted,
            });

            project_budgeted += area_budgeted;
            project_actual += area_actual;
        }

        if had_items {
            rows.push(BudgetDetailRow::ProjectTotal {
                project: project.name.clone(),
                budgeted: project_budgeted,
                actual: project_actual,
                variance: project_actual - project_budgeted,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BudgetArea, BudgetItem, Project};

    fn item(area: &BudgetArea, name: &str, budgeted: f64, actual: Option<f64>) -> BudgetItem {
        let mut i = BudgetItem::new(
            area.id.clone(),
            area.project.clone(),
            name.to_string(),
            "test".to_string(),
        );
        i.budgeted_amount = Some(budgeted);
        i.actual_amount = actual;
        i
    }

    #[test]
    fn test_subtotals_reset_per_area() {
        let project = Project::new("Maple".to_string(), "test".to_string());
        let kitchen =
            BudgetArea::new(project.id.clone(), "Kitchen".to_string(), "test".to_string());
        let exterior =
            BudgetArea::new(project.id.clone(), "Exterior".to_string(), "test".to_string());

        let data = ReportData {
            projects: vec![project],
            items: vec![
                item(&kitchen, "Cabinets", 10_000.0, Some(11_000.0)),
                item(&kitchen, "Counters", 5_000.0, None),
                item(&exterior, "Siding", 20_000.0, Some(18_000.0)),
            ],
            areas: vec![kitchen, exterior],
            ..Default::default()
        };

        let rows = budget_detail(&data);
        // Exterior sorts before Kitchen: item, subtotal, item, item, subtotal, total
        assert_eq!(rows.len(), 6);

        let BudgetDetailRow::AreaSubtotal {
            area, budgeted, actual, ..
        } = &rows[1]
        else {
            panic!("expected area subtotal, got {:?}", rows[1]);
        };
        assert_eq!(area, "Exterior");
        assert_eq!(*budgeted, 20_000.0);
        assert_eq!(*actual, 18_000.0);

        let BudgetDetailRow::AreaSubtotal {
            area, budgeted, actual, ..
        } = &rows[4]
        else {
            panic!("expected area subtotal, got {:?}", rows[4]);
        };
        assert_eq!(area, "Kitchen");
        assert_eq!(*budgeted, 15_000.0);
        assert_eq!(*actual, 11_000.0);

        let BudgetDetailRow::ProjectTotal {
            budgeted, actual, variance, ..
        } = &rows[5]
        else {
            panic!("expected project total, got {:?}", rows[5]);
        };
        assert_eq!(*budgeted, 35_000.0);
        assert_eq!(*actual, 29_000.0);
        assert_eq!(*variance, -6_000.0);
    }

    #[test]
    fn test_projects_without_items_emit_no_rows() {
        let project = Project::new("Empty".to_string(), "test".to_string());
        let area = BudgetArea::new(project.id.clone(), "Kitchen".to_string(), "test".to_string());
        let data = ReportData {
            projects: vec![project],
            areas: vec![area],
            ..Default::default()
        };
        assert!(budget_detail(&data).is_empty());
    }
}
