//! Batch importer
//!
//! Writes previously validated rows into the store, one row at a time.
//! Rows are processed strictly sequentially so progress reporting stays
//! monotonic and a partial failure never aborts the rest: lookup misses
//! and write failures are counted per row and collected with the
//! original row number. There is no rollback; a partially imported
//! batch is accepted as-is.

use std::collections::HashMap;

use crate::core::identity::EntityId;
use crate::core::store::{Store, StoreError};
use crate::entities::{BudgetArea, BudgetItem, Project, Task, Trade, Vendor};

use super::validate::{
    BudgetItemRow, ImportRow, ProjectRow, RowError, TaskRow, VendorRow,
};

/// Final result of a batch import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Rows written successfully
    pub success: usize,
    /// Rows that failed (lookup miss or write error)
    pub failed: usize,
    /// One entry per row failure, with the original row number
    pub errors: Vec<RowError>,
}

/// Imports validated rows into a workspace store
pub struct BatchImporter<'a> {
    store: &'a Store<'a>,
    author: String,
    dry_run: bool,
}

impl<'a> BatchImporter<'a> {
    /// Create an importer writing as the given author
    pub fn new(store: &'a Store<'a>, author: impl Into<String>) -> Self {
        Self {
            store,
            author: author.into(),
            dry_run: false,
        }
    }

    /// Validate resolution and report without writing anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Import rows sequentially, reporting progress as a rounded
    /// percentage after each row.
    pub fn run(
        &self,
        rows: &[ImportRow],
        progress: &mut dyn FnMut(u8),
    ) -> Result<ImportOutcome, StoreError> {
        let mut outcome = ImportOutcome::default();
        let total = rows.len();
        if total == 0 {
            return Ok(outcome);
        }

        // Parent lookups are built once up front; per-row resolution is
        // then a map hit. Same-run creations go through the caches so
        // duplicate names within one batch collide onto one record.
        let mut lookups = Lookups::build(self.store, rows)?;

        for (processed, row) in rows.iter().enumerate() {
            match self.import_row(row, &mut lookups) {
                Ok(()) => outcome.success += 1,
                Err(err) => {
                    outcome.failed += 1;
                    outcome.errors.push(err);
                }
            }

            let pct = (((processed + 1) as f64 / total as f64) * 100.0).round() as u8;
            progress(pct);
        }

        Ok(outcome)
    }

    fn import_row(&self, row: &ImportRow, lookups: &mut Lookups) -> Result<(), RowError> {
        match row {
            ImportRow::Project(r) => self.import_project(r),
            ImportRow::Task(r) => self.import_task(r, lookups),
            ImportRow::BudgetItem(r) => self.import_budget_item(r, lookups),
            ImportRow::Vendor(r) => self.import_vendor(r, lookups),
        }
    }

    fn import_project(&self, row: &ProjectRow) -> Result<(), RowError> {
        let mut project = Project::new(row.name.clone(), self.author.clone());
        project.client.name = row.client_name.clone().unwrap_or_default();
        project.client.email = row.client_email.clone();
        project.client.phone = row.client_phone.clone();
        project.address = row.address.clone();
        project.status = row.status;
        project.total_budget = row.total_budget;

        self.write(&project, row.row)
    }

    fn import_task(&self, row: &TaskRow, lookups: &mut Lookups) -> Result<(), RowError> {
        let project_id = lookups.resolve_project(&row.project, row.row)?;

        let mut task = Task::new(project_id, row.title.clone(), self.author.clone());
        task.status = row.status;
        task.priority = row.priority;
        task.blocking = row.blocking;
        task.follow_up_days = row.follow_up_days;
        task.notes = row.notes.clone();

        self.write(&task, row.row)
    }

    fn import_budget_item(
        &self,
        row: &BudgetItemRow,
        lookups: &mut Lookups,
    ) -> Result<(), RowError> {
        let project_id = lookups.resolve_project(&row.project, row.row)?;
        let area_id = self.resolve_or_create_area(&project_id, &row.area, row.row, lookups)?;

        let mut item = BudgetItem::new(
            area_id,
            project_id,
            row.item.clone(),
            self.author.clone(),
        );
        item.budgeted_amount = row.budgeted;
        item.actual_amount = row.actual;

        self.write(&item, row.row)
    }

    fn import_vendor(&self, row: &VendorRow, lookups: &mut Lookups) -> Result<(), RowError> {
        let mut vendor = Vendor::new(row.company.clone(), self.author.clone());
        vendor.contact_name = row.contact_name.clone();
        vendor.contact_email = row.contact_email.clone();
        vendor.contact_phone = row.contact_phone.clone();
        vendor.rating = row.rating;

        for trade_name in &row.trades {
            let trade_id = self.resolve_or_create_trade(trade_name, row.row, lookups)?;
            if !vendor.trades.contains(&trade_id) {
                vendor.trades.push(trade_id);
            }
        }

        self.write(&vendor, row.row)
    }

    /// Find an area under the project, creating it on the fly if absent.
    /// Duplicate area names within one run collide onto the same new
    /// record via the `projectId:areaNameLower` cache key.
    fn resolve_or_create_area(
        &self,
        project_id: &EntityId,
        area_name: &str,
        row: usize,
        lookups: &mut Lookups,
    ) -> Result<EntityId, RowError> {
        let key = format!("{}:{}", project_id, area_name.to_lowercase());
        if let Some(id) = lookups.areas.get(&key) {
            return Ok(id.clone());
        }

        let area = BudgetArea::new(
            project_id.clone(),
            area_name.to_string(),
            self.author.clone(),
        );
        let id = area.id.clone();
        self.write(&area, row)?;
        lookups.areas.insert(key, id.clone());
        Ok(id)
    }

    /// Find a trade by name (case-insensitive), creating it if absent
    fn resolve_or_create_trade(
        &self,
        trade_name: &str,
        row: usize,
        lookups: &mut Lookups,
    ) -> Result<EntityId, RowError> {
        let key = trade_name.to_lowercase();
        if let Some(id) = lookups.trades.get(&key) {
            return Ok(id.clone());
        }

        let trade = Trade::new(trade_name.to_string(), self.author.clone());
        let id = trade.id.clone();
        self.write(&trade, row)?;
        lookups.trades.insert(key, id.clone());
        Ok(id)
    }

    fn write<T: crate::core::Entity>(&self, entity: &T, row: usize) -> Result<(), RowError> {
        if self.dry_run {
            return Ok(());
        }
        self.store.save(entity).map(|_| ()).map_err(|e| RowError {
            row,
            field: "write".to_string(),
            message: e.to_string(),
        })
    }
}

/// Parent-reference lookups for one import run
struct Lookups {
    /// Lowercased project name → id
    projects: HashMap<String, EntityId>,
    /// `projectId:areaNameLower` → area id
    areas: HashMap<String, EntityId>,
    /// Lowercased trade name → id
    trades: HashMap<String, EntityId>,
}

impl Lookups {
    fn build(store: &Store, rows: &[ImportRow]) -> Result<Self, StoreError> {
        let needs_projects = rows
            .iter()
            .any(|r| matches!(r, ImportRow::Task(_) | ImportRow::BudgetItem(_)));
        let needs_areas = rows.iter().any(|r| matches!(r, ImportRow::BudgetItem(_)));
        let needs_trades = rows.iter().any(|r| matches!(r, ImportRow::Vendor(_)));

        let projects = if needs_projects {
            store.name_index::<Project>()?
        } else {
            HashMap::new()
        };

        let areas = if needs_areas {
            let mut map = HashMap::new();
            for area in store.load_all::<BudgetArea>()? {
                map.insert(
                    format!("{}:{}", area.project, area.name.to_lowercase()),
                    area.id,
                );
            }
            map
        } else {
            HashMap::new()
        };

        let trades = if needs_trades {
            store.name_index::<Trade>()?
        } else {
            HashMap::new()
        };

        Ok(Self {
            projects,
            areas,
            trades,
        })
    }

    fn resolve_project(&self, name: &str, row: usize) -> Result<EntityId, RowError> {
        self.projects
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| RowError {
                row,
                field: "project".to_string(),
                message: format!("Project not found: {}", name),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{Priority, Rating, TaskStatus};
    use crate::core::Workspace;
    use tempfile::tempdir;

    fn item_row(row: usize, project: &str, area: &str, item: &str) -> ImportRow {
        ImportRow::BudgetItem(BudgetItemRow {
            row,
            project: project.to_string(),
            area: area.to_string(),
            item: item.to_string(),
            budgeted: Some(1_000.0),
            actual: None,
        })
    }

    fn setup(tmp: &tempfile::TempDir) -> Workspace {
        Workspace::init(tmp.path()).unwrap()
    }

    #[test]
    fn test_missing_parent_fails_row_but_not_batch() {
        let tmp = tempdir().unwrap();
        let ws = setup(&tmp);
        let store = Store::new(&ws);
        store
            .save(&Project::new("Maple".to_string(), "test".to_string()))
            .unwrap();

        let rows = vec![
            item_row(1, "Maple", "Kitchen", "Cabinets"),
            item_row(2, "Nonesuch", "Kitchen", "Sink"),
            item_row(3, "Maple", "Kitchen", "Counters"),
        ];

        let importer = BatchImporter::new(&store, "test");
        let outcome = importer.run(&rows, &mut |_| {}).unwrap();

        assert_eq!(outcome.success, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].row, 2);
        assert!(outcome.errors[0].message.contains("Project not found: Nonesuch"));

        // Rows after the failure were still attempted
        let items: Vec<BudgetItem> = store.load_all().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_duplicate_area_names_collide_onto_one_area() {
        let tmp = tempdir().unwrap();
        let ws = setup(&tmp);
        let store = Store::new(&ws);
        store
            .save(&Project::new("Maple".to_string(), "test".to_string()))
            .unwrap();

        let rows = vec![
            item_row(1, "Maple", "Kitchen", "Cabinets"),
            item_row(2, "Maple", "KITCHEN", "Sink"),
            item_row(3, "Maple", "Exterior", "Siding"),
        ];

        let importer = BatchImporter::new(&store, "test");
        let outcome = importer.run(&rows, &mut |_| {}).unwrap();
        assert_eq!(outcome.success, 3);

        let areas: Vec<BudgetArea> = store.load_all().unwrap();
        assert_eq!(areas.len(), 2);

        let items: Vec<BudgetItem> = store.load_all().unwrap();
        let kitchen_area = areas
            .iter()
            .find(|a| a.name.to_lowercase() == "kitchen")
            .unwrap();
        let kitchen_items = items
            .iter()
            .filter(|i| i.area == kitchen_area.id)
            .count();
        assert_eq!(kitchen_items, 2);
    }

    #[test]
    fn test_existing_area_is_reused() {
        let tmp = tempdir().unwrap();
        let ws = setup(&tmp);
        let store = Store::new(&ws);
        let project = Project::new("Maple".to_string(), "test".to_string());
        store.save(&project).unwrap();
        let existing = BudgetArea::new(
            project.id.clone(),
            "Kitchen".to_string(),
            "test".to_string(),
        );
        store.save(&existing).unwrap();

        let importer = BatchImporter::new(&store, "test");
        importer
            .run(&[item_row(1, "Maple", "kitchen", "Cabinets")], &mut |_| {})
            .unwrap();

        let areas: Vec<BudgetArea> = store.load_all().unwrap();
        assert_eq!(areas.len(), 1);
        let items: Vec<BudgetItem> = store.load_all().unwrap();
        assert_eq!(items[0].area, existing.id);
    }

    #[test]
    fn test_vendor_trades_resolved_case_insensitively() {
        let tmp = tempdir().unwrap();
        let ws = setup(&tmp);
        let store = Store::new(&ws);
        store
            .save(&Trade::new("Electrical".to_string(), "test".to_string()))
            .unwrap();
        store
            .save(&Trade::new("Plumbing".to_string(), "test".to_string()))
            .unwrap();

        let rows = vec![ImportRow::Vendor(VendorRow {
            row: 1,
            company: "Acme".to_string(),
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            rating: Rating::Good,
            trades: vec!["electrical".to_string(), "PLUMBING".to_string()],
        })];

        let importer = BatchImporter::new(&store, "test");
        let outcome = importer.run(&rows, &mut |_| {}).unwrap();
        assert_eq!(outcome.success, 1);

        let vendors: Vec<Vendor> = store.load_all().unwrap();
        assert_eq!(vendors[0].trades.len(), 2);

        // No new trades were created; the catalog already had both
        let trades: Vec<Trade> = store.load_all().unwrap();
        assert_eq!(trades.len(), 2);
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let tmp = tempdir().unwrap();
        let ws = setup(&tmp);
        let store = Store::new(&ws);
        store
            .save(&Project::new("Maple".to_string(), "test".to_string()))
            .unwrap();

        let rows: Vec<ImportRow> = (1..=4)
            .map(|i| item_row(i, "Maple", "Kitchen", &format!("Item {}", i)))
            .collect();

        let mut reports = Vec::new();
        let importer = BatchImporter::new(&store, "test");
        importer.run(&rows, &mut |pct| reports.push(pct)).unwrap();

        assert_eq!(reports, vec![25, 50, 75, 100]);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = tempdir().unwrap();
        let ws = setup(&tmp);
        let store = Store::new(&ws);
        store
            .save(&Project::new("Maple".to_string(), "test".to_string()))
            .unwrap();

        let importer = BatchImporter::new(&store, "test").dry_run(true);
        let outcome = importer
            .run(&[item_row(1, "Maple", "Kitchen", "Cabinets")], &mut |_| {})
            .unwrap();
        assert_eq!(outcome.success, 1);

        let items: Vec<BudgetItem> = store.load_all().unwrap();
        assert!(items.is_empty());
        let areas: Vec<BudgetArea> = store.load_all().unwrap();
        assert!(areas.is_empty());
    }

    #[test]
    fn test_task_import_resolves_project() {
        let tmp = tempdir().unwrap();
        let ws = setup(&tmp);
        let store = Store::new(&ws);
        let project = Project::new("Maple".to_string(), "test".to_string());
        store.save(&project).unwrap();

        let rows = vec![ImportRow::Task(TaskRow {
            row: 1,
            project: "maple".to_string(),
            title: "Confirm hardware".to_string(),
            status: TaskStatus::WaitingOnClient,
            priority: Priority::P1,
            blocking: true,
            follow_up_days: Some(3),
            notes: None,
        })];

        let importer = BatchImporter::new(&store, "test");
        let outcome = importer.run(&rows, &mut |_| {}).unwrap();
        assert_eq!(outcome.success, 1);

        let tasks: Vec<Task> = store.load_all().unwrap();
        assert_eq!(tasks[0].project, project.id);
        assert!(tasks[0].blocking);
    }
}
