//! Integration tests for the SiteDeck CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a sitedeck command with a fixed author
fn sitedeck() -> Command {
    let mut cmd = Command::cargo_bin("sitedeck").unwrap();
    cmd.env("SITEDECK_AUTHOR", "testuser");
    cmd
}

/// Helper to create a workspace in a temp directory
fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    sitedeck()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Helper to create a project and extract its ID from the output
fn create_test_project(tmp: &TempDir, name: &str) -> String {
    let output = sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "new", name])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Output format: "✓ Created project PROJ-01ABC..."
    stdout
        .lines()
        .find(|l| l.contains("PROJ-"))
        .and_then(|l| l.split_whitespace().find(|w| w.starts_with("PROJ-")))
        .map(|s| s.trim_end_matches("...").to_string())
        .unwrap_or_default()
}

/// Helper to create a task and extract its ID
fn create_test_task(tmp: &TempDir, project: &str, title: &str) -> String {
    let output = sitedeck()
        .current_dir(tmp.path())
        .args(["task", "new", project, title])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|l| l.contains("TASK-"))
        .and_then(|l| l.split_whitespace().find(|w| w.starts_with("TASK-")))
        .map(|s| s.trim_end_matches("...").to_string())
        .unwrap_or_default()
}

/// Helper to create a quote and extract its ID
fn create_test_quote(tmp: &TempDir, project: &str, title: &str) -> String {
    let output = sitedeck()
        .current_dir(tmp.path())
        .args(["quote", "new", project, title])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|l| l.contains("QUOT-"))
        .and_then(|l| l.split_whitespace().find(|w| w.starts_with("QUOT-")))
        .map(|s| s.trim_end_matches("...").to_string())
        .unwrap_or_default()
}

/// Count entity files under a workspace directory
fn count_deck_files(tmp: &TempDir, dir: &str) -> usize {
    fs::read_dir(tmp.path().join(dir))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().to_string_lossy().ends_with(".deck.yaml"))
        .count()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    sitedeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Construction project coordination"));
}

#[test]
fn test_version_displays() {
    sitedeck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitedeck"));
}

#[test]
fn test_unknown_command_fails() {
    sitedeck()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_not_in_workspace_fails() {
    let tmp = TempDir::new().unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a SiteDeck workspace"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_workspace_structure() {
    let tmp = TempDir::new().unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    // Verify structure
    assert!(tmp.path().join(".sitedeck").exists());
    assert!(tmp.path().join(".sitedeck/config.yaml").exists());
    assert!(tmp.path().join("projects").is_dir());
    assert!(tmp.path().join("tasks").is_dir());
    assert!(tmp.path().join("quotes").is_dir());
    assert!(tmp.path().join("vendors").is_dir());
    assert!(tmp.path().join("trades").is_dir());
    assert!(tmp.path().join("budget/areas").is_dir());
    assert!(tmp.path().join("budget/items").is_dir());
    assert!(tmp.path().join("logs").is_dir());
}

#[test]
fn test_init_twice_warns_but_succeeds() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// ============================================================================
// Project Command Tests
// ============================================================================

#[test]
fn test_proj_new_creates_file() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args([
            "proj",
            "new",
            "Maple St Remodel",
            "--client",
            "Dana Whitfield",
            "--budget",
            "185000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project"));

    assert_eq!(count_deck_files(&tmp, "projects"), 1);

    let files: Vec<_> = fs::read_dir(tmp.path().join("projects"))
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    let content = fs::read_to_string(files[0].path()).unwrap();
    assert!(content.contains("Maple St Remodel"));
    assert!(content.contains("Dana Whitfield"));
}

#[test]
fn test_proj_list_empty_workspace() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found"));
}

#[test]
fn test_proj_list_shows_projects() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "First Project");
    create_test_project(&tmp, "Second Project");

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First Project"))
        .stdout(predicate::str::contains("Second Project"))
        .stdout(predicate::str::contains("2 project(s) found"));
}

#[test]
fn test_proj_list_count_only() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Project One");
    create_test_project(&tmp, "Project Two");

    let output = sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "list", "--count"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let count_str = String::from_utf8_lossy(&output);
    assert!(
        count_str.trim() == "2",
        "Expected count '2', got '{}'",
        count_str.trim()
    );
}

#[test]
fn test_proj_show_by_partial_id() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Cedar Ave Addition");

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "show", "PROJ-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cedar Ave Addition"));
}

#[test]
fn test_proj_show_not_found() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "show", "PROJ-NONEXISTENT"])
        .assert()
        .failure();
}

#[test]
fn test_proj_archive_hides_from_list() {
    let tmp = setup_workspace();
    let id = create_test_project(&tmp, "Finished Job");
    assert!(!id.is_empty(), "could not extract project ID");

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "archive", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived project"));

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found"));

    // Still visible with --all
    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished Job"));
}

#[test]
fn test_proj_archive_appends_change_log() {
    let tmp = setup_workspace();
    let id = create_test_project(&tmp, "Logged Job");

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "archive", &id, "-y"])
        .assert()
        .success();

    let log = fs::read_to_string(tmp.path().join("logs/changelog.jsonl")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("\"status\""));
    assert!(log.contains("archived"));
    assert!(log.contains("testuser"));
}

// ============================================================================
// Task Command Tests
// ============================================================================

#[test]
fn test_task_new_by_project_name() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Maple St Remodel");

    sitedeck()
        .current_dir(tmp.path())
        .args([
            "task",
            "new",
            "Maple St Remodel",
            "Confirm cabinet hardware",
            "--priority",
            "p1",
            "--blocking",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task"))
        .stdout(predicate::str::contains("marked blocking"));

    assert_eq!(count_deck_files(&tmp, "tasks"), 1);
}

#[test]
fn test_task_new_unknown_project_fails() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "new", "Nonexistent Job", "Some task"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project found"));
}

#[test]
fn test_task_list_shows_tasks() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job A");
    create_test_task(&tmp, "Job A", "Order windows");
    create_test_task(&tmp, "Job A", "Schedule inspection");

    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Order windows"))
        .stdout(predicate::str::contains("Schedule inspection"))
        .stdout(predicate::str::contains("2 task(s) found"));
}

#[test]
fn test_task_status_change_is_logged() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job B");
    let id = create_test_task(&tmp, "Job B", "Confirm tile selection");
    assert!(!id.is_empty(), "could not extract task ID");

    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "status", &id, "waiting_on_client"])
        .assert()
        .success()
        .stdout(predicate::str::contains("waiting_on_client"));

    let log = fs::read_to_string(tmp.path().join("logs/changelog.jsonl")).unwrap();
    assert!(log.contains("waiting_on_client"));
    assert!(log.contains(&id));
}

#[test]
fn test_task_status_unchanged_not_logged() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job C");
    let id = create_test_task(&tmp, "Job C", "Same status");

    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "status", &id, "open"])
        .assert()
        .success();

    // No transition happened, so nothing in the log
    assert!(!tmp.path().join("logs/changelog.jsonl").exists());
}

#[test]
fn test_task_list_open_filter() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job D");
    let id = create_test_task(&tmp, "Job D", "Resolved task");
    create_test_task(&tmp, "Job D", "Still open");

    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "status", &id, "resolved"])
        .assert()
        .success();

    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "list", "--open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Still open"))
        .stdout(predicate::str::contains("1 task(s) found"));
}

// ============================================================================
// Quote Command Tests
// ============================================================================

#[test]
fn test_quote_new_creates_trade_on_the_fly() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job E");

    sitedeck()
        .current_dir(tmp.path())
        .args([
            "quote",
            "new",
            "Job E",
            "Kitchen electrical rough-in",
            "--trade",
            "Electrical",
            "--amount",
            "12500",
            "--budget",
            "11000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quote"));

    assert_eq!(count_deck_files(&tmp, "quotes"), 1);
    assert_eq!(count_deck_files(&tmp, "trades"), 1);
}

#[test]
fn test_quote_update_logs_every_field_change() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job F");
    let id = create_test_quote(&tmp, "Job F", "Roofing");
    assert!(!id.is_empty(), "could not extract quote ID");

    sitedeck()
        .current_dir(tmp.path())
        .args([
            "quote", "update", &id, "--amount", "9800", "--status", "quoted",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated quote"))
        .stdout(predicate::str::contains("Quoted amount"))
        .stdout(predicate::str::contains("Quote status"));

    let log = fs::read_to_string(tmp.path().join("logs/changelog.jsonl")).unwrap();
    assert_eq!(log.lines().count(), 2, "expected one log line per field");
}

#[test]
fn test_quote_update_without_changes() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job G");
    let id = create_test_quote(&tmp, "Job G", "Framing");

    sitedeck()
        .current_dir(tmp.path())
        .args(["quote", "update", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to update"));

    assert!(!tmp.path().join("logs/changelog.jsonl").exists());
}

#[test]
fn test_quote_list_shows_variance() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job H");

    sitedeck()
        .current_dir(tmp.path())
        .args([
            "quote", "new", "Job H", "Plumbing", "--amount", "5500", "--budget", "5000",
        ])
        .assert()
        .success();

    sitedeck()
        .current_dir(tmp.path())
        .args(["quote", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plumbing"))
        .stdout(predicate::str::contains("+500.00"))
        .stdout(predicate::str::contains("1 quote(s) found"));
}

// ============================================================================
// Vendor Command Tests
// ============================================================================

#[test]
fn test_vendor_new_with_trades() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args([
            "vendor",
            "new",
            "Acme Electric",
            "--contact",
            "Sam Ortiz",
            "--email",
            "Sam@Acme.example.com",
            "--rating",
            "good",
            "--trades",
            "Electrical,Low Voltage",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created vendor"));

    assert_eq!(count_deck_files(&tmp, "vendors"), 1);
    assert_eq!(count_deck_files(&tmp, "trades"), 2);

    // Email is normalized to lowercase
    let files: Vec<_> = fs::read_dir(tmp.path().join("vendors"))
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    let content = fs::read_to_string(files[0].path()).unwrap();
    assert!(content.contains("sam@acme.example.com"));
}

#[test]
fn test_vendor_list_filter_by_trade() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["vendor", "new", "Acme Electric", "--trades", "Electrical"])
        .assert()
        .success();

    sitedeck()
        .current_dir(tmp.path())
        .args(["vendor", "new", "Best Plumbing", "--trades", "Plumbing"])
        .assert()
        .success();

    sitedeck()
        .current_dir(tmp.path())
        .args(["vendor", "list", "--trade", "electrical"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Electric"))
        .stdout(predicate::str::contains("1 vendor(s) found"));
}

// ============================================================================
// Budget Command Tests
// ============================================================================

#[test]
fn test_budget_item_creates_area_on_the_fly() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job I");

    sitedeck()
        .current_dir(tmp.path())
        .args([
            "budget", "item", "Job I", "Kitchen", "Cabinets", "--budgeted", "10000", "--actual",
            "10750",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Line item"));

    assert_eq!(count_deck_files(&tmp, "budget/areas"), 1);
    assert_eq!(count_deck_files(&tmp, "budget/items"), 1);
}

#[test]
fn test_budget_item_reuses_existing_area() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job J");

    sitedeck()
        .current_dir(tmp.path())
        .args(["budget", "area", "Job J", "Kitchen"])
        .assert()
        .success();

    // Same area name, different case
    sitedeck()
        .current_dir(tmp.path())
        .args(["budget", "item", "Job J", "kitchen", "Countertops"])
        .assert()
        .success();

    assert_eq!(count_deck_files(&tmp, "budget/areas"), 1);
}

#[test]
fn test_budget_show_with_subtotals() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job K");

    sitedeck()
        .current_dir(tmp.path())
        .args([
            "budget", "item", "Job K", "Kitchen", "Cabinets", "--budgeted", "10000", "--actual",
            "11000",
        ])
        .assert()
        .success();

    sitedeck()
        .current_dir(tmp.path())
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cabinets"))
        .stdout(predicate::str::contains("Kitchen subtotal"))
        .stdout(predicate::str::contains("Job K total"))
        .stdout(predicate::str::contains("+1000.00"));
}

// ============================================================================
// Log Command Tests
// ============================================================================

#[test]
fn test_log_empty_workspace() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes in the last 14 days"));
}

#[test]
fn test_log_shows_recent_changes() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job L");
    let id = create_test_task(&tmp, "Job L", "Tracked task");

    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "status", &id, "waiting_on_vendor"])
        .assert()
        .success();

    sitedeck()
        .current_dir(tmp.path())
        .args(["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task status"))
        .stdout(predicate::str::contains("waiting_on_vendor"))
        .stdout(predicate::str::contains("1 change(s) in the last 14 days"));
}

// ============================================================================
// Import Command Tests
// ============================================================================

#[test]
fn test_import_template_prints_starter_csv() {
    sitedeck()
        .args(["import", "budget-items", "--template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project,area,item,budgeted,actual"))
        .stdout(predicate::str::contains("Maple St Remodel"));
}

#[test]
fn test_import_without_file_fails() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "tasks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No file given"));
}

#[test]
fn test_import_unknown_kind_fails() {
    sitedeck()
        .args(["import", "widgets", "file.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported import kind"));
}

#[test]
fn test_import_budget_items_end_to_end() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Maple St Remodel");

    // Messy real-world headers, quoted thousands separators, blank actual
    let csv = "\
Project,Room,Line Item,Budgeted,Spent
Maple St Remodel,Kitchen,Cabinets,\"10,000\",
Maple St Remodel,Kitchen,Countertops,\"4,500\",\"4,812.50\"
";
    fs::write(tmp.path().join("budget.csv"), csv).unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "budget-items", "budget.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected columns"))
        .stdout(predicate::str::contains("Imported 2 row(s)"));

    assert_eq!(count_deck_files(&tmp, "budget/items"), 2);
    // Both rows name the same area, so only one area record
    assert_eq!(count_deck_files(&tmp, "budget/areas"), 1);
}

#[test]
fn test_import_skips_leading_title_rows() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job M");

    let csv = "\
Budget Worksheet - 2026,,,,
Prepared by the office,,,,
project,area,item,budgeted,actual
Job M,Exterior,Siding,22000,
";
    fs::write(tmp.path().join("sheet.csv"), csv).unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "budget-items", "sheet.csv", "--skip", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 row(s)"));
}

#[test]
fn test_import_dry_run_writes_nothing() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job N");

    let csv = "project,area,item,budgeted,actual\nJob N,Kitchen,Cabinets,10000,\n";
    fs::write(tmp.path().join("budget.csv"), csv).unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "budget-items", "budget.csv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: 1 row(s) would import"));

    assert_eq!(count_deck_files(&tmp, "budget/items"), 0);
    assert_eq!(count_deck_files(&tmp, "budget/areas"), 0);
}

#[test]
fn test_import_bad_row_does_not_stop_the_batch() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job O");

    // Second row references a project that does not exist
    let csv = "\
project,area,item,budgeted,actual
Job O,Kitchen,Cabinets,10000,
No Such Job,Kitchen,Sink,900,
Job O,Bath,Tile,3200,
";
    fs::write(tmp.path().join("budget.csv"), csv).unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "budget-items", "budget.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 row(s); 1 failed"));

    assert_eq!(count_deck_files(&tmp, "budget/items"), 2);
}

#[test]
fn test_import_invalid_rows_reported_not_imported() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job P");

    // Second row is missing the required item name
    let csv = "\
project,area,item,budgeted,actual
Job P,Kitchen,Cabinets,10000,
Job P,Kitchen,,500,
";
    fs::write(tmp.path().join("budget.csv"), csv).unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "budget-items", "budget.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 invalid"));

    assert_eq!(count_deck_files(&tmp, "budget/items"), 1);
}

#[test]
fn test_import_unrecognizable_headers_fail() {
    let tmp = setup_workspace();

    let csv = "foo,bar,baz\n1,2,3\n";
    fs::write(tmp.path().join("junk.csv"), csv).unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "budget-items", "junk.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No recognizable columns"));
}

#[test]
fn test_import_tasks_csv() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Maple St Remodel");

    let csv = "\
Project,Task,Status,Priority,Blocking
Maple St Remodel,Confirm cabinet hardware,waiting_on_client,p1,yes
Maple St Remodel,Order windows,open,p2,
";
    fs::write(tmp.path().join("tasks.csv"), csv).unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "tasks", "tasks.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 row(s)"));

    assert_eq!(count_deck_files(&tmp, "tasks"), 2);
}

#[test]
fn test_import_vendors_creates_trades() {
    let tmp = setup_workspace();

    let csv = "\
company,contact,email,rating,trades
Acme Electric,Sam Ortiz,sam@acme.example.com,good,\"Electrical, Low Voltage\"
Best Plumbing,Lee Chao,lee@best.example.com,excellent,Plumbing
";
    fs::write(tmp.path().join("vendors.csv"), csv).unwrap();

    sitedeck()
        .current_dir(tmp.path())
        .args(["import", "vendors", "vendors.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 row(s)"));

    assert_eq!(count_deck_files(&tmp, "vendors"), 2);
    assert_eq!(count_deck_files(&tmp, "trades"), 3);
}

// ============================================================================
// Report Command Tests
// ============================================================================

#[test]
fn test_report_war_room_empty() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "war-room"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing open"));
}

#[test]
fn test_report_war_room_lists_open_tasks() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job Q");
    create_test_task(&tmp, "Job Q", "Waiting on permit");

    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "war-room"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Waiting on permit"))
        .stdout(predicate::str::contains("Job Q"));
}

#[test]
fn test_report_boss_shows_health() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["proj", "new", "Job R", "--budget", "50000"])
        .assert()
        .success();

    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "boss"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job R"))
        .stdout(predicate::str::contains("Health"))
        .stdout(predicate::str::contains("On Track"));
}

#[test]
fn test_report_boss_flags_blocked_project() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job S");

    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "new", "Job S", "Blocked on engineering", "--blocking"])
        .assert()
        .success();

    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "boss"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blocked"));
}

#[test]
fn test_report_boss_no_projects() {
    let tmp = setup_workspace();

    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "boss"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active projects"));
}

#[test]
fn test_report_export_writes_xlsx() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job T");

    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "export", "-o", "weekly.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported report"));

    let bytes = fs::read(tmp.path().join("weekly.xlsx")).unwrap();
    // xlsx files are zip archives
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn test_report_export_default_filename() {
    let tmp = setup_workspace();
    create_test_project(&tmp, "Job U");

    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "export"])
        .assert()
        .success();

    let exported: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().to_string_lossy().ends_with(".xlsx"))
        .collect();
    assert_eq!(exported.len(), 1);
    assert!(exported[0]
        .file_name()
        .to_string_lossy()
        .starts_with("sitedeck-Boss-report-"));
}

// ============================================================================
// Cross-Command Integration Tests
// ============================================================================

#[test]
fn test_full_workflow() {
    let tmp = setup_workspace();

    // Project with a budget
    sitedeck()
        .current_dir(tmp.path())
        .args([
            "proj", "new", "Maple St Remodel", "--client", "Dana Whitfield", "--budget", "185000",
        ])
        .assert()
        .success();

    // Budget line items
    sitedeck()
        .current_dir(tmp.path())
        .args([
            "budget", "item", "Maple St Remodel", "Kitchen", "Cabinets", "--budgeted", "10000",
        ])
        .assert()
        .success();

    // A blocking task
    let task_id = create_test_task(&tmp, "Maple St Remodel", "Confirm hardware");
    sitedeck()
        .current_dir(tmp.path())
        .args(["task", "status", &task_id, "waiting_on_client"])
        .assert()
        .success();

    // A quote over budget
    sitedeck()
        .current_dir(tmp.path())
        .args([
            "quote", "new", "Maple St Remodel", "Electrical rough-in", "--amount", "12500",
            "--budget", "11000",
        ])
        .assert()
        .success();

    // Everything shows up in the reports
    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "war-room"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirm hardware"))
        .stdout(predicate::str::contains("Decisions needed"));

    sitedeck()
        .current_dir(tmp.path())
        .args(["report", "boss"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maple St Remodel"));

    // And the change log recorded the status transition
    sitedeck()
        .current_dir(tmp.path())
        .args(["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task status"));
}
