//! `sitedeck report` command - War room, boss summary, xlsx export

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::GlobalOpts;
use crate::core::{Config, Workspace};
use crate::report::{
    decisions_needed, executive_summary, recent_activity, workbook, Health, ReportData,
};

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Everything waiting on someone, most urgent first
    WarRoom(WarRoomArgs),

    /// Executive summary: one line per project with health
    Boss(BossArgs),

    /// Export all report sheets to an xlsx workbook
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct WarRoomArgs {}

#[derive(clap::Args, Debug)]
pub struct BossArgs {}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output path (default: <product>-Boss-report-<date>.xlsx)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::WarRoom(args) => run_war_room(args, global),
        ReportCommands::Boss(args) => run_boss(args, global),
        ReportCommands::Export(args) => run_export(args, global),
    }
}

fn run_war_room(_args: WarRoomArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let data = ReportData::load(&ws).map_err(|e| miette::miette!("{}", e))?;
    let now = Utc::now();

    let projects = data.project_by_id();
    let mut open: Vec<_> = data.tasks.iter().filter(|t| t.status.is_open()).collect();
    open.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.blocking.cmp(&a.blocking))
            .then(b.days_waiting(now).cmp(&a.days_waiting(now)))
    });

    if open.is_empty() {
        println!("{} Nothing open. Quiet day.", style("✓").green());
        return Ok(());
    }

    let mut table = Builder::default();
    table.push_record(["Pri", "Project", "Task", "Status", "Blocking", "Waiting"]);
    for task in &open {
        let project_name = projects
            .get(&task.project)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| task.project.to_string());
        let waiting = if task.is_overdue(now) {
            format!("{}d (overdue)", task.days_waiting(now))
        } else {
            format!("{}d", task.days_waiting(now))
        };
        table.push_record([
            task.priority.to_string(),
            truncate_str(&project_name, 22),
            truncate_str(&task.title, 34),
            task.status.to_string(),
            if task.blocking { "yes".to_string() } else { "-".to_string() },
            waiting,
        ]);
    }

    println!("{}", table.build().with(Style::sharp()));

    let decisions = decisions_needed(&data, now);
    if !decisions.is_empty() {
        println!();
        println!("{}:", style("Decisions needed").bold());
        for d in decisions.iter().take(10) {
            println!(
                "  {} {} — {} ({} waiting {}d)",
                style("•").cyan(),
                d.kind.label(),
                truncate_str(&d.title, 36),
                truncate_str(&d.project_name, 22),
                d.days_waiting
            );
        }
    }
    Ok(())
}

fn run_boss(_args: BossArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let data = ReportData::load(&ws).map_err(|e| miette::miette!("{}", e))?;
    let now = Utc::now();

    let rows = executive_summary(&data, now);
    if rows.is_empty() {
        println!("No active projects.");
        return Ok(());
    }

    let mut table = Builder::default();
    table.push_record([
        "Project", "Status", "Budgeted", "Actual", "Variance", "Var %", "Open", "Overdue",
        "Health",
    ]);
    for row in &rows {
        let pct = row
            .variance_percent
            .map(|v| format!("{:.1}%", v))
            .unwrap_or_else(|| "-".to_string());
        table.push_record([
            truncate_str(&row.project_name, 26),
            row.status.to_string(),
            format!("{:.2}", row.budgeted),
            format!("{:.2}", row.actual),
            format!("{:.2}", row.variance),
            pct,
            row.open_tasks.to_string(),
            row.overdue_tasks.to_string(),
            row.health.label().to_string(),
        ]);
    }
    println!("{}", table.build().with(Style::sharp()));

    for row in &rows {
        if row.health != Health::OnTrack {
            let mark = match row.health {
                Health::Blocked => style("✗").red(),
                _ => style("!").yellow(),
            };
            println!(
                "{} {} is {} ({} blocking, {} overdue)",
                mark,
                style(&row.project_name).yellow(),
                row.health.label(),
                row.blocking_tasks,
                row.overdue_tasks
            );
        }
    }

    let activity = recent_activity(&data, now);
    if !activity.is_empty() && !global.quiet {
        println!();
        println!("{} change(s) in the last two weeks.", activity.len());
    }
    Ok(())
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let data = ReportData::load(&ws).map_err(|e| miette::miette!("{}", e))?;
    let now = Utc::now();

    let path = args.output.unwrap_or_else(|| {
        PathBuf::from(workbook::default_filename(
            &config.product(),
            "Boss-report",
            now.date_naive(),
        ))
    });

    workbook::export(&data, now, &path).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Exported report to {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}
