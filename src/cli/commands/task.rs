//! `sitedeck task` command - Task / RFI management

use chrono::Utc;
use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{format_short_id, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::changelog::{ChangeEntry, ChangeLog, RecordType};
use crate::core::entity::{Priority, TaskStatus};
use crate::core::{Config, Store, Workspace};
use crate::entities::{Project, Task};

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a new task
    New(NewArgs),

    /// List tasks
    List(ListArgs),

    /// Change a task's status (logged to the change log)
    Status(StatusArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Project ID or name
    pub project: String,

    /// Task title
    pub title: String,

    /// Priority (p1, p2, p3)
    #[arg(long, short = 'p', default_value = "p2")]
    pub priority: Priority,

    /// Mark as blocking project progress
    #[arg(long)]
    pub blocking: bool,

    /// Follow-up cadence in days
    #[arg(long)]
    pub follow_up: Option<u32>,

    /// Notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by project ID or name
    #[arg(long)]
    pub project: Option<String>,

    /// Show only open tasks
    #[arg(long)]
    pub open: bool,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Task ID (full or partial)
    pub id: String,

    /// New status (open, waiting_on_client, waiting_on_vendor, waiting_on_us, resolved)
    pub status: TaskStatus,

    /// Also stamp last-contact as now
    #[arg(long)]
    pub contacted: bool,
}

pub fn run(cmd: TaskCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TaskCommands::New(args) => run_new(args, global),
        TaskCommands::List(args) => run_list(args, global),
        TaskCommands::Status(args) => run_status(args, global),
    }
}

/// Resolve a project reference that may be an ID fragment or a name
fn resolve_project(store: &Store, reference: &str) -> Result<Project> {
    if let Ok(project) = store.load::<Project>(reference) {
        return Ok(project);
    }
    let wanted = reference.to_lowercase();
    store
        .load_all::<Project>()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .find(|p| p.name.to_lowercase() == wanted)
        .ok_or_else(|| miette::miette!("No project found matching '{}'", reference))
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);

    let project = resolve_project(&store, &args.project)?;

    let mut task = Task::new(project.id.clone(), args.title.clone(), config.author());
    task.priority = args.priority;
    task.blocking = args.blocking;
    task.follow_up_days = args.follow_up;
    task.notes = args.notes;

    let path = store.save(&task).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created task {} on {}",
        style("✓").green(),
        style(format_short_id(&task.id)).cyan(),
        style(&project.name).yellow()
    );
    println!("   {}", style(path.display()).dim());
    if task.blocking {
        println!("   {} marked blocking", style("!").red());
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let store = Store::new(&ws);

    let project_filter = match &args.project {
        Some(reference) => Some(resolve_project(&store, reference)?.id),
        None => None,
    };

    let mut tasks: Vec<Task> = store
        .load_all::<Task>()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .filter(|t| project_filter.as_ref().map_or(true, |id| t.project == *id))
        .filter(|t| !args.open || t.status.is_open())
        .collect();

    // Most urgent first: priority, then blockers, then longest waiting
    let now = Utc::now();
    tasks.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.blocking.cmp(&a.blocking))
            .then(b.days_waiting(now).cmp(&a.days_waiting(now)))
    });

    if args.count {
        println!("{}", tasks.len());
        return Ok(());
    }
    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!(
        "{:<17} {:<32} {:<18} {:<4} {:<5} {:>8}",
        style("ID").bold(),
        style("TITLE").bold(),
        style("STATUS").bold(),
        style("PRI").bold(),
        style("BLK").bold(),
        style("WAITING").bold()
    );
    println!("{}", "-".repeat(90));

    for t in &tasks {
        let blocking = if t.blocking {
            style("yes").red().to_string()
        } else {
            "-".to_string()
        };
        let waiting = format!("{}d", t.days_waiting(now));
        let waiting = if t.is_overdue(now) {
            style(waiting).red().to_string()
        } else {
            waiting
        };
        println!(
            "{:<17} {:<32} {:<18} {:<4} {:<5} {:>8}",
            style(format_short_id(&t.id)).cyan(),
            truncate_str(&t.title, 30),
            t.status,
            t.priority,
            blocking,
            waiting
        );
    }

    println!();
    println!("{} task(s) found.", style(tasks.len()).cyan());
    Ok(())
}

fn run_status(args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);

    let mut task: Task = store.load(&args.id).map_err(|e| miette::miette!("{}", e))?;

    let old_status = task.status;
    task.status = args.status;
    if args.contacted {
        task.last_contact = Some(Utc::now());
    }
    store.save(&task).map_err(|e| miette::miette!("{}", e))?;

    if old_status != args.status {
        ChangeLog::new(&ws)
            .append(&ChangeEntry::new(
                RecordType::Task,
                task.id.clone(),
                "status",
                old_status.to_string(),
                task.status.to_string(),
                config.author(),
            ))
            .map_err(|e| miette::miette!("{}", e))?;
    }

    println!(
        "{} {} {} {} {}",
        style("✓").green(),
        style(truncate_str(&task.title, 40)).yellow(),
        old_status,
        style("→").dim(),
        style(task.status).cyan()
    );
    Ok(())
}
