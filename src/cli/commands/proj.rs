//! `sitedeck proj` command - Project management

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_money, format_short_id, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::changelog::{ChangeEntry, ChangeLog, RecordType};
use crate::core::entity::ProjectStatus;
use crate::core::{Config, Store, Workspace};
use crate::entities::Project;

#[derive(Subcommand, Debug)]
pub enum ProjCommands {
    /// Create a new project
    New(NewArgs),

    /// List projects
    List(ListArgs),

    /// Show a project's details
    Show(ShowArgs),

    /// Archive a project (hides it from reports)
    Archive(ArchiveArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Project name
    pub name: String,

    /// Client name
    #[arg(long)]
    pub client: Option<String>,

    /// Client email
    #[arg(long)]
    pub email: Option<String>,

    /// Client phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Site address
    #[arg(long)]
    pub address: Option<String>,

    /// Total budget
    #[arg(long)]
    pub budget: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Include archived projects
    #[arg(long)]
    pub all: bool,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Project ID (full or partial)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct ArchiveArgs {
    /// Project ID (full or partial)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: ProjCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProjCommands::New(args) => run_new(args, global),
        ProjCommands::List(args) => run_list(args, global),
        ProjCommands::Show(args) => run_show(args, global),
        ProjCommands::Archive(args) => run_archive(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);

    let mut project = Project::new(args.name.clone(), config.author());
    project.client.name = args.client.unwrap_or_default();
    project.client.email = args.email;
    project.client.phone = args.phone;
    project.address = args.address;
    project.total_budget = args.budget;

    let path = store.save(&project).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created project {}",
        style("✓").green(),
        style(format_short_id(&project.id)).cyan()
    );
    println!("   {}", style(path.display()).dim());
    println!("   Name: {}", style(&project.name).yellow());
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let store = Store::new(&ws);

    let mut projects: Vec<Project> = store
        .load_all::<Project>()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .filter(|p| args.all || p.status != ProjectStatus::Archived)
        .collect();
    projects.sort_by(|a, b| a.name.cmp(&b.name));

    if args.count {
        println!("{}", projects.len());
        return Ok(());
    }
    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!(
        "{:<17} {:<28} {:<10} {:<20} {:>12}",
        style("ID").bold(),
        style("NAME").bold(),
        style("STATUS").bold(),
        style("CLIENT").bold(),
        style("BUDGET").bold()
    );
    println!("{}", "-".repeat(92));

    for p in &projects {
        println!(
            "{:<17} {:<28} {:<10} {:<20} {:>12}",
            style(format_short_id(&p.id)).cyan(),
            truncate_str(&p.name, 26),
            p.status,
            truncate_str(&p.client.name, 18),
            format_money(p.total_budget)
        );
    }

    println!();
    println!("{} project(s) found.", style(projects.len()).cyan());
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let store = Store::new(&ws);

    let project: Project = store
        .load(&args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}",
        style("ID").bold(),
        style(project.id.to_string()).cyan()
    );
    println!(
        "{}: {}",
        style("Name").bold(),
        style(&project.name).yellow()
    );
    println!("{}: {}", style("Status").bold(), project.status);
    println!("{}", style("─".repeat(60)).dim());

    if !project.client.name.is_empty() {
        println!();
        println!("{}: {}", style("Client").bold(), project.client.name);
        if let Some(ref email) = project.client.email {
            println!("  Email: {}", email);
        }
        if let Some(ref phone) = project.client.phone {
            println!("  Phone: {}", phone);
        }
    }

    if let Some(ref address) = project.address {
        println!();
        println!("{}: {}", style("Address").bold(), address);
    }

    if let Some(budget) = project.total_budget {
        println!();
        println!("{}: {:.2}", style("Total budget").bold(), budget);
    }

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {} | {}: {}",
        style("Author").dim(),
        project.author,
        style("Created").dim(),
        project.created.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

fn run_archive(args: ArchiveArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);

    let mut project: Project = store
        .load(&args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    if project.status == ProjectStatus::Archived {
        println!(
            "{} {} is already archived",
            style("!").yellow(),
            style(&project.name).yellow()
        );
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Archive '{}' and hide it from reports?",
                project.name
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let old_status = project.status;
    project.status = ProjectStatus::Archived;
    store.save(&project).map_err(|e| miette::miette!("{}", e))?;

    ChangeLog::new(&ws)
        .append(&ChangeEntry::new(
            RecordType::Project,
            project.id.clone(),
            "status",
            old_status.to_string(),
            project.status.to_string(),
            config.author(),
        ))
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Archived project {}",
        style("✓").green(),
        style(&project.name).yellow()
    );
    Ok(())
}
