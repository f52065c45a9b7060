//! `sitedeck budget` command - Budget areas and line items

use clap::Subcommand;
use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_money, format_short_id, format_signed_money};
use crate::cli::GlobalOpts;
use crate::core::{Config, Store, Workspace};
use crate::entities::{BudgetArea, BudgetItem, Project};
use crate::report::{budget_detail, BudgetDetailRow, ReportData};

#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Create a budget area under a project
    Area(AreaArgs),

    /// Create a line item under an area
    Item(ItemArgs),

    /// Show the budget detail with subtotals
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct AreaArgs {
    /// Project ID or name
    pub project: String,

    /// Area name (e.g. Kitchen, Exterior)
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct ItemArgs {
    /// Project ID or name
    pub project: String,

    /// Area name (created if it does not exist)
    pub area: String,

    /// Line item name
    pub name: String,

    /// Budgeted amount
    #[arg(long)]
    pub budgeted: Option<f64>,

    /// Actual amount spent
    #[arg(long)]
    pub actual: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Limit to one project (ID or name)
    #[arg(long)]
    pub project: Option<String>,
}

pub fn run(cmd: BudgetCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BudgetCommands::Area(args) => run_area(args, global),
        BudgetCommands::Item(args) => run_item(args, global),
        BudgetCommands::Show(args) => run_show(args, global),
    }
}

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

/// Find an area by name under a project, creating it if absent
fn resolve_or_create_area(
    store: &Store,
    project: &Project,
    name: &str,
    author: &str,
) -> Result<BudgetArea> {
    let wanted = name.to_lowercase();
    if let Some(area) = store
        .load_all::<BudgetArea>()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .find(|a| a.project == project.id && a.name.to_lowercase() == wanted)
    {
        return Ok(area);
    }
    let area = BudgetArea::new(project.id.clone(), name.to_string(), author.to_string());
    store.save(&area).map_err(|e| miette::miette!("{}", e))?;
    Ok(area)
}

fn run_area(args: AreaArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);

    let project = resolve_project(&store, &args.project)?;
    let area = resolve_or_create_area(&store, &project, &args.name, &config.author())?;

    println!(
        "{} Budget area {} on {}",
        style("✓").green(),
        style(&area.name).yellow(),
        style(&project.name).cyan()
    );
    println!("   {}", style(format_short_id(&area.id)).dim());
    Ok(())
}

fn run_item(args: ItemArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);
    let author = config.author();

    let project = resolve_project(&store, &args.project)?;
    let area = resolve_or_create_area(&store, &project, &args.area, &author)?;

    let mut item = BudgetItem::new(area.id.clone(), project.id.clone(), args.name.clone(), author);
    item.budgeted_amount = args.budgeted;
    item.actual_amount = args.actual;

    let path = store.save(&item).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Line item {} under {} / {}",
        style("✓").green(),
        style(&item.name).yellow(),
        style(&project.name).cyan(),
        style(&area.name).cyan()
    );
    println!("   {}", style(path.display()).dim());
    println!(
        "   Budgeted: {}  Actual: {}",
        format_money(item.budgeted_amount),
        format_money(item.actual_amount)
    );
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let store = Store::new(&ws);

    let project_filter = match &args.project {
        Some(reference) => Some(resolve_project(&store, reference)?.name),
        None => None,
    };

    let data = ReportData::load(&ws).map_err(|e| miette::miette!("{}", e))?;
    let rows = budget_detail(&data);
    let rows: Vec<&BudgetDetailRow> = rows
        .iter()
        .filter(|row| {
            let project = match row {
                BudgetDetailRow::Item { project, .. } => project,
                BudgetDetailRow::AreaSubtotal { project, .. } => project,
                BudgetDetailRow::ProjectTotal { project, .. } => project,
            };
            project_filter.as_ref().map_or(true, |name| project == name)
        })
        .collect();

    if rows.is_empty() {
        println!("No budget items found.");
        return Ok(());
    }

    let mut table = Builder::default();
    table.push_record(["Project", "Area", "Item", "Budgeted", "Actual", "Variance"]);
    for row in rows {
        match row {
            BudgetDetailRow::Item {
                project,
                area,
                name,
                budgeted,
                actual,
                variance,
            } => table.push_record([
                project.clone(),
                area.clone(),
                name.clone(),
                format_money(*budgeted),
                format_money(*actual),
                variance.map(format_signed_money).unwrap_or_else(|| "-".to_string()),
            ]),
            BudgetDetailRow::AreaSubtotal {
                project,
                area,
                budgeted,
                actual,
                variance,
            } => table.push_record([
                project.clone(),
                area.clone(),
                format!("{} subtotal", area),
                format!("{:.2}", budgeted),
                format!("{:.2}", actual),
                format_signed_money(*variance),
            ]),
            BudgetDetailRow::ProjectTotal {
                project,
                budgeted,
                actual,
                variance,
            } => table.push_record([
                project.clone(),
                String::new(),
                format!("{} total", project),
                format!("{:.2}", budgeted),
                format!("{:.2}", actual),
                format_signed_money(*variance),
            ]),
        }
    }

    println!("{}", table.build().with(Style::sharp()));
    Ok(())
}
