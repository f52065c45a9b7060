//! `sitedeck quote` command - Vendor quote management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{format_money, format_short_id, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::changelog::{field_label, ChangeLog, RecordType};
use crate::core::entity::QuoteStatus;
use crate::core::{Config, Store, Workspace};
use crate::entities::{Project, Quote, Trade, Vendor};

#[derive(Subcommand, Debug)]
pub enum QuoteCommands {
    /// Create a new quote
    New(NewArgs),

    /// List quotes
    List(ListArgs),

    /// Update a quote's fields (every change is logged)
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Project ID or name
    pub project: String,

    /// Quote title (e.g. "Kitchen electrical rough-in")
    pub title: String,

    /// Vendor ID or company name
    #[arg(long)]
    pub vendor: Option<String>,

    /// Trade name (created if it does not exist)
    #[arg(long)]
    pub trade: Option<String>,

    /// Quoted amount
    #[arg(long)]
    pub amount: Option<f64>,

    /// Budgeted amount this quote is measured against
    #[arg(long)]
    pub budget: Option<f64>,

    /// Notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by project ID or name
    #[arg(long)]
    pub project: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Quote ID (full or partial)
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New vendor ID or company name
    #[arg(long)]
    pub vendor: Option<String>,

    /// New trade name
    #[arg(long)]
    pub trade: Option<String>,

    /// New quoted amount
    #[arg(long)]
    pub amount: Option<f64>,

    /// New budgeted amount
    #[arg(long)]
    pub budget: Option<f64>,

    /// New status
    #[arg(long)]
    pub status: Option<QuoteStatus>,

    /// New notes
    #[arg(long)]
    pub notes: Option<String>,
}

pub fn run(cmd: QuoteCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        QuoteCommands::New(args) => run_new(args, global),
        QuoteCommands::List(args) => run_list(args, global),
        QuoteCommands::Update(args) => run_update(args, global),
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

fn resolve_vendor(store: &Store, reference: &str) -> Result<Vendor> {
    if let Ok(vendor) = store.load::<Vendor>(reference) {
        return Ok(vendor);
    }
    let wanted = reference.to_lowercase();
    store
        .load_all::<Vendor>()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .find(|v| v.company.to_lowercase() == wanted)
        .ok_or_else(|| miette::miette!("No vendor found matching '{}'", reference))
}

/// Find a trade by name (case-insensitive), creating it if absent
fn resolve_or_create_trade(store: &Store, name: &str, author: &str) -> Result<Trade> {
    let wanted = name.to_lowercase();
    if let Some(trade) = store
        .load_all::<Trade>()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .find(|t| t.name.to_lowercase() == wanted)
    {
        return Ok(trade);
    }
    let trade = Trade::new(name.to_string(), author.to_string());
    store.save(&trade).map_err(|e| miette::miette!("{}", e))?;
    Ok(trade)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);
    let author = config.author();

    let project = resolve_project(&store, &args.project)?;

    let mut quote = Quote::new(project.id.clone(), args.title.clone(), author.clone());
    if let Some(ref reference) = args.vendor {
        quote.vendor = Some(resolve_vendor(&store, reference)?.id);
    }
    if let Some(ref name) = args.trade {
        quote.trade = Some(resolve_or_create_trade(&store, name, &author)?.id);
    }
    quote.amount = args.amount;
    quote.budget_amount = args.budget;
    quote.notes = args.notes;

    let path = store.save(&quote).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created quote {} on {}",
        style("✓").green(),
        style(format_short_id(&quote.id)).cyan(),
        style(&project.name).yellow()
    );
    println!("   {}", style(path.display()).dim());
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let store = Store::new(&ws);

    let project_filter = match &args.project {
        Some(reference) => Some(resolve_project(&store, reference)?.id),
        None => None,
    };

    let mut quotes: Vec<Quote> = store
        .load_all::<Quote>()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .filter(|q| project_filter.as_ref().map_or(true, |id| q.project == *id))
        .collect();
    quotes.sort_by(|a, b| a.title.cmp(&b.title));

    if args.count {
        println!("{}", quotes.len());
        return Ok(());
    }
    if quotes.is_empty() {
        println!("No quotes found.");
        return Ok(());
    }

    println!(
        "{:<17} {:<30} {:<16} {:>12} {:>12} {:>12}",
        style("ID").bold(),
        style("TITLE").bold(),
        style("STATUS").bold(),
        style("QUOTED").bold(),
        style("BUDGET").bold(),
        style("VARIANCE").bold()
    );
    println!("{}", "-".repeat(105));

    for q in &quotes {
        let variance = match q.variance() {
            Some(v) if v > 0.0 => style(format!("+{:.2}", v)).red().to_string(),
            Some(v) => format!("{:.2}", v),
            None => "-".to_string(),
        };
        println!(
            "{:<17} {:<30} {:<16} {:>12} {:>12} {:>12}",
            style(format_short_id(&q.id)).cyan(),
            truncate_str(&q.title, 28),
            q.status,
            format_money(q.amount),
            format_money(q.budget_amount),
            variance
        );
    }

    println!();
    println!("{} quote(s) found.", style(quotes.len()).cyan());
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);
    let author = config.author();

    let old: Quote = store.load(&args.id).map_err(|e| miette::miette!("{}", e))?;
    let mut new = old.clone();

    if let Some(title) = args.title {
        new.title = title;
    }
    if let Some(ref reference) = args.vendor {
        new.vendor = Some(resolve_vendor(&store, reference)?.id);
    }
    if let Some(ref name) = args.trade {
        new.trade = Some(resolve_or_create_trade(&store, name, &author)?.id);
    }
    if let Some(amount) = args.amount {
        new.amount = Some(amount);
    }
    if let Some(budget) = args.budget {
        new.budget_amount = Some(budget);
    }
    if let Some(status) = args.status {
        new.status = status;
    }
    if let Some(notes) = args.notes {
        new.notes = Some(notes);
    }

    let changes = Quote::diff(&old, &new);
    if changes.is_empty() {
        println!("{} Nothing to update.", style("!").yellow());
        return Ok(());
    }

    store.save(&new).map_err(|e| miette::miette!("{}", e))?;
    ChangeLog::new(&ws)
        .append_all(RecordType::Quote, &new.id, &changes, &author)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Updated quote {}",
        style("✓").green(),
        style(truncate_str(&new.title, 40)).yellow()
    );
    for (field, old_value, new_value) in &changes {
        println!(
            "   {}: {} {} {}",
            field_label(RecordType::Quote, field),
            if old_value.is_empty() { "-" } else { old_value },
            style("→").dim(),
            style(if new_value.is_empty() { "-" } else { new_value }).cyan()
        );
    }
    Ok(())
}
