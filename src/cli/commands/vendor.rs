//! `sitedeck vendor` command - Vendor management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{format_short_id, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::entity::Rating;
use crate::core::{Config, Store, Workspace};
use crate::entities::{Trade, Vendor};

#[derive(Subcommand, Debug)]
pub enum VendorCommands {
    /// Create a new vendor
    New(NewArgs),

    /// List vendors
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Company name
    pub company: String,

    /// Contact person
    #[arg(long)]
    pub contact: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Rating (poor, fair, good, excellent)
    #[arg(long, default_value = "fair")]
    pub rating: Rating,

    /// Comma-separated trade names (created if they do not exist)
    #[arg(long, value_delimiter = ',')]
    pub trades: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by trade name
    #[arg(long)]
    pub trade: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

pub fn run(cmd: VendorCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        VendorCommands::New(args) => run_new(args, global),
        VendorCommands::List(args) => run_list(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);
    let author = config.author();

    let mut vendor = Vendor::new(args.company.clone(), author.clone());
    vendor.contact_name = args.contact;
    vendor.contact_email = args.email.map(|e| e.to_lowercase());
    vendor.contact_phone = args.phone;
    vendor.rating = args.rating;

    let mut existing: Vec<Trade> = store
        .load_all()
        .map_err(|e| miette::miette!("{}", e))?;

    for name in args.trades.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        let wanted = name.to_lowercase();
        let trade = match existing.iter().find(|t| t.name.to_lowercase() == wanted) {
            Some(trade) => trade.clone(),
            None => {
                let trade = Trade::new(name.to_string(), author.clone());
                store.save(&trade).map_err(|e| miette::miette!("{}", e))?;
                existing.push(trade.clone());
                trade
            }
        };
        if !vendor.trades.contains(&trade.id) {
            vendor.trades.push(trade.id);
        }
    }

    let path = store.save(&vendor).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created vendor {}",
        style("✓").green(),
        style(format_short_id(&vendor.id)).cyan()
    );
    println!("   {}", style(path.display()).dim());
    println!("   Company: {}", style(&vendor.company).yellow());
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let store = Store::new(&ws);

    let trades: Vec<Trade> = store.load_all().map_err(|e| miette::miette!("{}", e))?;

    let trade_filter = match &args.trade {
        Some(name) => {
            let wanted = name.to_lowercase();
            let trade = trades
                .iter()
                .find(|t| t.name.to_lowercase() == wanted)
                .ok_or_else(|| miette::miette!("No trade found matching '{}'", name))?;
            Some(trade.id.clone())
        }
        None => None,
    };

    let mut vendors: Vec<Vendor> = store
        .load_all::<Vendor>()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .filter(|v| {
            trade_filter
                .as_ref()
                .map_or(true, |id| v.trades.contains(id))
        })
        .collect();
    vendors.sort_by(|a, b| a.company.cmp(&b.company));

    if args.count {
        println!("{}", vendors.len());
        return Ok(());
    }
    if vendors.is_empty() {
        println!("No vendors found.");
        return Ok(());
    }

    println!(
        "{:<17} {:<26} {:<18} {:<10} {:<26}",
        style("ID").bold(),
        style("COMPANY").bold(),
        style("CONTACT").bold(),
        style("RATING").bold(),
        style("TRADES").bold()
    );
    println!("{}", "-".repeat(100));

    for v in &vendors {
        let trade_names: Vec<&str> = v
            .trades
            .iter()
            .filter_map(|id| trades.iter().find(|t| t.id == *id))
            .map(|t| t.name.as_str())
            .collect();
        println!(
            "{:<17} {:<26} {:<18} {:<10} {:<26}",
            style(format_short_id(&v.id)).cyan(),
            truncate_str(&v.company, 24),
            truncate_str(v.contact_name.as_deref().unwrap_or("-"), 16),
            v.rating,
            truncate_str(&trade_names.join(", "), 24)
        );
    }

    println!();
    println!("{} vendor(s) found.", style(vendors.len()).cyan());
    Ok(())
}
