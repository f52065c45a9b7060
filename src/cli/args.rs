//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    budget::BudgetCommands,
    import::ImportArgs,
    init::InitArgs,
    log::LogArgs,
    proj::ProjCommands,
    quote::QuoteCommands,
    report::ReportCommands,
    task::TaskCommands,
    vendor::VendorCommands,
};

#[derive(Parser)]
#[command(name = "sitedeck")]
#[command(author, version, about = "Construction project coordination from the command line")]
#[command(
    long_about = "A file-based toolkit for running construction projects: tasks and RFIs, \
vendor quotes, budget tracking, CSV import, and boss-ready reports. Everything lives as \
plain text files under the workspace, suitable for git."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace root (default: auto-detect by finding .sitedeck/)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new SiteDeck workspace
    Init(InitArgs),

    /// Project management
    #[command(subcommand)]
    Proj(ProjCommands),

    /// Task / RFI management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Vendor quote management
    #[command(subcommand)]
    Quote(QuoteCommands),

    /// Vendor management
    #[command(subcommand)]
    Vendor(VendorCommands),

    /// Budget areas and line items
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show the change log
    Log(LogArgs),

    /// Import records from a CSV file
    Import(ImportArgs),

    /// Generate reports (war room, boss summary, xlsx export)
    #[command(subcommand)]
    Report(ReportCommands),
}
