//! `sitedeck init` command - Initialize a new workspace

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::{Workspace, WorkspaceError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    match Workspace::init(&path) {
        Ok(ws) => {
            println!(
                "{} Initialized SiteDeck workspace at {}",
                style("✓").green(),
                style(ws.root().display()).cyan()
            );
            println!();
            println!("Created workspace structure:");
            for dir in [
                ".sitedeck/",
                ".sitedeck/config.yaml",
                "projects/",
                "tasks/",
                "quotes/",
                "vendors/",
                "trades/",
                "budget/areas/",
                "budget/items/",
                "logs/",
            ] {
                println!("  {}", style(dir).dim());
            }
            println!();
            println!("Next steps:");
            println!(
                "  {} Create your first project",
                style("sitedeck proj new \"Maple St Remodel\"").yellow()
            );
            println!(
                "  {} Import existing records from a spreadsheet",
                style("sitedeck import budget-items budget.csv").yellow()
            );
            println!(
                "  {} See everything waiting on someone",
                style("sitedeck report war-room").yellow()
            );
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(path)) => {
            println!(
                "{} SiteDeck workspace already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
