//! `sitedeck log` command - Show the change log

use console::style;
use miette::Result;

use crate::cli::helpers::truncate_str;
use crate::cli::GlobalOpts;
use crate::core::{ChangeLog, Workspace};

#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// How many days back to show
    #[arg(long, default_value_t = 14)]
    pub days: i64,
}

pub fn run(args: LogArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let entries = ChangeLog::new(&ws)
        .recent(args.days)
        .map_err(|e| miette::miette!("{}", e))?;

    if entries.is_empty() {
        println!("No changes in the last {} days.", args.days);
        return Ok(());
    }

    for entry in &entries {
        let old = if entry.old.is_empty() { "-" } else { &entry.old };
        println!(
            "{}  {:<22} {} {} {}  {}",
            style(entry.at.format("%Y-%m-%d %H:%M")).dim(),
            style(entry.field_label()).bold(),
            truncate_str(old, 24),
            style("→").dim(),
            style(truncate_str(&entry.new, 24)).cyan(),
            style(&entry.author).dim()
        );
    }

    println!();
    println!(
        "{} change(s) in the last {} days.",
        style(entries.len()).cyan(),
        args.days
    );
    Ok(())
}
