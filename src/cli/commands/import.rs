//! `sitedeck import` command - CSV import

use std::io::Write;
use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{Config, Store, Workspace};
use crate::import::{
    catalog::{template_example, template_headers},
    detect, parse, BatchImporter, ImportKind,
};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// What to import: projects, tasks, budget-items, or vendors
    pub kind: ImportKind,

    /// CSV file to import (not needed with --template)
    pub file: Option<PathBuf>,

    /// Leading rows to skip before the header (title rows, etc.)
    #[arg(long, default_value_t = 0)]
    pub skip: usize,

    /// Validate and resolve without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print a starter CSV template and exit
    #[arg(long)]
    pub template: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        println!("{}", template_headers(args.kind).join(","));
        println!("{}", template_example(args.kind).join(","));
        return Ok(());
    }

    let Some(ref file) = args.file else {
        return Err(miette::miette!(
            "No file given. Pass a CSV file, or use --template to print a starter sheet."
        ));
    };

    let ws = Workspace::open(global.workspace.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load();
    let store = Store::new(&ws);

    // Parse: the only stage that aborts the whole run
    let table = parse::parse_file(file, args.skip).map_err(|e| miette::miette!("{}", e))?;

    // Detect columns
    let map = detect::detect(&table.headers, args.kind);
    if map.is_empty() {
        return Err(miette::miette!(
            "No recognizable columns found for {} import. Headers seen: {}",
            args.kind,
            table.headers.join(", ")
        ));
    }

    if !global.quiet {
        println!("{} Detected columns:", style("→").cyan());
        for entry in map.entries() {
            println!(
                "   {:<18} {} column {} ({})",
                entry.field,
                style("←").dim(),
                entry.column + 1,
                style(&entry.header).yellow()
            );
        }
        let missing = map.missing(args.kind);
        if !missing.is_empty() {
            println!(
                "   {} no column for: {}",
                style("○").dim(),
                missing.join(", ")
            );
        }
        println!();
    }

    // Map and validate
    let mapped = detect::apply(&table, &map);
    let outcome = crate::import::validate::validate(args.kind, &mapped);

    for warning in &outcome.warnings {
        println!("{} {}", style("!").yellow(), warning);
    }
    for error in &outcome.errors {
        println!("{} {}", style("✗").red(), error);
    }

    if outcome.valid.is_empty() {
        println!();
        println!(
            "{} No valid rows out of {}. Nothing imported.",
            style("✗").red(),
            outcome.total
        );
        return Ok(());
    }

    // Import sequentially, best effort
    let importer = BatchImporter::new(&store, config.author()).dry_run(args.dry_run);
    let quiet = global.quiet;
    let mut progress = |pct: u8| {
        if !quiet {
            print!("\rImporting... {:>3}%", pct);
            let _ = std::io::stdout().flush();
        }
    };
    let result = importer
        .run(&outcome.valid, &mut progress)
        .map_err(|e| miette::miette!("{}", e))?;
    if !quiet {
        println!();
    }

    for error in &result.errors {
        println!("{} {}", style("✗").red(), error);
    }

    println!();
    if args.dry_run {
        println!(
            "{} Dry run: {} row(s) would import, {} would fail, {} invalid.",
            style("○").cyan(),
            result.success,
            result.failed,
            outcome.error_count()
        );
    } else {
        println!(
            "{} Imported {} row(s); {} failed, {} invalid.",
            style("✓").green(),
            style(result.success).cyan(),
            result.failed,
            outcome.error_count()
        );
    }
    Ok(())
}
