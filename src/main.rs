use clap::Parser;
use miette::Result;
use sitedeck::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => sitedeck::cli::commands::init::run(args),
        Commands::Proj(cmd) => sitedeck::cli::commands::proj::run(cmd, &global),
        Commands::Task(cmd) => sitedeck::cli::commands::task::run(cmd, &global),
        Commands::Quote(cmd) => sitedeck::cli::commands::quote::run(cmd, &global),
        Commands::Vendor(cmd) => sitedeck::cli::commands::vendor::run(cmd, &global),
        Commands::Budget(cmd) => sitedeck::cli::commands::budget::run(cmd, &global),
        Commands::Log(args) => sitedeck::cli::commands::log::run(args, &global),
        Commands::Import(args) => sitedeck::cli::commands::import::run(args, &global),
        Commands::Report(cmd) => sitedeck::cli::commands::report::run(cmd, &global),
    }
}
