use clap::Parser;
use tracing_subscriber::EnvFilter;

use standards_align::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("standards_align=debug,info")
    } else {
        EnvFilter::new("standards_align=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        cli::Commands::Extract(args) => {
            cli::extract::run(args, cli.format, cli.verbose, config)?;
        }
        cli::Commands::Codes(args) => {
            cli::codes::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Describe(args) => {
            cli::describe::run(args, cli.format, cli.verbose, config)?;
        }
        cli::Commands::Run(args) => {
            cli::run::run(args, cli.format, cli.verbose, config)?;
        }
    }

    Ok(())
}
