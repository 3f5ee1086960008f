use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod index;
mod matching;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("ref_repeats=debug,info")
    } else {
        EnvFilter::new("ref_repeats=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Tandem(args) => {
            cli::tandem::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Revcomp(args) => {
            cli::revcomp::run(args, cli.format)?;
        }
    }

    Ok(())
}
