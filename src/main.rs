use clap::Parser;
use tracing_subscriber::EnvFilter;

use contam_bench::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag. Reports go to stderr so
    // tables written to stdout stay clean.
    let filter = if cli.verbose {
        EnvFilter::new("contam_bench=debug,info")
    } else {
        EnvFilter::new("contam_bench=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Cigar(args) => {
            cli::cigar::run(args, cli.format)?;
        }
        cli::Commands::Score(args) => {
            cli::score::run(args, cli.format)?;
        }
        cli::Commands::Stats(args) => {
            cli::stats::run(args, cli.format)?;
        }
    }

    Ok(())
}
