/// flowseed: sample data for workflow versions
///
/// Main entry point. Parses the command line, loads configuration from the
/// environment, and runs the requested subcommand:
/// - load-sample-data <workflow_slug> <version_slug>
/// - load-workflow <path>
/// - list-workflows

use clap::Parser;
use flowseed::{app, config::Config, Command};

/// Load sample data for workflow versions stored in SQLite
///
/// The database path comes from FLOWSEED_DATABASE_PATH and the log filter
/// from FLOWSEED_LOG.
#[derive(Parser)]
#[command(name = "flowseed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration (defaults to data/flowseed.db)
    let config = Config::default();

    app::start(config, cli.command).await
}
