use clap::Parser;

use elastic_agent_bridge::cli::{self, Cli};
use elastic_agent_bridge::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize logging system; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(args.log_level.as_deref())?;

    tracing::info!("=== Elastic Agent Bridge Starting ===");

    cli::run(args).await?;

    tracing::info!("=== Elastic Agent Bridge Shutting Down ===");

    Ok(())
}
