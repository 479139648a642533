//! query-expander: interactive query expansion from the command line

use anyhow::Result;
use clap::Parser;
use query_expander::cli;
use query_expander::config::{path_resolver, ExpanderConfig};
use query_expander::QueryExpander;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// query-expander: rephrase questions with a hosted LLM
#[derive(Parser)]
#[command(name = "query-expander")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (default: $XDG_CONFIG_HOME/query-expander/config.toml)
    #[arg(short, long)]
    config: Option<String>,
}

async fn run(args: &Cli) -> Result<()> {
    let config_path = args
        .config
        .as_deref()
        .map(path_resolver::resolve_path)
        .transpose()?;
    let config = ExpanderConfig::load(config_path.as_deref())?;
    tracing::info!("Using model {} ({:?} mode)", config.model(), config.mode());

    let expander = QueryExpander::from_config(&config);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let asked = cli::run_session(&expander, stdin.lock(), &mut stdout).await?;
    tracing::debug!("Session finished after {} questions", asked);

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Logs go to stderr so they never mix with the interactive output
    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(&args).await {
        let _ = cli::print_fatal(&mut std::io::stdout(), &e);
    }
}
