use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tech_research::cli::parse_duration;
use tech_research::{AppConfig, Commands, ConfigOverrides, Container, ProviderKind, Router};

#[derive(Parser)]
#[command(name = "tech-research")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model provider: wiro or openrouter (overrides LLM_PROVIDER)
    #[arg(long, global = true, value_parser = parse_provider)]
    provider: Option<ProviderKind>,

    /// Seconds between task status checks (overrides WIRO_POLL_INTERVAL_SECS)
    #[arg(long, global = true, value_parser = parse_duration)]
    poll_interval: Option<Duration>,

    /// Seconds to wait for a task (overrides WIRO_POLL_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = parse_duration)]
    poll_timeout: Option<Duration>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_provider(value: &str) -> Result<ProviderKind, String> {
    ProviderKind::parse(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AppConfig::from_env()?.with_overrides(&ConfigOverrides {
        provider: cli.provider,
        poll_interval: cli.poll_interval,
        poll_timeout: cli.poll_timeout,
    });

    let container = Container::new(config);
    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
