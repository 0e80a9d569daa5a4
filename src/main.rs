use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tagcheck::config::CheckConfig;

#[derive(Parser)]
#[command(name = "tagcheck")]
#[command(version, about = "Report newer versions of tracked container images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check for newer images in the source registry
    Check,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn check(config: CheckConfig) -> anyhow::Result<()> {
    tokio::select! {
        result = tagcheck::check::run(&config) => {
            result.context("check")?;
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => Err(anyhow!("check: interrupted")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Check => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(check(CheckConfig::from_env())),
    }
}
