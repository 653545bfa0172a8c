//! Gather-cycle entry point.
//!
//! Runs the pipeline once (or repeatedly with `--interval`) and writes the
//! gathered series as JSON to stdout or a file. Exposition to a metrics
//! backend is left to whatever consumes that output.

use clap::Parser;
use color_eyre::Result;
use std::time::Duration;
use tracing::{
    error,
    info,
};
use ultracdn_stats_gatherer::{
    config::DEFAULT_API_URL,
    Config,
    MetricSeries,
    Orchestrator,
};

#[derive(Parser)]
#[command(name = "ultracdn-stats-gatherer")]
#[command(about = "UltraCDN delivery metrics gatherer")]
#[command(version)]
struct Cli {
    /// Base URL of the UltraCDN management API
    #[arg(long, env = "ULTRACDN_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// API username
    #[arg(long, env = "ULTRACDN_USERNAME")]
    username: String,

    /// API password
    #[arg(long, env = "ULTRACDN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Per-request deadline (e.g. "30s")
    #[arg(long, default_value = "30s")]
    timeout: String,

    /// Repeat gather cycles at this interval (e.g. "1m"); runs once when omitted
    #[arg(long)]
    interval: Option<String>,

    /// Maximum number of distribution groups gathered concurrently
    #[arg(long, default_value_t = 4)]
    max_concurrent_gathers: usize,

    /// Write the gathered series as JSON to this file instead of stdout
    #[arg(long)]
    output_file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("ultracdn_stats_gatherer={log_level}"))
        .init();

    color_eyre::install()?;

    let timeout = parse_duration(&cli.timeout)?;
    let interval = cli.interval.as_deref().map(parse_duration).transpose()?;

    let config = Config::new(
        &cli.api_url,
        cli.username,
        cli.password,
        timeout,
        cli.max_concurrent_gathers,
    )?;
    info!("API URL: {}", config.api_url);
    info!("Request timeout: {timeout:?}");

    let mut orchestrator = Orchestrator::new(&config)?;

    match interval {
        None => {
            let series = orchestrator.run_cycle().await?;
            output(&series, cli.output_file.as_deref()).await?;
        }
        Some(every) => {
            info!("Gathering every {every:?}");
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                // The cycle is a single attempt; on a failure we report and
                // wait for the next tick rather than retrying immediately.
                match orchestrator.run_cycle().await {
                    Ok(series) => output(&series, cli.output_file.as_deref()).await?,
                    Err(err) => error!(%err, "gather cycle failed"),
                }
            }
        }
    }

    Ok(())
}

async fn output(series: &[MetricSeries], output_file: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(series)?;
    match output_file {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            info!("Gathered series written to {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn parse_duration(duration_str: &str) -> Result<Duration> {
    humantime::parse_duration(duration_str)
        .map_err(|e| eyre::eyre!("Invalid duration '{}': {}", duration_str, e))
}
