mod calendar;
mod config;
mod digest;
mod error;
mod startup;

use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "viikko")]
#[command(about = "Print a weekly agenda digest merging your calendar with holiday calendars")]
struct Cli {
    /// Number of days to forecast (defaults to FORECAST_DAYS or 30)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    days: Option<u32>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = Cli::parse();

    info!("Starting viikko");

    // Load configuration
    let config = startup::load_config()?;
    let forecast_days = cli.days.unwrap_or(config.forecast_days);

    // Render the digest
    startup::run_digest(config, forecast_days).await
}
