use anyhow::{Context, Result};
use clap::Parser;
use log::{error, warn};

use holiday_aggregator::{
    write_holidays, Aggregator, Cli, Config, FsWriter, HttpClient,
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;
    let http = HttpClient::new(config.timeout)?;

    let mut aggregator = Aggregator::new(&http, config.extract.clone())
        .with_listing_url(config.listing_url.clone());
    if let Some(key) = &config.api_key {
        aggregator = aggregator.with_calendar(&http, key.clone());
    }

    let report = aggregator.run().await?;
    for warning in &report.warnings {
        warn!("{} source degraded: {}", warning.source.code(), warning.message);
    }

    let output_path = write_holidays(&FsWriter, &config.out_dir, config.year, &report.records)
        .with_context(|| format!("Could not save holidays for {}", config.year))?;

    println!(
        "Data for year {} has been saved to {}",
        config.year,
        output_path.display()
    );

    Ok(())
}
