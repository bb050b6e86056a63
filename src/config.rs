// ⚙️ Configuration - CLI flags + environment

use anyhow::{bail, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::html::{DatePolicy, ExtractOptions, MalformedDayPolicy};
use crate::pipeline::DEFAULT_LISTING_URL;

pub const API_KEY_ENV: &str = "GOOGLE_CALENDAR_API_KEY";

/// Years that fit the four-digit `YYYY` of the output dates
pub const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Aggregate a year's Indonesian public holidays into {year}.json
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Year to collect (defaults to the current year)
    pub year: Option<i32>,

    /// Output directory for the JSON file
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Google Calendar API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub gkey: Option<String>,

    /// Holiday listing URL; `{year}` is replaced with the requested year
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub html_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Keep rows with unreadable day numbers, using day 00
    #[arg(long, default_value_t = false)]
    pub lenient_days: bool,

    /// Keep dates that do not exist in the calendar (e.g. 30 Februari)
    #[arg(long, default_value_t = false)]
    pub keep_invalid_dates: bool,

    /// Skip the calendar API; no API key needed
    #[arg(long, default_value_t = false)]
    pub html_only: bool,
}

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub year: i32,
    pub out_dir: PathBuf,
    /// `None` when the calendar source is disabled
    pub api_key: Option<String>,
    pub listing_url: String,
    pub timeout: Duration,
    pub extract: ExtractOptions,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Config> {
        let year = cli.year.unwrap_or_else(|| Local::now().year());
        if !YEARS.contains(&year) {
            bail!(
                "year {} is out of range ({}..={})",
                year,
                YEARS.start(),
                YEARS.end()
            );
        }

        let api_key = if cli.html_only {
            None
        } else {
            match cli.gkey.filter(|k| !k.trim().is_empty()) {
                Some(key) => Some(key),
                None => bail!(
                    "API key is required (use --gkey or set {}), or pass --html-only",
                    API_KEY_ENV
                ),
            }
        };

        let malformed_day = if cli.lenient_days {
            MalformedDayPolicy::Placeholder
        } else {
            MalformedDayPolicy::Skip
        };
        let dates = if cli.keep_invalid_dates {
            DatePolicy::PassThrough
        } else {
            DatePolicy::Strict
        };

        Ok(Config {
            year,
            out_dir: cli.out_dir,
            api_key,
            listing_url: cli.html_url,
            timeout: Duration::from_secs(cli.timeout_secs),
            extract: ExtractOptions::new(year)
                .with_malformed_day(malformed_day)
                .with_date_policy(dates),
        })
    }
}
