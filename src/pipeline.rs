// 🔄 Aggregation Pipeline
// listing page -> extract ─┐
//                          ├─> merge (listing wins) -> sorted records
// calendar API -> fetch ───┘

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::calendar::{CalendarError, CalendarFetcher};
use crate::holiday::HolidayRecord;
use crate::html::{ExtractOptions, HtmlExtractor};
use crate::merge::MergeEngine;
use crate::source::{CalendarEventsClient, DocumentFetcher, SourceType};

pub const DEFAULT_LISTING_URL: &str = "https://www.tanggalan.com/{year}";

/// Substitute `{year}` in a listing URL template
pub fn listing_url(template: &str, year: i32) -> String {
    template.replace("{year}", &year.to_string())
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SourceWarning {
    pub source: SourceType,
    pub message: String,
}

/// Everything a run produced; `records` is what gets written
#[derive(Debug, Clone, Serialize)]
pub struct AggregationReport {
    pub year: i32,
    pub records: Vec<HolidayRecord>,
    pub listing_count: usize,
    pub calendar_count: usize,
    pub calendar_dropped: usize,
    pub warnings: Vec<SourceWarning>,
}

impl AggregationReport {
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} holidays ({} from listing, {} from calendar API, {} calendar duplicates dropped, {} warnings)",
            self.year,
            self.records.len(),
            self.listing_count,
            self.calendar_count - self.calendar_dropped,
            self.calendar_dropped,
            self.warnings.len()
        )
    }
}

// ============================================================================
// AGGREGATOR
// ============================================================================

pub struct Aggregator<'a> {
    documents: &'a dyn DocumentFetcher,
    /// `None` runs listing-only
    calendar: Option<(&'a dyn CalendarEventsClient, String)>,
    listing_url_template: String,
    options: ExtractOptions,
}

impl<'a> Aggregator<'a> {
    pub fn new(documents: &'a dyn DocumentFetcher, options: ExtractOptions) -> Self {
        Aggregator {
            documents,
            calendar: None,
            listing_url_template: DEFAULT_LISTING_URL.to_string(),
            options,
        }
    }

    /// Builder pattern: enable the calendar API source
    pub fn with_calendar(
        mut self,
        client: &'a dyn CalendarEventsClient,
        credential: impl Into<String>,
    ) -> Self {
        self.calendar = Some((client, credential.into()));
        self
    }

    /// Builder pattern: override the listing URL (`{year}` is substituted)
    pub fn with_listing_url(mut self, template: impl Into<String>) -> Self {
        self.listing_url_template = template.into();
        self
    }

    /// Run both sources concurrently and merge.
    ///
    /// Listing failures abort the run. Calendar failures are logged and
    /// recorded as warnings; the run then uses listing records only.
    pub async fn run(&self) -> Result<AggregationReport> {
        let year = self.options.year;

        let (listing, calendar) = tokio::join!(self.fetch_listing(), self.fetch_calendar());
        let listing = listing?;

        let mut warnings = Vec::new();
        let calendar = match calendar {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Warning: could not fetch {} holidays: {}",
                    SourceType::CalendarApi.name(),
                    e
                );
                warnings.push(SourceWarning {
                    source: SourceType::CalendarApi,
                    message: e.to_string(),
                });
                Vec::new()
            }
        };

        let listing_count = listing.len();
        let calendar_count = calendar.len();
        let merged = MergeEngine::new().merge(listing, calendar);

        let report = AggregationReport {
            year,
            records: merged.records,
            listing_count,
            calendar_count,
            calendar_dropped: merged.secondary_dropped,
            warnings,
        };
        info!("{}", report.summary());
        Ok(report)
    }

    async fn fetch_listing(&self) -> Result<Vec<HolidayRecord>> {
        let url = listing_url(&self.listing_url_template, self.options.year);
        let markup = self
            .documents
            .fetch_bytes(&url)
            .await
            .with_context(|| format!("Failed to fetch {}", SourceType::HolidayListing.name()))?;

        let holidays = HtmlExtractor::new(self.options.clone())
            .extract(&markup)
            .with_context(|| {
                format!(
                    "Failed to parse {} at {}",
                    SourceType::HolidayListing.name(),
                    url
                )
            })?;
        info!("Extracted {} holidays from {}", holidays.len(), url);
        Ok(holidays)
    }

    async fn fetch_calendar(&self) -> Result<Vec<HolidayRecord>, CalendarError> {
        match &self.calendar {
            Some((client, credential)) => {
                CalendarFetcher::new(*client)
                    .fetch(self.options.year, credential)
                    .await
            }
            None => Ok(Vec::new()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
