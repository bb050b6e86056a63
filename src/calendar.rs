// 🌐 Calendar-API Holiday Fetcher
// Google Calendar public holiday calendar -> HolidayRecord

use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use thiserror::Error;

use crate::holiday::HolidayRecord;
use crate::source::{CalendarEvent, CalendarEventsClient};

/// Public Indonesian holiday calendar
pub const HOLIDAY_CALENDAR_ID: &str = "id.indonesian#holiday@group.v.calendar.google.com";

/// Description text that marks an official national holiday
pub const NATIONAL_MARKER: &str = "Hari libur nasional";

// ============================================================================
// ERRORS
// ============================================================================

/// Every variant is recoverable: the run continues without this source.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar API rejected the credential (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("calendar API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("calendar API request failed: {0}")]
    Transport(String),

    #[error("could not decode calendar API response: {0}")]
    Decode(String),

    #[error("calendar API returned page token {0:?} twice")]
    RepeatedPageToken(String),

    #[error("invalid year {0} for calendar window")]
    InvalidYear(i32),
}

impl From<reqwest::Error> for CalendarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CalendarError::Decode(err.to_string())
        } else {
            CalendarError::Transport(err.to_string())
        }
    }
}

// ============================================================================
// WINDOW
// ============================================================================

/// Closed UTC window covering the whole calendar year:
/// Jan 1 00:00:00 through Dec 31 23:59:59
pub fn year_window(year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>), CalendarError> {
    let start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or(CalendarError::InvalidYear(year))?;
    let end = Utc
        .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
        .single()
        .ok_or(CalendarError::InvalidYear(year))?;
    Ok((start, end))
}

// ============================================================================
// FETCHER
// ============================================================================

pub struct CalendarFetcher<'a> {
    client: &'a dyn CalendarEventsClient,
    calendar_id: String,
}

impl<'a> CalendarFetcher<'a> {
    pub fn new(client: &'a dyn CalendarEventsClient) -> Self {
        CalendarFetcher {
            client,
            calendar_id: HOLIDAY_CALENDAR_ID.to_string(),
        }
    }

    /// Builder pattern: query a different calendar
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    /// Fetch every holiday event starting within `year`
    pub async fn fetch(
        &self,
        year: i32,
        credential: &str,
    ) -> Result<Vec<HolidayRecord>, CalendarError> {
        let (time_min, time_max) = year_window(year)?;
        let events = self
            .client
            .fetch_calendar_events(&self.calendar_id, time_min, time_max, credential)
            .await?;

        let total = events.len();
        let holidays: Vec<HolidayRecord> = events.into_iter().filter_map(to_holiday).collect();
        debug!(
            "Mapped {} of {} calendar events for {}",
            holidays.len(),
            total,
            year
        );
        Ok(holidays)
    }
}

/// Events without an all-day start date are dropped
pub fn to_holiday(event: CalendarEvent) -> Option<HolidayRecord> {
    let date = event.start_date.filter(|d| !d.is_empty())?;
    let is_national = event
        .description
        .as_deref()
        .is_some_and(|d| d.contains(NATIONAL_MARKER));

    Some(HolidayRecord::new(date, event.summary, is_national))
}

// ============================================================================
// TESTS
// ============================================================================
