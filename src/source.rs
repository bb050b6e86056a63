// 🔌 Source Capabilities - the seams between the core and the outside world
// The core only talks to HTTP and the filesystem through these traits

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calendar::CalendarError;

// ============================================================================
// SOURCE TYPE
// ============================================================================

/// SourceType - which upstream a record set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// HTML holiday listing (tanggalan.com)
    HolidayListing,
    /// Google Calendar public holiday calendar
    CalendarApi,
}

impl SourceType {
    /// Human-readable name for logs
    pub fn name(&self) -> &str {
        match self {
            SourceType::HolidayListing => "holiday listing page",
            SourceType::CalendarApi => "calendar API",
        }
    }

    /// Short code for report output
    pub fn code(&self) -> &str {
        match self {
            SourceType::HolidayListing => "html",
            SourceType::CalendarApi => "api",
        }
    }
}

// ============================================================================
// CALENDAR EVENT (wire-independent)
// ============================================================================

/// One event as returned by the calendar capability
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// All-day start date (`YYYY-MM-DD`), absent for timed or malformed events
    pub start_date: Option<String>,
    pub summary: String,
    pub description: Option<String>,
}

// ============================================================================
// CAPABILITY TRAITS
// ============================================================================

/// DocumentFetcher - retrieve raw document bytes by URL
///
/// Failure is a hard error for the source that asked.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// CalendarEventsClient - list single (pre-expanded) events in a time window
///
/// Failure is recoverable: callers fall back to an empty event list.
#[async_trait]
pub trait CalendarEventsClient: Send + Sync {
    async fn fetch_calendar_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        credential: &str,
    ) -> std::result::Result<Vec<CalendarEvent>, CalendarError>;
}

/// DocumentWriter - persist the final serialized payload
pub trait DocumentWriter {
    fn write_document(&self, path: &Path, payload: &[u8]) -> Result<()>;
}
