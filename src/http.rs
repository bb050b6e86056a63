// 📡 HTTP Adapter - reqwest implementations of the fetch capabilities
// One attempt per request; no retry

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

use crate::calendar::CalendarError;
use crate::source::{CalendarEvent, CalendarEventsClient, DocumentFetcher};

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3/calendars";
const MAX_RESULTS: &str = "2500";

// ============================================================================
// API response types (Google Calendar v3 events.list)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsListResponse {
    #[serde(default)]
    items: Vec<EventRaw>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRaw {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    start: Option<EventDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDate {
    date: Option<String>,
}

impl From<EventRaw> for CalendarEvent {
    fn from(raw: EventRaw) -> Self {
        CalendarEvent {
            start_date: raw.start.and_then(|s| s.date),
            summary: raw.summary.unwrap_or_default(),
            description: raw.description,
        }
    }
}

// ============================================================================
// CLIENT
// ============================================================================

pub struct HttpClient {
    client: reqwest::Client,
    calendar_base: String,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("holiday-aggregator/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(HttpClient {
            client,
            calendar_base: CALENDAR_API_BASE.to_string(),
        })
    }

    /// Builder pattern: point the calendar API at another host
    pub fn with_calendar_base(mut self, base: impl Into<String>) -> Self {
        self.calendar_base = base.into();
        self
    }

    fn events_url(&self, calendar_id: &str) -> Result<reqwest::Url, CalendarError> {
        let mut url = reqwest::Url::parse(&self.calendar_base)
            .map_err(|e| CalendarError::Transport(format!("invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| CalendarError::Transport("API base URL cannot have a path".into()))?
            .push(calendar_id)
            .push("events");
        Ok(url)
    }
}

#[async_trait]
impl DocumentFetcher for HttpClient {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?
            .error_for_status()
            .with_context(|| format!("Unexpected status from {}", url))?;

        let body = resp
            .bytes()
            .await
            .with_context(|| format!("Failed to read body from {}", url))?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CalendarEventsClient for HttpClient {
    async fn fetch_calendar_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        credential: &str,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let url = self.events_url(calendar_id)?;
        let time_min = time_min.to_rfc3339_opts(SecondsFormat::Secs, true);
        let time_max = time_max.to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut events = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        loop {
            let mut request = self.client.get(url.clone()).query(&[
                ("key", credential),
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("maxResults", MAX_RESULTS),
            ]);

            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let resp = request.send().await?;

            let status = resp.status();
            if matches!(
                status,
                reqwest::StatusCode::BAD_REQUEST
                    | reqwest::StatusCode::UNAUTHORIZED
                    | reqwest::StatusCode::FORBIDDEN
            ) {
                return Err(CalendarError::Unauthorized {
                    status: status.as_u16(),
                });
            }
            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                return Err(CalendarError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body: EventsListResponse = resp.json().await?;
            events.extend(body.items.into_iter().map(CalendarEvent::from));

            page_token = match body.next_page_token {
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    return Err(CalendarError::RepeatedPageToken(token));
                }
                Some(token) => Some(token),
                None => break,
            };
        }

        debug!("Calendar {} returned {} events", calendar_id, events.len());
        Ok(events)
    }
}

// ============================================================================
// TESTS
// ============================================================================
