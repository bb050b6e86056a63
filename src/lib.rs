// Holiday Aggregator - Core Library
// Exposes the extraction/merge core and its boundary adapters for the CLI and tests

pub mod holiday;
pub mod month;
pub mod source;
pub mod html;     // listing page extractor
pub mod calendar; // calendar API fetcher
pub mod merge;
pub mod pipeline;
pub mod output;
pub mod http;
pub mod config;

// Re-export commonly used types
pub use holiday::HolidayRecord;
pub use month::resolve_month;
pub use source::{
    CalendarEvent, CalendarEventsClient, DocumentFetcher, DocumentWriter, SourceType,
};
pub use html::{
    DatePolicy, DayField, DayParseError, ExtractError, ExtractOptions, HtmlExtractor,
    MalformedDayPolicy,
};
pub use calendar::{
    year_window, CalendarError, CalendarFetcher, HOLIDAY_CALENDAR_ID, NATIONAL_MARKER,
};
pub use merge::{merge, MergeEngine, MergeResult};
pub use pipeline::{listing_url, AggregationReport, Aggregator, SourceWarning};
pub use output::{decode_holidays, encode_holidays, output_path, write_holidays, FsWriter};
pub use http::HttpClient;
pub use config::{Cli, Config, API_KEY_ENV};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
