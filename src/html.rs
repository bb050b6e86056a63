// 🏗️ HTML Holiday Extractor
// One `article ul` per month: first `li a` is the month label, `tbody tr` rows
// hold (day-or-range, description) pairs

use chrono::NaiveDate;
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::holiday::HolidayRecord;
use crate::month::resolve_month;

const SECTION_SELECTOR: &str = "article ul";
const LABEL_SELECTOR: &str = "li a";
const ROW_SELECTOR: &str = "tbody tr";
const CELL_SELECTOR: &str = "td";

// ============================================================================
// ERRORS
// ============================================================================

/// Document-level failures. Row-level problems never surface here.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("no month sections found in document")]
    NoMonthSections,

    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

/// Why a day cell could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayParseError {
    #[error("empty day cell")]
    Empty,

    #[error("{0:?} is not a day number")]
    NotANumber(String),

    #[error("day must be at least 1")]
    Zero,

    #[error("day {0} is past the end of any month")]
    OutOfRange(u32),
}

/// No month has more days than this
pub const MAX_DAY: u32 = 31;

// ============================================================================
// DAY FIELD
// ============================================================================

/// Parsed first cell of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayField {
    Single(u32),
    /// Inclusive on both ends
    Range { start: u32, end: u32 },
}

impl DayField {
    /// Parse `"17"` or `"28-31"`. Only the first two `-` parts count,
    /// so `"1-2-3"` is the range 1..=2.
    pub fn parse(text: &str) -> Result<DayField, DayParseError> {
        let mut parts = text.split('-');
        let first = parts.next().unwrap_or_default();
        match parts.next() {
            Some(end) => Ok(DayField::Range {
                start: parse_day(first)?,
                end: parse_day(end)?,
            }),
            None => parse_day(first).map(DayField::Single),
        }
    }

    /// Every unparseable or out-of-range endpoint becomes day 0
    fn parse_or_zero(text: &str) -> DayField {
        let day = |s: &str| parse_day(s).unwrap_or(0);
        let mut parts = text.split('-');
        let first = parts.next().unwrap_or_default();
        match parts.next() {
            Some(end) => DayField::Range {
                start: day(first),
                end: day(end),
            },
            None => DayField::Single(day(first)),
        }
    }

    /// Expand into individual days; a reversed range yields nothing
    pub fn days(&self) -> std::ops::RangeInclusive<u32> {
        match *self {
            DayField::Single(day) => day..=day,
            DayField::Range { start, end } => start..=end,
        }
    }
}

fn parse_day(text: &str) -> Result<u32, DayParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DayParseError::Empty);
    }
    match text.parse::<u32>() {
        Ok(0) => Err(DayParseError::Zero),
        Ok(day) if day > MAX_DAY => Err(DayParseError::OutOfRange(day)),
        Ok(day) => Ok(day),
        Err(e) if matches!(e.kind(), std::num::IntErrorKind::PosOverflow) => {
            Err(DayParseError::OutOfRange(u32::MAX))
        }
        Err(_) => Err(DayParseError::NotANumber(text.to_string())),
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// What to do with a row whose day cell does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedDayPolicy {
    /// Drop the row and log a warning
    #[default]
    Skip,
    /// Keep the row, unreadable endpoints become day `00`
    Placeholder,
}

/// What to do with a day that does not exist in the month (e.g. 30 Februari)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// Drop the date and log a warning
    #[default]
    Strict,
    /// Emit it as written
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub year: i32,
    pub malformed_day: MalformedDayPolicy,
    pub dates: DatePolicy,
}

impl ExtractOptions {
    pub fn new(year: i32) -> Self {
        ExtractOptions {
            year,
            malformed_day: MalformedDayPolicy::default(),
            dates: DatePolicy::default(),
        }
    }

    /// Builder pattern: set malformed-day handling
    pub fn with_malformed_day(mut self, policy: MalformedDayPolicy) -> Self {
        self.malformed_day = policy;
        self
    }

    /// Builder pattern: set calendar validation
    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.dates = policy;
        self
    }
}

// ============================================================================
// EXTRACTOR
// ============================================================================

pub struct HtmlExtractor {
    options: ExtractOptions,
}

impl HtmlExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        HtmlExtractor { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Parse a holiday listing page into records, in document order.
    ///
    /// Sections with an unknown month label are skipped. Rows within a
    /// section are never deduplicated against each other.
    pub fn extract(&self, markup: &[u8]) -> Result<Vec<HolidayRecord>, ExtractError> {
        let text = std::str::from_utf8(markup)?;
        let document = Html::parse_document(text);

        let sections = selector(SECTION_SELECTOR)?;
        let label = selector(LABEL_SELECTOR)?;
        let rows = selector(ROW_SELECTOR)?;
        let cells = selector(CELL_SELECTOR)?;

        let mut holidays = Vec::new();
        let mut section_count = 0;

        for section in document.select(&sections) {
            section_count += 1;

            let month_text = section
                .select(&label)
                .next()
                .map(element_text)
                .unwrap_or_default();

            let Some(month) = resolve_month(&month_text) else {
                debug!("Skipping section with unrecognized month label {:?}", month_text);
                continue;
            };

            for row in section.select(&rows) {
                let mut row_cells = row.select(&cells);
                let day_text = row_cells.next().map(element_text).unwrap_or_default();
                let description = row_cells.next().map(element_text).unwrap_or_default();

                self.push_row(&mut holidays, month, &day_text, &description);
            }
        }

        if section_count == 0 {
            return Err(ExtractError::NoMonthSections);
        }

        debug!(
            "Extracted {} holidays from {} sections",
            holidays.len(),
            section_count
        );
        Ok(holidays)
    }

    fn push_row(
        &self,
        holidays: &mut Vec<HolidayRecord>,
        month: &str,
        day_text: &str,
        description: &str,
    ) {
        let field = match DayField::parse(day_text) {
            Ok(field) => field,
            Err(e) => match self.options.malformed_day {
                MalformedDayPolicy::Skip => {
                    warn!(
                        "Skipping row {:?} in month {}: {}",
                        description, month, e
                    );
                    return;
                }
                MalformedDayPolicy::Placeholder => DayField::parse_or_zero(day_text),
            },
        };

        for day in field.days() {
            if !self.is_acceptable(month, day) {
                warn!(
                    "Dropping nonexistent date {} for {:?}",
                    HolidayRecord::format_date(self.options.year, month, day),
                    description
                );
                continue;
            }

            holidays.push(HolidayRecord::new(
                HolidayRecord::format_date(self.options.year, month, day),
                description,
                true,
            ));
        }
    }

    /// Day 0 only appears under the placeholder policy and is kept as-is
    fn is_acceptable(&self, month: &str, day: u32) -> bool {
        if self.options.dates == DatePolicy::PassThrough || day == 0 {
            return true;
        }
        month
            .parse::<u32>()
            .ok()
            .and_then(|m| NaiveDate::from_ymd_opt(self.options.year, m, day))
            .is_some()
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/tanggalan_2025.html");

    fn month_section(label: &str, rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(day, desc)| format!("<tr><td>{}</td><td>{}</td></tr>", day, desc))
            .collect();
        format!(
            "<ul><li><a href=\"#\">{}</a></li><li><table><tbody>{}</tbody></table></li></ul>",
            label, body
        )
    }

    fn page(sections: &[String]) -> String {
        format!(
            "<html><body><article>{}</article></body></html>",
            sections.concat()
        )
    }

    fn extract(html: &str, options: ExtractOptions) -> Vec<HolidayRecord> {
        HtmlExtractor::new(options).extract(html.as_bytes()).unwrap()
    }

    #[test]
    fn test_day_field_single() {
        assert_eq!(DayField::parse("17"), Ok(DayField::Single(17)));
        assert_eq!(DayField::parse(" 5 "), Ok(DayField::Single(5)));
    }

    #[test]
    fn test_day_field_range() {
        assert_eq!(
            DayField::parse("28 - 31"),
            Ok(DayField::Range { start: 28, end: 31 })
        );
    }

    #[test]
    fn test_day_field_errors() {
        assert_eq!(DayField::parse(""), Err(DayParseError::Empty));
        assert_eq!(DayField::parse("0"), Err(DayParseError::Zero));
        assert_eq!(
            DayField::parse("x"),
            Err(DayParseError::NotANumber("x".to_string()))
        );
        assert_eq!(DayField::parse("3-"), Err(DayParseError::Empty));
        assert_eq!(DayField::parse("32"), Err(DayParseError::OutOfRange(32)));
    }

    #[test]
    fn test_day_field_extra_dash_parts_ignored() {
        assert_eq!(
            DayField::parse("1-2-3"),
            Ok(DayField::Range { start: 1, end: 2 })
        );
    }

    #[test]
    fn test_range_end_out_of_bounds() {
        assert_eq!(
            DayField::parse("1-4294967295"),
            Err(DayParseError::OutOfRange(4294967295))
        );
        assert_eq!(
            DayField::parse("1-99999999999"),
            Err(DayParseError::OutOfRange(u32::MAX))
        );

        let html = page(&[month_section(
            "Januari",
            &[("1-300000000", "Rusak"), ("2", "Normal")],
        )]);
        let holidays = extract(&html, ExtractOptions::new(2025));
        assert_eq!(holidays, vec![HolidayRecord::new("2025-01-02", "Normal", true)]);

        let lenient = ExtractOptions::new(2025)
            .with_malformed_day(MalformedDayPolicy::Placeholder)
            .with_date_policy(DatePolicy::PassThrough);
        let holidays = extract(&html, lenient);
        let dates: Vec<&str> = holidays.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-02"]);
    }

    #[test]
    fn test_multi_dash_row_uses_first_two_parts() {
        let html = page(&[month_section("Juni", &[("1-2-3", "Libur")])]);
        let holidays = extract(&html, ExtractOptions::new(2025));

        let dates: Vec<&str> = holidays.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-06-01", "2025-06-02"]);
    }

    #[test]
    fn test_single_day_emits_one_record() {
        let html = page(&[month_section("8Agustus", &[("17", "Hari Kemerdekaan")])]);
        let holidays = extract(&html, ExtractOptions::new(2025));

        assert_eq!(
            holidays,
            vec![HolidayRecord::new("2025-08-17", "Hari Kemerdekaan", true)]
        );
    }

    #[test]
    fn test_range_expands_inclusive() {
        let html = page(&[month_section("3Maret", &[("28-31", "Idul Fitri")])]);
        let holidays = extract(&html, ExtractOptions::new(2025));

        assert_eq!(holidays.len(), 4);
        let dates: Vec<&str> = holidays.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2025-03-28", "2025-03-29", "2025-03-30", "2025-03-31"]
        );
        assert!(holidays.iter().all(|h| h.name == "Idul Fitri" && h.is_national));
    }

    #[test]
    fn test_range_count_matches_span() {
        for (start, end) in [(1u32, 1u32), (1, 2), (3, 9), (10, 20)] {
            let day_text = format!("{}-{}", start, end);
            let html = page(&[month_section("Juni", &[(&day_text, "Libur")])]);
            let holidays = extract(&html, ExtractOptions::new(2025));

            assert_eq!(holidays.len() as u32, end - start + 1);
            for (offset, holiday) in holidays.iter().enumerate() {
                let expected = HolidayRecord::format_date(2025, "06", start + offset as u32);
                assert_eq!(holiday.date, expected);
            }
        }
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let html = page(&[month_section("Mei", &[("9-3", "Terbalik")])]);
        assert!(extract(&html, ExtractOptions::new(2025)).is_empty());
    }

    #[test]
    fn test_unknown_month_section_skipped() {
        let html = page(&[
            month_section("Bulan Baru", &[("1", "Hilang")]),
            month_section("1Januari", &[("1", "Tahun Baru Masehi")]),
        ]);
        let holidays = extract(&html, ExtractOptions::new(2025));

        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].date, "2025-01-01");
    }

    #[test]
    fn test_within_source_duplicates_kept() {
        let html = page(&[month_section(
            "Maret",
            &[("29", "Hari Suci Nyepi"), ("29", "Cuti Bersama Nyepi")],
        )]);
        let holidays = extract(&html, ExtractOptions::new(2025));

        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].date, holidays[1].date);
    }

    #[test]
    fn test_malformed_day_skipped_by_default() {
        let html = page(&[month_section(
            "April",
            &[("??", "Rusak"), ("18", "Wafat Isa Almasih")],
        )]);
        let holidays = extract(&html, ExtractOptions::new(2025));

        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].name, "Wafat Isa Almasih");
    }

    #[test]
    fn test_malformed_day_placeholder() {
        let html = page(&[month_section("April", &[("??", "Rusak"), ("x-2", "Separuh")])]);
        let options =
            ExtractOptions::new(2025).with_malformed_day(MalformedDayPolicy::Placeholder);
        let holidays = extract(&html, options);

        let dates: Vec<&str> = holidays.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2025-04-00", "2025-04-00", "2025-04-01", "2025-04-02"]
        );
    }

    #[test]
    fn test_nonexistent_date_dropped_when_strict() {
        let html = page(&[month_section("Februari", &[("27-30", "Panjang")])]);
        let holidays = extract(&html, ExtractOptions::new(2025));

        let dates: Vec<&str> = holidays.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-02-27", "2025-02-28"]);
    }

    #[test]
    fn test_nonexistent_date_kept_with_pass_through() {
        let html = page(&[month_section("Februari", &[("30", "Tidak Ada")])]);
        let options = ExtractOptions::new(2025).with_date_policy(DatePolicy::PassThrough);
        let holidays = extract(&html, options);

        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].date, "2025-02-30");
    }

    #[test]
    fn test_leap_day_respects_year() {
        let html = page(&[month_section("Februari", &[("29", "Kabisat")])]);
        assert_eq!(extract(&html, ExtractOptions::new(2024)).len(), 1);
        assert!(extract(&html, ExtractOptions::new(2025)).is_empty());
    }

    #[test]
    fn test_missing_description_is_empty_name() {
        let html = page(&[
            "<ul><li><a>Juli</a></li><table><tbody><tr><td>6</td></tr></tbody></table></ul>"
                .to_string(),
        ]);
        let holidays = extract(&html, ExtractOptions::new(2025));

        assert_eq!(holidays, vec![HolidayRecord::new("2025-07-06", "", true)]);
    }

    #[test]
    fn test_no_sections_is_hard_failure() {
        let extractor = HtmlExtractor::new(ExtractOptions::new(2025));
        let result = extractor.extract(b"<html><body><p>Not found</p></body></html>");
        assert!(matches!(result, Err(ExtractError::NoMonthSections)));
    }

    #[test]
    fn test_invalid_utf8_is_hard_failure() {
        let extractor = HtmlExtractor::new(ExtractOptions::new(2025));
        let result = extractor.extract(&[0x3c, 0xff, 0xfe, 0x3e]);
        assert!(matches!(result, Err(ExtractError::InvalidEncoding(_))));
    }

    #[test]
    fn test_fixture_page() {
        let holidays = extract(FIXTURE, ExtractOptions::new(2025));

        // Januari 2, Maret 1 + 4 (range), April 1, Mei 1, Juni 1, Agustus 1, Desember 2
        assert_eq!(holidays.len(), 13);
        assert_eq!(holidays[0], HolidayRecord::new("2025-01-01", "Tahun Baru Masehi", true));
        assert!(holidays
            .iter()
            .any(|h| h.date == "2025-03-31" && h.name == "Hari Raya Idul Fitri"));
        assert!(holidays.iter().any(|h| h.date == "2025-12-25"));
        assert!(holidays.iter().all(|h| h.is_national));
    }
}
