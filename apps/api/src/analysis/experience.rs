//! Experience-span extraction: estimates whole years of work from a resume's experience section.

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::sections::{Section, Sections};

/// `<Month> <yyyy>` dash `<Month> <yyyy> | Present`. Hyphen, en dash and em dash all count.
static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-z]+\s+\d{4})\s*[-–—]\s*((?i:present)|[A-Z][a-z]+\s+\d{4})")
        .expect("date range pattern is valid")
});

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[derive(Debug, Error, PartialEq)]
pub enum SpanParseError {
    #[error("unrecognised month '{0}'")]
    UnknownMonth(String),

    #[error("malformed month-year '{0}'")]
    Malformed(String),
}

/// One period of work. `end == None` means the span is still open ("Present").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceSpan {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl ExperienceSpan {
    /// Whole calendar months between start and end; open spans end at `today`.
    /// Day-of-month is ignored. May be zero or negative.
    pub fn elapsed_months(&self, today: NaiveDate) -> i32 {
        let end = self.end.unwrap_or(today);
        (end.year() - self.start.year()) * 12 + (end.month() as i32 - self.start.month() as i32)
    }
}

/// Estimates total years of experience from a full resume, evaluated against the current date.
pub fn estimate_years(resume_text: &str) -> u32 {
    estimate_years_at(resume_text, Utc::now().date_naive())
}

/// Like `estimate_years`, with an explicit "now" used to resolve open spans.
pub fn estimate_years_at(resume_text: &str, today: NaiveDate) -> u32 {
    let sections = Sections::split(resume_text);
    let experience_text = sections.text(Section::Experience);

    let months = total_months(&extract_spans(&experience_text), today);
    let years = round_months_to_years(months);
    debug!(total_months = months, years, "estimated work experience");
    years
}

/// All date ranges found in `text`. Ranges whose dates do not parse are skipped.
pub fn extract_spans(text: &str) -> Vec<ExperienceSpan> {
    DATE_RANGE
        .captures_iter(text)
        .filter_map(|caps| {
            let (start, end) = (&caps[1], &caps[2]);
            match parse_span(start, end) {
                Ok(span) => Some(span),
                Err(e) => {
                    warn!("skipping experience span '{start}' to '{end}': {e}");
                    None
                }
            }
        })
        .collect()
}

/// Sums the months of every span with a positive duration.
///
/// Overlapping spans are counted in full each time: two concurrent jobs add up.
/// The total saturates at `u32::MAX`.
pub fn total_months(spans: &[ExperienceSpan], today: NaiveDate) -> u32 {
    spans
        .iter()
        .map(|span| span.elapsed_months(today))
        .filter(|&months| months > 0)
        .fold(0u32, |total, months| total.saturating_add(months.unsigned_abs()))
}

/// months / 12, rounded half-to-even (30 months → 2, 42 months → 4).
pub fn round_months_to_years(months: u32) -> u32 {
    let (years, rem) = (months / 12, months % 12);
    match rem.cmp(&6) {
        std::cmp::Ordering::Less => years,
        std::cmp::Ordering::Greater => years + 1,
        std::cmp::Ordering::Equal if years % 2 == 0 => years,
        std::cmp::Ordering::Equal => years + 1,
    }
}

fn parse_span(start: &str, end: &str) -> Result<ExperienceSpan, SpanParseError> {
    let start = parse_month_year(start)?;
    let end = if end.to_lowercase().contains("present") {
        None
    } else {
        Some(parse_month_year(end)?)
    };
    Ok(ExperienceSpan { start, end })
}

/// Parses "Jan 2019", "January 2019" or "Sept 2019" to the first day of that month.
fn parse_month_year(token: &str) -> Result<NaiveDate, SpanParseError> {
    let mut parts = token.split_whitespace();
    let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SpanParseError::Malformed(token.to_string()));
    };

    let month_lower = month.to_lowercase();
    let month_index = MONTHS
        .iter()
        .position(|name| {
            *name == month_lower || (month_lower.len() >= 3 && name.starts_with(&month_lower))
        })
        .ok_or_else(|| SpanParseError::UnknownMonth(month.to_string()))?;

    let year: i32 = year
        .parse()
        .map_err(|_| SpanParseError::Malformed(token.to_string()))?;

    NaiveDate::from_ymd_opt(year, month_index as u32 + 1, 1)
        .ok_or_else(|| SpanParseError::Malformed(token.to_string()))
}
