//! Lenient timestamp parsing for stored auction dates.
//!
//! Dates arrive as whatever the store holds: ISO strings with or without a
//! zone, bare dates, or partial dates. Anything unrecognised parses to
//! `None` and the caller decides what an invalid date means.
//!
//! Date-times without a zone are wall-clock times in the viewer's zone.
//! Date-only forms (`2024`, `2024-06`, `2024-06-01`) are UTC midnight.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored timestamp, reading zone-less date-times as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(raw, &Local)
}

/// Parse a stored timestamp, reading zone-less date-times in `tz`.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            // Skipped wall-clock times (DST gaps) have no instant.
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    parse_date_only(raw)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD`, `YYYY-MM` or a four-digit `YYYY`.
fn parse_date_only(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    let parts: Vec<&str> = raw.split('-').collect();
    match parts.as_slice() {
        &[year] if is_digits(year, 4) => NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1),
        &[year, month] if is_digits(year, 4) && is_digits(month, 2) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        _ => None,
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Short day/month/year rendering used on auction cards, in local time.
pub fn format_card_date(raw: &str) -> String {
    format_card_date_in(raw, &Local)
}

/// Short day/month/year rendering of `raw` as seen in `tz`.
pub fn format_card_date_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp_in(raw, tz) {
        Some(dt) => dt.with_timezone(tz).format("%-d/%-m/%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}
