use std::fmt::Display;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const ISO_DATE: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Calendar date of `at` in its own timezone, never the UTC date.
pub fn format_local_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(ISO_DATE).to_string()
}

pub fn today_local() -> String {
    format_local_date(&Local::now())
}

/// Strict `YYYY-MM-DD`; the backend rejects anything else.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, ISO_DATE).ok()
}

pub fn shift_date(raw: &str, days: i64) -> Option<String> {
    let date = parse_iso_date(raw)?;
    let shifted = date.checked_add_signed(Duration::days(days))?;
    Some(shifted.format(ISO_DATE).to_string())
}

pub fn format_display_time<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(DISPLAY_FORMAT).to_string()
}

/// Parse a kickoff string the way the API tends to send it.
///
/// Offsets are honoured. A date-time without an offset is local time, while a
/// bare `YYYY-MM-DD` is UTC midnight, the same split a browser's date parser makes.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    const NAIVE_FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    let date = parse_iso_date(raw)?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}

pub fn timestamp_from_millis(ms: i64) -> Option<DateTime<Local>> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&Local))
}
