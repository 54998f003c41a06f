//! Day-month-year date normalization.
//!
//! Converts strings like `"14 March 1990"` into ISO-8601 UTC timestamps
//! (`"1990-03-14T00:00:00.000Z"`). Anything that cannot be converted is kept
//! as-is; conversion never fails a record.

use chrono::{NaiveDate, SecondsFormat};
use log::warn;
use serde_json::Value;
use thiserror::Error;

use crate::config::DATE_FIELD;
use crate::error_handling::{ImportStats, InfoType, WarningType};
use crate::store::Record;

/// English month names, case-sensitive.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Why a string could not be read as `"<day> <MonthName> <year>"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("expected 3 space-separated parts, found {0}")]
    TokenCount(usize),
    #[error("invalid day '{0}'")]
    InvalidDay(String),
    #[error("unknown month '{0}'")]
    UnknownMonth(String),
    #[error("invalid year '{0}'")]
    InvalidYear(String),
    #[error("no such calendar date")]
    NoSuchDate,
}

/// Parses `"<day> <MonthName> <year>"` into a calendar date.
pub fn parse_day_month_year(input: &str) -> Result<NaiveDate, DateParseError> {
    let parts: Vec<&str> = input.split(' ').collect();
    let [day, month, year] = parts[..] else {
        return Err(DateParseError::TokenCount(parts.len()));
    };

    let day: u32 = day
        .parse()
        .map_err(|_| DateParseError::InvalidDay(day.to_string()))?;
    let month = MONTHS
        .iter()
        .position(|m| *m == month)
        .ok_or_else(|| DateParseError::UnknownMonth(month.to_string()))?;
    let year: i32 = year
        .parse()
        .ok()
        .filter(|y| (0..=9999).contains(y))
        .ok_or_else(|| DateParseError::InvalidYear(year.to_string()))?;
    // 0..=99 are read as 1900..=1999
    let year = if year <= 99 { 1900 + year } else { year };

    // position() is < 12, so the cast is lossless
    NaiveDate::from_ymd_opt(year, month as u32 + 1, day).ok_or(DateParseError::NoSuchDate)
}

fn to_iso_utc(date: NaiveDate) -> String {
    date.and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Converts a `"D Month YYYY"` string to an ISO-8601 UTC timestamp.
///
/// - absent or empty input yields `None`
/// - input that is not three space-separated tokens is returned unchanged
/// - a malformed day/year, unknown month, or impossible date is logged as a
///   warning and returned unchanged
pub fn convert_date_string(date: Option<&str>) -> Option<String> {
    normalize_date(date, None)
}

fn normalize_date(date: Option<&str>, stats: Option<&ImportStats>) -> Option<String> {
    let date = date.filter(|d| !d.is_empty())?;
    match parse_day_month_year(date) {
        Ok(parsed) => {
            if let Some(stats) = stats {
                stats.increment_info(InfoType::DateConverted);
            }
            Some(to_iso_utc(parsed))
        }
        Err(DateParseError::TokenCount(_)) => Some(date.to_string()),
        Err(e) => {
            warn!("Could not parse date: {date} ({e})");
            if let Some(stats) = stats {
                stats.increment_warning(WarningType::UnparseableDate);
            }
            Some(date.to_string())
        }
    }
}

/// Rewrites a record's `date` field in place.
///
/// A missing, null, or empty date becomes an explicit `null`. Non-string
/// values are left alone with a warning.
pub fn convert_date_field(record: &mut Record, stats: &ImportStats) {
    let converted = match record.get(DATE_FIELD) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => normalize_date(Some(s), Some(stats)),
        Some(other) => {
            warn!("Could not parse date: {other} (not a string)");
            stats.increment_warning(WarningType::UnparseableDate);
            return;
        }
    };
    record.insert(
        DATE_FIELD.to_string(),
        converted.map_or(Value::Null, Value::String),
    );
}
