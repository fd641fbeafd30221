//! Date parsing for report columns
//!
//! Reports export dates in whatever format the source system was configured
//! with, sometimes with a time of day attached. The configured formats are
//! tried first; format detection is the fallback.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::DateFormatConfig;

/// Date-time layouts accepted when a value carries a time of day
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

/// Parse a date string with multiple format attempts
///
/// A value with a time component (`"2024-06-01 10:30:00"`, `"06/01/2024 10:30 AM"`)
/// yields its date part.
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(date) = parse_date_only(s, config) {
        return Some(date);
    }

    if let Some(date) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|datetime| datetime.date())
    {
        return Some(date);
    }

    // Fall back to the leading token of a date-time value
    let head = s.split(['T', ' ']).next()?;
    if head.len() < s.len() {
        return parse_date_only(head, config);
    }

    None
}

fn parse_date_only(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    // Try all the provided formats
    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    // If enabled, try to detect the format based on string patterns
    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect the date format based on string patterns
///
/// Slash-separated dates are read month first, as US reports write them,
/// unless the first part cannot be a month.
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    // Check for ISO-like format with dashes (YYYY-MM-DD)
    if s.len() == 10 && s.chars().nth(4) == Some('-') && s.chars().nth(7) == Some('-') {
        return Some("%Y-%m-%d");
    }

    // Check for slashes
    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 {
            if parts[0].len() == 4 {
                return Some("%Y/%m/%d");
            }
            let year_format = match parts[2].len() {
                4 => "%Y",
                2 => "%y",
                _ => return None,
            };
            let first_num = parts[0].parse::<u8>().ok()?;
            return Some(match (first_num > 12, year_format) {
                (true, "%Y") => "%d/%m/%Y",
                (true, _) => "%d/%m/%y",
                (false, "%Y") => "%m/%d/%Y",
                (false, _) => "%m/%d/%y",
            });
        }
    }

    // Check for dots (DD.MM.YYYY)
    if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return Some("%d.%m.%Y");
        }
    }

    // Check for compact format (YYYYMMDD)
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d");
    }

    // No recognized format
    None
}
