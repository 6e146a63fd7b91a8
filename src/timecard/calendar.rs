//! Civil-calendar helpers for week documents.
//!
//! Every date here is a `NaiveDate` already resolved in the caller's
//! timezone; nothing in this module looks at UTC or the system clock except
//! `today_in`.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

/// Date format used by the portal for day records and query parameters.
pub const MDY_FORMAT: &str = "%m/%d/%Y";

/// Date format accepted on the command line.
pub const YMD_FORMAT: &str = "%Y-%m-%d";

static YMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("YMD pattern is a valid regex"));

/// Strict zero-padded `YYYY-MM-DD`; signed or five-digit years are rejected.
pub fn parse_ymd(s: &str) -> AppResult<NaiveDate> {
    let trimmed = s.trim();
    if !YMD.is_match(trimmed) {
        return Err(AppError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, YMD_FORMAT).map_err(|_| AppError::InvalidDate(s.to_string()))
}

pub fn format_mdy(date: NaiveDate) -> String {
    date.format(MDY_FORMAT).to_string()
}

/// Monday on or before `date`. Sunday counts as weekday 7, so a Sunday
/// belongs to the week that started six days earlier.
pub fn week_start_monday(date: NaiveDate) -> AppResult<NaiveDate> {
    let weekday = date.weekday().number_from_monday();
    date.checked_sub_days(Days::new(u64::from(weekday - 1)))
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))
}

/// Sunday closing the week that contains `date`.
pub fn week_end_sunday(date: NaiveDate) -> AppResult<NaiveDate> {
    week_start_monday(date)?
        .checked_add_days(Days::new(6))
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))
}

/// Today's civil date in `tz`, or in the system's local zone when none is configured.
pub fn today_in(tz: Option<Tz>) -> NaiveDate {
    match tz {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => chrono::Local::now().date_naive(),
    }
}
