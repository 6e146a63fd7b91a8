//! Time utilities: strict HH:MM parsing and hour formatting.

use regex::Regex;
use std::sync::LazyLock;

static HHMM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}):(\d{2})$").expect("HH:MM pattern is a valid regex")
});

/// Parse a zero-padded 24-hour `HH:MM` string into minutes since midnight.
///
/// The error is a short reason without the input, callers add context.
pub fn parse_hhmm(s: &str) -> Result<u32, String> {
    let caps = HHMM.captures(s).ok_or_else(|| "must be HH:MM".to_string())?;

    let hours: u32 = caps[1].parse().map_err(|_| "invalid hour".to_string())?;
    let minutes: u32 = caps[2].parse().map_err(|_| "invalid minute".to_string())?;

    if hours > 23 {
        return Err("hour out of range".into());
    }
    if minutes > 59 {
        return Err("minute out of range".into());
    }

    Ok(hours * 60 + minutes)
}

/// Render a fractional hour total, e.g. `7.50h`.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}h", hours)
}
