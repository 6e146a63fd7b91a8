//! Span parsing and validation.
//!
//! A span is written on the command line as `kind:HH:MM-HH:MM`, e.g.
//! `labor:09:00-12:00` or `lunch:12:00-12:30`.

use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_hhmm;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Labor,
    Lunch,
}

impl SpanKind {
    /// Case-insensitive lookup of the CLI spelling.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "labor" => Some(Self::Labor),
            "lunch" => Some(Self::Lunch),
            _ => None,
        }
    }

    /// Lower-case name used in summaries and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Labor => "labor",
            SpanKind::Lunch => "lunch",
        }
    }

    /// Capitalized label the portal expects in `timeEntrySpanType`.
    pub fn portal_label(&self) -> &'static str {
        match self {
            SpanKind::Labor => "Labor",
            SpanKind::Lunch => "Lunch",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labor or lunch interval within a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    /// Start time exactly as typed.
    pub start: String,
    /// End time exactly as typed.
    pub end: String,
    start_minutes: u32,
    end_minutes: u32,
}

impl Span {
    /// Parse a `kind:HH:MM-HH:MM` argument.
    pub fn parse(arg: &str) -> AppResult<Self> {
        let trimmed = arg.trim();

        let (kind_raw, times) = trimmed
            .split_once(':')
            .ok_or_else(|| AppError::InvalidSpanFormat(arg.to_string()))?;

        let kind = SpanKind::from_name(kind_raw)
            .ok_or_else(|| AppError::InvalidSpanType(kind_raw.trim().to_lowercase()))?;

        let (start_raw, end_raw) = times
            .split_once('-')
            .ok_or_else(|| AppError::InvalidSpanFormat(arg.to_string()))?;
        let start = start_raw.trim();
        let end = end_raw.trim();

        let start_minutes = parse_hhmm(start).map_err(|reason| AppError::InvalidSpanTime {
            side: "start",
            value: start.to_string(),
            arg: arg.to_string(),
            reason,
        })?;
        let end_minutes = parse_hhmm(end).map_err(|reason| AppError::InvalidSpanTime {
            side: "end",
            value: end.to_string(),
            arg: arg.to_string(),
            reason,
        })?;

        if end_minutes <= start_minutes {
            return Err(AppError::SpanEndBeforeStart(arg.to_string()));
        }

        Ok(Self {
            kind,
            start: start.to_string(),
            end: end.to_string(),
            start_minutes,
            end_minutes,
        })
    }

    fn overlaps_next(&self, next: &Span) -> bool {
        next.start_minutes < self.end_minutes
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.kind, self.start, self.end)
    }
}

/// Sort a day's spans and reject any temporal overlap.
///
/// Touching spans (`09:00-12:00` then `12:00-12:30`) are accepted. Kinds are
/// not checked against each other: two lunches, or lunch before labor, pass.
pub fn validate_spans(spans: &[Span]) -> AppResult<Vec<Span>> {
    if spans.is_empty() {
        return Err(AppError::NoSpans);
    }

    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|s| (s.start_minutes, s.end_minutes));

    if let Some(pair) = sorted.windows(2).find(|w| w[0].overlaps_next(&w[1])) {
        return Err(AppError::SpansOverlap {
            first: pair[0].to_string(),
            second: pair[1].to_string(),
        });
    }

    Ok(sorted)
}

/// Parse every raw argument, then validate the set as one day.
pub fn parse_spans<S: AsRef<str>>(raw: &[S]) -> AppResult<Vec<Span>> {
    let spans = raw
        .iter()
        .map(|s| Span::parse(s.as_ref()))
        .collect::<AppResult<Vec<_>>>()?;
    validate_spans(&spans)
}

pub fn contains_lunch(spans: &[Span]) -> bool {
    spans.iter().any(|s| s.kind == SpanKind::Lunch)
}
