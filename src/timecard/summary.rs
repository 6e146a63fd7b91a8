//! Normalized, display-ready view of one day record.

use super::document::{self as doc, Object};
use super::span::{Span, SpanKind};
use crate::utils::time::parse_hhmm;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanSummary {
    #[serde(rename = "type")]
    pub kind: String,
    pub start: String,
    pub end: String,
}

impl From<&Span> for SpanSummary {
    fn from(s: &Span) -> Self {
        Self {
            kind: s.kind.as_str().to_string(),
            start: s.start.clone(),
            end: s.end.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub worked_date: String,
    pub did_not_work: bool,
    pub spans: Vec<SpanSummary>,
}

impl DaySummary {
    /// Summarize a day record. `fallback_date` is used when the record has
    /// no `workedDate` of its own.
    pub fn from_day_record(record: &Object, fallback_date: &str) -> Self {
        let worked_date = match doc::str_field(record, doc::WORKED_DATE) {
            d if d.is_empty() => fallback_date.to_string(),
            d => d,
        };

        let mut spans: Vec<SpanSummary> = doc::array_field(record, doc::SPAN_LIST)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e.as_object())
                    .map(|entry| {
                        let kind = doc::str_field(entry, doc::SPAN_TYPE).trim().to_lowercase();
                        SpanSummary {
                            kind: if kind.is_empty() {
                                SpanKind::Labor.as_str().to_string()
                            } else {
                                kind
                            },
                            start: tail_time(&doc::str_field(entry, doc::SPAN_START)),
                            end: tail_time(&doc::str_field(entry, doc::SPAN_END)),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        // HH:MM is fixed-width, so string order is time order
        spans.sort_by(|a, b| a.start.cmp(&b.start));

        Self {
            worked_date,
            did_not_work: doc::bool_field(record, doc::DID_NOT_WORK),
            spans,
        }
    }

    /// True when the day is marked not-worked or has at least one span.
    pub fn has_entries(&self) -> bool {
        self.did_not_work || !self.spans.is_empty()
    }

    pub fn labor_hours(&self) -> f64 {
        labor_hours(&self.spans)
    }
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.did_not_work {
            return write!(f, "{}: did not work", self.worked_date);
        }
        if self.spans.is_empty() {
            return write!(f, "{}: no spans", self.worked_date);
        }
        let parts: Vec<String> = self
            .spans
            .iter()
            .map(|s| format!("{} {}-{}", s.kind, s.start, s.end))
            .collect();
        write!(f, "{}: {}", self.worked_date, parts.join(", "))
    }
}

/// Before/after view of the single day touched by a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayChange {
    pub date: String,
    pub had_existing: bool,
    pub existing: DaySummary,
    pub proposed: DaySummary,
}

impl fmt::Display for DayChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Existing: {}\nProposed: {}", self.existing, self.proposed)
    }
}

/// Sum of labor span durations in hours. Spans whose times do not parse
/// are skipped.
pub fn labor_hours(spans: &[SpanSummary]) -> f64 {
    spans
        .iter()
        .filter(|s| s.kind.eq_ignore_ascii_case(SpanKind::Labor.as_str()))
        .filter_map(|s| {
            let start = parse_hhmm(&s.start).ok()?;
            let end = parse_hhmm(&s.end).ok()?;
            Some((f64::from(end) - f64::from(start)) / 60.0)
        })
        .sum()
}

/// Last whitespace-separated token of a `"MM/DD/YYYY HH:MM"` composite.
fn tail_time(s: &str) -> String {
    s.split_whitespace().last().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record(v: Value) -> Object {
        v.as_object().cloned().unwrap()
    }

    fn summary(kind: &str, start: &str, end: &str) -> SpanSummary {
        SpanSummary {
            kind: kind.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    #[test]
    fn extracts_and_sorts_spans() {
        let r = record(json!({
            "workedDate": "02/18/2026",
            "didNotWork": false,
            "timeEntrySpanDtos": [
                {"startTimeStr": "02/18/2026 12:30", "endTimeStr": "02/18/2026 17:00", "timeEntrySpanType": "Labor"},
                {"startTimeStr": "02/18/2026 09:00", "endTimeStr": "02/18/2026 12:00", "timeEntrySpanType": "Labor"},
                {"startTimeStr": "02/18/2026 12:00", "endTimeStr": "02/18/2026 12:30", "timeEntrySpanType": "LUNCH"}
            ]
        }));
        let s = DaySummary::from_day_record(&r, "unused");
        assert_eq!(s.worked_date, "02/18/2026");
        assert_eq!(
            s.spans,
            vec![
                summary("labor", "09:00", "12:00"),
                summary("lunch", "12:00", "12:30"),
                summary("labor", "12:30", "17:00"),
            ]
        );
        assert!(s.has_entries());
    }

    #[test]
    fn missing_fields_fall_back() {
        let r = record(json!({
            "didNotWork": "yes",
            "timeEntrySpanDtos": [
                {"startTimeStr": "08:00", "endTimeStr": "09:00"},
                "not an object"
            ]
        }));
        let s = DaySummary::from_day_record(&r, "02/17/2026");
        assert_eq!(s.worked_date, "02/17/2026");
        assert!(!s.did_not_work);
        assert_eq!(s.spans, vec![summary("labor", "08:00", "09:00")]);
    }

    #[test]
    fn null_span_list_means_no_entries() {
        let r = record(json!({"workedDate": "02/17/2026", "timeEntrySpanDtos": null}));
        let s = DaySummary::from_day_record(&r, "02/17/2026");
        assert!(s.spans.is_empty());
        assert!(!s.has_entries());
    }

    #[test]
    fn human_format_variants() {
        let mut s = DaySummary {
            worked_date: "02/18/2026".into(),
            did_not_work: true,
            spans: vec![],
        };
        assert_eq!(s.to_string(), "02/18/2026: did not work");

        s.did_not_work = false;
        assert_eq!(s.to_string(), "02/18/2026: no spans");

        s.spans = vec![
            summary("labor", "09:00", "12:00"),
            summary("lunch", "12:00", "12:30"),
        ];
        assert_eq!(
            s.to_string(),
            "02/18/2026: labor 09:00-12:00, lunch 12:00-12:30"
        );
    }

    #[test]
    fn labor_hours_skips_lunch_and_garbage() {
        let spans = vec![
            summary("labor", "09:00", "12:00"),
            summary("lunch", "12:00", "12:30"),
            summary("Labor", "12:30", "17:00"),
            summary("labor", "", "17:00"),
        ];
        assert!((labor_hours(&spans) - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_with_type_key() {
        let s = DaySummary {
            worked_date: "02/18/2026".into(),
            did_not_work: false,
            spans: vec![summary("lunch", "12:00", "12:30")],
        };
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            json!({
                "worked_date": "02/18/2026",
                "did_not_work": false,
                "spans": [{"type": "lunch", "start": "12:00", "end": "12:30"}]
            })
        );
    }
}
