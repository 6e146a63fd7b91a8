//! Day-level mutation of a week document.

use super::calendar::{format_mdy, week_end_sunday, week_start_monday};
use super::document::{self as doc, Object};
use super::span::{Span, SpanKind, contains_lunch};
use super::summary::{DayChange, DaySummary};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde_json::{Value, json};

/// Replace one day's entries (or mark it not-worked) in a copy of `metadata`.
///
/// `spans` must already be validated and is ignored when `mark_not_worked`
/// is set. The caller's document is never modified; on error nothing is
/// returned.
pub fn patch_day(
    metadata: &Value,
    target: NaiveDate,
    spans: &[Span],
    mark_not_worked: bool,
) -> AppResult<(Value, DayChange)> {
    let target_mdy = format_mdy(target);
    let week_start = format_mdy(week_start_monday(target)?);
    let week_end = format_mdy(week_end_sunday(target)?);

    let mut patched = metadata.clone();

    let document = patched.as_object_mut().ok_or(AppError::MissingDayList)?;

    let (existing, proposed) = {
        let days = document
            .get_mut(doc::DAY_LIST)
            .and_then(Value::as_array_mut)
            .filter(|days| !days.is_empty())
            .ok_or(AppError::MissingDayList)?;

        let record = locate_day(days, &target_mdy)
            .and_then(|idx| days.get_mut(idx))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| AppError::DateNotFound(target_mdy.clone()))?;

        let existing = DaySummary::from_day_record(record, &target_mdy);

        record.insert(doc::WORKED_DATE.into(), json!(target_mdy));
        record.insert(doc::DID_NOT_WORK.into(), json!(mark_not_worked));

        let span_list = if mark_not_worked {
            Value::Null
        } else {
            build_span_entries(&target_mdy, spans)
        };
        record.insert(doc::SPAN_LIST.into(), span_list);

        update_time_entry(record, &target_mdy, spans, mark_not_worked);

        (existing, DaySummary::from_day_record(record, &target_mdy))
    };

    backfill_document(document, &week_start, &week_end);

    let change = DayChange {
        date: target_mdy,
        had_existing: existing.has_entries(),
        existing,
        proposed,
    };

    Ok((patched, change))
}

/// Read-only lookup of one day's summary.
pub fn find_day_summary(metadata: &Value, target: NaiveDate) -> AppResult<DaySummary> {
    let target_mdy = format_mdy(target);

    let days = metadata
        .as_object()
        .and_then(|d| doc::array_field(d, doc::DAY_LIST))
        .ok_or(AppError::MissingDayList)?;

    locate_day(days, &target_mdy)
        .and_then(|idx| days[idx].as_object())
        .map(|record| DaySummary::from_day_record(record, &target_mdy))
        .ok_or_else(|| AppError::DateNotFound(target_mdy.clone()))
}

/// Index of the first day record whose trimmed `workedDate` equals `target_mdy`.
fn locate_day(days: &[Value], target_mdy: &str) -> Option<usize> {
    days.iter().position(|day| {
        day.as_object()
            .is_some_and(|record| doc::str_field(record, doc::WORKED_DATE).trim() == target_mdy)
    })
}

fn build_span_entries(target_mdy: &str, spans: &[Span]) -> Value {
    let entries = spans
        .iter()
        .map(|s| {
            let paid_break = match s.kind {
                SpanKind::Lunch => json!(false),
                SpanKind::Labor => Value::Null,
            };
            json!({
                "startTimeStr": format!("{} {}", target_mdy, s.start),
                "endTimeStr": format!("{} {}", target_mdy, s.end),
                "timeEntrySpanType": s.kind.portal_label(),
                "id": 0,
                "timeEntryId": 0,
                "paidBreak": paid_break,
                "source": null,
                "leaveType": null,
                "leaveTypeId": null,
                "leaveRequestId": null,
                "fullDayOff": null,
            })
        })
        .collect();
    Value::Array(entries)
}

fn update_time_entry(record: &mut Object, target_mdy: &str, spans: &[Span], mark_not_worked: bool) {
    let mut entry = record
        .get(doc::TIME_ENTRY)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    doc::fill_if_unset(&mut entry, "id", json!(0));
    if entry.get("notes").is_none_or(Value::is_null) {
        entry.insert("notes".into(), json!(""));
    }

    entry.insert("daily".into(), json!(false));
    entry.insert("didNotWork".into(), json!(mark_not_worked));
    entry.insert("dayOffType".into(), json!("Undefined"));

    if mark_not_worked {
        entry.insert("dateWorked".into(), Value::Null);
        entry.insert("noBreakTaken".into(), json!(false));
    } else {
        entry.insert("dateWorked".into(), json!(target_mdy));
        entry.insert("noBreakTaken".into(), json!(!contains_lunch(spans)));
    }

    record.insert(doc::TIME_ENTRY.into(), Value::Object(entry));
}

/// Fill week-level fields the save endpoint requires but the metadata
/// response may leave out. Populated fields are left alone.
fn backfill_document(document: &mut Object, week_start: &str, week_end: &str) {
    doc::fill_if_unset(document, doc::DOC_ID, json!(0));
    doc::fill_if_unset(document, doc::DOC_TYPE, json!("TIME"));
    doc::fill_if_unset(document, doc::BYPASS_LEAVE_VALIDATION, json!(false));
    doc::fill_if_unset(document, doc::ATTACHMENTS, json!([]));
    doc::fill_if_unset(document, doc::SELECTED_DATE, json!(week_start));
    doc::fill_if_unset(document, doc::SELECTED_END_DATE, json!(week_end));
    doc::fill_if_unset(document, doc::PERIOD_END_DATE, json!(week_end));

    if let Some(engagement_id) = doc::i64_field(document, doc::ENGAGEMENT_ID) {
        doc::fill_if_unset(document, doc::REQUISITION_ID, json!(engagement_id));
    }
}
