//! Tolerant accessors over the untyped week document.
//!
//! The portal's metadata payload changes without notice, so it stays a
//! `serde_json::Value` tree. Only the keys the engine reads or writes are
//! named here; every reader falls back to a default instead of failing on a
//! missing key or an unexpected type.

use serde_json::{Map, Value};

pub type Object = Map<String, Value>;

// Week-level keys
pub const DAY_LIST: &str = "billingItemDetails";
pub const DOC_ID: &str = "id";
pub const DOC_TYPE: &str = "type";
pub const BYPASS_LEAVE_VALIDATION: &str = "bypassLeaveValidation";
pub const ATTACHMENTS: &str = "attachments";
pub const SELECTED_DATE: &str = "selectedDate";
pub const SELECTED_END_DATE: &str = "selectedEndDate";
pub const PERIOD_END_DATE: &str = "periodEndDate";
pub const REQUISITION_ID: &str = "requisitionId";
pub const ENGAGEMENT_ID: &str = "engagementId";

// Day-level keys
pub const WORKED_DATE: &str = "workedDate";
pub const DID_NOT_WORK: &str = "didNotWork";
pub const SPAN_LIST: &str = "timeEntrySpanDtos";
pub const TIME_ENTRY: &str = "timeEntry";

// Span entry keys
pub const SPAN_START: &str = "startTimeStr";
pub const SPAN_END: &str = "endTimeStr";
pub const SPAN_TYPE: &str = "timeEntrySpanType";

/// String view of a field. Null and absent read as `""`; other scalars are
/// rendered with their JSON text so a numeric date still compares sanely.
pub fn str_field(obj: &Object, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Boolean view of a field; anything but a JSON bool reads as `false`.
pub fn bool_field(obj: &Object, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Integer view of a numeric field. Floats are truncated.
pub fn i64_field(obj: &Object, key: &str) -> Option<i64> {
    let value = obj.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_u64().and_then(|n| i64::try_from(n).ok()))
        .or_else(|| value.as_f64().map(|f| f as i64))
}

pub fn array_field<'a>(obj: &'a Object, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(Value::as_array)
}

/// Absent, null, or a whitespace-only string.
pub fn is_unset(obj: &Object, key: &str) -> bool {
    match obj.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Insert `value` only when the key is unset.
pub fn fill_if_unset(obj: &mut Object, key: &str, value: Value) {
    if is_unset(obj, key) {
        obj.insert(key.to_string(), value);
    }
}
