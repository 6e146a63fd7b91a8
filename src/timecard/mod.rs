//! Timecard mutation engine.
//!
//! Pure, in-memory operations over the portal's week metadata document:
//! span parsing/validation, day lookup and patching, summaries and calendar
//! arithmetic. Nothing in here performs I/O or logs.

pub mod calendar;
pub mod document;
pub mod patch;
pub mod span;
pub mod summary;

pub use calendar::{format_mdy, parse_ymd, today_in, week_end_sunday, week_start_monday};
pub use patch::{find_day_summary, patch_day};
pub use span::{Span, SpanKind, parse_spans, validate_spans};
pub use summary::{DayChange, DaySummary, SpanSummary, labor_hours};
