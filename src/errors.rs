//! Unified application error type.
//! Every module (timecard, auth, api, config, cli) returns AppError so the
//! dispatcher can print one consistent message and exit code.

use serde_json::{Value, json};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid span {0:?}, expected type:HH:MM-HH:MM")]
    InvalidSpanFormat(String),

    #[error("invalid span type {0:?} (allowed: labor, lunch)")]
    InvalidSpanType(String),

    #[error("invalid {side} time {value:?} in {arg:?}: {reason}")]
    InvalidSpanTime {
        side: &'static str,
        value: String,
        arg: String,
        reason: String,
    },

    #[error("invalid span {0:?}: end must be after start")]
    SpanEndBeforeStart(String),

    #[error("at least one --span is required")]
    NoSpans,

    #[error("spans overlap: {first} and {second}")]
    SpansOverlap { first: String, second: String },

    #[error("{0}")]
    InvalidInput(String),

    // ---------------------------
    // Week document lookup
    // ---------------------------
    #[error("metadata missing billingItemDetails")]
    MissingDayList,

    #[error("date {0} not found in week metadata; fetch the week that contains it")]
    DateNotFound(String),

    // ---------------------------
    // Session / tokens
    // ---------------------------
    #[error("http cookie jar is not configured")]
    CookieJarMissing,

    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("access token cookie not found in session")]
    AccessTokenNotFound,

    #[error("xsrf token cookie not found in session")]
    XsrfTokenNotFound,

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{context} returned status {status}: {body}")]
    HttpStatus {
        context: String,
        status: u16,
        body: String,
    },

    #[error("login failed: {0}")]
    Login(String),

    #[error("save API returned validation errors")]
    SaveRejected,

    #[error("no engagements returned by API")]
    NoEngagements,

    // ---------------------------
    // Config / credentials
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid timezone {0:?}")]
    InvalidTimezone(String),

    #[error("credentials not found; run `hours auth login` first")]
    CredentialsNotFound,

    #[error("keyring error: {0}")]
    Keyring(String),

    // ---------------------------
    // Interaction
    // ---------------------------
    #[error("{0}")]
    NonInteractive(String),

    #[error("aborted by user")]
    Aborted,
}

impl AppError {
    /// Stable machine-readable group for the JSON error payload.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Io(_) | AppError::Json(_) | AppError::Yaml(_) => "io",

            AppError::InvalidDate(_)
            | AppError::InvalidSpanFormat(_)
            | AppError::InvalidSpanType(_)
            | AppError::InvalidSpanTime { .. }
            | AppError::SpanEndBeforeStart(_)
            | AppError::NoSpans
            | AppError::SpansOverlap { .. }
            | AppError::InvalidInput(_) => "validation",

            AppError::MissingDayList | AppError::DateNotFound(_) => "lookup",

            AppError::CookieJarMissing
            | AppError::InvalidBaseUrl { .. }
            | AppError::AccessTokenNotFound
            | AppError::XsrfTokenNotFound => "token",

            AppError::Http(_)
            | AppError::HttpStatus { .. }
            | AppError::Login(_)
            | AppError::SaveRejected
            | AppError::NoEngagements => "http",

            AppError::Config(_) | AppError::InvalidTimezone(_) => "config",

            AppError::CredentialsNotFound | AppError::Keyring(_) => "credentials",

            AppError::NonInteractive(_) | AppError::Aborted => "interaction",
        }
    }

    /// Structured fields of the variant, when it has any worth exposing.
    pub fn details(&self) -> Option<Value> {
        match self {
            AppError::InvalidDate(value)
            | AppError::InvalidSpanFormat(value)
            | AppError::InvalidSpanType(value)
            | AppError::SpanEndBeforeStart(value)
            | AppError::InvalidTimezone(value) => Some(json!({"value": value})),
            AppError::InvalidSpanTime {
                side,
                value,
                arg,
                reason,
            } => Some(json!({"side": side, "value": value, "arg": arg, "reason": reason})),
            AppError::SpansOverlap { first, second } => {
                Some(json!({"first": first, "second": second}))
            }
            AppError::DateNotFound(date) => Some(json!({"date": date})),
            AppError::InvalidBaseUrl { url, .. } => Some(json!({"url": url})),
            AppError::HttpStatus {
                context, status, ..
            } => Some(json!({"context": context, "status": status})),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_time_error_names_side_and_value() {
        let err = AppError::InvalidSpanTime {
            side: "end",
            value: "25:00".into(),
            arg: "labor:09:00-25:00".into(),
            reason: "hour out of range".into(),
        };
        assert_eq!(
            err.to_string(),
            r#"invalid end time "25:00" in "labor:09:00-25:00": hour out of range"#
        );
    }

    #[test]
    fn lookup_errors_are_distinct() {
        assert_ne!(
            AppError::MissingDayList.to_string(),
            AppError::DateNotFound("02/18/2026".into()).to_string()
        );
        assert!(
            AppError::DateNotFound("02/18/2026".into())
                .to_string()
                .contains("02/18/2026")
        );
    }

    #[test]
    fn codes_follow_variant_groups() {
        assert_eq!(AppError::NoSpans.code(), "validation");
        assert_eq!(AppError::InvalidInput("x".into()).code(), "validation");
        assert_eq!(AppError::MissingDayList.code(), "lookup");
        assert_eq!(AppError::XsrfTokenNotFound.code(), "token");
        assert_eq!(AppError::SaveRejected.code(), "http");
        assert_eq!(AppError::InvalidTimezone("Mars/Base".into()).code(), "config");
        assert_eq!(AppError::CredentialsNotFound.code(), "credentials");
        assert_eq!(AppError::Aborted.code(), "interaction");
    }

    #[test]
    fn details_expose_structured_fields() {
        let err = AppError::SpansOverlap {
            first: "labor:09:00-12:30".into(),
            second: "lunch:12:00-13:00".into(),
        };
        assert_eq!(
            err.details(),
            Some(json!({"first": "labor:09:00-12:30", "second": "lunch:12:00-13:00"}))
        );

        let err = AppError::HttpStatus {
            context: "save".into(),
            status: 500,
            body: "oops".into(),
        };
        assert_eq!(err.details(), Some(json!({"context": "save", "status": 500})));

        assert_eq!(AppError::Aborted.details(), None);
    }
}
