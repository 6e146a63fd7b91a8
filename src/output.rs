//! Human or JSON command output.
//!
//! Every command builds one JSON payload (always carrying `ok` and
//! `operation`) plus a human-readable rendering; the `--json` flag picks
//! which one reaches stdout. Failures in JSON mode become an
//! `{"ok": false, ...}` payload on stdout as well.

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub ok: bool,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl ErrorPayload {
    pub fn from_error(err: &AppError) -> Self {
        Self {
            ok: false,
            code: err.code(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

pub fn write<P: Serialize>(as_json: bool, human: &str, payload: &P) -> AppResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_to(&mut out, as_json, human, payload)
}

pub fn write_to<W: Write, P: Serialize>(
    out: &mut W,
    as_json: bool,
    human: &str,
    payload: &P,
) -> AppResult<()> {
    if as_json {
        write_json(out, payload)
    } else {
        writeln!(out, "{}", human)?;
        Ok(())
    }
}

pub fn write_json<W: Write, P: Serialize>(out: &mut W, payload: &P) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *out, payload)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_error(err: &AppError) -> AppResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, &ErrorPayload::from_error(err))
}
