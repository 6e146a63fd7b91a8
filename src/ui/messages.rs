//! Status messages for the user.
//!
//! Everything here goes to stderr: stdout is reserved for command output so
//! `--json` stays machine-readable.

use std::fmt;
use std::io::{self, IsTerminal, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn emit<T: fmt::Display>(color: &str, icon: &str, msg: T) {
    if io::stderr().is_terminal() {
        eprintln!("{}{}{} {}{}", color, BOLD, icon, RESET, msg);
    } else {
        eprintln!("{} {}", icon, msg);
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(FG_BLUE, ICON_INFO, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(FG_YELLOW, ICON_WARN, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(FG_RED, ICON_ERR, msg);
}

/// Print a prompt without a trailing newline.
pub fn prompt<T: fmt::Display>(msg: T) {
    eprint!("{}", msg);
    let _ = io::stderr().flush();
}
