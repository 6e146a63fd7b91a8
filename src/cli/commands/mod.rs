pub mod auth;
pub mod config;
pub mod engagement;
pub mod mark_dnw;
pub mod set;
pub mod show;

use crate::core::Report;
use crate::core::app::App;
use crate::errors::AppResult;
use crate::output;

/// Print a command report in the format selected for this run.
pub(crate) fn emit(app: &App, report: &Report) -> AppResult<()> {
    output::write(app.json, &report.human, &report.payload)
}
