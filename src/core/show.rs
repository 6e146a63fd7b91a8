use super::Report;
use super::app::App;
use crate::api::ApiClient;
use crate::auth::Session;
use crate::errors::AppResult;
use crate::timecard::{DaySummary, find_day_summary, format_mdy, week_start_monday};
use crate::utils::time::format_hours;
use chrono::NaiveDate;
use log::warn;
use serde_json::json;
use std::collections::BTreeMap;

pub struct ShowLogic;

impl ShowLogic {
    pub fn run(app: &App, date: NaiveDate, engagement: Option<i64>) -> AppResult<Report> {
        let week_start = format_mdy(week_start_monday(date)?);

        let session = Session::new()?;
        app.authenticate(&session)?;
        let api = ApiClient::new(&app.base_url(), &session);

        let engagement_id = app.resolve_engagement(&api, engagement)?;

        let metadata = api.metadata(engagement_id, &week_start)?;
        let summary = find_day_summary(&metadata, date)?;
        let totals = week_totals(&api, engagement_id, &week_start);

        let payload = json!({
            "ok": true,
            "operation": "show",
            "engagement_id": engagement_id,
            "date": date.format("%Y-%m-%d").to_string(),
            "week_start": week_start,
            "summary": summary,
            "labor_hours": summary.labor_hours(),
            "total_hours": totals,
        });

        Ok(Report::new(render(&summary, &totals), payload))
    }
}

/// Aggregate hours for the week. A failure here never fails the command.
pub(crate) fn week_totals(
    api: &ApiClient,
    engagement_id: i64,
    week_start: &str,
) -> BTreeMap<String, f64> {
    api.total_hours(engagement_id, week_start)
        .unwrap_or_else(|e| {
            warn!("could not fetch weekly totals: {}", e);
            BTreeMap::new()
        })
}

fn render(summary: &DaySummary, totals: &BTreeMap<String, f64>) -> String {
    let mut out = summary.to_string();
    if summary.has_entries() && !summary.did_not_work {
        out.push_str(&format!("\nLabor: {}", format_hours(summary.labor_hours())));
    }
    if !totals.is_empty() {
        out.push_str(&format!("\nWeek totals: {}", format_totals(totals)));
    }
    out
}

pub fn format_totals(totals: &BTreeMap<String, f64>) -> String {
    totals
        .iter()
        .map(|(category, hours)| format!("{} {}", category, format_hours(*hours)))
        .collect::<Vec<_>>()
        .join(", ")
}
