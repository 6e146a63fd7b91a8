use super::Report;
use super::app::App;
use super::show::week_totals;
use crate::api::ApiClient;
use crate::auth::{Session, extract_xsrf_token};
use crate::errors::{AppError, AppResult};
use crate::timecard::{DayChange, Span, format_mdy, patch_day, week_start_monday};
use chrono::NaiveDate;
use log::info;
use serde_json::{Value, json};

/// What to write into the target day.
#[derive(Debug, Clone, Copy)]
pub enum EntryAction<'a> {
    /// Replace the day's spans. Must be already validated.
    Spans(&'a [Span]),
    MarkNotWorked,
}

impl EntryAction<'_> {
    pub fn operation(&self) -> &'static str {
        match self {
            EntryAction::Spans(_) => "set",
            EntryAction::MarkNotWorked => "mark_dnw",
        }
    }

    fn spans(&self) -> &[Span] {
        match self {
            EntryAction::Spans(spans) => *spans,
            EntryAction::MarkNotWorked => &[],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EntryRequest<'a> {
    pub date: NaiveDate,
    pub engagement: Option<i64>,
    pub action: EntryAction<'a>,
    pub dry_run: bool,
    pub yes: bool,
}

pub struct EntryLogic;

impl EntryLogic {
    /// Fetch the week, patch the target day and (unless dry-run) save it.
    pub fn apply(app: &App, req: &EntryRequest) -> AppResult<Report> {
        let week_start = format_mdy(week_start_monday(req.date)?);

        let session = Session::new()?;
        app.authenticate(&session)?;
        let base_url = app.base_url();
        let api = ApiClient::new(&base_url, &session);

        let engagement_id = app.resolve_engagement(&api, req.engagement)?;
        let metadata = api.metadata(engagement_id, &week_start)?;

        let mark_not_worked = matches!(req.action, EntryAction::MarkNotWorked);
        let (patched, change) = patch_day(&metadata, req.date, req.action.spans(), mark_not_worked)?;

        if req.dry_run {
            return Ok(dry_run_report(req, engagement_id, &change, patched));
        }

        app.confirm_overwrite(&change, req.yes)?;

        let xsrf = extract_xsrf_token(&session, &base_url)?;
        let saved = api.save_billing_items(&patched, &xsrf)?;
        if saved.has_errors() {
            return Err(AppError::SaveRejected);
        }
        info!(
            "{} saved for {} (billingItemId={})",
            req.action.operation(),
            change.date,
            saved.billing_item_id
        );

        let totals = week_totals(&api, engagement_id, &week_start);
        let date = req.date.format("%Y-%m-%d").to_string();

        let human = match req.action {
            EntryAction::Spans(spans) => format!(
                "Saved {} span(s) for {} (billingItemId={})\n{}",
                spans.len(),
                date,
                saved.billing_item_id,
                change.proposed
            ),
            EntryAction::MarkNotWorked => format!(
                "Marked {} as did-not-work (billingItemId={})",
                date, saved.billing_item_id
            ),
        };

        let payload = json!({
            "ok": true,
            "operation": req.action.operation(),
            "date": date,
            "engagement_id": engagement_id,
            "dry_run": false,
            "billing_item_id": saved.billing_item_id,
            "change": change,
            "total_hours": totals,
        });

        Ok(Report::new(human, payload))
    }
}

fn dry_run_report(
    req: &EntryRequest,
    engagement_id: i64,
    change: &DayChange,
    patched: Value,
) -> Report {
    let payload = json!({
        "ok": true,
        "operation": req.action.operation(),
        "date": req.date.format("%Y-%m-%d").to_string(),
        "engagement_id": engagement_id,
        "dry_run": true,
        "change": change,
        "payload": patched,
    });
    Report::new(format!("Dry run complete\n{}", change), payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timecard::{DaySummary, parse_spans};

    #[test]
    fn operation_names() {
        let spans = parse_spans(&["labor:09:00-17:00"]).unwrap();
        assert_eq!(EntryAction::Spans(&spans).operation(), "set");
        assert_eq!(EntryAction::MarkNotWorked.operation(), "mark_dnw");
        assert!(EntryAction::MarkNotWorked.spans().is_empty());
    }

    #[test]
    fn dry_run_payload_carries_change_and_document() {
        let req = EntryRequest {
            date: NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
            engagement: None,
            action: EntryAction::MarkNotWorked,
            dry_run: true,
            yes: false,
        };
        let change = DayChange {
            date: "02/18/2026".into(),
            had_existing: false,
            existing: DaySummary {
                worked_date: "02/18/2026".into(),
                ..Default::default()
            },
            proposed: DaySummary {
                worked_date: "02/18/2026".into(),
                did_not_work: true,
                spans: vec![],
            },
        };

        let report = dry_run_report(&req, 7, &change, json!({"billingItemDetails": []}));

        assert_eq!(
            report.human,
            "Dry run complete\nExisting: 02/18/2026: no spans\nProposed: 02/18/2026: did not work"
        );
        assert_eq!(report.payload["operation"], "mark_dnw");
        assert_eq!(report.payload["dry_run"], true);
        assert_eq!(report.payload["engagement_id"], 7);
        assert_eq!(report.payload["change"]["proposed"]["did_not_work"], true);
        assert!(report.payload["payload"]["billingItemDetails"].is_array());
    }
}
