use super::emit;
use crate::api::ApiClient;
use crate::auth::Session;
use crate::cli::parser::{Commands, EngagementAction};
use crate::core::Report;
use crate::core::app::{App, ENGAGEMENT_PAGE_SIZE};
use crate::errors::AppResult;
use crate::utils::table::Table;
use serde_json::json;

/// Handle the `engagement` subcommand
pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Engagement {
        action: EngagementAction::List,
    } = cmd
    {
        let session = Session::new()?;
        let user = app.authenticate(&session)?;
        let api = ApiClient::new(&app.base_url(), &session);
        let items = api.engagement_items(0, ENGAGEMENT_PAGE_SIZE)?;

        let human = if items.is_empty() {
            "No engagements returned".to_string()
        } else {
            let mut table = Table::new(&["ID", "STATUS", "BUYER", "TITLE"]);
            for item in &items {
                table.add_row(vec![
                    item.id.to_string(),
                    item.status_label().to_string(),
                    item.buyer_label().to_string(),
                    item.job_title.clone().unwrap_or_default(),
                ]);
            }
            format!(
                "Found {} engagement(s):\n{}",
                items.len(),
                table.render().trim_end()
            )
        };

        let payload = json!({
            "ok": true,
            "operation": "engagement_list",
            "count": items.len(),
            "user_id": user.get("userId"),
            "engagements": items,
        });
        emit(app, &Report::new(human, payload))?;
    }

    Ok(())
}
