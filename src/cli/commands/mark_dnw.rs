use super::emit;
use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::entry::{EntryAction, EntryLogic, EntryRequest};
use crate::errors::AppResult;

/// Handle the `mark-dnw` subcommand
pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::MarkDnw { target, write } = cmd {
        let date = app.resolve_date(target.date.as_deref())?;

        let req = EntryRequest {
            date,
            engagement: target.engagement,
            action: EntryAction::MarkNotWorked,
            dry_run: write.dry_run,
            yes: write.yes,
        };
        let report = EntryLogic::apply(app, &req)?;
        emit(app, &report)?;
    }

    Ok(())
}
