use super::emit;
use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::entry::{EntryAction, EntryLogic, EntryRequest};
use crate::errors::AppResult;
use crate::timecard::parse_spans;

/// Handle the `set` subcommand
pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Set {
        target,
        spans,
        write,
    } = cmd
    {
        // Validate everything locally before touching the keyring or network
        let date = app.resolve_date(target.date.as_deref())?;
        let spans = parse_spans(spans.as_slice())?;

        let req = EntryRequest {
            date,
            engagement: target.engagement,
            action: EntryAction::Spans(&spans),
            dry_run: write.dry_run,
            yes: write.yes,
        };
        let report = EntryLogic::apply(app, &req)?;
        emit(app, &report)?;
    }

    Ok(())
}
