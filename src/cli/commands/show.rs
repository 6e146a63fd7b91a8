use super::emit;
use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::show::ShowLogic;
use crate::errors::AppResult;

/// Handle the `show` subcommand
pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Show { target } = cmd {
        let date = app.resolve_date(target.date.as_deref())?;
        let report = ShowLogic::run(app, date, target.engagement)?;
        emit(app, &report)?;
    }

    Ok(())
}
