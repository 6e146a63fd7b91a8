use super::emit;
use crate::cli::parser::{Commands, ConfigAction};
use crate::config::parse_timezone;
use crate::core::Report;
use crate::core::app::App;
use crate::errors::{AppError, AppResult};
use serde_json::json;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, app: &mut App) -> AppResult<()> {
    if let Commands::Config { action } = cmd {
        let report = match action {
            ConfigAction::SetDefaultEngagement { id } => {
                if *id <= 0 {
                    return Err(AppError::InvalidInput("--id must be > 0".into()));
                }
                app.cfg.default_engagement_id = Some(*id);
                app.save_config()?;
                Report::new(
                    format!("Default engagement set to {}", id),
                    json!({
                        "ok": true,
                        "operation": "config_set_default_engagement",
                        "default_engagement_id": id,
                        "config_path": app.cfg_path.display().to_string(),
                    }),
                )
            }

            ConfigAction::SetTimezone { tz } => {
                let tz = tz.trim();
                let parsed = parse_timezone(tz)?;
                app.cfg.timezone = Some(parsed.name().to_string());
                app.save_config()?;
                Report::new(
                    format!("Timezone set to {}", parsed.name()),
                    json!({
                        "ok": true,
                        "operation": "config_set_timezone",
                        "timezone": parsed.name(),
                        "config_path": app.cfg_path.display().to_string(),
                    }),
                )
            }

            ConfigAction::Show => {
                let yaml = serde_yaml::to_string(&app.cfg)?;
                Report::new(
                    format!("# {}\n{}", app.cfg_path.display(), yaml.trim_end()),
                    json!({
                        "ok": true,
                        "operation": "config_show",
                        "config_path": app.cfg_path.display().to_string(),
                        "config": app.cfg,
                    }),
                )
            }
        };
        emit(app, &report)?;
    }

    Ok(())
}
