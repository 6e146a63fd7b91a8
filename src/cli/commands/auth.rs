use super::emit;
use crate::auth::Session;
use crate::cli::parser::{AuthAction, Commands};
use crate::core::Report;
use crate::core::app::{App, is_interactive, read_line};
use crate::credentials::{CredentialStore, Credentials};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::prompt;
use log::debug;
use serde_json::{Value, json};
use std::io::{self, Read};

/// Handle the `auth` subcommand
pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Auth { action } = cmd {
        let report = match action {
            AuthAction::Login {
                username,
                password,
                password_stdin,
            } => login(app, username.as_deref(), password.as_deref(), *password_stdin)?,
            AuthAction::Status => status(app)?,
            AuthAction::Logout => {
                CredentialStore::default().delete()?;
                Report::new(
                    "Credentials removed",
                    json!({"ok": true, "operation": "auth_logout"}),
                )
            }
        };
        emit(app, &report)?;
    }

    Ok(())
}

fn login(
    app: &App,
    username: Option<&str>,
    password: Option<&str>,
    password_stdin: bool,
) -> AppResult<Report> {
    let username = match username.map(str::trim).filter(|u| !u.is_empty()) {
        Some(u) => u.to_string(),
        None => {
            prompt("Username: ");
            read_line(&mut io::stdin().lock())?
        }
    };
    if username.is_empty() {
        return Err(AppError::InvalidInput("username is required".into()));
    }

    let password = resolve_password(password, password_stdin)?;
    let creds = Credentials { username, password };
    creds.validate()?;

    let session = Session::new()?;
    let user = app.login(&session, &creds)?;
    CredentialStore::default().save(&creds)?;

    let payload = json!({
        "ok": true,
        "operation": "auth_login",
        "username": creds.username,
        "user": user_brief(&user),
    });
    Ok(Report::new(
        format!("Login successful for {}", creds.username),
        payload,
    ))
}

fn status(app: &App) -> AppResult<Report> {
    let creds = match CredentialStore::default().load() {
        Ok(c) => c,
        Err(AppError::CredentialsNotFound) => {
            return Ok(Report::new(
                "No stored credentials",
                json!({"ok": true, "operation": "auth_status", "authenticated": false}),
            ));
        }
        Err(e) => return Err(e),
    };

    let session = Session::new()?;
    match app.login(&session, &creds) {
        Ok(user) => Ok(Report::new(
            "Authenticated",
            json!({
                "ok": true,
                "operation": "auth_status",
                "authenticated": true,
                "username": creds.username,
                "user": user_brief(&user),
            }),
        )),
        Err(e) => {
            debug!("stored credentials rejected: {}", e);
            Ok(Report::new(
                "Stored credentials are invalid",
                json!({
                    "ok": true,
                    "operation": "auth_status",
                    "authenticated": false,
                    "reason": e.to_string(),
                }),
            ))
        }
    }
}

/// `--password`, all of stdin with `--password-stdin`, or a hidden prompt.
fn resolve_password(flag: Option<&str>, from_stdin: bool) -> AppResult<String> {
    if flag.is_some() && from_stdin {
        return Err(AppError::InvalidInput(
            "use only one of --password or --password-stdin".into(),
        ));
    }

    if from_stdin {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| AppError::InvalidInput(format!("read password from stdin: {e}")))?;
        return non_empty_password(raw.trim_end_matches(['\r', '\n']).to_string());
    }

    if let Some(p) = flag {
        return non_empty_password(p.to_string());
    }

    if !is_interactive() {
        return Err(AppError::NonInteractive(
            "password is required; pass --password or --password-stdin when non-interactive".into(),
        ));
    }
    let typed = rpassword::prompt_password("Password: ")
        .map_err(|e| AppError::InvalidInput(format!("read password: {e}")))?;
    non_empty_password(typed)
}

fn non_empty_password(p: String) -> AppResult<String> {
    if p.is_empty() {
        return Err(AppError::InvalidInput("password is required".into()));
    }
    Ok(p)
}

fn user_brief(user: &Value) -> Value {
    json!({
        "userId": user.get("userId").cloned().unwrap_or(Value::Null),
        "fullName": user.get("fullName").cloned().unwrap_or(Value::Null),
        "email": user.get("email").cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_password_sources_rejected() {
        assert!(matches!(
            resolve_password(Some("pw"), true),
            Err(AppError::InvalidInput(ref m)) if m.contains("only one of")
        ));
    }

    #[test]
    fn explicit_password_must_not_be_empty() {
        assert_eq!(resolve_password(Some("s3cret"), false).unwrap(), "s3cret");
        assert!(resolve_password(Some(""), false).is_err());
    }

    #[test]
    fn user_brief_keeps_identity_fields_only() {
        let brief = user_brief(&json!({
            "userId": 77,
            "fullName": "Pat Doe",
            "email": "pat@example.com",
            "roles": ["worker"]
        }));
        assert_eq!(brief["userId"], 77);
        assert_eq!(brief["email"], "pat@example.com");
        assert!(brief.get("roles").is_none());
    }
}
