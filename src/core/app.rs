//! Per-invocation state shared by all commands.

use crate::api::{ApiClient, Engagement};
use crate::auth::{Authenticator, Session};
use crate::config::Config;
use crate::credentials::{CredentialStore, Credentials};
use crate::errors::{AppError, AppResult};
use crate::timecard::{DayChange, parse_ymd, today_in};
use crate::ui::messages::{info, prompt, warning};
use chrono::NaiveDate;
use chrono_tz::Tz;
use log::debug;
use serde_json::Value;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

pub const ENGAGEMENT_PAGE_SIZE: u32 = 200;
const OVERWRITE_PROMPT: &str = "Target day already has entries. Replace them?";

pub struct App {
    pub cfg: Config,
    pub cfg_path: PathBuf,
    pub json: bool,
    base_url_override: Option<String>,
}

impl App {
    pub fn new(cfg: Config, cfg_path: PathBuf, json_flag: bool, base_url: Option<String>) -> Self {
        let json = json_flag || cfg.output.json_default;
        Self {
            cfg,
            cfg_path,
            json,
            base_url_override: base_url.filter(|u| !u.trim().is_empty()),
        }
    }

    /// `--base-url` wins over the configured one; never ends with `/`.
    pub fn base_url(&self) -> String {
        let raw = self
            .base_url_override
            .as_deref()
            .unwrap_or(&self.cfg.base_url);
        raw.trim().trim_end_matches('/').to_string()
    }

    pub fn save_config(&self) -> AppResult<()> {
        self.cfg.save_to(&self.cfg_path)
    }

    pub fn timezone(&self) -> AppResult<Option<Tz>> {
        self.cfg.resolve_timezone()
    }

    /// Explicit `YYYY-MM-DD`, or today in the configured timezone.
    pub fn resolve_date(&self, raw: Option<&str>) -> AppResult<NaiveDate> {
        match raw {
            Some(s) => parse_ymd(s),
            None => Ok(today_in(self.timezone()?)),
        }
    }

    /// Log in on `session` with the credentials stored in the keyring.
    /// Returns the current-user document.
    pub fn authenticate(&self, session: &Session) -> AppResult<Value> {
        let creds = CredentialStore::default().load()?;
        self.login(session, &creds)
    }

    pub fn login(&self, session: &Session, creds: &Credentials) -> AppResult<Value> {
        debug!("logging in as {}", creds.username);
        Authenticator::new(&self.base_url(), session).login(&creds.username, &creds.password)
    }

    /// Flag, then configured default, then an interactive pick.
    pub fn resolve_engagement(&self, api: &ApiClient, flag: Option<i64>) -> AppResult<i64> {
        if let Some(id) = flag.filter(|id| *id > 0) {
            return Ok(id);
        }
        if let Some(id) = self.cfg.default_engagement_id.filter(|id| *id > 0) {
            return Ok(id);
        }

        let items = api.engagement_items(0, ENGAGEMENT_PAGE_SIZE)?;
        if items.is_empty() {
            return Err(AppError::NoEngagements);
        }
        if !is_interactive() {
            return Err(AppError::NonInteractive(
                "no default engagement configured; set one via `hours config set-default-engagement --id <id>` or pass --engagement".into(),
            ));
        }

        info("Select engagement:");
        for (i, item) in items.iter().enumerate() {
            eprintln!("  {}) {}", i + 1, engagement_line(item));
        }
        prompt("Enter number: ");

        let line = read_line(&mut io::stdin().lock())?;
        let idx = parse_selection(&line, items.len())
            .ok_or_else(|| AppError::InvalidInput("invalid selection".into()))?;
        Ok(items[idx].id)
    }

    /// Ask before replacing a day that already has entries.
    pub fn confirm_overwrite(&self, change: &DayChange, yes: bool) -> AppResult<()> {
        if !change.had_existing || yes {
            return Ok(());
        }
        if !is_interactive() {
            return Err(AppError::NonInteractive(
                "confirmation required but terminal is non-interactive; use --yes".into(),
            ));
        }

        warning(change);
        prompt(format!("{} [y/N]: ", OVERWRITE_PROMPT));
        if read_answer(&mut io::stdin().lock())? {
            Ok(())
        } else {
            Err(AppError::Aborted)
        }
    }
}

/// `<id>  [<status>]  <buyer>`
pub fn engagement_line(item: &Engagement) -> String {
    format!("{}  [{}]  {}", item.id, item.status_label(), item.buyer_label())
}

pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Read one line; EOF yields an empty string.
pub fn read_line<R: BufRead>(reader: &mut R) -> AppResult<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// `y`/`yes` in any case means yes; anything else, EOF included, means no.
pub fn read_answer<R: BufRead>(reader: &mut R) -> AppResult<bool> {
    let answer = read_line(reader)?.to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

/// 1-based menu choice to a 0-based index.
pub fn parse_selection(line: &str, count: usize) -> Option<usize> {
    match line.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}
