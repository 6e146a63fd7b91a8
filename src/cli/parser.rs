use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for hours
/// CLI application to log worked hours on the Magnit worker portal
#[derive(Parser)]
#[command(
    name = "hours",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log worked hours on the Magnit VMS worker portal",
    long_about = None
)]
pub struct Cli {
    /// Emit JSON instead of human-readable output
    #[arg(global = true, long)]
    pub json: bool,

    /// Override the portal base URL
    #[arg(global = true, long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    /// Override the config file path (useful for tests or multiple profiles)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage stored credentials
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Engagement discovery
    Engagement {
        #[command(subcommand)]
        action: EngagementAction,
    },

    /// Manage local configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show logged spans for a day
    Show {
        #[command(flatten)]
        target: DayTarget,
    },

    /// Replace a day's time spans
    Set {
        #[command(flatten)]
        target: DayTarget,

        /// Time span as type:HH:MM-HH:MM (type: labor or lunch); repeatable
        #[arg(long = "span", value_name = "SPEC")]
        spans: Vec<String>,

        #[command(flatten)]
        write: WriteFlags,
    },

    /// Mark a day as did-not-work
    #[command(name = "mark-dnw")]
    MarkDnw {
        #[command(flatten)]
        target: DayTarget,

        #[command(flatten)]
        write: WriteFlags,
    },
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Verify credentials against the portal and store them in the OS keyring
    Login {
        /// Account username (email)
        #[arg(long)]
        username: Option<String>,

        /// Account password (non-interactive; avoid shell history leaks)
        #[arg(long, conflicts_with = "password_stdin")]
        password: Option<String>,

        /// Read the password from stdin
        #[arg(long = "password-stdin")]
        password_stdin: bool,
    },

    /// Check whether stored credentials can authenticate
    Status,

    /// Delete stored credentials
    Logout,
}

#[derive(Subcommand)]
pub enum EngagementAction {
    /// List available engagements
    List,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set the engagement used when --engagement is omitted
    SetDefaultEngagement {
        #[arg(long, value_name = "ID")]
        id: i64,
    },

    /// Set the IANA timezone used to resolve "today"
    SetTimezone {
        #[arg(long, value_name = "IANA")]
        tz: String,
    },

    /// Print the current configuration
    Show,
}

#[derive(Args, Debug, Clone)]
pub struct DayTarget {
    /// Target date (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Engagement ID override
    #[arg(long, value_name = "ID")]
    pub engagement: Option<i64>,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct WriteFlags {
    /// Validate and show the change without saving
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Replace existing entries without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl Cli {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .as_deref()
            .map(crate::utils::path::expand_tilde)
    }
}
