//! hours library root.
//! Exposes the CLI parser, the high-level run() function and the timecard engine.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod credentials;
pub mod errors;
pub mod output;
pub mod timecard;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::app::App;
use crate::errors::AppResult;
use log::{LevelFilter, debug, warn};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, app: &mut App) -> AppResult<()> {
    match &cli.command {
        Commands::Auth { .. } => cli::commands::auth::handle(&cli.command, app),
        Commands::Engagement { .. } => cli::commands::engagement::handle(&cli.command, app),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, app),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, app),
        Commands::Set { .. } => cli::commands::set::handle(&cli.command, app),
        Commands::MarkDnw { .. } => cli::commands::mark_dnw::handle(&cli.command, app),
    }
}

/// Entry point used by main.rs. In JSON mode a failure is also written to
/// stdout as an error payload before being returned.
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (as_json, result) = match load_app(&cli) {
        Ok(mut app) => (app.json, dispatch(&cli, &mut app)),
        Err(e) => (cli.json, Err(e)),
    };

    if let Err(e) = &result
        && as_json
        && let Err(write_err) = output::write_error(e)
    {
        warn!("could not write error payload: {}", write_err);
    }
    result
}

fn load_app(cli: &Cli) -> AppResult<App> {
    let cfg_path = utils::path::resolve_config_path(cli.config_path())?;
    debug!("using config {}", cfg_path.display());
    let cfg = Config::load_from(&cfg_path)?;
    Ok(App::new(cfg, cfg_path, cli.json, cli.base_url.clone()))
}

/// Warnings by default, debug with `--verbose`; `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
