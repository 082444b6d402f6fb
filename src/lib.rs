//! pomolog library root.
//! Exposes the CLI parser, the high-level run() function and the session
//! log, reconciliation and summary modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use core::startup::ensure_log_integrity;
use db::initialize::init_db;
use db::pool::DbPool;
use errors::AppResult;
use ui::messages::warning;

/// Open the configured store, bring its schema up to date and, unless the
/// command is a repair tool, reconcile the session log before use.
pub fn open_store(cmd: &Commands, cfg: &Config) -> AppResult<DbPool> {
    let mut pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    if !cmd.skips_integrity_check() {
        let repaired = ensure_log_integrity(&mut pool)?;
        if repaired > 0 {
            warning(format!(
                "Closed {} session(s) that were never stopped (recorded as 'missing').",
                repaired
            ));
        }
    }

    Ok(pool)
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if !cli.command.needs_store() {
        return match &cli.command {
            Commands::Init => cli::commands::init::handle(cli),
            cmd => cli::commands::config::handle(cmd, cfg),
        };
    }

    let mut pool = open_store(&cli.command, cfg)?;

    match &cli.command {
        Commands::Start { .. } => cli::commands::start::handle(&cli.command, cfg, &mut pool),
        Commands::Summary { .. } => cli::commands::summary::handle(&cli.command, cfg, &mut pool),
        Commands::Activities { .. } => {
            cli::commands::activities::handle(&cli.command, cfg, &mut pool)
        }
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg, &mut pool),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg, &mut pool),
        Commands::Init | Commands::Config { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line database override
    if let Some(custom_db) = &cli.db {
        cfg = cfg.with_database(custom_db);
    }

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
