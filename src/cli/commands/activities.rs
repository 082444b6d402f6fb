use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::activities::{all_activities, search_activities};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, _cfg: &Config, pool: &mut DbPool) -> AppResult<()> {
    if let Commands::Activities { query } = cmd {
        let names = match query.as_deref() {
            Some(q) => search_activities(&pool.conn, q)?,
            None => all_activities(&pool.conn)?,
        };

        if names.is_empty() {
            info("No matching activities.");
            return Ok(());
        }

        for name in names {
            println!("• {}", name);
        }
    }

    Ok(())
}
