use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config, pool: &mut DbPool) -> AppResult<()> {
    if let Commands::Log { print, transitions } = cmd {
        if *print {
            LogLogic::print_log(pool)?;
        }
        if *transitions {
            LogLogic::print_transitions(&cfg.transitions_path())?;
        }
    }

    Ok(())
}
