use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::startup::ensure_log_integrity;
use crate::db::log::ttlog;
use crate::db::migrate::schema_ready;
use crate::db::pool::DbPool;
use crate::db::queries::{erase_missing, unreadable_rows};
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, _cfg: &Config, pool: &mut DbPool) -> AppResult<()> {
    if let Commands::Db {
        check,
        reconcile,
        erase_missing: erase,
        info: show_info,
        vacuum,
    } = cmd
    {
        //
        // 1) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ SQLite integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ SQLite integrity check failed:{} {}", RED, RESET, integrity);
            }

            if !schema_ready(&pool.conn)? {
                println!("{}✘ Session tables are missing.{}", RED, RESET);
            }

            let bad = unreadable_rows(&pool.conn)?;
            if bad.is_empty() {
                println!("{}✔ All session rows are readable.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ {} unreadable session row(s):{}", RED, bad.len(), RESET);
                for (id, reason) in bad {
                    println!("    #{}: {}", id, reason);
                }
                println!();
            }
        }

        //
        // 2) ERASE MISSING
        //
        if *erase {
            let n = erase_missing(&pool.conn)?;
            if let Err(e) = ttlog(
                &pool.conn,
                "erase_missing",
                "timer_logs",
                &format!("Deleted {} missing record(s)", n),
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }
            success(format!("All missing records have been deleted ({}).", n));
        }

        //
        // 3) RECONCILE
        //
        if *reconcile {
            let n = ensure_log_integrity(pool)?;
            if n == 0 {
                info("Session log is consistent, nothing to repair.");
            } else {
                success(format!("Recorded {} missing session(s).", n));
            }
        }

        //
        // 4) INFO
        //
        if *show_info {
            stats::print_db_info(pool)?;
        }

        //
        // 5) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
