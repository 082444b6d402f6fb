use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::{SortOrder, SummarySort, build_summary};
use crate::db::pool::DbPool;
use crate::db::queries::load_events_for_day;
use crate::errors::{AppError, AppResult};
use crate::models::session_event::{NO_ACTIVITY, format_timestamp};
use crate::models::summary_row::{SummaryRecord, SummaryRow};
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_duration, colorize_optional};
use crate::utils::date::{format_summary_date, parse_summary_date, today};
use crate::utils::table::Table;

fn resolve_sort(cmd_sort: SummarySort, asc: bool, desc: bool) -> SummarySort {
    let order = if asc {
        SortOrder::Ascending
    } else if desc {
        SortOrder::Descending
    } else {
        cmd_sort.order
    };
    SummarySort::new(cmd_sort.column, order)
}

fn print_table(rows: &[SummaryRow]) {
    let mut table = Table::new(["Activity", "Cumulative Time", "Start Time", "End Time"]);

    for row in rows {
        let activity = if row.activity_name.is_empty() {
            NO_ACTIVITY.to_string()
        } else {
            row.activity_name.clone()
        };
        let color = color_for_duration(row.cumulative.map(|d| d.num_seconds()));
        let stamp = |t: &Option<chrono::NaiveDateTime>| {
            colorize_optional(&t.as_ref().map(format_timestamp).unwrap_or_else(|| "--".into()))
        };

        table.add_row(vec![
            activity,
            format!("{}{}{}", color, row.duration_str(), RESET),
            stamp(&row.start),
            stamp(&row.end),
        ]);
    }

    print!("{}", table.render());
}

pub fn handle(cmd: &Commands, cfg: &Config, pool: &mut DbPool) -> AppResult<()> {
    if let Commands::Summary {
        date,
        sort,
        asc,
        desc,
        json,
    } = cmd
    {
        //
        // 1. Date (default: today)
        //
        let day = match date {
            Some(s) => parse_summary_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => today(),
        };

        //
        // 2. Order: command line first, then configuration
        //
        let configured = SummarySort::new(
            cfg.summary_sort,
            if cfg.summary_descending {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            },
        );
        let base = match sort {
            Some(column) => configured.select(*column),
            None => configured,
        };
        let sort = resolve_sort(base, *asc, *desc);

        //
        // 3. Aggregate
        //
        let events = load_events_for_day(&pool.conn, &day)?;
        let rows = build_summary(day, &events, sort);

        if *json {
            let records: Vec<SummaryRecord> = rows.iter().map(SummaryRecord::from).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        println!("\n=== Activity summary for {} ===\n", format_summary_date(&day));
        if rows.is_empty() {
            info(format!("No sessions recorded on {}.", format_summary_date(&day)));
            return Ok(());
        }
        print_table(&rows);
    }

    Ok(())
}
