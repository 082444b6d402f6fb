use crate::core::summary::SortColumn;
use clap::{Parser, Subcommand};

/// Command-line interface definition for pomolog
/// Countdown timer that logs every session to SQLite
#[derive(Parser)]
#[command(
    name = "pomolog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A pomodoro timer: run countdowns per activity, log every session and summarize your day",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Start a countdown for an activity (press Enter to stop it)
    Start {
        /// Activity name (optional)
        activity: Option<String>,

        #[arg(long, short = 'd', help = "Duration in minutes")]
        duration: Option<String>,

        #[arg(
            long,
            short = 'e',
            help = "End time (HH:MM); a time already past today means tomorrow"
        )]
        end: Option<String>,

        #[arg(long, short = 'n', help = "Remind this many minutes before the end")]
        notify: Option<String>,
    },

    /// Show the per-activity summary of a day
    Summary {
        /// Date as dd.mm.yyyy, dd.mm.yy or dd.mm (default: today)
        date: Option<String>,

        #[arg(long, short = 's', value_enum, help = "Column to sort by")]
        sort: Option<SortColumn>,

        #[arg(long, conflicts_with = "desc", help = "Sort ascending")]
        asc: bool,

        #[arg(long, help = "Sort descending")]
        desc: bool,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },

    /// List known activities, optionally filtered by a substring
    Activities {
        query: Option<String>,
    },

    /// Manage the database (integrity, repairs, statistics)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "reconcile", help = "Close sessions that were never stopped")]
        reconcile: bool,

        #[arg(
            long = "erase-missing",
            help = "Delete every synthesized 'missing' record"
        )]
        erase_missing: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,
    },

    /// Print the internal log or the session transitions file
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "transitions", help = "Print the session transitions file")]
        transitions: bool,
    },
}

impl Commands {
    /// Commands that work on the session log and therefore need it
    /// checked first.
    pub fn needs_store(&self) -> bool {
        !matches!(self, Commands::Init | Commands::Config { .. })
    }

    /// `db --erase-missing` must be usable on a log the startup check
    /// cannot repair.
    pub fn skips_integrity_check(&self) -> bool {
        matches!(
            self,
            Commands::Db {
                erase_missing: true,
                ..
            } | Commands::Db { check: true, .. }
        )
    }
}
