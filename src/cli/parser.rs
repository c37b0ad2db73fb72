use crate::models::event_kind::EventKind;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rFootfall
/// Tally walk-ins and operational visits per day, buffered into SQLite
#[derive(Parser)]
#[command(
    name = "rfootfall",
    version = env!("CARGO_PKG_VERSION"),
    about = "A footfall tally counter: log walk-ins and operational visits, see today's opportunities",
    long_about = None
)]
pub struct Cli {
    /// Override the store address (path, sqlite://path or :memory:)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Someone walked in
    #[value(aliases = ["walkin", "t"])]
    Total,
    /// Drop-off, pick-up or pop-in for a repair
    #[value(aliases = ["op", "o"])]
    Operational,
}

impl From<KindArg> for EventKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Total => EventKind::Total,
            KindArg::Operational => EventKind::Operational,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
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

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log events and sync them right away
    Add {
        /// Event kind: total (walk-in) or operational
        #[arg(value_enum)]
        kind: KindArg,

        /// Day the event counts for (YYYY-MM-DD, default today)
        #[arg(long = "date")]
        date: Option<String>,

        /// Number of people to log at once
        #[arg(long = "count", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
    },

    /// Remove the most recent event for a day
    Undo {
        #[arg(long = "date", help = "Day to undo on (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Show total, operational and opportunities for a day
    Summary {
        #[arg(long = "date", help = "Day to summarize (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long = "json", help = "Print the summary as JSON")]
        json: bool,
    },

    /// List stored events for a day
    List {
        #[arg(long = "date", help = "Day to list (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Interactive tally session with buffered, periodic sync
    Session {
        #[arg(long = "date", help = "Initially selected day (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },
}
