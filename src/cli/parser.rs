use crate::models::performance::TimeFrame;
use clap::{Parser, Subcommand};

/// Command-line interface definition for routinely
/// CLI application to plan a daily routine and track it with SQLite
#[derive(Parser)]
#[command(
    name = "routinely",
    version = env!("CARGO_PKG_VERSION"),
    about = "A daily routine tracker: plan tasks, tick them off, see how punctual you are",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user (default: `default_user` from the config file)
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

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
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage users and their API tokens
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage routines (named tasks with a start and end time)
    Routine {
        #[command(subcommand)]
        action: RoutineAction,
    },

    /// Assign routines to days of the week
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Mark a routine as done (or not done) for a date
    Done {
        /// Routine id
        routine_id: i64,

        #[arg(long = "date", help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "start", help = "Actual start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "end", help = "Actual end time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "undo", help = "Mark the routine as not done")]
        undo: bool,
    },

    /// Show every routine with its completion and punctuality for a date
    Status {
        #[arg(long = "date", help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,
    },

    /// Weekly (Monday–Friday) completion percentages
    Perf {
        #[arg(long = "date", help = "Any date in the week (YYYY-MM-DD), default today")]
        date: Option<String>,
    },

    /// On-time statistics over the last week or month
    Timing {
        #[arg(long = "frame", value_enum, default_value = "week")]
        frame: TimeFrame,
    },

    /// Run the HTTP JSON API
    Serve {
        #[arg(long = "bind", help = "Address to listen on (default from config)")]
        bind: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user and print its API token
    Add { name: String },

    /// List users
    List,

    /// Print (or rotate) the API token of the current user
    Token {
        #[arg(long = "rotate", help = "Issue a new token, invalidating the old one")]
        rotate: bool,
    },
}

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Add a routine
    Add {
        /// Task name
        name: String,

        #[arg(long = "start", help = "Scheduled start, e.g. \"8:00 AM\"")]
        start: String,

        #[arg(long = "end", help = "Scheduled end, e.g. \"9:30 AM\"")]
        end: String,
    },

    /// List routines ordered by start time
    List,

    /// Edit a routine (unspecified fields keep their value)
    Edit {
        id: i64,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "start")]
        start: Option<String>,

        #[arg(long = "end")]
        end: Option<String>,
    },

    /// Delete a routine (its schedules and completions go with it)
    Del { id: i64 },

    /// Replace all routines with the default day template
    Reset {
        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Schedule a routine on a day (0-6, a name such as `mon`, or `today`)
    Add { routine_id: i64, day: String },

    /// List schedules, or the routines of one day
    List {
        #[arg(long = "day")]
        day: Option<String>,
    },

    /// Remove a schedule
    Del { id: i64 },
}
