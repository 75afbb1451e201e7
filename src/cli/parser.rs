use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTriplog
/// CLI application to keep a monthly vehicle trip ledger with SQLite
#[derive(Parser)]
#[command(
    name = "rtriplog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A vehicle trip ledger CLI: generate monthly trip logs, append trips and compute mileage reimbursement using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

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

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
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

        #[arg(
            long = "check",
            help = "Check database integrity and validate every ledger"
        )]
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

    /// Generate a synthetic month of trips, replacing that month's ledger
    Generate {
        /// Month to generate (YYYY-MM), default: current month
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Build and report without writing anything
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append a single trip to its month's ledger
    Add {
        /// Distance in whole kilometres
        distance_km: u32,

        /// Trip category (commute, client visit, meeting transport, business travel, inspection, vehicle service)
        category: String,

        #[arg(long, help = "Trip date (YYYY-MM-DD), default: today")]
        date: Option<String>,

        #[arg(long, help = "Trip time (HH:MM), default: now")]
        time: Option<String>,

        #[arg(long, help = "Route label, default: configured route")]
        route: Option<String>,
    },

    /// Append a trip from a JSON payload and print the JSON response
    Submit {
        /// JSON payload; read from stdin when omitted
        #[arg(long)]
        payload: Option<String>,
    },

    /// Serve the trip submission endpoint over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,
    },

    /// List ledgers
    List {
        #[arg(
            long,
            short,
            help = "Month (YYYY-MM), year (YYYY), range (YYYY-MM:YYYY-MM) or 'all'"
        )]
        period: Option<String>,

        #[arg(long = "summary", help = "Only show one summary line per ledger")]
        summary: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export trip data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
