pub mod import;
pub mod init;
pub mod limits;
pub mod report;
pub mod start_year;
pub mod status;
pub mod transactions;

use chrono::Datelike;
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::db;
use crate::error::Result;
use crate::limits::LimitSchedule;
use crate::models::TransactionKind;
use crate::settings::{load_settings, Settings};

/// Everything a per-account command needs, resolved once from flags and settings.
pub(crate) struct AccountContext {
    pub settings: Settings,
    pub conn: Connection,
    pub account_key: String,
}

impl AccountContext {
    pub fn open(account: Option<&str>) -> Result<Self> {
        let settings = load_settings();
        let account_key = settings.resolve_account(account)?;
        std::fs::create_dir_all(settings.data_dir())?;
        let conn = db::open(&settings.data_dir())?;
        Ok(Self {
            settings,
            conn,
            account_key,
        })
    }

    pub fn schedule(&self) -> Result<LimitSchedule> {
        self.settings.limit_schedule()
    }
}

/// Years a report may be computed as of. The fold runs once per year, so the
/// upper bound keeps it small.
const REPORT_YEARS: std::ops::RangeInclusive<i64> = 2009..=9999;

pub(crate) fn this_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Parser)]
#[command(name = "tfsa", about = "Track TFSA contribution room from your deposits and withdrawals.")]
pub struct Cli {
    /// Account holder key (e.g. an email address); defaults to the one saved by `tfsa init`
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory, save a default account, and create the database.
    Init {
        /// Path for tfsa data (default: ~/Documents/tfsa)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// JSON file with a replacement limit schedule
        #[arg(long = "limits-file")]
        limits_file: Option<String>,
    },
    /// Show the annual contribution limit schedule.
    Limits,
    /// Show or set the year the account holder became eligible.
    StartYear {
        /// New start year (must appear in the limit schedule)
        year: Option<i32>,
    },
    /// Record a deposit or withdrawal.
    Add {
        /// Amount in dollars (always positive; --type sets the sign)
        #[arg(long)]
        amount: f64,
        #[arg(long = "type", value_enum, default_value = "deposit")]
        kind: TransactionKind,
        /// Transaction date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "Wealthsimple")]
        institution: String,
    },
    /// List all transactions, newest first.
    List,
    /// Delete one transaction by ID.
    Delete {
        /// Transaction ID (shown in `tfsa list`)
        id: i64,
    },
    /// Delete every transaction for the account.
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Import transactions from a CSV with Date, Institution, Amount (and optional Type) columns.
    Import {
        /// Path to the CSV file
        file: String,
    },
    /// Contribution room reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show data location and ledger statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Lifetime room, deposits, withdrawals and remaining room.
    Summary {
        /// Compute as of this year (default: current year)
        #[arg(long, value_parser = clap::value_parser!(i32).range(REPORT_YEARS))]
        year: Option<i32>,
    },
    /// Year-by-year accrual trace.
    Years {
        /// Compute as of this year (default: current year)
        #[arg(long, value_parser = clap::value_parser!(i32).range(REPORT_YEARS))]
        year: Option<i32>,
    },
}
