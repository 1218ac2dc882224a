use thiserror::Error;

#[derive(Error, Debug)]
pub enum TfsaError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid limit for {year}: {limit}")]
    InvalidLimit { year: i32, limit: f64 },

    #[error("No contribution limit is defined for {0}")]
    UnknownStartYear(i32),

    #[error("No transaction with ID {0}")]
    UnknownTransaction(i64),

    #[error("No account selected. Pass --account or run `tfsa init --account <KEY>`")]
    NoAccount,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TfsaError>;
