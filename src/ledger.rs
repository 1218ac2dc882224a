//! SQLite-backed ledger and per-account settings.
//!
//! Every query is scoped by `account_key`; one holder can never see or
//! delete another's rows.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{Result, TfsaError};
use crate::models::{NewTransaction, Transaction};

/// Start year used when an account has never chosen one.
pub const DEFAULT_START_YEAR: i32 = 2009;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// All rows for `account_key`, newest first. Rows whose stored date cannot
/// be parsed are skipped.
pub fn list(conn: &Connection, account_key: &str) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, institution, amount FROM transactions \
         WHERE account_key = ?1 ORDER BY date DESC, id DESC",
    )?;
    let rows: Vec<(i64, String, String, f64)> = stmt
        .query_map([account_key], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut txns = Vec::with_capacity(rows.len());
    for (id, raw_date, institution, amount) in rows {
        match NaiveDate::parse_from_str(raw_date.trim(), DATE_FORMAT) {
            Ok(date) => txns.push(Transaction {
                id,
                date,
                institution,
                amount,
            }),
            Err(_) => tracing::warn!(id, date = %raw_date, "skipping transaction with unparseable date"),
        }
    }
    tracing::debug!(account = account_key, count = txns.len(), "loaded ledger");
    Ok(txns)
}

pub fn insert(conn: &Connection, account_key: &str, txn: &NewTransaction) -> Result<i64> {
    if !txn.amount.is_finite() {
        return Err(TfsaError::InvalidAmount(txn.amount.to_string()));
    }
    conn.execute(
        "INSERT INTO transactions (account_key, date, institution, amount) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            account_key,
            txn.date.format(DATE_FORMAT).to_string(),
            txn.institution,
            txn.amount
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(account = account_key, id, amount = txn.amount, "recorded transaction");
    Ok(id)
}

pub fn delete(conn: &Connection, account_key: &str, id: i64) -> Result<()> {
    let changed = conn.execute(
        "DELETE FROM transactions WHERE id = ?1 AND account_key = ?2",
        rusqlite::params![id, account_key],
    )?;
    if changed == 0 {
        return Err(TfsaError::UnknownTransaction(id));
    }
    tracing::info!(account = account_key, id, "deleted transaction");
    Ok(())
}

/// Remove every row for the account and return how many were deleted.
pub fn delete_all(conn: &Connection, account_key: &str) -> Result<usize> {
    let changed = conn.execute("DELETE FROM transactions WHERE account_key = ?1", [account_key])?;
    tracing::info!(account = account_key, deleted = changed, "cleared ledger");
    Ok(changed)
}

pub fn count(conn: &Connection, account_key: &str) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT count(*) FROM transactions WHERE account_key = ?1",
        [account_key],
        |r| r.get(0),
    )?)
}

// ---------------------------------------------------------------------------
// Account settings
// ---------------------------------------------------------------------------

pub fn get_start_year(conn: &Connection, account_key: &str) -> Result<i32> {
    let year: Option<i32> = conn
        .query_row(
            "SELECT start_year FROM account_settings WHERE account_key = ?1",
            [account_key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(year.unwrap_or(DEFAULT_START_YEAR))
}

pub fn set_start_year(conn: &Connection, account_key: &str, year: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO account_settings (account_key, start_year) VALUES (?1, ?2) \
         ON CONFLICT(account_key) DO UPDATE SET start_year = excluded.start_year, updated_at = datetime('now')",
        rusqlite::params![account_key, year],
    )?;
    tracing::info!(account = account_key, year, "saved start year");
    Ok(())
}
