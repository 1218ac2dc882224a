use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::{Result, TfsaError};
use crate::ledger;
use crate::models::{NewTransaction, TransactionKind};

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Parse a currency string such as `$1,200.00` or `(250.00)`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace([',', '"', '$'], "");
    let s = s.trim();
    let value = if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        -inner.trim().parse::<f64>().ok()?
    } else {
        s.parse::<f64>().ok()?
    };
    value.is_finite().then_some(value)
}

/// Accepts `YYYY-MM-DD` and `M/D/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let m: u32 = parts[0].parse().ok()?;
    let d: u32 = parts[1].parse().ok()?;
    let y: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    parse_date(raw).ok_or_else(|| TfsaError::InvalidDate(raw.to_string()))
}

// ---------------------------------------------------------------------------
// CSV import
// ---------------------------------------------------------------------------

pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
}

struct Columns {
    date: usize,
    institution: Option<usize>,
    amount: usize,
    kind: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let date = find("date").ok_or_else(|| TfsaError::Other("CSV is missing a Date column".to_string()))?;
        let amount =
            find("amount").ok_or_else(|| TfsaError::Other("CSV is missing an Amount column".to_string()))?;
        Ok(Self {
            date,
            institution: find("institution"),
            amount,
            kind: find("type"),
        })
    }
}

fn parse_record(record: &csv::StringRecord, cols: &Columns) -> Option<NewTransaction> {
    let date = parse_date(record.get(cols.date)?)?;
    let mut amount = parse_amount(record.get(cols.amount)?)?;
    if let Some(idx) = cols.kind {
        let raw = record.get(idx).unwrap_or("");
        if !raw.trim().is_empty() {
            amount = TransactionKind::parse(raw)?.signed(amount);
        }
    }
    let institution = cols
        .institution
        .and_then(|i| record.get(i))
        .unwrap_or("")
        .trim()
        .to_string();
    Some(NewTransaction {
        date,
        institution,
        amount,
    })
}

/// Load a `Date,Institution,Amount[,Type]` CSV into the account's ledger.
///
/// Rows with a bad date, amount or type are counted as skipped and never
/// reach the store.
pub fn import_csv(conn: &Connection, account_key: &str, file_path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(file_path)?;
    let cols = Columns::locate(reader.headers()?)?;

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line = line + 2, error = %e, "skipping undecodable CSV row");
                skipped += 1;
                continue;
            }
        };
        match parse_record(&record, &cols) {
            Some(txn) => rows.push(txn),
            None => {
                tracing::warn!(line = line + 2, "skipping malformed CSV row");
                skipped += 1;
            }
        }
    }

    let tx = conn.unchecked_transaction()?;
    for row in &rows {
        ledger::insert(&tx, account_key, row)?;
    }
    tx.commit()?;

    tracing::info!(
        file = %file_path.display(),
        imported = rows.len(),
        skipped,
        "imported CSV"
    );
    Ok(ImportResult {
        imported: rows.len(),
        skipped,
    })
}
