use std::io::Write;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::AccountContext;
use crate::error::{Result, TfsaError};
use crate::fmt::money;
use crate::importer::parse_date_arg;
use crate::ledger;
use crate::models::{NewTransaction, TransactionKind};

pub fn add(
    account: Option<&str>,
    amount: f64,
    kind: TransactionKind,
    date: Option<&str>,
    institution: &str,
) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(TfsaError::InvalidAmount(format!(
            "{amount} (use a positive amount with --type withdrawal)"
        )));
    }
    let date = match date {
        Some(raw) => parse_date_arg(raw)?,
        None => chrono::Local::now().date_naive(),
    };

    let ctx = AccountContext::open(account)?;
    let txn = NewTransaction {
        date,
        institution: institution.trim().to_string(),
        amount: kind.signed(amount),
    };
    let id = ledger::insert(&ctx.conn, &ctx.account_key, &txn)?;
    println!("Recorded transaction {id}: {date} {} {}", txn.institution, money(txn.amount));
    Ok(())
}

pub fn list(account: Option<&str>) -> Result<()> {
    let ctx = AccountContext::open(account)?;
    let txns = ledger::list(&ctx.conn, &ctx.account_key)?;

    if txns.is_empty() {
        println!("No transactions recorded for {}.", ctx.account_key);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Institution", "Type", "Amount"]);
    for t in &txns {
        let kind = if t.is_withdrawal() {
            "Withdrawal".yellow()
        } else {
            "Deposit".green()
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(t.date),
            Cell::new(&t.institution),
            Cell::new(kind),
            Cell::new(money(t.amount)),
        ]);
    }
    println!("All Transactions\n{table}");
    Ok(())
}

pub fn delete(account: Option<&str>, id: i64) -> Result<()> {
    let ctx = AccountContext::open(account)?;
    ledger::delete(&ctx.conn, &ctx.account_key, id)?;
    println!("Deleted transaction {id}");
    Ok(())
}

pub fn clear(account: Option<&str>, yes: bool) -> Result<()> {
    let ctx = AccountContext::open(account)?;
    let count = ledger::count(&ctx.conn, &ctx.account_key)?;
    if count == 0 {
        println!("Nothing to clear.");
        return Ok(());
    }

    if !yes {
        print!("Delete all {count} transactions for {}? [y/N] ", ctx.account_key);
        std::io::stdout().flush()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let deleted = ledger::delete_all(&ctx.conn, &ctx.account_key)?;
    println!("All data cleared ({deleted} transactions).");
    Ok(())
}
