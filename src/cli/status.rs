use crate::db::{get_connection, DB_FILE};
use crate::error::Result;
use crate::ledger;
use crate::settings::load_settings;

pub fn run(account: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let data_dir = settings.data_dir();
    let db_path = data_dir.join(DB_FILE);

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());
    println!(
        "Limits:     {}",
        settings.limits_file.as_deref().unwrap_or("(built-in CRA schedule)")
    );

    let account_key = settings.resolve_account(account).ok();
    println!("Account:    {}", account_key.as_deref().unwrap_or("(not set)"));

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `tfsa init` to set up.");
        return Ok(());
    }

    let conn = get_connection(&db_path)?;
    let total: i64 = conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
    let accounts: i64 = conn.query_row(
        "SELECT count(DISTINCT account_key) FROM transactions",
        [],
        |r| r.get(0),
    )?;
    println!();
    println!("Accounts:      {accounts}");
    println!("Transactions:  {total}");

    if let Some(key) = account_key {
        println!("  for {key}: {}", ledger::count(&conn, &key)?);
        println!("Start year:    {}", ledger::get_start_year(&conn, &key)?);
    }
    Ok(())
}
