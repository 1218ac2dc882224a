use crate::cli::AccountContext;
use crate::error::{Result, TfsaError};
use crate::ledger;

pub fn run(account: Option<&str>, year: Option<i32>) -> Result<()> {
    let ctx = AccountContext::open(account)?;

    match year {
        None => {
            let current = ledger::get_start_year(&ctx.conn, &ctx.account_key)?;
            println!("Start year for {}: {current}", ctx.account_key);
        }
        Some(year) => {
            let schedule = ctx.schedule()?;
            if !schedule.contains(year) {
                if let (Some(first), Some(last)) = (schedule.first_year(), schedule.last_year()) {
                    eprintln!("Choose a year between {first} and {last}.");
                }
                return Err(TfsaError::UnknownStartYear(year));
            }
            let previous = ledger::get_start_year(&ctx.conn, &ctx.account_key)?;
            if previous == year {
                println!("Start year already {year}");
            } else {
                ledger::set_start_year(&ctx.conn, &ctx.account_key, year)?;
                println!("Start year set to {year} (was {previous})");
            }
        }
    }
    Ok(())
}
