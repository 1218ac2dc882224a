use std::path::PathBuf;

use crate::cli::AccountContext;
use crate::error::Result;
use crate::importer::import_csv;

pub fn run(account: Option<&str>, file: &str) -> Result<()> {
    let ctx = AccountContext::open(account)?;
    let result = import_csv(&ctx.conn, &ctx.account_key, &PathBuf::from(file))?;
    println!("{} imported, {} skipped (malformed)", result.imported, result.skipped);
    Ok(())
}
