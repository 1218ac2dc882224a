use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let schedule = load_settings().limit_schedule()?;

    let mut table = Table::new();
    table.set_header(vec!["Year", "Limit", "Cumulative"]);
    let mut cumulative = 0.0;
    for (year, limit) in schedule.iter() {
        cumulative += limit;
        table.add_row(vec![Cell::new(year), Cell::new(money(limit)), Cell::new(money(cumulative))]);
    }
    println!("Annual Contribution Limits\n{table}");
    Ok(())
}
