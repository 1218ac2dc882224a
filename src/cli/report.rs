use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{this_year, AccountContext};
use crate::error::Result;
use crate::fmt::{money, percent, progress_bar};
use crate::ledger;
use crate::room::{self, RoomReport};

fn build(account: Option<&str>, year: Option<i32>) -> Result<RoomReport> {
    let ctx = AccountContext::open(account)?;
    let schedule = ctx.schedule()?;
    let start_year = ledger::get_start_year(&ctx.conn, &ctx.account_key)?;
    let current_year = year.unwrap_or_else(this_year);
    let txns = ledger::list(&ctx.conn, &ctx.account_key)?;
    if start_year > current_year {
        tracing::warn!(start_year, current_year, "start year is after the report year");
    } else if !schedule.contains(start_year) {
        tracing::warn!(start_year, "start year has no limit in the schedule");
    }
    Ok(room::compute(&schedule, start_year, current_year, &txns))
}

fn print_over_contribution(report: &RoomReport) {
    if report.summary.is_over_contributed {
        println!("\n{}", "You have OVER-CONTRIBUTED to your TFSA".red().bold());
    }
}

pub fn summary(account: Option<&str>, year: Option<i32>) -> Result<()> {
    let report = build(account, year)?;
    let s = &report.summary;

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![Cell::new("Total Room".bold()), Cell::new(money(s.total_lifetime_limit))]);
    table.add_row(vec![Cell::new("Deposited"), Cell::new(money(s.total_room_used))]);
    table.add_row(vec![Cell::new("Withdrawn"), Cell::new(money(report.total_withdrawn))]);
    let remaining = if s.total_remaining < 0.0 {
        money(s.total_remaining).red()
    } else {
        money(s.total_remaining).green()
    };
    table.add_row(vec![Cell::new("Remaining".bold()), Cell::new(remaining)]);
    table.add_row(vec![Cell::new("Used"), Cell::new(percent(report.percent_used()))]);

    println!(
        "Contribution Overview ({}\u{2013}{})\n{table}",
        report.start_year, report.current_year
    );
    println!(
        "{} {}",
        progress_bar(s.total_room_used, s.total_lifetime_limit, 40),
        percent(report.percent_used())
    );
    print_over_contribution(&report);
    Ok(())
}

pub fn years(account: Option<&str>, year: Option<i32>) -> Result<()> {
    let report = build(account, year)?;

    if report.years.is_empty() {
        println!(
            "No years to report for start year {} through {}.",
            report.start_year, report.current_year
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Year", "Limit", "Withdrawal Credit", "Room", "Deposited", "Carry Forward"]);
    for y in &report.years {
        let deposited = if y.deposit_this_year > y.room_this_year {
            money(y.deposit_this_year).red()
        } else {
            money(y.deposit_this_year).normal()
        };
        table.add_row(vec![
            Cell::new(y.year),
            Cell::new(money(y.limit_for_year)),
            Cell::new(money(y.withdrawal_credited_this_year)),
            Cell::new(money(y.room_this_year)),
            Cell::new(deposited),
            Cell::new(money(y.carry_forward_out)),
        ]);
    }
    println!("Room by Year\n{table}");
    print_over_contribution(&report);
    Ok(())
}
