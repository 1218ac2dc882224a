//! Contribution-room accrual.
//!
//! Room is replayed year by year from the start-eligibility year through the
//! current year. Each year grants its statutory limit, plus unused room carried
//! forward, plus whatever was withdrawn in the previous year. Everything here is
//! a pure function of its inputs; callers pass "now" in as `current_year`.

use std::collections::BTreeMap;

use crate::limits::LimitSchedule;
use crate::models::Transaction;

#[derive(Debug, Clone, PartialEq)]
pub struct YearAccrualState {
    pub year: i32,
    pub limit_for_year: f64,
    pub deposit_this_year: f64,
    pub withdrawal_credited_this_year: f64,
    pub room_this_year: f64,
    /// Unused room rolled into the next year. Never negative.
    pub carry_forward_out: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_lifetime_limit: f64,
    pub total_room_used: f64,
    pub total_remaining: f64,
    pub is_over_contributed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomReport {
    pub start_year: i32,
    pub current_year: i32,
    pub years: Vec<YearAccrualState>,
    pub summary: Summary,
    /// All withdrawals inside the tracked window, current year included.
    pub total_withdrawn: f64,
}

impl RoomReport {
    pub fn year(&self, year: i32) -> Option<&YearAccrualState> {
        self.years.iter().find(|y| y.year == year)
    }

    pub fn percent_used(&self) -> f64 {
        let limit = self.summary.total_lifetime_limit;
        if limit > 0.0 {
            self.summary.total_room_used / limit * 100.0
        } else {
            0.0
        }
    }
}

/// Per-year deposit and withdrawal totals, restricted to `start_year..=current_year`.
struct YearTotals {
    deposits: BTreeMap<i32, f64>,
    withdrawals: BTreeMap<i32, f64>,
}

impl YearTotals {
    fn tally(ledger: &[Transaction], start_year: i32, current_year: i32) -> Self {
        let mut deposits = BTreeMap::new();
        let mut withdrawals = BTreeMap::new();
        for txn in ledger {
            let year = txn.year();
            if year < start_year || year > current_year {
                continue;
            }
            if txn.is_deposit() {
                *deposits.entry(year).or_insert(0.0) += txn.amount;
            } else if txn.is_withdrawal() {
                *withdrawals.entry(year).or_insert(0.0) += txn.amount.abs();
            }
        }
        Self {
            deposits,
            withdrawals,
        }
    }

    fn deposit(&self, year: i32) -> f64 {
        self.deposits.get(&year).copied().unwrap_or(0.0)
    }

    fn withdrawal(&self, year: i32) -> f64 {
        self.withdrawals.get(&year).copied().unwrap_or(0.0)
    }

    fn withdrawn_before(&self, year: i32) -> f64 {
        self.withdrawals.range(..year).map(|(_, w)| w).sum()
    }

    fn withdrawn_total(&self) -> f64 {
        self.withdrawals.values().sum()
    }
}

/// Replay the ledger against the schedule and summarize the room position.
///
/// A start year missing from the schedule, or an inverted window
/// (`start_year > current_year`), yields an empty trace and an all-zero summary.
/// Transactions outside the window are ignored entirely.
pub fn compute(
    schedule: &LimitSchedule,
    start_year: i32,
    current_year: i32,
    ledger: &[Transaction],
) -> RoomReport {
    if !schedule.contains(start_year) || start_year > current_year {
        return RoomReport {
            start_year,
            current_year,
            ..RoomReport::default()
        };
    }

    let totals = YearTotals::tally(ledger, start_year, current_year);

    let mut years = Vec::new();
    let mut carry_forward = 0.0_f64;
    let mut room_used = 0.0_f64;

    for year in start_year..=current_year {
        let limit_year = schedule.limit_for(year);
        let deposit = totals.deposit(year);
        // Withdrawals come back as room the following year; the start year has
        // no prior year to credit.
        let withdrawal_credit = if year > start_year {
            totals.withdrawal(year - 1)
        } else {
            0.0
        };

        let room_this_year = limit_year + carry_forward + withdrawal_credit;
        room_used += deposit;
        carry_forward = (room_this_year - deposit).max(0.0);

        years.push(YearAccrualState {
            year,
            limit_for_year: limit_year,
            deposit_this_year: deposit,
            withdrawal_credited_this_year: withdrawal_credit,
            room_this_year,
            carry_forward_out: carry_forward,
        });
    }

    let total_lifetime_limit = schedule.total_limit(start_year, current_year);
    let total_remaining = total_lifetime_limit + totals.withdrawn_before(current_year) - room_used;

    RoomReport {
        start_year,
        current_year,
        years,
        summary: Summary {
            total_lifetime_limit,
            total_room_used: room_used,
            total_remaining,
            is_over_contributed: room_used > total_lifetime_limit,
        },
        total_withdrawn: totals.withdrawn_total(),
    }
}
