use chrono::{Datelike, NaiveDate};

/// A stored ledger row. Positive amounts are deposits, negative are withdrawals.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub institution: String,
    pub amount: f64,
}

impl Transaction {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn is_deposit(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_withdrawal(&self) -> bool {
        self.amount < 0.0
    }
}

/// A validated row on its way into the ledger store.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub institution: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Apply this kind's sign to an unsigned amount.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            Self::Deposit => amount.abs(),
            Self::Withdrawal => -amount.abs(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "deposit" | "contribution" => Some(Self::Deposit),
            "withdrawal" | "withdraw" => Some(Self::Withdrawal),
            _ => None,
        }
    }
}
