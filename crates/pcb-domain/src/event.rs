//! Ledger entries produced by the forecast.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classifies a ledger entry and fixes its position among same-day entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Opening,
    Income,
    Bill,
    Debt,
    Injector,
}

impl EventKind {
    /// Same-day ordering rank: income posts before outflows, injectors close the day.
    pub fn priority(self) -> u8 {
        match self {
            EventKind::Opening => 0,
            EventKind::Income => 1,
            EventKind::Bill | EventKind::Debt => 2,
            EventKind::Injector => 3,
        }
    }

    /// Sign applied to declared magnitudes for this kind.
    pub fn sign(self) -> f64 {
        match self {
            EventKind::Bill | EventKind::Debt => -1.0,
            EventKind::Opening | EventKind::Income | EventKind::Injector => 1.0,
        }
    }

    pub fn is_outflow(self) -> bool {
        matches!(self, EventKind::Bill | EventKind::Debt)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Opening => "opening",
            EventKind::Income => "income",
            EventKind::Bill => "bill",
            EventKind::Debt => "debt",
            EventKind::Injector => "injector",
        };
        f.write_str(label)
    }
}

/// One dated cash movement in the projected ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashEvent {
    pub date: NaiveDate,
    pub label: String,
    pub kind: EventKind,
    /// Signed: inflows are non-negative, outflows non-positive.
    pub amount: f64,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub cycle: String,
    #[serde(default)]
    pub source: String,
    /// Balance after this event; assigned by the ledger builder.
    #[serde(default)]
    pub running_total: f64,
}

impl CashEvent {
    pub fn new(date: NaiveDate, label: impl Into<String>, kind: EventKind, amount: f64) -> Self {
        Self {
            date,
            label: label.into(),
            kind,
            amount,
            account: String::new(),
            cycle: String::new(),
            source: String::new(),
            running_total: 0.0,
        }
    }

    /// Synthetic zero-amount entry that anchors the running balance.
    pub fn opening(date: NaiveDate, balance: f64) -> Self {
        let mut event = Self::new(date, "Opening balance", EventKind::Opening, 0.0);
        event.running_total = balance;
        event
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    pub fn with_cycle(mut self, cycle: impl Into<String>) -> Self {
        self.cycle = cycle.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Deterministic ledger order: date, then kind rank, then label.
    pub fn sort_key(&self) -> (NaiveDate, u8, &str) {
        (self.date, self.kind.priority(), self.label.as_str())
    }
}
