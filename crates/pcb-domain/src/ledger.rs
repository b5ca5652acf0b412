use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CashEvent, EventKind};

/// Ordered forecast output for one run. Never mutated after it is returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    pub opening_balance: f64,
    pub events: Vec<CashEvent>,
}

impl Ledger {
    pub fn ending_balance(&self) -> f64 {
        self.events
            .last()
            .map(|event| event.running_total)
            .unwrap_or(self.opening_balance)
    }

    /// Lowest running balance and the first date it occurs on.
    pub fn lowest_point(&self) -> Option<(NaiveDate, f64)> {
        self.events.iter().fold(None, |low, event| match low {
            Some((_, balance)) if balance <= event.running_total => low,
            _ => Some((event.date, event.running_total)),
        })
    }

    pub fn injectors(&self) -> impl Iterator<Item = &CashEvent> {
        self.events
            .iter()
            .filter(|event| event.kind == EventKind::Injector)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
