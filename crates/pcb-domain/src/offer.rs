use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A funding source's availability for one forecast run.
///
/// `remaining` is drawn down in place as injectors are allocated, so an offer
/// must never be reused across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundingOffer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub reference: String,
    pub priority: i64,
    pub cost: f64,
    pub latency_days: i64,
    pub available_on: NaiveDate,
    pub cap: f64,
    pub remaining: f64,
    /// Rounding granularity for draws; zero disables rounding.
    pub chunk: f64,
}

impl FundingOffer {
    pub fn is_available(&self, date: NaiveDate) -> bool {
        self.remaining > 0.0 && self.available_on <= date
    }

    pub fn drawn(&self) -> f64 {
        self.cap - self.remaining
    }

    /// Ascending preference: priority, then cost, then name.
    pub fn preference_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.cost.total_cmp(&other.cost))
            .then_with(|| self.name.cmp(&other.name))
    }
}
