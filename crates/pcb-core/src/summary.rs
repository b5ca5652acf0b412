use chrono::NaiveDate;
use serde::Serialize;

use pcb_domain::{EventKind, FundingOffer, Ledger};

use crate::money::round_cents;

/// How much of one offer a run consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferUsage {
    pub name: String,
    pub available_on: NaiveDate,
    pub cap: f64,
    pub drawn: f64,
    pub remaining: f64,
}

/// Aggregate figures for a built ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub opening_balance: f64,
    pub inflow: f64,
    pub outflow: f64,
    pub injected: f64,
    pub net: f64,
    pub ending_balance: f64,
    pub lowest_balance: f64,
    pub lowest_date: Option<NaiveDate>,
    /// Entries whose running balance still sits under the buffer.
    pub below_buffer: usize,
    pub offers: Vec<OfferUsage>,
}

impl ForecastSummary {
    pub fn from_ledger(ledger: &Ledger, offers: &[FundingOffer], buffer_threshold: f64) -> Self {
        let mut inflow = 0.0;
        let mut outflow = 0.0;
        let mut injected = 0.0;
        for event in &ledger.events {
            match event.kind {
                EventKind::Income => inflow += event.amount,
                EventKind::Bill | EventKind::Debt => outflow += event.amount.abs(),
                EventKind::Injector => injected += event.amount,
                EventKind::Opening => {}
            }
        }
        let (lowest_date, lowest_balance) = ledger
            .lowest_point()
            .map(|(date, balance)| (Some(date), balance))
            .unwrap_or((None, ledger.opening_balance));
        let below_buffer = ledger
            .events
            .iter()
            .filter(|event| event.kind != EventKind::Opening)
            .filter(|event| event.running_total < buffer_threshold)
            .count();

        Self {
            opening_balance: ledger.opening_balance,
            inflow: round_cents(inflow),
            outflow: round_cents(outflow),
            injected: round_cents(injected),
            net: round_cents(inflow + injected - outflow),
            ending_balance: round_cents(ledger.ending_balance()),
            lowest_balance: round_cents(lowest_balance),
            lowest_date,
            below_buffer,
            offers: offers
                .iter()
                .map(|offer| OfferUsage {
                    name: offer.name.clone(),
                    available_on: offer.available_on,
                    cap: offer.cap,
                    drawn: round_cents(offer.drawn()),
                    remaining: offer.remaining,
                })
                .collect(),
        }
    }
}
