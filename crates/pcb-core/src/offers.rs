//! Funding offer construction for a single run.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use pcb_domain::{FundingOffer, FundingSourceRecord};

use crate::money::round_cents;

/// Builds fresh offers from enabled sources, ordered by preference.
///
/// Each offer matures `latency_days` after `run_date`; negative latency is treated as zero.
/// Sources whose maturity date falls outside the calendar are dropped.
pub fn build_offers(sources: &[FundingSourceRecord], run_date: NaiveDate) -> Vec<FundingOffer> {
    let mut offers: Vec<FundingOffer> = sources
        .iter()
        .filter(|source| source.enabled)
        .filter_map(|source| {
            let latency = source.latency_days.max(0);
            let Some(available_on) = Duration::try_days(latency)
                .and_then(|delay| run_date.checked_add_signed(delay))
            else {
                debug!(source = %source.id, latency, "offer skipped: maturity date out of range");
                return None;
            };
            let cap = round_cents(source.cap.max(0.0));
            Some(FundingOffer {
                id: source.id.clone(),
                name: source.name.clone(),
                reference: source.reference.clone(),
                priority: source.priority,
                cost: source.cost,
                latency_days: latency,
                available_on,
                cap,
                remaining: cap,
                chunk: source.chunk.max(0.0),
            })
        })
        .collect();
    offers.sort_by(|a, b| a.preference_cmp(b));
    offers
}
