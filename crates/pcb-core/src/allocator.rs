//! Greedy injector allocation across prioritized, capped, latency-gated offers.

use chrono::NaiveDate;
use tracing::debug;

use pcb_domain::{CashEvent, EventKind, FundingOffer};

use crate::money::{round_cents, round_up_to_chunk};

/// Run-wide ceiling on synthesized injector events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionBudget {
    ceiling: usize,
    used: usize,
}

impl InjectionBudget {
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling, used: 0 }
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.ceiling
    }

    fn record(&mut self) {
        self.used += 1;
    }
}

/// Closes up to `needed` on `date` from eligible offers, drawing them down in place.
///
/// Offers are eligible when they have capacity left and have matured by `date`;
/// they are visited by priority, cost, then name. Draws round up to the offer's
/// chunk but never past its remaining capacity, so the total may overshoot
/// `needed`. Returns no events when nothing is eligible.
pub fn allocate(
    needed: f64,
    date: NaiveDate,
    offers: &mut [FundingOffer],
    budget: &mut InjectionBudget,
) -> Vec<CashEvent> {
    let mut needed = round_cents(needed);
    let mut injections = Vec::new();

    let mut order: Vec<usize> = (0..offers.len())
        .filter(|&idx| offers[idx].is_available(date))
        .collect();
    order.sort_by(|&a, &b| offers[a].preference_cmp(&offers[b]));

    for idx in order {
        if needed <= 0.0 || budget.is_exhausted() {
            break;
        }
        let offer = &mut offers[idx];
        let raw = needed.min(offer.remaining);
        let amount = round_cents(round_up_to_chunk(raw, offer.chunk).min(offer.remaining));
        if amount <= 0.0 {
            continue;
        }

        offer.remaining = (offer.remaining - amount).max(0.0);
        needed = round_cents(needed - amount);
        budget.record();
        debug!(offer = %offer.name, %date, amount, remaining = offer.remaining, "injector allocated");

        injections.push(
            CashEvent::new(date, format!("Inject: {}", offer.name), EventKind::Injector, amount)
                .with_account(offer.name.clone())
                .with_cycle("injector")
                .with_source(offer.id.clone()),
        );
    }

    injections
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pcb_domain::FundingSourceRecord;

    use super::*;
    use crate::offers::build_offers;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn higher_priority_offer_drains_first() {
        let mut offers = build_offers(
            &[
                FundingSourceRecord::new("Backup", 2, 0, 1000.0),
                FundingSourceRecord::new("Primary", 1, 0, 50.0),
            ],
            run_date(),
        );
        let mut budget = InjectionBudget::new(10);
        let events = allocate(300.0, run_date(), &mut offers, &mut budget);

        let drawn: Vec<_> = events.iter().map(|e| (e.account.as_str(), e.amount)).collect();
        assert_eq!(drawn, vec![("Primary", 50.0), ("Backup", 250.0)]);
        assert_eq!(budget.used(), 2);
    }

    #[test]
    fn chunk_rounding_is_capped_by_remaining() {
        let mut offers = build_offers(
            &[FundingSourceRecord::new("Brokerage", 1, 0, 220.0).with_chunk(100.0)],
            run_date(),
        );
        let mut budget = InjectionBudget::new(10);

        let first = allocate(120.0, run_date(), &mut offers, &mut budget);
        assert_eq!(first[0].amount, 200.0);
        assert_eq!(offers[0].remaining, 20.0);

        let second = allocate(90.0, run_date(), &mut offers, &mut budget);
        assert_eq!(second[0].amount, 20.0);
        assert_eq!(offers[0].remaining, 0.0);
    }

    #[test]
    fn immature_offers_are_ineligible() {
        let mut offers = build_offers(&[FundingSourceRecord::new("Slow", 1, 5, 500.0)], run_date());
        let mut budget = InjectionBudget::new(10);

        assert!(allocate(100.0, run_date(), &mut offers, &mut budget).is_empty());
        let later = run_date() + Duration::days(5);
        let events = allocate(100.0, later, &mut offers, &mut budget);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, later);
    }

    #[test]
    fn exhausted_budget_stops_allocation() {
        let mut offers = build_offers(
            &[
                FundingSourceRecord::new("A", 1, 0, 10.0),
                FundingSourceRecord::new("B", 2, 0, 10.0),
            ],
            run_date(),
        );
        let mut budget = InjectionBudget::new(1);
        let events = allocate(20.0, run_date(), &mut offers, &mut budget);
        assert_eq!(events.len(), 1);
        assert!(budget.is_exhausted());
        assert!(allocate(5.0, run_date(), &mut offers, &mut budget).is_empty());
    }
}
