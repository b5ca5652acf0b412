//! Orders cash events and walks the running balance, injecting funds on shortfalls.

use chrono::NaiveDate;
use tracing::{debug, warn};

use pcb_domain::{
    CashEvent, EventKind, FundingOffer, Ledger, DEFAULT_BUFFER_THRESHOLD, DEFAULT_MAX_INJECTIONS,
};

use crate::allocator::{allocate, InjectionBudget};

/// Configures and runs one ledger walk.
#[derive(Debug, Clone, Copy)]
pub struct LedgerBuilder {
    opening_balance: f64,
    window_start: NaiveDate,
    buffer_threshold: f64,
    max_injections: usize,
}

impl LedgerBuilder {
    pub fn new(opening_balance: f64, window_start: NaiveDate) -> Self {
        Self {
            opening_balance,
            window_start,
            buffer_threshold: DEFAULT_BUFFER_THRESHOLD,
            max_injections: DEFAULT_MAX_INJECTIONS,
        }
    }

    pub fn buffer_threshold(mut self, threshold: f64) -> Self {
        self.buffer_threshold = threshold;
        self
    }

    pub fn max_injections(mut self, ceiling: usize) -> Self {
        self.max_injections = ceiling;
        self
    }

    /// Builds the ordered ledger.
    ///
    /// Events sort by date, kind rank, then label, behind a synthetic opening
    /// entry dated at the window start. The buffer is checked once per day,
    /// after that day's last event, so a same-day dip that a later event on
    /// the same date already covers draws nothing, and every injector sorts
    /// after the events of its date. A closing balance under the buffer
    /// triggers allocation; the returned injectors are spliced in at that
    /// point and carried into every later balance. Offers are drawn down in
    /// place.
    pub fn build(&self, events: Vec<CashEvent>, offers: &mut [FundingOffer]) -> Ledger {
        let mut pending: Vec<CashEvent> = events
            .into_iter()
            .filter(|event| {
                let keep = event.kind != EventKind::Opening
                    && event.amount != 0.0
                    && event.date >= self.window_start;
                if !keep {
                    debug!(label = %event.label, date = %event.date, "event dropped before ledger walk");
                }
                keep
            })
            .collect();
        pending.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut ledger = Vec::with_capacity(pending.len() + 1);
        ledger.push(CashEvent::opening(self.window_start, self.opening_balance));

        let mut running = self.opening_balance;
        let mut budget = InjectionBudget::new(self.max_injections);
        let mut ceiling_reported = false;
        let mut queue = pending.into_iter().peekable();

        while let Some(mut event) = queue.next() {
            running += event.amount;
            event.running_total = running;
            let date = event.date;
            ledger.push(event);

            let day_closed = queue.peek().map_or(true, |next| next.date != date);
            if !day_closed || running >= self.buffer_threshold {
                continue;
            }
            if budget.is_exhausted() {
                if !ceiling_reported {
                    warn!(
                        ceiling = self.max_injections,
                        %date,
                        "injection ceiling reached; remaining shortfalls left unaddressed"
                    );
                    ceiling_reported = true;
                }
                continue;
            }

            let needed = self.buffer_threshold - running;
            let injections = allocate(needed, date, offers, &mut budget);
            if injections.is_empty() {
                debug!(%date, needed, "no eligible funding for shortfall");
            }
            for mut injector in injections {
                running += injector.amount;
                injector.running_total = running;
                ledger.push(injector);
            }
        }

        Ledger {
            opening_balance: self.opening_balance,
            events: ledger,
        }
    }
}

#[cfg(test)]
mod tests {
    use pcb_domain::FundingSourceRecord;

    use super::*;
    use crate::offers::build_offers;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bill_without_funding_surfaces_negative_balance() {
        let events = vec![CashEvent::new(date(2026, 1, 15), "Mortgage", EventKind::Bill, -1200.0)];
        let ledger = LedgerBuilder::new(1000.0, date(2026, 1, 1))
            .buffer_threshold(100.0)
            .build(events, &mut []);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.events[0].kind, EventKind::Opening);
        assert_eq!(ledger.events[0].running_total, 1000.0);
        assert_eq!(ledger.events[1].running_total, -200.0);
    }

    #[test]
    fn shortfall_is_backfilled_to_the_buffer() {
        let events = vec![CashEvent::new(date(2026, 1, 15), "Mortgage", EventKind::Bill, -1200.0)];
        let mut offers = build_offers(
            &[FundingSourceRecord::new("Savings", 1, 0, 500.0)],
            date(2026, 1, 1),
        );
        let ledger = LedgerBuilder::new(1000.0, date(2026, 1, 1))
            .buffer_threshold(100.0)
            .build(events, &mut offers);

        let injector = &ledger.events[2];
        assert_eq!(injector.kind, EventKind::Injector);
        assert_eq!(injector.date, date(2026, 1, 15));
        assert_eq!(injector.amount, 300.0);
        assert_eq!(injector.running_total, 100.0);
        assert_eq!(offers[0].remaining, 200.0);
    }

    #[test]
    fn same_day_income_posts_before_outflows() {
        let day = date(2026, 2, 1);
        let events = vec![
            CashEvent::new(day, "Rent", EventKind::Bill, -500.0),
            CashEvent::new(day, "Paycheck", EventKind::Income, 600.0),
        ];
        let ledger = LedgerBuilder::new(0.0, day)
            .buffer_threshold(0.0)
            .build(events, &mut []);
        let labels: Vec<_> = ledger.events.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Opening balance", "Paycheck", "Rent"]);
        assert_eq!(ledger.events[1].running_total, 600.0);
        assert_eq!(ledger.events[2].running_total, 100.0);
    }

    #[test]
    fn injectors_close_the_day() {
        let day = date(2026, 1, 10);
        let events = vec![
            CashEvent::new(day, "A", EventKind::Bill, -100.0),
            CashEvent::new(day, "B", EventKind::Bill, -100.0),
            CashEvent::new(date(2026, 1, 11), "C", EventKind::Bill, -10.0),
        ];
        let mut offers = build_offers(&[FundingSourceRecord::new("Savings", 1, 0, 1000.0)], day);
        let ledger = LedgerBuilder::new(50.0, day)
            .buffer_threshold(0.0)
            .build(events, &mut offers);
        let kinds: Vec<_> = ledger.events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Opening,
                EventKind::Bill,
                EventKind::Bill,
                EventKind::Injector,
                EventKind::Bill,
                EventKind::Injector,
            ]
        );
        assert_eq!(ledger.events[3].amount, 150.0);
        assert_eq!(ledger.ending_balance(), 0.0);
    }

    #[test]
    fn chunked_draws_size_against_the_day_end_shortfall() {
        let day = date(2026, 3, 2);
        let events = vec![
            CashEvent::new(day, "Gas", EventKind::Bill, -30.0),
            CashEvent::new(day, "Water", EventKind::Bill, -30.0),
        ];
        let mut offers = build_offers(
            &[
                FundingSourceRecord::new("Savings", 1, 0, 100.0).with_chunk(50.0),
                FundingSourceRecord::new("Brokerage", 2, 0, 1000.0).with_chunk(100.0),
            ],
            day,
        );
        let ledger = LedgerBuilder::new(0.0, day)
            .buffer_threshold(0.0)
            .build(events, &mut offers);

        let rows: Vec<_> = ledger
            .events
            .iter()
            .map(|e| (e.kind, e.amount, e.running_total))
            .collect();
        assert_eq!(
            rows,
            vec![
                (EventKind::Opening, 0.0, 0.0),
                (EventKind::Bill, -30.0, -30.0),
                (EventKind::Bill, -30.0, -60.0),
                (EventKind::Injector, 100.0, 40.0),
            ]
        );
        assert_eq!(offers[0].remaining, 0.0);
        assert_eq!(offers[1].remaining, 1000.0);
    }

    #[test]
    fn latency_defers_injection_until_offer_matures() {
        let run = date(2026, 1, 1);
        let events = vec![
            CashEvent::new(date(2026, 1, 2), "Bill", EventKind::Bill, -300.0),
            CashEvent::new(date(2026, 1, 6), "Coffee", EventKind::Bill, -5.0),
        ];
        let mut offers = build_offers(&[FundingSourceRecord::new("Brokerage", 1, 3, 1000.0)], run);
        let ledger = LedgerBuilder::new(0.0, run)
            .buffer_threshold(0.0)
            .build(events, &mut offers);
        let injector = ledger.injectors().next().unwrap();
        assert_eq!(injector.date, date(2026, 1, 6));
        assert_eq!(injector.amount, 305.0);
        assert_eq!(ledger.events[1].running_total, -300.0);
    }

    #[test]
    fn ceiling_stops_new_injectors() {
        let run = date(2026, 1, 1);
        let events: Vec<_> = (1..=5)
            .map(|day| CashEvent::new(date(2026, 1, day), "Bill", EventKind::Bill, -10.0))
            .collect();
        let mut offers = build_offers(&[FundingSourceRecord::new("Savings", 1, 0, 1000.0)], run);
        let ledger = LedgerBuilder::new(0.0, run)
            .buffer_threshold(0.0)
            .max_injections(2)
            .build(events, &mut offers);
        assert_eq!(ledger.injectors().count(), 2);
        assert_eq!(ledger.ending_balance(), -30.0);
    }

    #[test]
    fn zero_and_early_events_are_dropped() {
        let run = date(2026, 1, 10);
        let events = vec![
            CashEvent::new(date(2026, 1, 12), "Zero", EventKind::Bill, 0.0),
            CashEvent::new(date(2026, 1, 9), "Early", EventKind::Bill, -5.0),
        ];
        let ledger = LedgerBuilder::new(10.0, run).build(events, &mut []);
        assert_eq!(ledger.len(), 1);
    }
}
