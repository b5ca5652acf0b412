use chrono::NaiveDate;
use serde_json::json;

use crate::{ForecastService, MemorySource, RunParams};
use pcb_domain::{EventKind, RecordKind};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january(opening: Option<f64>) -> pcb_domain::RunContext {
    RunParams {
        from: Some("2026-01-01".into()),
        to: Some("2026-01-31".into()),
        buffer_threshold: Some(100.0),
        opening_balance: opening,
        ..RunParams::new("/vault", "2026-01-01")
    }
    .resolve()
    .expect("valid run params")
}

#[test]
fn mortgage_shortfall_without_funding() {
    let source = MemorySource::new().with(
        RecordKind::Bill,
        "Mortgage",
        json!({ "amount": 1200, "due_days": [15] }),
    );
    let forecast = ForecastService::run(&january(Some(1000.0)), &source).expect("forecast");

    let events = &forecast.ledger.events;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::Opening);
    assert_eq!(events[0].running_total, 1000.0);
    assert_eq!(events[1].amount, -1200.0);
    assert_eq!(events[1].running_total, -200.0);
    assert_eq!(forecast.summary.below_buffer, 1);
}

#[test]
fn mortgage_shortfall_is_injected_on_due_date() {
    let source = MemorySource::new()
        .with(
            RecordKind::Bill,
            "Mortgage",
            json!({ "amount": 1200, "due_days": [15] }),
        )
        .with(
            RecordKind::Injector,
            "Savings",
            json!({ "priority": 1, "latency_days": 0, "cap": 500 }),
        );
    let forecast = ForecastService::run(&january(Some(1000.0)), &source).expect("forecast");

    let injector = forecast.ledger.injectors().next().expect("injector present");
    assert_eq!(injector.date, date(2026, 1, 15));
    assert!(injector.amount >= 300.0);
    assert!(injector.running_total >= 100.0);
    assert_eq!(forecast.summary.injected, 300.0);
    assert_eq!(forecast.summary.offers[0].drawn, 300.0);
}

#[test]
fn funding_that_never_matures_is_left_out_of_the_run() {
    let source = MemorySource::new()
        .with(
            RecordKind::Bill,
            "Mortgage",
            json!({ "amount": 1200, "due_days": [15] }),
        )
        .with(
            RecordKind::Injector,
            "Someday",
            json!({ "priority": 1, "latency_days": 1e9, "cap": 500 }),
        );
    let forecast = ForecastService::run(&january(Some(1000.0)), &source).expect("forecast");

    assert!(forecast.offers.is_empty());
    assert_eq!(forecast.ledger.injectors().count(), 0);
    assert_eq!(forecast.summary.ending_balance, -200.0);
    assert_eq!(forecast.summary.below_buffer, 1);
}

#[test]
fn opening_balance_aggregates_checking_accounts() {
    let source = MemorySource::new()
        .with(RecordKind::Checking, "Chase", json!({ "balance": 700 }))
        .with(RecordKind::Checking, "Ally", json!({ "balance": "300.50" }))
        .with(RecordKind::Checking, "Stale", json!({ "as_of": "2025-12-01" }));
    let forecast = ForecastService::run(&january(None), &source).expect("forecast");
    assert_eq!(forecast.ledger.opening_balance, 1000.5);
}

#[test]
fn incomes_bills_and_debts_merge_into_one_ordered_ledger() {
    let source = MemorySource::new()
        .with(
            RecordKind::Income,
            "SSI",
            json!({ "amount": 1026, "schedule": "2nd_wed" }),
        )
        .with(
            RecordKind::Bill,
            "Verizon",
            json!({ "amount": 200, "due_days": 14 }),
        )
        .with(
            RecordKind::Debt,
            "Car loan",
            json!({ "amount": 150, "cycle": "biweekly", "anchor_date": "2026-01-02" }),
        );
    let forecast = ForecastService::run(&january(Some(500.0)), &source).expect("forecast");

    let rows: Vec<_> = forecast
        .ledger
        .events
        .iter()
        .map(|e| (e.date, e.label.as_str(), e.amount))
        .collect();
    assert_eq!(
        rows,
        vec![
            (date(2026, 1, 1), "Opening balance", 0.0),
            (date(2026, 1, 2), "Car loan", -150.0),
            (date(2026, 1, 14), "SSI", 1026.0),
            (date(2026, 1, 14), "Verizon", -200.0),
            (date(2026, 1, 16), "Car loan", -150.0),
            (date(2026, 1, 30), "Car loan", -150.0),
        ]
    );
    assert_eq!(forecast.summary.ending_balance, 876.0);
}

#[test]
fn identical_inputs_build_identical_ledgers() {
    let source = MemorySource::new()
        .with(
            RecordKind::Bill,
            "Rent",
            json!({ "amount": 900, "due_days": [1, 15], "due_amounts": [450, 450] }),
        )
        .with(
            RecordKind::Injector,
            "Brokerage",
            json!({ "priority": 2, "cap": 2000, "chunk": 100, "latency_days": 2 }),
        );
    let context = january(Some(200.0));
    let first = ForecastService::run(&context, &source).expect("first run");
    let second = ForecastService::run(&context, &source).expect("second run");
    assert_eq!(first.ledger, second.ledger);
    assert_eq!(first.offers, second.offers);
}
