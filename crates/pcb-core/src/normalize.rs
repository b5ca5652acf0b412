//! Maps alias-laden source attributes onto the fixed internal record schema.
//!
//! Each record kind has exactly one normalization function. Unusable records
//! (no amount, no recognizable schedule) are dropped here or downstream and
//! logged at debug level; they never fail the run.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

use pcb_domain::{AccountRecord, EventKind, FundingSourceRecord, ScheduleSpec, ScheduledRecord};

use crate::{context::parse_date, schedule::parse_schedule_token, source::RawRecord};

const DEFAULT_PRIORITY: i64 = 100;

/// Normalizes a bill or debt record. Returns `None` when it has no usable amount.
pub fn obligation(raw: &RawRecord, kind: EventKind) -> Option<ScheduledRecord> {
    let attrs = &raw.attributes;
    let Some(amount) = pick_number(attrs, &["amount"]) else {
        debug!(record = %raw.id, "obligation skipped: missing amount");
        return None;
    };
    let label = pick_string(attrs, &["ref", "name"]).unwrap_or_else(|| raw.name.clone());
    let cycle = pick_string(attrs, &["cycle"]).unwrap_or_default();
    let days = pick_days(attrs, &["due_days", "due_day"]);
    let anchor = pick_date(attrs, &["anchor_date", "anchor", "start_date"]);

    let schedule = match anchor {
        Some(anchor) if cycle.eq_ignore_ascii_case("biweekly") || days.is_empty() => {
            Some(ScheduleSpec::Biweekly { anchor })
        }
        _ if !days.is_empty() => Some(ScheduleSpec::DayOfMonth { days }),
        _ => pick_string(attrs, &["schedule"])
            .and_then(|token| parse_schedule_token(&token))
            .or_else(|| {
                pick_date(attrs, &["due_date"]).map(|date| ScheduleSpec::OnDate { date })
            }),
    };

    Some(ScheduledRecord {
        id: raw.id.clone(),
        label,
        kind,
        amount,
        due_amounts: pick_numbers(attrs, &["due_amounts", "amounts"]),
        schedule,
        account: pick_string(attrs, &["account", "account_key"]).unwrap_or_default(),
        cycle,
        autopay: pick_bool(attrs, &["autopay"]).unwrap_or(false),
        covered: pick_bool(attrs, &["covered", "excluded"]).unwrap_or(false),
        source: raw.id.clone(),
    })
}

/// Normalizes an income record. Returns `None` for non-income tags or a missing amount.
pub fn income(raw: &RawRecord) -> Option<ScheduledRecord> {
    let attrs = &raw.attributes;
    if let Some(tags) = attrs.get("tags") {
        if !has_income_tag(tags) {
            debug!(record = %raw.id, "income skipped: not tagged as income");
            return None;
        }
    }
    let Some(amount) = pick_number(attrs, &["amount", "base_amount", "value"]) else {
        debug!(record = %raw.id, "income skipped: missing amount");
        return None;
    };
    let label = pick_string(attrs, &["ref", "name"]).unwrap_or_else(|| raw.name.clone());
    let cycle = pick_string(attrs, &["cycle"]).unwrap_or_default();
    let days = pick_days(attrs, &["due_days", "pay_days"]);

    let schedule = if let Some(date) = pick_date(attrs, &["date_of_deposit"]) {
        Some(ScheduleSpec::OnDate { date })
    } else if let Some(spec) =
        pick_string(attrs, &["schedule"]).and_then(|token| parse_schedule_token(&token))
    {
        Some(spec)
    } else if let Some(anchor) = pick_date(attrs, &["anchor_date", "anchor", "start_date"]) {
        Some(ScheduleSpec::Biweekly { anchor })
    } else if !days.is_empty() {
        Some(ScheduleSpec::DayOfMonth { days })
    } else {
        None
    };

    Some(ScheduledRecord {
        id: raw.id.clone(),
        label,
        kind: EventKind::Income,
        amount,
        due_amounts: pick_numbers(attrs, &["due_amounts", "amounts"]),
        schedule,
        account: pick_string(attrs, &["deposit_to", "bank_key", "account"]).unwrap_or_default(),
        cycle,
        autopay: false,
        covered: pick_bool(attrs, &["covered", "excluded"]).unwrap_or(false),
        source: raw.id.clone(),
    })
}

/// Normalizes a funding source. Missing fields fall back to neutral defaults.
pub fn funding_source(raw: &RawRecord) -> FundingSourceRecord {
    let attrs = &raw.attributes;
    let non_negative = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
    FundingSourceRecord {
        id: raw.id.clone(),
        name: raw.name.clone(),
        reference: pick_string(attrs, &["ref", "name"]).unwrap_or_else(|| raw.name.clone()),
        enabled: pick_bool(attrs, &["injector_enabled", "enabled"]).unwrap_or(true),
        priority: pick_number(attrs, &["injector_priority", "priority"])
            .map(|value| value.round() as i64)
            .unwrap_or(DEFAULT_PRIORITY),
        latency_days: pick_number(attrs, &["injector_latency_days", "latency_days", "latency"])
            .map(|value| value.round() as i64)
            .unwrap_or(0),
        cap: non_negative(
            pick_number(attrs, &["injector_cap", "cap", "holdings", "balance"]).unwrap_or(0.0),
        ),
        cost: pick_number(attrs, &["injector_cost", "cost"]).unwrap_or(0.0),
        chunk: non_negative(pick_number(attrs, &["injector_chunk", "chunk"]).unwrap_or(0.0)),
    }
}

/// Normalizes an account or checking snapshot.
pub fn account(raw: &RawRecord) -> AccountRecord {
    let attrs = &raw.attributes;
    AccountRecord {
        id: raw.id.clone(),
        label: pick_string(attrs, &["label", "name"]).unwrap_or_else(|| raw.name.clone()),
        account_key: pick_string(attrs, &["account_key", "bank_key"])
            .unwrap_or_else(|| raw.name.clone()),
        kind: pick_string(attrs, &["kind", "type"]).unwrap_or_default(),
        balance: pick_number(attrs, &["balance", "current_balance", "available"]),
        as_of: pick_string(attrs, &["as_of", "as_of_date", "asof"]).unwrap_or_default(),
        source: raw.id.clone(),
    }
}

fn has_income_tag(tags: &Value) -> bool {
    match tags {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|tag| tag.trim_start_matches('#').eq_ignore_ascii_case("income")),
        Value::String(text) => text.to_ascii_lowercase().contains("income"),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let number: Option<f64> = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', "").parse().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn pick_number(attrs: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| attrs.get(*key).and_then(as_number))
}

fn pick_numbers(attrs: &Map<String, Value>, keys: &[&str]) -> Vec<f64> {
    keys.iter()
        .find_map(|key| match attrs.get(*key)? {
            Value::Array(items) => Some(items.iter().filter_map(as_number).collect()),
            other => as_number(other).map(|number| vec![number]),
        })
        .unwrap_or_default()
}

/// Day-of-month lists keep only integral days in 1–31.
fn pick_days(attrs: &Map<String, Value>, keys: &[&str]) -> Vec<u32> {
    pick_numbers(attrs, keys)
        .into_iter()
        .filter(|day| day.fract() == 0.0 && (1.0..=31.0).contains(day))
        .map(|day| day as u32)
        .collect()
}

fn pick_bool(attrs: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| match attrs.get(*key)? {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) if text.eq_ignore_ascii_case("true") => Some(true),
        Value::String(text) if text.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    })
}

fn pick_string(attrs: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match attrs.get(*key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    })
}

fn pick_date(attrs: &Map<String, Value>, keys: &[&str]) -> Option<NaiveDate> {
    pick_string(attrs, keys).and_then(|text| parse_date(&text).ok())
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use serde_json::json;

    use super::*;

    fn raw(name: &str, value: Value) -> RawRecord {
        RawRecord::from_value(name, value)
    }

    #[test]
    fn obligation_accepts_legacy_aliases() {
        let record = obligation(
            &raw(
                "Verizon.md",
                json!({ "amount": "200", "due_day": 14, "account_key": "chase" }),
            ),
            EventKind::Bill,
        )
        .unwrap();
        assert_eq!(record.label, "Verizon.md");
        assert_eq!(record.amount, 200.0);
        assert_eq!(record.account, "chase");
        assert_eq!(
            record.schedule,
            Some(ScheduleSpec::DayOfMonth { days: vec![14] })
        );
    }

    #[test]
    fn obligation_without_amount_is_skipped() {
        assert!(obligation(&raw("x", json!({ "due_days": [1] })), EventKind::Bill).is_none());
    }

    #[test]
    fn out_of_range_days_are_dropped() {
        let record = obligation(
            &raw("x", json!({ "amount": 5, "due_days": [0, 15, 32, 2.5] })),
            EventKind::Debt,
        )
        .unwrap();
        assert_eq!(
            record.schedule,
            Some(ScheduleSpec::DayOfMonth { days: vec![15] })
        );
    }

    #[test]
    fn biweekly_cycle_prefers_anchor() {
        let record = obligation(
            &raw(
                "Car",
                json!({ "amount": 150, "cycle": "biweekly", "anchor_date": "2026-01-02", "due_days": [1] }),
            ),
            EventKind::Debt,
        )
        .unwrap();
        assert_eq!(
            record.schedule,
            Some(ScheduleSpec::Biweekly {
                anchor: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
            })
        );
    }

    #[test]
    fn unrecognized_schedule_leaves_record_unscheduled() {
        let record = obligation(
            &raw("x", json!({ "amount": 5, "schedule": "sometimes" })),
            EventKind::Bill,
        )
        .unwrap();
        assert!(record.schedule.is_none());
    }

    #[test]
    fn income_token_and_tags() {
        let record = income(&raw(
            "SSI",
            json!({ "ref": "SSI", "base_amount": 1026, "schedule": "2nd_wed", "tags": ["income"], "bank_key": "chase" }),
        ))
        .unwrap();
        assert_eq!(
            record.schedule,
            Some(ScheduleSpec::NthWeekday {
                nth: 2,
                weekday: Weekday::Wed
            })
        );
        assert_eq!(record.account, "chase");
        assert!(income(&raw("x", json!({ "amount": 5, "tags": ["bill"] }))).is_none());
    }

    #[test]
    fn deposit_date_overrides_schedule_token() {
        let record = income(&raw(
            "Refund",
            json!({ "amount": 300, "schedule": "2nd_wed", "date_of_deposit": "2026-04-20" }),
        ))
        .unwrap();
        assert_eq!(
            record.schedule,
            Some(ScheduleSpec::OnDate {
                date: NaiveDate::from_ymd_opt(2026, 4, 20).unwrap()
            })
        );
    }

    #[test]
    fn funding_source_defaults() {
        let record = funding_source(&raw("Brokerage", json!({ "holdings": 2500 })));
        assert!(record.enabled);
        assert_eq!(record.priority, 100);
        assert_eq!(record.latency_days, 0);
        assert_eq!(record.cap, 2500.0);
        assert_eq!(record.chunk, 0.0);
    }

    #[test]
    fn funding_source_prefixed_keys_win() {
        let record = funding_source(&raw(
            "Savings",
            json!({ "injector_cap": 400, "cap": 9000, "injector_enabled": "false", "latency": 3, "injector_chunk": 50 }),
        ));
        assert_eq!(record.cap, 400.0);
        assert!(!record.enabled);
        assert_eq!(record.latency_days, 3);
        assert_eq!(record.chunk, 50.0);
    }

    #[test]
    fn account_balance_aliases() {
        let record = account(&raw(
            "Chase",
            json!({ "current_balance": 812.5, "asof": "2026-01-01", "type": "checking" }),
        ));
        assert_eq!(record.balance, Some(812.5));
        assert_eq!(record.as_of, "2026-01-01");
        assert_eq!(record.kind, "checking");
        assert_eq!(record.account_key, "Chase");
    }
}
