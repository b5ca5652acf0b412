//! Expands scheduled records into signed cash events clipped to a window.

use tracing::debug;

use pcb_domain::{CashEvent, DateWindow, EventKind, ScheduleSpec, ScheduledRecord};

use crate::schedule::{resolve_biweekly, resolve_slots, Slot};

/// Emits one event per occurrence of each record inside `window`.
///
/// Amounts are forced to the sign of `kind`; covered or unscheduled records and
/// zero-amount occurrences produce nothing.
pub fn collect(records: &[ScheduledRecord], kind: EventKind, window: DateWindow) -> Vec<CashEvent> {
    let mut events = Vec::new();

    for record in records {
        if record.covered {
            debug!(record = %record.id, "skipping covered record");
            continue;
        }
        let Some(schedule) = record.schedule.as_ref() else {
            debug!(record = %record.id, "skipping record without a recognized schedule");
            continue;
        };

        for slot in occurrences(schedule, window) {
            let magnitude = occurrence_amount(record, schedule, slot.index).abs();
            if magnitude == 0.0 {
                continue;
            }
            let cycle = if record.cycle.is_empty() {
                schedule.to_string()
            } else {
                record.cycle.clone()
            };
            events.push(
                CashEvent::new(slot.date, record.label.clone(), kind, kind.sign() * magnitude)
                    .with_account(record.account.clone())
                    .with_cycle(cycle)
                    .with_source(record.source.clone()),
            );
        }
    }

    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.label.cmp(&b.label)));
    events
}

fn occurrences(schedule: &ScheduleSpec, window: DateWindow) -> Vec<Slot> {
    if let ScheduleSpec::Biweekly { anchor } = schedule {
        return resolve_biweekly(*anchor, window.start, window.end)
            .into_iter()
            .map(|date| Slot { index: 0, date })
            .collect();
    }
    window
        .months()
        .into_iter()
        .flat_map(|(year, month)| resolve_slots(schedule, year, month))
        .filter(|slot| window.contains(slot.date))
        .collect()
}

/// Per-occurrence amounts apply only when they pair one-to-one with the due days.
fn occurrence_amount(record: &ScheduledRecord, schedule: &ScheduleSpec, index: usize) -> f64 {
    match schedule {
        ScheduleSpec::DayOfMonth { days }
            if !record.due_amounts.is_empty() && record.due_amounts.len() == days.len() =>
        {
            record.due_amounts[index]
        }
        _ => record.amount,
    }
}
