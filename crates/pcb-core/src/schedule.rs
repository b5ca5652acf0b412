//! Resolves schedule descriptors into concrete calendar dates.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use pcb_domain::{ScheduleSpec, BIWEEKLY_INTERVAL_DAYS};

static NTH_WEEKDAY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)([1-5])(?:st|nd|rd|th)[\s_]+([a-z]+)$").expect("valid nth-weekday pattern")
});

static LAST_WEEKDAY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)last[\s_]+([a-z]+)$").expect("valid last-weekday pattern"));

/// A resolved occurrence and the position of the schedule entry that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub date: NaiveDate,
}

/// Parses tokens such as `2nd Wednesday`, `4th_wed`, `1st_week` or `last fri`.
pub fn parse_schedule_token(token: &str) -> Option<ScheduleSpec> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if token.eq_ignore_ascii_case("1st_week") || token.eq_ignore_ascii_case("1st week") {
        return Some(ScheduleSpec::FirstBusinessDay);
    }
    if let Some(caps) = NTH_WEEKDAY_TOKEN.captures(token) {
        let nth: u8 = caps[1].parse().ok()?;
        let weekday: Weekday = caps[2].parse().ok()?;
        return Some(ScheduleSpec::NthWeekday { nth, weekday });
    }
    if let Some(caps) = LAST_WEEKDAY_TOKEN.captures(token) {
        let weekday: Weekday = caps[1].parse().ok()?;
        return Some(ScheduleSpec::LastWeekday { weekday });
    }
    None
}

/// First `weekday` on or after the 1st, advanced by `nth - 1` weeks.
///
/// The result is not clamped: when the month has fewer than `nth` matches the
/// date lands in the following month and callers must treat it as absent.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, nth: u8) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (7 + weekday.num_days_from_monday() as i64
        - first.weekday().num_days_from_monday() as i64)
        % 7;
    let first_match = first + Duration::days(offset);
    Some(first_match + Duration::days(7 * (nth.max(1) as i64 - 1)))
}

pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    let back = (7 + last.weekday().num_days_from_monday() as i64
        - weekday.num_days_from_monday() as i64)
        % 7;
    Some(last - Duration::days(back))
}

pub fn first_business_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    (0..7)
        .map(|offset| first + Duration::days(offset))
        .find(|date| !is_weekend(*date))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|first| first - Duration::days(1))
}

/// Month-scoped resolution keeping the index of the schedule entry behind each date.
///
/// Every returned date lies inside the requested month. Biweekly specs are
/// window-scoped and yield nothing here; see [`resolve_biweekly`].
pub fn resolve_slots(spec: &ScheduleSpec, year: i32, month: u32) -> Vec<Slot> {
    let in_month = |date: &NaiveDate| date.year() == year && date.month() == month;
    let single = |date: Option<NaiveDate>| {
        date.filter(in_month)
            .map(|date| vec![Slot { index: 0, date }])
            .unwrap_or_default()
    };

    match spec {
        ScheduleSpec::DayOfMonth { days } => days
            .iter()
            .enumerate()
            // from_ymd_opt rejects days the month lacks instead of rolling over
            .filter_map(|(index, day)| {
                NaiveDate::from_ymd_opt(year, month, *day).map(|date| Slot { index, date })
            })
            .filter(|slot| in_month(&slot.date))
            .collect(),
        ScheduleSpec::NthWeekday { nth, weekday } => {
            single(nth_weekday_of_month(year, month, *weekday, *nth))
        }
        ScheduleSpec::LastWeekday { weekday } => {
            single(last_weekday_of_month(year, month, *weekday))
        }
        ScheduleSpec::FirstBusinessDay => single(first_business_day_of_month(year, month)),
        ScheduleSpec::OnDate { date } => single(Some(*date)),
        ScheduleSpec::Biweekly { .. } => Vec::new(),
    }
}

/// Dates a month-scoped spec produces in the given month.
pub fn resolve(spec: &ScheduleSpec, year: i32, month: u32) -> Vec<NaiveDate> {
    resolve_slots(spec, year, month)
        .into_iter()
        .map(|slot| slot.date)
        .collect()
}

/// Every 14-day step from `anchor` that falls within `[start, end]`.
pub fn resolve_biweekly(anchor: NaiveDate, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if end < start {
        return dates;
    }
    let offset = (start - anchor).num_days();
    let mut steps = offset.div_euclid(BIWEEKLY_INTERVAL_DAYS);
    if offset.rem_euclid(BIWEEKLY_INTERVAL_DAYS) != 0 {
        steps += 1;
    }
    let mut current = anchor + Duration::days(steps * BIWEEKLY_INTERVAL_DAYS);
    while current <= end {
        dates.push(current);
        current += Duration::days(BIWEEKLY_INTERVAL_DAYS);
    }
    dates
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Pulls a Saturday or Sunday back to the preceding Friday. Display use only.
pub fn previous_business_day(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date - Duration::days(2),
        _ => date,
    }
}
