//! Recurrence descriptors for obligations and income.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Days between biweekly occurrences.
pub const BIWEEKLY_INTERVAL_DAYS: i64 = 14;

/// Describes when a record recurs. Exactly one variant applies per record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleSpec {
    /// Listed days of every month; days missing from a month are skipped.
    DayOfMonth { days: Vec<u32> },
    /// Fixed 14-day cadence through `anchor`.
    Biweekly { anchor: NaiveDate },
    /// The `nth` occurrence of `weekday` in each month (1-based).
    NthWeekday { nth: u8, weekday: Weekday },
    /// The final occurrence of `weekday` in each month.
    LastWeekday { weekday: Weekday },
    /// First Monday-to-Friday day of each month.
    FirstBusinessDay,
    /// A single fixed date.
    OnDate { date: NaiveDate },
}

impl ScheduleSpec {
    /// Whether the spec resolves month by month rather than over a whole window.
    pub fn is_month_scoped(&self) -> bool {
        !matches!(self, ScheduleSpec::Biweekly { .. })
    }
}

impl fmt::Display for ScheduleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleSpec::DayOfMonth { days } => {
                let list: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                write!(f, "day {}", list.join(", "))
            }
            ScheduleSpec::Biweekly { anchor } => write!(f, "biweekly from {anchor}"),
            ScheduleSpec::NthWeekday { nth, weekday } => {
                write!(f, "{}{} {}", nth, ordinal_suffix(*nth), weekday_name(*weekday))
            }
            ScheduleSpec::LastWeekday { weekday } => write!(f, "last {}", weekday_name(*weekday)),
            ScheduleSpec::FirstBusinessDay => f.write_str("1st business day"),
            ScheduleSpec::OnDate { date } => write!(f, "on {date}"),
        }
    }
}

fn ordinal_suffix(n: u8) -> &'static str {
    match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reads_like_the_token() {
        let spec = ScheduleSpec::NthWeekday {
            nth: 2,
            weekday: Weekday::Wed,
        };
        assert_eq!(spec.to_string(), "2nd Wednesday");
        let days = ScheduleSpec::DayOfMonth { days: vec![1, 15] };
        assert_eq!(days.to_string(), "day 1, 15");
    }

    #[test]
    fn only_biweekly_spans_the_window() {
        let anchor = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert!(!ScheduleSpec::Biweekly { anchor }.is_month_scoped());
        assert!(ScheduleSpec::FirstBusinessDay.is_month_scoped());
    }
}
