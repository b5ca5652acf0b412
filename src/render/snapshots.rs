//! Snapshot tables listing the records behind a forecast.

use chrono::NaiveDate;

use pcb_core::{collect, schedule::previous_business_day};
use pcb_domain::{AccountRecord, EventKind, FundingOffer, RunContext, ScheduledRecord};

use super::{cell, format_money, wiki_link};

/// Income notes with their first deposit in the window. The bank date pulls
/// weekend deposits back to the preceding Friday.
pub fn render_incomes(incomes: &[ScheduledRecord], context: &RunContext) -> String {
    let mut out = heading("Incomes", &format!("- date_str: `{}`", context.run_date));
    if incomes.is_empty() {
        return empty(out, "_No income notes found._");
    }

    out.push("| ref | amount | schedule | next | bank date | bank_key | source |".into());
    out.push("| --- | ---: | --- | --- | --- | --- | --- |".into());

    let mut rows: Vec<&ScheduledRecord> = incomes.iter().collect();
    rows.sort_by(|a, b| a.label.cmp(&b.label));
    for record in rows {
        let next = collect(std::slice::from_ref(record), EventKind::Income, context.window)
            .first()
            .map(|event| event.date);
        let schedule = record
            .schedule
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        out.push(format!(
            "| {} | {} | {} | {} | {} | {} | `{}` |",
            cell(&record.label),
            format_money(record.amount),
            cell(&schedule),
            optional_date(next),
            optional_date(next.map(previous_business_day)),
            cell(&record.account),
            record.source,
        ));
    }
    out.push(String::new());
    out.join("\n")
}

pub fn render_accounts(accounts: &[AccountRecord], run_date: NaiveDate) -> String {
    let mut out = heading("Accounts", &format!("- date_str: `{run_date}`"));
    if accounts.is_empty() {
        return empty(out, "_No account notes found._");
    }

    out.push("| label | account_key | kind | balance | as_of | source |".into());
    out.push("| --- | --- | --- | ---: | --- | --- |".into());
    for account in accounts {
        out.push(format!(
            "| {} | {} | {} | {} | {} | `{}` |",
            cell(&account.label),
            cell(&account.account_key),
            cell(&account.kind),
            account.balance.map(format_money).unwrap_or_default(),
            account.as_of,
            account.source,
        ));
    }
    out.push(String::new());
    out.join("\n")
}

pub fn render_checking(checking: &[AccountRecord], run_date: NaiveDate) -> String {
    let mut out = heading("Checking", &format!("- As of: `{run_date}`"));
    if checking.is_empty() {
        return empty(out, "_No account notes found._");
    }

    out.push("| Account | Balance | As Of |".into());
    out.push("| --- | ---: | --- |".into());
    for account in checking {
        out.push(format!(
            "| {} | {} | {} |",
            wiki_link(&account.label),
            account.balance.map(format_money).unwrap_or_default(),
            account.as_of,
        ));
    }
    out.push(String::new());
    out.join("\n")
}

/// Offers as built for the run date, before any draws.
pub fn render_injectors(offers: &[FundingOffer], run_date: NaiveDate) -> String {
    let mut out = heading("Injectors", &format!("- As of: `{run_date}`"));
    if offers.is_empty() {
        return empty(out, "_No injector notes found._");
    }

    out.push("| Injector | Priority | Cap | Latency (days) | Available on |".into());
    out.push("| --- | ---: | ---: | ---: | --- |".into());
    for offer in offers {
        out.push(format!(
            "| {} | {} | {} | {} | {} |",
            wiki_link(&offer.name),
            offer.priority,
            format_money(offer.cap),
            offer.latency_days,
            offer.available_on,
        ));
    }
    out.push(String::new());
    out.join("\n")
}

fn heading(title: &str, meta: &str) -> Vec<String> {
    vec![format!("## {title}"), meta.to_string(), String::new()]
}

fn empty(mut out: Vec<String>, message: &str) -> String {
    out.push(message.to_string());
    out.push(String::new());
    out.join("\n")
}

fn optional_date(date: Option<NaiveDate>) -> String {
    date.map(|date| date.to_string()).unwrap_or_default()
}
