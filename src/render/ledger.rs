use pcb_core::Forecast;
use pcb_domain::{CashEvent, EventKind};

use super::{cell, format_money, format_signed_money, wiki_link};

/// Ledger table headed by the run date and window, followed by a short summary.
pub fn render_ledger(forecast: &Forecast) -> String {
    let context = &forecast.context;
    let mut out = vec![
        "## PCB".to_string(),
        format!("- date: `{}`", context.run_date),
        format!("- From: `{}`", context.window.start),
        format!("- To: `{}`", context.window.end),
        String::new(),
    ];

    if forecast.ledger.events.iter().all(|e| e.kind == EventKind::Opening) {
        out.push("_No events in window._".into());
        out.push(String::new());
        return out.join("\n");
    }

    out.push("| Flow | On | Amount | Running | Cycle |".into());
    out.push("| --- | ---:| ---:| ---:| --- |".into());
    out.extend(forecast.ledger.events.iter().map(ledger_row));
    out.push(String::new());

    let summary = &forecast.summary;
    out.push(format!("- Ending: `{}`", format_money(summary.ending_balance)));
    match summary.lowest_date {
        Some(date) => out.push(format!(
            "- Lowest: `{}` on {date}",
            format_money(summary.lowest_balance)
        )),
        None => out.push(format!("- Lowest: `{}`", format_money(summary.lowest_balance))),
    }
    if summary.injected > 0.0 {
        out.push(format!("- Injected: `{}`", format_money(summary.injected)));
    }
    if summary.below_buffer > 0 {
        out.push(format!(
            "- Below buffer: {} of {} entries",
            summary.below_buffer,
            forecast.ledger.len() - 1
        ));
    }
    out.push(String::new());
    out.join("\n")
}

fn ledger_row(event: &CashEvent) -> String {
    let flow = match event.kind {
        EventKind::Opening => event.label.clone(),
        EventKind::Injector => format!("Inject: {}", wiki_link(&event.account)),
        _ => wiki_link(&event.label),
    };
    format!(
        "| {} | {} | {} | {} | {} |",
        cell(&flow),
        event.date,
        format_signed_money(event.amount),
        format_signed_money(event.running_total),
        cell(&event.cycle),
    )
}
