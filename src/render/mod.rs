//! Markdown presentation of forecasts and record snapshots. Pure string output.

pub mod ledger;
pub mod money;
pub mod snapshots;

pub use ledger::render_ledger;
pub use money::{format_money, format_signed_money};
pub use snapshots::{render_accounts, render_checking, render_incomes, render_injectors};

/// `[[Note]]`, with any `|alias` dropped. Blank names render as nothing.
pub fn wiki_link(name: &str) -> String {
    let base = base_note_name(name);
    if base.is_empty() {
        String::new()
    } else {
        format!("[[{base}]]")
    }
}

fn base_note_name(name: &str) -> &str {
    let trimmed = name.trim();
    match trimmed
        .strip_prefix("[[")
        .and_then(|rest| rest.strip_suffix("]]"))
    {
        Some(inner) => inner.split('|').next().unwrap_or(inner).trim(),
        None => trimmed,
    }
}

/// Pipes inside a cell would split the markdown row.
pub(crate) fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
