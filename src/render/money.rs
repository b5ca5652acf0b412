//! en-US money strings: `$1,234.5`, zero to two fraction digits.

/// Unsigned style: negatives get a leading `-`, everything else none.
/// Non-finite values render empty.
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }
    let (cents, body) = money_body(amount);
    if amount < 0.0 && cents != 0 {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Ledger style: `+$` for inflows, `-$` for outflows, bare `$0` for zero.
pub fn format_signed_money(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }
    let (cents, body) = money_body(amount);
    match cents {
        0 => format!("${body}"),
        _ if amount < 0.0 => format!("-${body}"),
        _ => format!("+${body}"),
    }
}

fn money_body(amount: f64) -> (u64, String) {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_digits(&(cents / 100).to_string(), ',');
    let body = match cents % 100 {
        0 => whole,
        fraction if fraction % 10 == 0 => format!("{whole}.{}", fraction / 10),
        fraction => format!("{whole}.{fraction:02}"),
    };
    (cents, body)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
