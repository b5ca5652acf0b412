//! Minimal frontmatter reader for vault notes.
//!
//! Understands the subset notes actually use: `key: value` scalars, inline
//! `[a, b]` lists, indented `- item` block lists, quoted strings, booleans,
//! numbers and `[[wiki links]]`. Anything else is kept as a plain string.

use serde_json::{Map, Number, Value};

const FENCE: &str = "---";

/// Extracts the frontmatter block of a note. Notes without one yield an empty map.
pub fn parse(document: &str) -> Map<String, Value> {
    let mut lines = document.lines();
    match lines.next() {
        Some(first) if first.trim_end() == FENCE => {}
        _ => return Map::new(),
    }
    let body: Vec<&str> = lines.take_while(|line| line.trim_end() != FENCE).collect();
    parse_block(&body)
}

fn parse_block(lines: &[&str]) -> Map<String, Value> {
    let mut attrs = Map::new();
    let mut open_list: Option<(String, Vec<Value>)> = None;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| (trimmed == "-").then_some("")) {
            if let Some((_, items)) = open_list.as_mut() {
                items.push(scalar(item));
            }
            continue;
        }
        if let Some((key, items)) = open_list.take() {
            attrs.insert(key, list_value(items));
        }
        let Some((key, raw)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let raw = raw.trim();
        if raw.is_empty() {
            open_list = Some((key, Vec::new()));
        } else {
            attrs.insert(key, value(raw));
        }
    }
    if let Some((key, items)) = open_list {
        attrs.insert(key, list_value(items));
    }
    attrs
}

/// A key with no value and no items reads as null.
fn list_value(items: Vec<Value>) -> Value {
    if items.is_empty() {
        Value::Null
    } else {
        Value::Array(items)
    }
}

fn value(raw: &str) -> Value {
    match raw.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) if !raw.starts_with("[[") => Value::Array(
            split_items(inner)
                .into_iter()
                .filter(|item| !item.is_empty())
                .map(scalar)
                .collect(),
        ),
        _ => scalar(raw),
    }
}

/// Splits an inline list on commas outside quotes.
fn split_items(inner: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quote = None;
    let mut start = 0;
    for (idx, ch) in inner.char_indices() {
        match (ch, quote) {
            ('"' | '\'', None) => quote = Some(ch),
            (c, Some(open)) if c == open => quote = None,
            (',', None) => {
                items.push(inner[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    items.push(inner[start..].trim());
    items
}

fn scalar(raw: &str) -> Value {
    let raw = raw.trim();
    if let Some(text) = unquote(raw) {
        return Value::String(unwrap_wiki_link(text).to_string());
    }
    match raw {
        "" | "~" | "null" => return Value::Null,
        "true" | "True" => return Value::Bool(true),
        "false" | "False" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(number) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    Value::String(unwrap_wiki_link(raw).to_string())
}

fn unquote(raw: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        raw.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

/// `[[Target|Alias]]` becomes `Target`.
fn unwrap_wiki_link(text: &str) -> &str {
    match text.strip_prefix("[[").and_then(|rest| rest.strip_suffix("]]")) {
        Some(inner) => inner.split('|').next().unwrap_or(inner).trim(),
        None => text,
    }
}
