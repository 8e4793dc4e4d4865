//! Locale-aware cell formatting (Honduras, `es-HN`).
//!
//! `format_value` is a pure function: no I/O, no mutation, deterministic.
//! Every type tag degrades gracefully instead of propagating parse errors:
//! null/missing becomes the empty string, unparseable numbers format as
//! zero, and unparseable dates fall back to the value's plain string form.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::column::TypeTag;

/// Format one raw cell value for display according to its column type tag.
pub fn format_value(value: &Value, tag: TypeTag) -> String {
    if value.is_null() {
        return String::new();
    }
    match tag {
        TypeTag::Text => coerce_text(value),
        TypeTag::Number => group_decimal(coerce_number(value), 0, 3),
        TypeTag::Currency => format_lempira(coerce_number(value)),
        TypeTag::Date => format_date(value),
    }
}

/// Plain string coercion: strings pass through, numbers and booleans render
/// bare, compound values render as JSON.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Numeric coercion with the documented fallback: invalid input, NaN and
/// infinities all become 0.
fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

/// Lempira currency: `L 1,234.56`, always two decimals, sign outside the
/// symbol (`-L 45.00`).
fn format_lempira(value: f64) -> String {
    let body = group_decimal(value.abs(), 2, 2);
    if value < 0.0 && value.abs() >= 0.005 {
        format!("-L {body}")
    } else {
        format!("L {body}")
    }
}

/// Render with `,` thousands grouping and `.` decimal point, keeping at
/// least `min_frac` and at most `max_frac` fraction digits (trailing zeros
/// beyond the minimum are trimmed, matching `toLocaleString("es-HN")`).
fn group_decimal(value: f64, min_frac: usize, max_frac: usize) -> String {
    // Normalize -0.0 so zero never renders with a sign.
    let value = if value == 0.0 { 0.0 } else { value };
    let mut fixed = format!("{value:.max_frac$}");
    if max_frac > min_frac && fixed.contains('.') {
        while fixed.ends_with('0') && fraction_len(&fixed) > min_frac {
            fixed.pop();
        }
        if fixed.ends_with('.') {
            fixed.pop();
        }
    }
    let negative = fixed.starts_with('-');
    let unsigned = fixed.trim_start_matches('-');
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(unsigned.len() + unsigned.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    let digits = int_part.len();
    for (pos, ch) in int_part.chars().enumerate() {
        if pos > 0 && (digits - pos) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

fn fraction_len(fixed: &str) -> usize {
    fixed
        .split_once('.')
        .map(|(_, frac)| frac.len())
        .unwrap_or(0)
}

/// Locale short date: `dd/mm/yyyy`. Accepts RFC 3339 instants, naive
/// datetimes and plain dates; anything else falls back to the raw string.
/// The civil date is taken as written, without timezone conversion.
fn format_date(value: &Value) -> String {
    let raw = coerce_text(value);
    parse_date(&raw)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or(raw)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
