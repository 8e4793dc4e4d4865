//! Formatter contract: null handling, coercion fallbacks, es-HN rendering.

use flota_model::{RowScope, RowRecord, TypeTag, format_value, resolve_scope};
use proptest::prelude::*;
use serde_json::{Value, json};

const ALL_TAGS: [TypeTag; 4] = [
    TypeTag::Text,
    TypeTag::Number,
    TypeTag::Currency,
    TypeTag::Date,
];

#[test]
fn null_is_empty_for_every_tag() {
    for tag in ALL_TAGS {
        assert_eq!(format_value(&Value::Null, tag), "", "tag {tag:?}");
    }
}

#[test]
fn invalid_number_coerces_to_zero() {
    assert_eq!(
        format_value(&json!("abc"), TypeTag::Number),
        format_value(&json!(0), TypeTag::Number)
    );
    assert_eq!(format_value(&json!("abc"), TypeTag::Number), "0");
    assert_eq!(format_value(&json!("abc"), TypeTag::Currency), "L 0.00");
}

#[test]
fn numeric_strings_parse() {
    assert_eq!(format_value(&json!("7"), TypeTag::Number), "7");
    assert_eq!(format_value(&json!(" 1250.5 "), TypeTag::Number), "1,250.5");
}

#[test]
fn currency_always_two_decimals_with_lempira_prefix() {
    for value in [json!(0), json!(12), json!(1234.5), json!("99999.999")] {
        let rendered = format_value(&value, TypeTag::Currency);
        assert!(rendered.starts_with("L "), "{rendered}");
        let decimals = rendered.rsplit('.').next().unwrap();
        assert_eq!(decimals.len(), 2, "{rendered}");
    }
}

#[test]
fn rfc3339_instant_renders_short_date() {
    assert_eq!(
        format_value(&json!("2024-03-05T10:00:00Z"), TypeTag::Date),
        "05/03/2024"
    );
    assert_eq!(
        format_value(&json!("2024-12-31T23:59:59-06:00"), TypeTag::Date),
        "31/12/2024"
    );
}

#[test]
fn text_coerces_scalars() {
    assert_eq!(format_value(&json!(42), TypeTag::Text), "42");
    assert_eq!(format_value(&json!(true), TypeTag::Text), "true");
    assert_eq!(format_value(&json!("Hilux"), TypeTag::Text), "Hilux");
}

#[test]
fn page_scope_with_empty_page_falls_back_to_all() {
    let mut row = RowRecord::new();
    row.insert("placa", json!("HAA1234"));
    let all = vec![row.clone(), row.clone(), row];
    let page: Vec<RowRecord> = Vec::new();

    let resolved = resolve_scope(&all, &page, RowScope::Page);
    assert_eq!(resolved.len(), 3);

    let page = vec![all[0].clone()];
    assert_eq!(resolve_scope(&all, &page, RowScope::Page).len(), 1);
    assert_eq!(resolve_scope(&all, &page, RowScope::All).len(), 3);
}

proptest! {
    /// Same inputs always produce the same output, and never panic.
    #[test]
    fn formatter_is_total_and_deterministic(raw in "\\PC*", tag_idx in 0usize..4) {
        let tag = ALL_TAGS[tag_idx];
        let value = json!(raw);
        let first = format_value(&value, tag);
        let second = format_value(&value, tag);
        prop_assert_eq!(first, second);
    }

    /// Finite numbers under Currency always carry exactly two decimals.
    #[test]
    fn currency_decimals_hold_for_all_finite(n in -1.0e12f64..1.0e12) {
        let rendered = format_value(&json!(n), TypeTag::Currency);
        let decimals = rendered.rsplit('.').next().unwrap();
        prop_assert_eq!(decimals.len(), 2);
    }
}
