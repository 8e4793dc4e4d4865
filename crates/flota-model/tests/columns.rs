//! Column model behavior: ordering, edits, enable/disable round-trips.

use flota_model::{
    Alignment, ColumnEdit, ColumnHint, ColumnSet, ExportMetadata, ExportRequest, RowRecord,
    TypeTag,
};
use serde_json::json;

fn fleet_hints() -> Vec<ColumnHint> {
    vec![
        ColumnHint::new("Marca", "marca"),
        ColumnHint::new("Modelo", "modelo"),
        ColumnHint::new("Usos", "total_usos").with_type(TypeTag::Number),
        ColumnHint::new("Costo", "costo")
            .with_type(TypeTag::Currency)
            .with_align(Alignment::Right),
    ]
}

fn keys(set: &ColumnSet) -> Vec<&str> {
    set.columns().iter().map(|c| c.key.as_str()).collect()
}

#[test]
fn init_assigns_sequential_ids_and_enables_all() {
    let set = ColumnSet::from_hints(&fleet_hints());
    assert_eq!(set.len(), 4);
    for (idx, column) in set.columns().iter().enumerate() {
        assert_eq!(column.id, idx);
        assert!(column.enabled);
    }
    assert_eq!(keys(&set), vec!["marca", "modelo", "total_usos", "costo"]);
}

#[test]
fn duplicate_keys_keep_first_occurrence() {
    let mut hints = fleet_hints();
    hints.push(ColumnHint::new("Marca otra vez", "marca"));
    let set = ColumnSet::from_hints(&hints);
    assert_eq!(set.len(), 4);
    assert_eq!(set.columns()[0].label, "Marca");
}

#[test]
fn move_swaps_adjacent_columns() {
    let mut set = ColumnSet::from_hints(&fleet_hints());
    set.move_column(1, 1);
    assert_eq!(keys(&set), vec!["marca", "total_usos", "modelo", "costo"]);
    set.move_column(2, -1);
    assert_eq!(keys(&set), vec!["marca", "modelo", "total_usos", "costo"]);
}

#[test]
fn move_out_of_bounds_is_a_noop() {
    let mut set = ColumnSet::from_hints(&fleet_hints());
    let before = keys(&set)
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    set.move_column(0, -1);
    set.move_column(set.len() - 1, 1);
    set.move_column(99, 1);
    set.move_column(1, 2);
    assert_eq!(keys(&set), before);
}

#[test]
fn set_field_touches_one_attribute_only() {
    let mut set = ColumnSet::from_hints(&fleet_hints());
    set.set_field(0, ColumnEdit::Label("Fabricante".to_string()));
    set.set_field(0, ColumnEdit::Align(Alignment::Center));
    let column = &set.columns()[0];
    assert_eq!(column.label, "Fabricante");
    assert_eq!(column.alignment, Alignment::Center);
    assert_eq!(column.type_tag, TypeTag::Text);
    assert_eq!(set.columns()[1].label, "Modelo");

    // Bad index must not panic.
    set.set_field(99, ColumnEdit::Enabled(false));
}

#[test]
fn disabled_column_is_retained_but_excluded_from_request() {
    let mut set = ColumnSet::from_hints(&fleet_hints());
    set.set_field(1, ColumnEdit::Enabled(false));

    // Still in the editable list at its position.
    assert_eq!(set.len(), 4);
    assert_eq!(set.columns()[1].key, "modelo");
    assert!(!set.columns()[1].enabled);

    let request = ExportRequest::new(Vec::new(), &set, ExportMetadata::default());
    let exported: Vec<_> = request.columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(exported, vec!["marca", "total_usos", "costo"]);

    // Re-enabling restores it with label/type/align intact.
    set.set_field(1, ColumnEdit::Enabled(true));
    let request = ExportRequest::new(Vec::new(), &set, ExportMetadata::default());
    let exported: Vec<_> = request.columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(exported, vec!["marca", "modelo", "total_usos", "costo"]);
    assert_eq!(request.columns[1].label, "Modelo");
}

#[test]
fn custom_accessor_overrides_key_lookup() {
    let hints = vec![
        ColumnHint::new("Placa", "placa"),
        ColumnHint::new("Vehiculo", "vehiculo").with_accessor(|row, _| {
            let marca = row.get("marca").and_then(|v| v.as_str()).unwrap_or("");
            let modelo = row.get("modelo").and_then(|v| v.as_str()).unwrap_or("");
            json!(format!("{marca} {modelo}"))
        }),
    ];
    let set = ColumnSet::from_hints(&hints);

    let mut row = RowRecord::new();
    row.insert("placa", json!("HAA1234"));
    row.insert("marca", json!("Toyota"));
    row.insert("modelo", json!("Hilux"));

    assert_eq!(set.columns()[0].display_value(&row, 0), "HAA1234");
    assert_eq!(set.columns()[1].display_value(&row, 0), "Toyota Hilux");
}

#[test]
fn display_row_out_of_range_is_none() {
    let set = ColumnSet::from_hints(&fleet_hints());
    let mut row = RowRecord::new();
    row.insert("marca", json!("Toyota"));
    let request = ExportRequest::new(vec![row], &set, ExportMetadata::default());

    let cells = request.display_row(0).unwrap();
    assert_eq!(cells[0], "Toyota");
    assert!(request.display_row(1).is_none());
    assert!(request.display_row(99).is_none());
}

#[test]
fn missing_key_renders_empty() {
    let set = ColumnSet::from_hints(&[ColumnHint::new("Marca", "marca")]);
    let row = RowRecord::new();
    assert_eq!(set.columns()[0].display_value(&row, 0), "");
}
