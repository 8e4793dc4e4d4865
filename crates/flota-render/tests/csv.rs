//! CSV encoder output contract.

use chrono::{TimeZone, Utc};
use flota_model::{
    ColumnHint, ColumnSet, ExportMetadata, ExportRequest, RowRecord, TypeTag,
};
use flota_render::render_csv;
use serde_json::json;

fn fleet_request() -> ExportRequest {
    let columns = ColumnSet::from_hints(&[
        ColumnHint::new("Marca", "marca"),
        ColumnHint::new("Usos", "total_usos").with_type(TypeTag::Number),
    ]);
    let mut row = RowRecord::new();
    row.insert("marca", json!("Toyota"));
    row.insert("modelo", json!("Hilux"));
    row.insert("placa", json!("ABC123"));
    row.insert("total_usos", json!("7"));
    ExportRequest::new(vec![row], &columns, ExportMetadata::default())
}

#[test]
fn header_and_data_row_in_column_order() {
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let artifact = render_csv(&fleet_request(), now).unwrap();

    let text = String::from_utf8(artifact.bytes).unwrap();
    insta::assert_snapshot!(text, @r"
    Marca,Usos
    Toyota,7
    ");
}

#[test]
fn filename_carries_base_and_timestamp_token() {
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let mut request = fleet_request();
    request.metadata.filename_base = "vehiculos".to_string();
    let artifact = render_csv(&request, now).unwrap();
    assert!(artifact.filename.starts_with("vehiculos_20240305100000"));
    assert!(artifact.filename.ends_with(".csv"));
}

#[test]
fn fields_with_delimiters_and_quotes_are_escaped() {
    let columns = ColumnSet::from_hints(&[ColumnHint::new("Observaciones", "obs")]);
    let mut row = RowRecord::new();
    row.insert("obs", json!("llanta trasera, aro \"15\""));
    let request = ExportRequest::new(vec![row], &columns, ExportMetadata::default());

    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let artifact = render_csv(&request, now).unwrap();
    let text = String::from_utf8(artifact.bytes).unwrap();
    insta::assert_snapshot!(text, @r#"
    Observaciones
    "llanta trasera, aro ""15"""
    "#);
}

#[test]
fn disabled_columns_never_reach_the_output() {
    let mut columns = ColumnSet::from_hints(&[
        ColumnHint::new("Marca", "marca"),
        ColumnHint::new("Placa", "placa"),
    ]);
    columns.set_field(1, flota_model::ColumnEdit::Enabled(false));
    let mut row = RowRecord::new();
    row.insert("marca", json!("Nissan"));
    row.insert("placa", json!("HAA1234"));
    let request = ExportRequest::new(vec![row], &columns, ExportMetadata::default());

    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let text = String::from_utf8(render_csv(&request, now).unwrap().bytes).unwrap();
    assert_eq!(text, "Marca\nNissan\n");
}
