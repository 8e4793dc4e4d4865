//! PDF encoder: document structure, orientation, pagination.

use chrono::{TimeZone, Utc};
use flota_model::{
    ColumnHint, ColumnSet, ExportMetadata, ExportRequest, Orientation, RowRecord, TypeTag,
};
use flota_render::render_pdf;
use serde_json::json;

fn request_with_rows(count: usize, orientation: Orientation) -> ExportRequest {
    let columns = ColumnSet::from_hints(&[
        ColumnHint::new("Placa", "placa"),
        ColumnHint::new("Conductor", "conductor"),
        ColumnHint::new("Costo", "costo").with_type(TypeTag::Currency),
    ]);
    let rows = (0..count)
        .map(|i| {
            let mut row = RowRecord::new();
            row.insert("placa", json!(format!("HAA{i:04}")));
            row.insert("conductor", json!("María Gómez"));
            row.insert("costo", json!(1250.5));
            row
        })
        .collect();
    let metadata = ExportMetadata {
        title: "Reporte de Usos".to_string(),
        filename_base: "usos".to_string(),
        orientation,
        ..ExportMetadata::default()
    };
    ExportRequest::new(rows, &columns, metadata)
}

fn media_box_width(bytes: &[u8]) -> f32 {
    let doc = lopdf::Document::load_mem(bytes).unwrap();
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
    let media_box = doc
        .get_object(page_id)
        .and_then(lopdf::Object::as_dict)
        .unwrap()
        .get(b"MediaBox")
        .and_then(lopdf::Object::as_array)
        .unwrap()
        .clone();
    match media_box[2] {
        lopdf::Object::Integer(i) => i as f32,
        lopdf::Object::Real(r) => r as f32,
        ref other => panic!("unexpected MediaBox entry: {other:?}"),
    }
}

#[test]
fn produces_a_loadable_single_page_document() {
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let artifact = render_pdf(&request_with_rows(5, Orientation::Portrait), now).unwrap();
    assert!(artifact.filename.ends_with(".pdf"));
    assert!(artifact.bytes.starts_with(b"%PDF-"));

    let doc = lopdf::Document::load_mem(&artifact.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn orientation_controls_page_dimensions() {
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let portrait = render_pdf(&request_with_rows(1, Orientation::Portrait), now).unwrap();
    let landscape = render_pdf(&request_with_rows(1, Orientation::Landscape), now).unwrap();
    assert_eq!(media_box_width(&portrait.bytes), 612.0);
    assert_eq!(media_box_width(&landscape.bytes), 792.0);
}

#[test]
fn long_row_sets_paginate() {
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let artifact = render_pdf(&request_with_rows(200, Orientation::Portrait), now).unwrap();
    let doc = lopdf::Document::load_mem(&artifact.bytes).unwrap();
    assert!(doc.get_pages().len() >= 2, "expected pagination");
}

#[test]
fn logo_round_trips_through_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");
    image::RgbImage::from_pixel(16, 16, image::Rgb([30, 122, 140]))
        .save(&logo_path)
        .unwrap();

    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let mut request = request_with_rows(1, Orientation::Portrait);
    request.metadata.logo_path = Some(logo_path);
    let artifact = render_pdf(&request, now).unwrap();
    assert!(lopdf::Document::load_mem(&artifact.bytes).is_ok());
}

#[test]
fn unreadable_logo_fails_the_render() {
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let mut request = request_with_rows(1, Orientation::Portrait);
    request.metadata.logo_path = Some("/no/existe/logo.png".into());
    assert!(render_pdf(&request, now).is_err());
}
