//! CSV encoder.
//!
//! Header row carries the column labels in order; every data row carries
//! the formatted display values. Quoting and escaping follow standard CSV
//! rules via the `csv` crate; output is UTF-8.

use std::io;

use chrono::{DateTime, Utc};
use flota_model::{ExportFormat, ExportRequest};

use crate::artifact::ExportArtifact;
use crate::error::Result;

pub fn render_csv(request: &ExportRequest, now: DateTime<Utc>) -> Result<ExportArtifact> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(request.header_labels())?;
    for cells in request.display_rows() {
        writer.write_record(cells)?;
    }
    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|error| io::Error::other(error.to_string()))?;

    Ok(ExportArtifact {
        filename: request.filename(ExportFormat::Csv, now),
        bytes,
    })
}
