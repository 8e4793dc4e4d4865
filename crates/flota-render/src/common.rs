//! Helpers shared by the three encoders.

use chrono::{DateTime, Utc};
use flota_model::{ExportFormat, ExportRequest};

use crate::artifact::ExportArtifact;
use crate::csv_export::render_csv;
use crate::error::Result;
use crate::pdf::render_pdf;
use crate::xlsx::render_xlsx;

/// Dispatch to the encoder for `format`.
pub fn render(
    request: &ExportRequest,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<ExportArtifact> {
    match format {
        ExportFormat::Csv => render_csv(request, now),
        ExportFormat::Xlsx => render_xlsx(request, now),
        ExportFormat::Pdf => render_pdf(request, now),
    }
}

/// The generated-timestamp line shown under the title band.
pub fn generated_line(now: DateTime<Utc>) -> String {
    format!("Generado: {}", now.format("%d/%m/%Y %H:%M"))
}

/// Truncate to at most `max_chars` characters, marking the cut with an
/// ellipsis. Cell text in the paginated formats must fit its column.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

/// Per-column display widths in characters: the widest of the label and a
/// sample of cell values, clamped to a sane band.
pub(crate) fn column_char_widths(request: &ExportRequest, sample_rows: usize) -> Vec<usize> {
    const MIN_WIDTH: usize = 8;
    const MAX_WIDTH: usize = 40;

    let mut widths: Vec<usize> = request
        .columns
        .iter()
        .map(|column| column.label.chars().count())
        .collect();
    for cells in request.display_rows().take(sample_rows) {
        for (col_index, cell) in cells.iter().enumerate() {
            let len = cell.chars().count();
            if len > widths[col_index] {
                widths[col_index] = len;
            }
        }
    }
    for width in &mut widths {
        *width = (*width).clamp(MIN_WIDTH, MAX_WIDTH);
    }
    widths
}
