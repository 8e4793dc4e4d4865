//! XLSX encoder.
//!
//! One worksheet: title band (optional logo + centered title), optional
//! generated-timestamp line, formatted data table, colored footer bar.
//! Orientation only affects the print setup, not the on-screen layout.

use chrono::{DateTime, Utc};
use flota_model::{Alignment, ExportFormat, ExportRequest, FooterColor, Orientation};
use rust_xlsxwriter::{Color, Format, FormatAlign, Image, Workbook, Worksheet};

use crate::artifact::ExportArtifact;
use crate::common::{column_char_widths, generated_line};
use crate::error::Result;

const HEADER_FILL: u32 = 0xD9E2EC;
const WIDTH_SAMPLE_ROWS: usize = 200;

pub fn render_xlsx(request: &ExportRequest, now: DateTime<Utc>) -> Result<ExportArtifact> {
    let metadata = &request.metadata;
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&metadata.sheet_name)?;
    match metadata.orientation {
        Orientation::Portrait => worksheet.set_portrait(),
        Orientation::Landscape => worksheet.set_landscape(),
    };

    let column_count = request.columns.len() as u16;
    let last_col = column_count.saturating_sub(1);
    let mut row: u32 = 0;

    // Title band.
    if let Some(logo) = &metadata.logo_path {
        let image = Image::new(logo)?;
        worksheet.insert_image(row, 0, &image)?;
        worksheet.set_row_height(row, 36)?;
    }
    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center);
    write_band(worksheet, row, last_col, &metadata.title, &title_format)?;
    row += 1;

    if metadata.include_generated_timestamp {
        let stamp_format = Format::new()
            .set_italic()
            .set_font_size(9)
            .set_font_color(Color::RGB(0x6B_7280))
            .set_align(FormatAlign::Center);
        write_band(worksheet, row, last_col, &generated_line(now), &stamp_format)?;
        row += 1;
    }

    // Header row.
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center);
    for (col, label) in request.header_labels().iter().enumerate() {
        worksheet.write_string_with_format(row, col as u16, *label, &header_format)?;
    }
    row += 1;

    // Data rows.
    let cell_formats: Vec<Format> = request
        .columns
        .iter()
        .map(|column| Format::new().set_align(cell_align(column.alignment)))
        .collect();
    for cells in request.display_rows() {
        for (col, cell) in cells.into_iter().enumerate() {
            worksheet.write_string_with_format(row, col as u16, cell, &cell_formats[col])?;
        }
        row += 1;
    }

    // Footer bar.
    let footer_format = Format::new().set_background_color(footer_fill(metadata.footer_color));
    write_band(worksheet, row, last_col, "", &footer_format)?;
    worksheet.set_row_height(row, 8)?;

    for (col, width) in column_char_widths(request, WIDTH_SAMPLE_ROWS)
        .into_iter()
        .enumerate()
    {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(ExportArtifact {
        filename: request.filename(ExportFormat::Xlsx, now),
        bytes: workbook.save_to_buffer()?,
    })
}

/// Write text spanning all export columns; a single-column sheet cannot be
/// merged, so it degrades to a plain formatted cell.
fn write_band(
    worksheet: &mut Worksheet,
    row: u32,
    last_col: u16,
    text: &str,
    format: &Format,
) -> Result<()> {
    if last_col > 0 {
        worksheet.merge_range(row, 0, row, last_col, text, format)?;
    } else {
        worksheet.write_string_with_format(row, 0, text, format)?;
    }
    Ok(())
}

fn cell_align(alignment: Alignment) -> FormatAlign {
    match alignment {
        Alignment::Left => FormatAlign::Left,
        Alignment::Center => FormatAlign::Center,
        Alignment::Right => FormatAlign::Right,
    }
}

fn footer_fill(color: FooterColor) -> Color {
    Color::RGB(u32::from(color.r) << 16 | u32::from(color.g) << 8 | u32::from(color.b))
}
