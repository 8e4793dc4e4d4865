//! PDF encoder.
//!
//! Builds the document object-by-object with `lopdf`: a page tree of
//! content streams sharing one resources dictionary (Helvetica base fonts
//! plus the optional logo XObject). Each page carries the colored footer
//! bar; the first page carries the title band and optional generated line;
//! the table header row repeats on every page.
//!
//! US-Letter page; `metadata.orientation` flips the dimensions.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use flota_model::{Alignment, ExportFormat, ExportRequest, FooterColor, Orientation};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

use crate::artifact::ExportArtifact;
use crate::common::{column_char_widths, generated_line, truncate_chars};
use crate::error::Result;

const LETTER_SHORT: f32 = 612.0;
const LETTER_LONG: f32 = 792.0;
const MARGIN: f32 = 40.0;
const FOOTER_BAR_HEIGHT: f32 = 12.0;
const TITLE_SIZE: f32 = 16.0;
const STAMP_SIZE: f32 = 9.0;
const HEADER_SIZE: f32 = 10.0;
const CELL_SIZE: f32 = 9.0;
const HEADER_ROW_HEIGHT: f32 = 18.0;
const DATA_ROW_HEIGHT: f32 = 14.0;
const CELL_PAD: f32 = 3.0;
const LOGO_BAND_HEIGHT: f32 = 40.0;
// Average glyph advance for Helvetica, as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f32 = 0.5;
const WIDTH_SAMPLE_ROWS: usize = 200;

pub fn render_pdf(request: &ExportRequest, now: DateTime<Utc>) -> Result<ExportArtifact> {
    let metadata = &request.metadata;
    let (page_width, page_height) = match metadata.orientation {
        Orientation::Portrait => (LETTER_SHORT, LETTER_LONG),
        Orientation::Landscape => (LETTER_LONG, LETTER_SHORT),
    };

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let logo = match &metadata.logo_path {
        Some(path) => Some(embed_logo(&mut doc, path)?),
        None => None,
    };

    let mut resources = dictionary! {
        "Font" => dictionary! { "F1" => font_regular, "F2" => font_bold },
    };
    if let Some(logo) = &logo {
        resources.set("XObject", dictionary! { "Logo" => logo.id });
    }
    let resources_id = doc.add_object(resources);

    let layout = TableLayout::new(request, page_width);
    let pages = build_pages(request, now, &layout, page_width, page_height, logo.as_ref());

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|error| io::Error::other(error.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0i64.into(),
                0i64.into(),
                page_width.into(),
                page_height.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }
    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|error| io::Error::other(error.to_string()))?;

    Ok(ExportArtifact {
        filename: request.filename(ExportFormat::Pdf, now),
        bytes,
    })
}

struct EmbeddedLogo {
    id: ObjectId,
    display_width: f32,
    display_height: f32,
}

/// Decode the logo with the `image` crate and embed it as a DeviceRGB
/// image XObject, scaled to fit the title band height.
fn embed_logo(doc: &mut Document, path: &Path) -> Result<EmbeddedLogo> {
    let decoded = image::open(path)?.to_rgb8();
    let (width, height) = decoded.dimensions();
    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        },
        decoded.into_raw(),
    );
    let scale = LOGO_BAND_HEIGHT / height as f32;
    Ok(EmbeddedLogo {
        id: doc.add_object(stream),
        display_width: width as f32 * scale,
        display_height: LOGO_BAND_HEIGHT,
    })
}

/// Column x-offsets and widths, proportional to display width estimates.
struct TableLayout {
    offsets: Vec<f32>,
    widths: Vec<f32>,
}

impl TableLayout {
    fn new(request: &ExportRequest, page_width: f32) -> Self {
        let char_widths = column_char_widths(request, WIDTH_SAMPLE_ROWS);
        let total: usize = char_widths.iter().sum::<usize>().max(1);
        let usable = page_width - 2.0 * MARGIN;

        let mut offsets = Vec::with_capacity(char_widths.len());
        let mut widths = Vec::with_capacity(char_widths.len());
        let mut x = MARGIN;
        for chars in &char_widths {
            let width = usable * (*chars as f32) / total as f32;
            offsets.push(x);
            widths.push(width);
            x += width;
        }
        Self { offsets, widths }
    }

    fn fit_chars(&self, column: usize, size: f32) -> usize {
        let inner = (self.widths[column] - 2.0 * CELL_PAD).max(0.0);
        (inner / (GLYPH_WIDTH_FACTOR * size)) as usize
    }
}

fn build_pages(
    request: &ExportRequest,
    now: DateTime<Utc>,
    layout: &TableLayout,
    page_width: f32,
    page_height: f32,
    logo: Option<&EmbeddedLogo>,
) -> Vec<Vec<Operation>> {
    let metadata = &request.metadata;
    let table_bottom = MARGIN + FOOTER_BAR_HEIGHT;
    let mut pages = Vec::new();

    let mut ops = Vec::new();
    let mut y = page_height - MARGIN;

    // First page: footer bar, logo, title, generated line.
    push_footer_bar(&mut ops, metadata.footer_color, page_width);
    if let Some(logo) = logo {
        push_logo(&mut ops, logo, MARGIN, y - logo.display_height);
    }
    push_centered_text(&mut ops, "F2", TITLE_SIZE, page_width, y - TITLE_SIZE, &metadata.title);
    y -= TITLE_SIZE + 10.0;
    if logo.is_some() {
        y = y.min(page_height - MARGIN - LOGO_BAND_HEIGHT - 6.0);
    }
    if metadata.include_generated_timestamp {
        push_color(&mut ops, 0.42, 0.44, 0.47);
        push_centered_text(&mut ops, "F1", STAMP_SIZE, page_width, y - STAMP_SIZE, &generated_line(now));
        push_color(&mut ops, 0.0, 0.0, 0.0);
        y -= STAMP_SIZE + 8.0;
    }

    push_table_header(&mut ops, request, layout, page_width, &mut y);
    for cells in request.display_rows() {
        if y - DATA_ROW_HEIGHT < table_bottom {
            pages.push(std::mem::take(&mut ops));
            y = page_height - MARGIN;
            push_footer_bar(&mut ops, metadata.footer_color, page_width);
            push_table_header(&mut ops, request, layout, page_width, &mut y);
        }
        for (column_index, cell) in cells.iter().enumerate() {
            let text = truncate_chars(cell, layout.fit_chars(column_index, CELL_SIZE));
            let x = aligned_x(
                layout,
                column_index,
                request.columns[column_index].alignment,
                &text,
                CELL_SIZE,
            );
            push_text(&mut ops, "F1", CELL_SIZE, x, y - DATA_ROW_HEIGHT + 4.0, &text);
        }
        y -= DATA_ROW_HEIGHT;
    }
    pages.push(ops);
    pages
}

fn push_table_header(
    ops: &mut Vec<Operation>,
    request: &ExportRequest,
    layout: &TableLayout,
    page_width: f32,
    y: &mut f32,
) {
    push_fill_rect(
        ops,
        (0.85, 0.89, 0.93),
        MARGIN,
        *y - HEADER_ROW_HEIGHT,
        page_width - 2.0 * MARGIN,
        HEADER_ROW_HEIGHT,
    );
    for (column_index, label) in request.header_labels().iter().enumerate() {
        let text = truncate_chars(label, layout.fit_chars(column_index, HEADER_SIZE));
        push_text(
            ops,
            "F2",
            HEADER_SIZE,
            layout.offsets[column_index] + CELL_PAD,
            *y - HEADER_ROW_HEIGHT + 5.0,
            &text,
        );
    }
    *y -= HEADER_ROW_HEIGHT + 2.0;
}

fn aligned_x(
    layout: &TableLayout,
    column: usize,
    alignment: Alignment,
    text: &str,
    size: f32,
) -> f32 {
    let estimated = text.chars().count() as f32 * GLYPH_WIDTH_FACTOR * size;
    let left = layout.offsets[column];
    let width = layout.widths[column];
    match alignment {
        Alignment::Left => left + CELL_PAD,
        Alignment::Center => left + ((width - estimated) / 2.0).max(CELL_PAD),
        Alignment::Right => left + (width - estimated - CELL_PAD).max(CELL_PAD),
    }
}

fn push_footer_bar(ops: &mut Vec<Operation>, color: FooterColor, page_width: f32) {
    let (r, g, b) = color.unit_rgb();
    push_fill_rect(ops, (r, g, b), 0.0, 0.0, page_width, FOOTER_BAR_HEIGHT);
}

fn push_fill_rect(
    ops: &mut Vec<Operation>,
    (r, g, b): (f32, f32, f32),
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) {
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new(
        "re",
        vec![x.into(), y.into(), width.into(), height.into()],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

fn push_logo(ops: &mut Vec<Operation>, logo: &EmbeddedLogo, x: f32, y: f32) {
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "cm",
        vec![
            logo.display_width.into(),
            0f32.into(),
            0f32.into(),
            logo.display_height.into(),
            x.into(),
            y.into(),
        ],
    ));
    ops.push(Operation::new("Do", vec!["Logo".into()]));
    ops.push(Operation::new("Q", vec![]));
}

fn push_centered_text(
    ops: &mut Vec<Operation>,
    font: &str,
    size: f32,
    page_width: f32,
    y: f32,
    text: &str,
) {
    let estimated = text.chars().count() as f32 * GLYPH_WIDTH_FACTOR * size;
    let x = ((page_width - estimated) / 2.0).max(MARGIN);
    push_text(ops, font, size, x, y, text);
}

fn push_text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn push_color(ops: &mut Vec<Operation>, r: f32, g: f32, b: f32) {
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
}

/// Map text to WinAnsi bytes for the Type1 base fonts. Latin-1 code points
/// pass through; the few common punctuation marks outside it are remapped;
/// everything else degrades to `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '…' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) <= 0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
