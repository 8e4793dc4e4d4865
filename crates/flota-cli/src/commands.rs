//! Command implementations: load rows and column config, drive a session.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use flota_model::{
    ColumnHint, ExportFormat, FooterColor, Orientation, RowRecord, RowScope,
};
use flota_render::FileSink;
use flota_session::{ExportSession, SessionDefaults};

/// Everything the `export` command needs, already parsed.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub rows_file: PathBuf,
    pub columns_file: Option<PathBuf>,
    pub formats: Vec<ExportFormat>,
    pub output_dir: PathBuf,
    pub title: String,
    pub sheet_name: String,
    pub filename_base: String,
    pub orientation: Orientation,
    pub scope: RowScope,
    pub logo: Option<PathBuf>,
    pub footer_color: Option<String>,
    pub include_timestamp: bool,
}

/// What the `export` command produced.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub rows: usize,
    pub written: Vec<PathBuf>,
}

pub fn run_export(options: &ExportOptions) -> Result<ExportReport> {
    let mut session = open_session(options)?;
    session.set_scope(options.scope)?;
    let rows = session.preview().total_rows;

    let mut sink = FileSink::new(&options.output_dir);
    for format in &options.formats {
        session
            .export(*format, Utc::now(), &mut sink)
            .with_context(|| format!("exporting {format}"))?;
    }
    Ok(ExportReport {
        rows,
        written: sink.written,
    })
}

/// Render the dialog's live preview as a terminal table.
pub fn run_preview(options: &ExportOptions) -> Result<String> {
    let session = open_session(options)?;
    let preview = session.preview();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(preview.headers.clone());
    for row in &preview.rows {
        table.add_row(row.clone());
    }
    Ok(format!(
        "{table}\n{shown} de {total} filas",
        shown = preview.rows.len(),
        total = preview.total_rows
    ))
}

fn open_session(options: &ExportOptions) -> Result<ExportSession> {
    let rows = load_rows(&options.rows_file)?;
    let hints = match &options.columns_file {
        Some(path) => load_hints(path)?,
        None => infer_hints(&rows),
    };
    if hints.is_empty() {
        bail!("no exportable columns: supply --columns or non-empty rows");
    }
    debug!(rows = rows.len(), columns = hints.len(), "session input loaded");

    let footer_color = match &options.footer_color {
        Some(hex) => FooterColor::parse(hex)
            .with_context(|| format!("invalid --footer-color {hex:?}"))?,
        None => FooterColor::default(),
    };
    let defaults = SessionDefaults {
        title: options.title.clone(),
        filename_base: options.filename_base.clone(),
        sheet_name: options.sheet_name.clone(),
        orientation: options.orientation,
        footer_color,
        include_generated_timestamp: options.include_timestamp,
        logo_path: options.logo.clone(),
    };
    // The CLI has no pager, so the page subset is always empty and Page
    // scope falls back to the full set.
    Ok(ExportSession::open(defaults, hints, rows, Vec::new()))
}

/// Rows file: a JSON array of plain objects.
fn load_rows(path: &Path) -> Result<Vec<RowRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading rows file {}", path.display()))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&text)
        .with_context(|| format!("parsing rows file {}", path.display()))?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            RowRecord::from_value(value)
                .with_context(|| format!("row {index} is not a JSON object"))
        })
        .collect()
}

/// Columns file: a JSON array of `{label, key, type?, align?}` hints.
fn load_hints(path: &Path) -> Result<Vec<ColumnHint>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading columns file {}", path.display()))?;
    let hints: Vec<ColumnHint> = serde_json::from_str(&text)
        .with_context(|| format!("parsing columns file {}", path.display()))?;
    Ok(hints)
}

/// Without a columns file, every key of the first row exports as text.
fn infer_hints(rows: &[RowRecord]) -> Vec<ColumnHint> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    first
        .keys()
        .map(|key| ColumnHint::new(key, key))
        .collect()
}
