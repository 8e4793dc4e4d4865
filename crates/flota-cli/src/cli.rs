//! CLI argument definitions for the fleet export tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use flota_model::{ExportFormat, Orientation, RowScope};

#[derive(Parser)]
#[command(
    name = "flota-export",
    version,
    about = "Fleet report exporter - render row data as CSV, XLSX or PDF",
    long_about = "Render fleet report data (a JSON array of row objects) as\n\
                  CSV, XLSX or PDF artifacts, with editable column layout,\n\
                  title band, generated timestamp and footer bar."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export rows to one or more artifact formats.
    Export(ExportArgs),

    /// Print the first rows as the export dialog would preview them.
    Preview(SourceArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Artifact format to generate.
    #[arg(long = "format", value_enum, default_value = "all")]
    pub format: FormatArg,

    /// Output directory for generated artifacts.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Page orientation for the XLSX print setup and the PDF pages.
    #[arg(long = "orientation", value_enum, default_value = "portrait")]
    pub orientation: OrientationArg,

    /// Row scope; without a pager `page` behaves like `all`.
    #[arg(long = "scope", value_enum, default_value = "all")]
    pub scope: ScopeArg,

    /// Logo image shown in the XLSX/PDF title band.
    #[arg(long = "logo", value_name = "IMAGE")]
    pub logo: Option<PathBuf>,

    /// Footer bar color as #RRGGBB hex.
    #[arg(long = "footer-color", value_name = "HEX")]
    pub footer_color: Option<String>,

    /// Omit the generated-timestamp line under the title.
    #[arg(long = "no-timestamp")]
    pub no_timestamp: bool,
}

#[derive(Parser)]
pub struct SourceArgs {
    /// JSON file with an array of row objects.
    #[arg(value_name = "ROWS_FILE")]
    pub rows: PathBuf,

    /// Column config file (JSON array of {label, key, type, align}).
    /// Defaults to one text column per key of the first row.
    #[arg(long = "columns", value_name = "FILE")]
    pub columns: Option<PathBuf>,

    /// Document title shown in the XLSX/PDF title band.
    #[arg(long = "title", default_value = "")]
    pub title: String,

    /// XLSX worksheet name.
    #[arg(long = "sheet-name", default_value = "Datos")]
    pub sheet_name: String,

    /// Base of the artifact filename (blank falls back to "export").
    #[arg(long = "filename-base", default_value = "export")]
    pub filename_base: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
    Pdf,
    All,
}

impl FormatArg {
    pub fn formats(self) -> Vec<ExportFormat> {
        match self {
            Self::Csv => vec![ExportFormat::Csv],
            Self::Xlsx => vec![ExportFormat::Xlsx],
            Self::Pdf => vec![ExportFormat::Pdf],
            Self::All => ExportFormat::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(value: OrientationArg) -> Self {
        match value {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    All,
    Page,
}

impl From<ScopeArg> for RowScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::All => RowScope::All,
            ScopeArg::Page => RowScope::Page,
        }
    }
}

/// CLI log level choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
