//! Fleet report export encoders.
//!
//! Three independent encoders share one input contract: an
//! [`flota_model::ExportRequest`] (rows + enabled columns + metadata) goes
//! in, a finished [`ExportArtifact`] comes out. Nothing is delivered on
//! error, so a failed render never leaves a partial file behind.
//!
//! - **CSV**: header labels plus formatted cells, standard quoting, UTF-8.
//! - **XLSX**: one worksheet with a title band (optional logo), optional
//!   generated-timestamp line, the data table and a colored footer bar.
//! - **PDF**: the same visual structure, paginated, honoring the requested
//!   page orientation.

mod artifact;
mod common;
mod csv_export;
mod error;
mod pdf;
mod xlsx;

pub use artifact::{ArtifactSink, ExportArtifact, FileSink, MemorySink};
pub use common::{generated_line, render};
pub use csv_export::render_csv;
pub use error::{RenderError, Result};
pub use pdf::render_pdf;
pub use xlsx::render_xlsx;
