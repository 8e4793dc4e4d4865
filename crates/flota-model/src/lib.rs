//! Fleet report export data model.
//!
//! This crate holds everything an export renderer needs to know about the
//! data being exported:
//!
//! - **Columns**: the editable projection of which row fields export, in
//!   what order, under what label/type/alignment.
//! - **Formatting**: locale-aware (es-HN) display formatting per type tag.
//! - **Scope**: which row subset (all filtered rows vs the current page)
//!   feeds an export.
//! - **Request**: the ephemeral snapshot handed to a renderer.

pub mod column;
pub mod error;
pub mod format;
pub mod metadata;
pub mod request;
pub mod row;
pub mod scope;

pub use column::{
    Alignment, ColumnDefinition, ColumnEdit, ColumnHint, ColumnSet, ColumnValueSource, TypeTag,
    ValueAccessor,
};
pub use error::{ModelError, Result};
pub use format::format_value;
pub use metadata::{
    DEFAULT_FILENAME_BASE, ExportFormat, ExportMetadata, FooterColor, Orientation,
    export_filename, timestamp_token,
};
pub use request::ExportRequest;
pub use row::RowRecord;
pub use scope::{RowScope, resolve_scope};
