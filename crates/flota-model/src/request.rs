use chrono::{DateTime, Utc};

use crate::column::{ColumnDefinition, ColumnSet};
use crate::metadata::{ExportFormat, ExportMetadata, export_filename};
use crate::row::RowRecord;

/// Everything a renderer needs for one export job.
///
/// Built fresh at dispatch time from the session's current state and
/// discarded once the artifact is produced; never persisted. Only enabled
/// columns are carried, in list order.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub rows: Vec<RowRecord>,
    pub columns: Vec<ColumnDefinition>,
    pub metadata: ExportMetadata,
}

impl ExportRequest {
    /// Snapshot the resolved scope rows and the enabled columns.
    pub fn new(rows: Vec<RowRecord>, columns: &ColumnSet, metadata: ExportMetadata) -> Self {
        Self {
            rows,
            columns: columns.enabled_columns().cloned().collect(),
            metadata,
        }
    }

    /// Artifact name for this request in the given format.
    pub fn filename(&self, format: ExportFormat, now: DateTime<Utc>) -> String {
        export_filename(&self.metadata.filename_base, format, now)
    }

    /// Header labels in output order.
    pub fn header_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Formatted cells for the row at `row_index`, in column order, or
    /// `None` when the index is out of range.
    pub fn display_row(&self, row_index: usize) -> Option<Vec<String>> {
        let row = self.rows.get(row_index)?;
        Some(
            self.columns
                .iter()
                .map(|column| column.display_value(row, row_index))
                .collect(),
        )
    }

    /// Formatted cells for every row, in row order.
    pub fn display_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().enumerate().map(|(row_index, row)| {
            self.columns
                .iter()
                .map(|column| column.display_value(row, row_index))
                .collect()
        })
    }
}
