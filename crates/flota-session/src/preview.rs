use flota_model::{ColumnDefinition, RowRecord};

/// The live preview shows at most this many rows of the resolved scope.
pub const PREVIEW_ROW_LIMIT: usize = 5;

/// A formatted projection of the first rows of the export, recomputed
/// whenever rows, columns or scope change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Size of the full resolved scope, not just the previewed slice.
    pub total_rows: usize,
}

impl Preview {
    pub(crate) fn project(rows: &[RowRecord], columns: &[&ColumnDefinition]) -> Self {
        let headers = columns.iter().map(|c| c.label.clone()).collect();
        let previewed = rows
            .iter()
            .take(PREVIEW_ROW_LIMIT)
            .enumerate()
            .map(|(row_index, row)| {
                columns
                    .iter()
                    .map(|column| column.display_value(row, row_index))
                    .collect()
            })
            .collect();
        Self {
            headers,
            rows: previewed,
            total_rows: rows.len(),
        }
    }
}
