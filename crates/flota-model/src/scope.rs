use serde::{Deserialize, Serialize};

use crate::row::RowRecord;

/// Which row subset feeds an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowScope {
    /// Every row that passed the caller's filters.
    #[default]
    All,
    /// Only the rows visible on the current page.
    Page,
}

/// Resolve the export source set.
///
/// `Page` scope with an empty page subset falls back to the full filtered
/// set, so an export is never empty when data exists. Neither input is
/// mutated or filtered further.
pub fn resolve_scope<'a>(
    all_rows: &'a [RowRecord],
    page_rows: &'a [RowRecord],
    scope: RowScope,
) -> &'a [RowRecord] {
    match scope {
        RowScope::Page if !page_rows.is_empty() => page_rows,
        _ => all_rows,
    }
}
