//! Editable column model for an export session.
//!
//! The column list is the single source of truth for export output: list
//! order is output order, and disabled columns stay in the list (so the
//! user can re-enable them) but are excluded from the export request.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::format_value;
use crate::row::RowRecord;

/// Per-row value extractor for columns whose value is not a direct field.
pub type ValueAccessor = Arc<dyn Fn(&RowRecord, usize) -> Value + Send + Sync>;

/// Formatting behavior for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    #[default]
    Text,
    Number,
    Currency,
    Date,
}

/// Horizontal alignment of a column in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Where a column's raw value comes from.
///
/// `Key` is the common case (`row[key]`); `Custom` carries a caller-supplied
/// accessor for derived values.
#[derive(Clone)]
pub enum ColumnValueSource {
    Key(String),
    Custom(ValueAccessor),
}

impl ColumnValueSource {
    /// Resolve the raw value for one row. Missing keys yield `Null`.
    pub fn resolve(&self, row: &RowRecord, row_index: usize) -> Value {
        match self {
            Self::Key(key) => row.get(key).cloned().unwrap_or(Value::Null),
            Self::Custom(accessor) => accessor(row, row_index),
        }
    }
}

impl fmt::Debug for ColumnValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Caller-supplied seed for one column, as accepted by
/// [`ColumnSet::from_hints`]. Deserializable from column config files; the
/// accessor can only be attached programmatically.
#[derive(Clone, Serialize, Deserialize)]
pub struct ColumnHint {
    pub label: String,
    pub key: String,
    #[serde(default, rename = "type")]
    pub type_tag: TypeTag,
    #[serde(default)]
    pub align: Alignment,
    #[serde(skip)]
    pub accessor: Option<ValueAccessor>,
}

impl ColumnHint {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            type_tag: TypeTag::Text,
            align: Alignment::Left,
            accessor: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, type_tag: TypeTag) -> Self {
        self.type_tag = type_tag;
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_accessor(
        mut self,
        accessor: impl Fn(&RowRecord, usize) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.accessor = Some(Arc::new(accessor));
        self
    }
}

impl fmt::Debug for ColumnHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnHint")
            .field("label", &self.label)
            .field("key", &self.key)
            .field("type_tag", &self.type_tag)
            .field("align", &self.align)
            .field("accessor", &self.accessor.is_some())
            .finish()
    }
}

/// One column of the editable export projection.
#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    pub id: usize,
    pub label: String,
    pub key: String,
    pub source: ColumnValueSource,
    pub type_tag: TypeTag,
    pub alignment: Alignment,
    pub enabled: bool,
}

impl ColumnDefinition {
    /// Raw cell value for one row.
    pub fn raw_value(&self, row: &RowRecord, row_index: usize) -> Value {
        self.source.resolve(row, row_index)
    }

    /// Formatted display value for one row (accessor + locale formatting).
    pub fn display_value(&self, row: &RowRecord, row_index: usize) -> String {
        format_value(&self.raw_value(row, row_index), self.type_tag)
    }
}

/// A single-attribute edit applied through [`ColumnSet::set_field`].
#[derive(Debug, Clone)]
pub enum ColumnEdit {
    Label(String),
    Type(TypeTag),
    Align(Alignment),
    Enabled(bool),
}

/// The ordered, editable column list of one export session.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<ColumnDefinition>,
}

impl ColumnSet {
    /// Build the editable model from caller hints: sequential ids, all
    /// columns enabled, hint order preserved. Duplicate keys keep the first
    /// occurrence only, so keys are unique within the set.
    pub fn from_hints(hints: &[ColumnHint]) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(hints.len());
        for hint in hints {
            if !seen.insert(hint.key.clone()) {
                continue;
            }
            let source = match &hint.accessor {
                Some(accessor) => ColumnValueSource::Custom(Arc::clone(accessor)),
                None => ColumnValueSource::Key(hint.key.clone()),
            };
            columns.push(ColumnDefinition {
                id: columns.len(),
                label: hint.label.clone(),
                key: hint.key.clone(),
                source,
                type_tag: hint.type_tag,
                alignment: hint.align,
                enabled: true,
            });
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Swap the column at `index` with its immediate neighbor.
    ///
    /// `direction` must be `-1` or `+1`; any move that would leave the list
    /// bounds is a silent no-op.
    pub fn move_column(&mut self, index: usize, direction: isize) {
        if direction != -1 && direction != 1 {
            return;
        }
        let Some(target) = index.checked_add_signed(direction) else {
            return;
        };
        if index < self.columns.len() && target < self.columns.len() {
            self.columns.swap(index, target);
        }
    }

    /// Update one attribute of one column; no-op on a bad index.
    pub fn set_field(&mut self, index: usize, edit: ColumnEdit) {
        let Some(column) = self.columns.get_mut(index) else {
            return;
        };
        match edit {
            ColumnEdit::Label(label) => column.label = label,
            ColumnEdit::Type(type_tag) => column.type_tag = type_tag,
            ColumnEdit::Align(align) => column.alignment = align,
            ColumnEdit::Enabled(enabled) => column.enabled = enabled,
        }
    }

    /// Ordered enabled subset, as it will appear in the export request.
    pub fn enabled_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|column| column.enabled)
    }
}
