/// Column model.
///
/// An ordered, immutable-per-render list of column descriptors: key,
/// display label, sortable flag, sticky pinning, width, and an optional
/// custom cell renderer. The key must address a property present on the
/// row; when it is absent (or null) rendering falls back to a placeholder
/// glyph.

use crate::row::{CellValue, Row};
use std::fmt::Debug;

/// Glyph rendered for null or missing cell values.
pub const PLACEHOLDER: &str = "-";

/// Width assumed for columns that do not declare one, in cells. Keeps
/// sticky offsets well-defined.
pub const DEFAULT_COLUMN_WIDTH: u16 = 12;

/// Custom cell formatter. Fully replaces default text rendering for its
/// column; receives the cell value (Null when the key is absent) and the
/// whole row for cross-field formatting.
pub type CellRenderer = Box<dyn Fn(&CellValue, &Row) -> String>;

/// Metadata describing how one field is labeled, sorted, and rendered.
pub struct ColumnDescriptor {
    key: String,
    header: String,
    sortable: bool,
    sticky: bool,
    width: Option<u16>,
    renderer: Option<CellRenderer>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        ColumnDescriptor {
            key: key.into(),
            header: header.into(),
            sortable: false,
            sticky: false,
            width: None,
            renderer: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn renderer<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &Row) -> String + 'static,
    {
        self.renderer = Some(Box::new(f));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn declared_width(&self) -> Option<u16> {
        self.width
    }

    pub fn effective_width(&self) -> u16 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Text for one cell. A custom renderer, when present, fully replaces
    /// the default; otherwise the raw value is rendered, with the
    /// placeholder glyph standing in for null or missing values.
    pub fn render_cell(&self, row: &Row) -> String {
        let value = row.get(&self.key).cloned().unwrap_or(CellValue::Null);
        match &self.renderer {
            Some(f) => f(&value, row),
            None => {
                if value.is_null() {
                    PLACEHOLDER.to_string()
                } else {
                    value.display()
                }
            }
        }
    }
}

impl Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ColumnDescriptor {{ key: '{}', header: '{}', sortable: {}, sticky: {}, width: {:?}, custom_renderer: {} }}",
            self.key,
            self.header,
            self.sortable,
            self.sticky,
            self.width,
            self.renderer.is_some()
        )
    }
}

/// Ordered collection of column descriptors for one list view.
#[derive(Debug, Default)]
pub struct ColumnModel {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnModel {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        ColumnModel { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    pub fn get(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.get(key).map(|c| c.sortable).unwrap_or(false)
    }

    /// Sticky columns in declaration order. These stay pinned at the left
    /// edge while the rest scroll horizontally.
    pub fn pinned(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.sticky)
    }

    /// Non-sticky columns in declaration order.
    pub fn scrolling(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| !c.sticky)
    }

    /// Horizontal offset of one sticky column: the cumulative width of all
    /// earlier sticky columns. None for keys that are not sticky.
    ///
    /// For host renderers that position columns absolutely (CSS-style
    /// `left` pinning). The bundled terminal widget does not need it: a
    /// cell grid pins by reordering, so it draws sticky columns first and
    /// applies its scroll offset to the rest.
    pub fn sticky_offset(&self, key: &str) -> Option<u16> {
        let mut offset = 0u16;
        for column in self.pinned() {
            if column.key == key {
                return Some(offset);
            }
            offset = offset.saturating_add(column.effective_width());
        }
        None
    }
}
