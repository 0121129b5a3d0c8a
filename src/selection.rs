/// Selection tracking.
///
/// Tracks which rows are selected by identity, so selection survives
/// re-renders and re-fetches of the same query. Membership tests and
/// toggles are O(1). "Select all" operates over the currently visible
/// page only, never the entire remote dataset.

use crate::row::Row;
use std::collections::HashSet;
use std::fmt::Debug;

type ChangeListener = Box<dyn Fn(&HashSet<String>)>;

pub struct SelectionTracker {
    selected: HashSet<String>,
    on_change: Option<ChangeListener>,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        SelectionTracker::new()
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        SelectionTracker {
            selected: HashSet::new(),
            on_change: None,
        }
    }

    /// Registers a listener invoked after every selection change, so host
    /// pages can enable or disable bulk actions.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: Fn(&HashSet<String>) + 'static,
    {
        self.on_change = Some(Box::new(listener));
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selected.contains(row_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(|id| id.as_str())
    }

    /// Flips membership of one row id.
    pub fn toggle(&mut self, row_id: &str) {
        if !self.selected.insert(row_id.to_string()) {
            self.selected.remove(row_id);
        }
        self.notify();
    }

    /// Select-all over the visible page, with toggle semantics: if every
    /// visible row is already selected the whole selection is cleared,
    /// otherwise all visible ids are added. This is not a pure union.
    pub fn select_all_visible(&mut self, rows: &[Row]) {
        let all_selected =
            !rows.is_empty() && rows.iter().all(|r| self.selected.contains(r.id()));
        if all_selected {
            self.selected.clear();
        } else {
            self.selected
                .extend(rows.iter().map(|r| r.id().to_string()));
        }
        self.notify();
    }

    /// True when every visible row is selected; drives the header
    /// select-all checkbox.
    pub fn all_visible_selected(&self, rows: &[Row]) -> bool {
        !rows.is_empty() && rows.iter().all(|r| self.selected.contains(r.id()))
    }

    pub fn clear(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.notify();
    }

    fn notify(&self) {
        if let Some(listener) = &self.on_change {
            listener(&self.selected);
        }
    }
}

impl Debug for SelectionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SelectionTracker {{ selected: {}, listener: {} }}",
            self.selected.len(),
            self.on_change.is_some()
        )
    }
}
