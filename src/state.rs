/// List view state.
///
/// Owns the UI intent of one list view: current page, page size, sort
/// column/direction, free-text search term, and active column filters.
/// Pure data, no I/O. Nothing here errors; invalid inputs are clamped or
/// ignored, since this only records what the user asked for.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sort direction for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<SortDirection> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Fixed option set offered by the footer page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Current view intent for one list.
///
/// Invariants: `page >= 1`, `page_size >= 1`, and `sort_direction` is
/// `Some` exactly when `sort_column` is; clearing sort clears both.
/// Filters are kept ordered so the query identity is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewState {
    page: usize,
    page_size: usize,
    sort_column: Option<String>,
    sort_direction: Option<SortDirection>,
    search_term: String,
    filters: BTreeMap<String, String>,
}

impl Default for ListViewState {
    fn default() -> Self {
        ListViewState::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListViewState {
    pub fn new(page_size: usize) -> Self {
        ListViewState {
            page: 1,
            page_size: page_size.max(1),
            sort_column: None,
            sort_direction: None,
            search_term: String::new(),
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort_column(&self) -> Option<&str> {
        self.sort_column.as_deref()
    }

    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.sort_direction
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(|v| v.as_str())
    }

    /// Number of pages for a given total row count. Zero when the dataset
    /// is empty.
    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.page_size)
    }

    /// Sets the page, clamped to at least 1. Callers with a known total
    /// should prefer `next_page`/`prev_page`, which clamp on both ends.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self, total_count: usize) {
        let last = self.total_pages(total_count).max(1);
        self.page = (self.page + 1).min(last);
    }

    /// Clamped at page 1; the total is irrelevant going backwards.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Changing density invalidates prior page offsets, so page resets to 1.
    /// A zero size is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.page_size = page_size;
        self.page = 1;
    }

    /// Cycles the sort for one column: unsorted -> ascending -> descending
    /// -> cleared. Targeting a different column starts over at ascending.
    /// Whether the column is sortable at all is the column model's call;
    /// see `ListView::sort_by`.
    pub fn toggle_sort(&mut self, column: &str) {
        if self.sort_column.as_deref() == Some(column) {
            match self.sort_direction {
                Some(SortDirection::Asc) => {
                    self.sort_direction = Some(SortDirection::Desc);
                }
                _ => {
                    self.clear_sort();
                    return;
                }
            }
        } else {
            self.sort_column = Some(column.to_string());
            self.sort_direction = Some(SortDirection::Asc);
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort_column = None;
        self.sort_direction = None;
        self.page = 1;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Upserts or removes one filter key. Any change resets to page 1.
    pub fn set_filter(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.filters.insert(key.to_string(), v.to_string());
            }
            None => {
                self.filters.remove(key);
            }
        }
        self.page = 1;
    }

    /// Identity of the underlying result set: search term plus filters.
    /// Sort and page are presentation of the same set, so they are
    /// excluded. Selection is kept while this stays stable and dropped
    /// when it changes.
    pub fn query_identity(&self) -> String {
        let mut identity = self.search_term.clone();
        for (k, v) in &self.filters {
            identity.push('\u{1f}');
            identity.push_str(k);
            identity.push('=');
            identity.push_str(v);
        }
        identity
    }

    /// 1-based inclusive item range shown on the current page, for the
    /// "showing X-Y of Z" footer summary. None when the dataset is empty.
    pub fn item_range(&self, total_count: usize) -> Option<(usize, usize)> {
        if total_count == 0 {
            return None;
        }
        let start = (self.page - 1) * self.page_size + 1;
        if start > total_count {
            return None;
        }
        let end = (self.page * self.page_size).min(total_count);
        Some((start, end))
    }

    /// Mirrors the navigable portion of the state into URL-style query
    /// pairs so a host can restore the view after a reload.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("itemsPerPage".to_string(), self.page_size.to_string()),
        ];
        if let (Some(col), Some(dir)) = (&self.sort_column, self.sort_direction) {
            pairs.push(("sortColumn".to_string(), col.clone()));
            pairs.push(("sortDirection".to_string(), dir.as_str().to_string()));
        }
        pairs
    }

    /// Restores state from query pairs produced by `to_query_pairs`.
    /// Unknown keys and unparsable values are ignored.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let mut state = ListViewState::default();
        let mut column: Option<String> = None;
        let mut direction: Option<SortDirection> = None;

        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    if let Ok(page) = value.parse::<usize>() {
                        state.set_page(page);
                    }
                }
                "itemsPerPage" => {
                    if let Ok(size) = value.parse::<usize>() {
                        state.set_page_size(size);
                    }
                }
                "sortColumn" => column = Some(value.clone()),
                "sortDirection" => direction = SortDirection::parse(value),
                _ => {}
            }
        }

        // page-size restoration resets page to 1, so re-apply page last
        if let Some((_, page)) = pairs.iter().find(|(k, _)| k == "page") {
            if let Ok(page) = page.parse::<usize>() {
                state.set_page(page);
            }
        }
        if let (Some(col), Some(dir)) = (column, direction) {
            state.sort_column = Some(col);
            state.sort_direction = Some(dir);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ListViewState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(state.sort_column(), None);
        assert_eq!(state.sort_direction(), None);
        assert_eq!(state.search_term(), "");
    }

    #[test]
    fn test_page_size_resets_page() {
        let mut state = ListViewState::new(20);
        state.set_page(3);
        state.set_page_size(50);
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 50);
        // zero is ignored, not an error
        state.set_page(2);
        state.set_page_size(0);
        assert_eq!(state.page_size(), 50);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_total_pages() {
        let state = ListViewState::new(20);
        assert_eq!(state.total_pages(45), 3);
        assert_eq!(state.total_pages(40), 2);
        assert_eq!(state.total_pages(0), 0);
        assert_eq!(state.total_pages(1), 1);
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut state = ListViewState::new(20);
        state.prev_page();
        assert_eq!(state.page(), 1);
        state.next_page(45);
        state.next_page(45);
        state.next_page(45);
        state.next_page(45);
        assert_eq!(state.page(), 3);
        state.prev_page();
        assert_eq!(state.page(), 2);
        // empty dataset pins to page 1
        let mut empty = ListViewState::new(20);
        empty.next_page(0);
        assert_eq!(empty.page(), 1);
    }

    #[test]
    fn test_sort_cycle() {
        let mut state = ListViewState::new(20);
        state.toggle_sort("name");
        assert_eq!(state.sort_column(), Some("name"));
        assert_eq!(state.sort_direction(), Some(SortDirection::Asc));
        state.toggle_sort("name");
        assert_eq!(state.sort_direction(), Some(SortDirection::Desc));
        // third toggle clears both together
        state.toggle_sort("name");
        assert_eq!(state.sort_column(), None);
        assert_eq!(state.sort_direction(), None);
    }

    #[test]
    fn test_sort_switch_column_starts_ascending() {
        let mut state = ListViewState::new(20);
        state.toggle_sort("name");
        state.toggle_sort("name");
        state.toggle_sort("age");
        assert_eq!(state.sort_column(), Some("age"));
        assert_eq!(state.sort_direction(), Some(SortDirection::Asc));
    }

    #[test]
    fn test_search_and_filter_reset_page() {
        let mut state = ListViewState::new(20);
        state.set_page(4);
        state.set_search("smith");
        assert_eq!(state.page(), 1);
        state.set_page(4);
        state.set_filter("organization_id", Some("7"));
        assert_eq!(state.page(), 1);
        assert_eq!(state.filter("organization_id"), Some("7"));
        state.set_filter("organization_id", None);
        assert_eq!(state.filter("organization_id"), None);
    }

    #[test]
    fn test_query_identity_ignores_sort_and_page() {
        let mut a = ListViewState::new(20);
        a.set_search("x");
        a.set_filter("dept", Some("hr"));
        let mut b = a.clone();
        b.set_page(3);
        b.toggle_sort("name");
        assert_eq!(a.query_identity(), b.query_identity());
        b.set_filter("dept", Some("it"));
        assert_ne!(a.query_identity(), b.query_identity());
    }

    #[test]
    fn test_item_range_summary() {
        let mut state = ListViewState::new(20);
        state.set_page(3);
        assert_eq!(state.item_range(45), Some((41, 45)));
        state.set_page(1);
        assert_eq!(state.item_range(45), Some((1, 20)));
        assert_eq!(state.item_range(0), None);
        // page beyond the data yields no range rather than a bogus one
        state.set_page(9);
        assert_eq!(state.item_range(45), None);
    }

    #[test]
    fn test_query_pair_round_trip() {
        let mut state = ListViewState::new(30);
        state.set_page(2);
        state.toggle_sort("hired_at");
        state.toggle_sort("hired_at");
        state.set_page(2);

        let pairs = state.to_query_pairs();
        let restored = ListViewState::from_query_pairs(&pairs);
        assert_eq!(restored.page(), 2);
        assert_eq!(restored.page_size(), 30);
        assert_eq!(restored.sort_column(), Some("hired_at"));
        assert_eq!(restored.sort_direction(), Some(SortDirection::Desc));
    }

    #[test]
    fn test_from_query_pairs_ignores_junk() {
        let pairs = vec![
            ("page".to_string(), "not-a-number".to_string()),
            ("sortDirection".to_string(), "sideways".to_string()),
            ("unknown".to_string(), "1".to_string()),
        ];
        let state = ListViewState::from_query_pairs(&pairs);
        assert_eq!(state.page(), 1);
        assert_eq!(state.sort_column(), None);
        assert_eq!(state.sort_direction(), None);
    }
}
