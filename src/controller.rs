/// List view controller.
///
/// Composes view state, data source, column model, and selection into one
/// unit: user interactions mutate the state, state changes trigger a
/// re-fetch, and the fetched page is what the renderer shows. Each fetch
/// runs the `Idle -> Loading -> (Loaded | Errored)` cycle; while Loading,
/// sort/filter/page mutations are ignored so fetches cannot overlap from
/// the controls. A failed fetch keeps the previous rows on screen under a
/// non-blocking error, and is never retried automatically.
///
/// Responses are guarded by a monotonically increasing request sequence
/// number: a result older than the last applied one is discarded, so when
/// two requests race, the later request's rows win.

use crate::columns::ColumnModel;
use crate::debounce::Debouncer;
use crate::row::Row;
use crate::selection::SelectionTracker;
use crate::source::{DataSource, FetchResult, SourceError};
use crate::state::ListViewState;
use log::{debug, warn};
use std::time::{Duration, Instant};

/// Observed debounce window for free-text search.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Lifecycle of the current fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No fetch has run yet.
    Idle,
    /// A fetch is in flight; controls are disabled.
    Loading,
    /// The last fetch succeeded and its rows are displayed.
    Loaded,
    /// The last fetch failed; the previous rows remain displayed.
    Errored,
}

/// One list view instance: state, data, selection, and fetch lifecycle.
pub struct ListView<S: DataSource> {
    source: S,
    columns: ColumnModel,
    state: ListViewState,
    selection: SelectionTracker,
    result: FetchResult,
    phase: LoadPhase,
    last_error: Option<String>,
    next_seq: u64,
    last_applied_seq: u64,
    applied_identity: Option<String>,
    search_debounce: Debouncer,
}

impl<S: DataSource> ListView<S> {
    pub fn new(columns: ColumnModel, source: S) -> Self {
        Self::with_state(columns, source, ListViewState::default())
    }

    /// Starts from a restored state, e.g. one mirrored out of a URL.
    pub fn with_state(columns: ColumnModel, source: S, state: ListViewState) -> Self {
        ListView {
            source,
            columns,
            state,
            selection: SelectionTracker::new(),
            result: FetchResult::default(),
            phase: LoadPhase::Idle,
            last_error: None,
            next_seq: 0,
            last_applied_seq: 0,
            applied_identity: None,
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    pub fn state(&self) -> &ListViewState {
        &self.state
    }

    pub fn columns(&self) -> &ColumnModel {
        &self.columns
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionTracker {
        &mut self.selection
    }

    /// Rows of the last successfully fetched page.
    pub fn rows(&self) -> &[Row] {
        &self.result.rows
    }

    pub fn total_count(&self) -> usize {
        self.result.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages(self.result.total_count)
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Message of the last failed fetch, until a fetch succeeds again.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ---- fetch lifecycle ----

    /// Issues a new request ticket: bumps the sequence number, snapshots
    /// the state the request is for, and enters Loading. Synchronous
    /// callers should just use `refresh`; this exists for hosts that
    /// resolve fetches asynchronously and may see responses out of order.
    pub fn begin_request(&mut self) -> (u64, ListViewState) {
        self.next_seq += 1;
        self.phase = LoadPhase::Loading;
        (self.next_seq, self.state.clone())
    }

    /// Applies the outcome of request `seq`. Out-of-order results (older
    /// than the last applied one) are discarded so the latest request
    /// wins. On failure the previous rows are retained.
    pub fn apply_result(&mut self, seq: u64, outcome: Result<FetchResult, SourceError>) {
        if seq <= self.last_applied_seq {
            debug!("discarding stale fetch result (seq {seq} <= {})", self.last_applied_seq);
            return;
        }

        match outcome {
            Ok(result) => {
                self.last_applied_seq = seq;
                let identity = self.state.query_identity();
                if self.applied_identity.as_deref() != Some(identity.as_str()) {
                    self.selection.clear();
                    self.applied_identity = Some(identity);
                }
                self.result = result;
                self.last_error = None;
                self.phase = LoadPhase::Loaded;
            }
            Err(err) => {
                warn!("list fetch failed, keeping previous page: {err}");
                self.last_error = Some(err.to_string());
                self.phase = LoadPhase::Errored;
            }
        }
    }

    /// Runs one full fetch cycle against the data source.
    pub fn refresh(&mut self) {
        let (seq, state) = self.begin_request();
        let outcome = self.source.fetch(&state);
        self.apply_result(seq, outcome);
    }

    // ---- user interactions ----

    /// Sorts by a column: ascending on first click, descending on the
    /// second, cleared on the third. Non-sortable and unknown columns are
    /// a no-op.
    pub fn sort_by(&mut self, column: &str) {
        if self.is_busy() || !self.columns.is_sortable(column) {
            return;
        }
        self.state.toggle_sort(column);
        self.refresh();
    }

    pub fn clear_sort(&mut self) {
        if self.is_busy() {
            return;
        }
        self.state.clear_sort();
        self.refresh();
    }

    pub fn set_page(&mut self, page: usize) {
        if self.is_busy() {
            return;
        }
        self.state.set_page(page);
        self.refresh();
    }

    pub fn next_page(&mut self) {
        if self.is_busy() {
            return;
        }
        self.state.next_page(self.result.total_count);
        self.refresh();
    }

    pub fn prev_page(&mut self) {
        if self.is_busy() {
            return;
        }
        self.state.prev_page();
        self.refresh();
    }

    pub fn set_page_size(&mut self, size: usize) {
        if self.is_busy() {
            return;
        }
        self.state.set_page_size(size);
        self.refresh();
    }

    pub fn set_filter(&mut self, key: &str, value: Option<&str>) {
        if self.is_busy() {
            return;
        }
        self.state.set_filter(key, value);
        self.refresh();
    }

    /// Applies a search term immediately, without debouncing. Any term
    /// still pending in the debouncer is discarded: the explicit search
    /// is the newer intent and must not be overwritten by an older
    /// keystroke burst firing on a later `tick`.
    pub fn set_search(&mut self, term: &str) {
        if self.is_busy() {
            return;
        }
        self.search_debounce.cancel();
        self.state.set_search(term);
        self.refresh();
    }

    /// Records one keystroke of search input; the fetch fires from
    /// `tick` once typing has paused for the debounce window.
    pub fn search_input(&mut self, term: &str, now: Instant) {
        self.search_debounce.submit(term, now);
    }

    /// Drives the debounce clock. Hosts call this from their event loop;
    /// at most one fetch fires per input burst.
    pub fn tick(&mut self, now: Instant) {
        if let Some(term) = self.search_debounce.poll(now) {
            self.state.set_search(term);
            self.refresh();
        }
    }

    // ---- selection ----

    pub fn toggle_row(&mut self, row_id: &str) {
        self.selection.toggle(row_id);
    }

    /// Header select-all checkbox: toggles selection of the visible page.
    pub fn select_all_visible(&mut self) {
        self.selection.select_all_visible(&self.result.rows);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Currently selected rows out of the visible page, for bulk actions.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.result
            .rows
            .iter()
            .filter(|r| self.selection.is_selected(r.id()))
            .collect()
    }
}
