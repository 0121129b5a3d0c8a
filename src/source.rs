/// Data source contract.
///
/// A data source resolves a view state into one page of rows plus the
/// total count of rows matching the current filter and search. Two
/// strategies exist: `LocalSource` holds the full dataset in memory and
/// derives the page synchronously; `RemoteSource` (see `remote`)
/// translates the state into query parameters for a backend list
/// endpoint.

use crate::row::{CellValue, Row};
use crate::state::{ListViewState, SortDirection};
use thiserror::Error;

/// Failure taxonomy for data sources. Fetch failures are caught and
/// logged by the controller; the previous page stays on screen and no
/// automatic retry happens.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or I/O failure reaching the backend.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Backend rejected the request as a duplicate (HTTP 409 flows).
    /// Mapped separately so hosts can show a distinct message.
    #[error("duplicate data conflict: {0}")]
    Conflict(String),

    /// Response arrived but did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A row in the response had no usable identity field.
    #[error("row is missing identity field '{0}'")]
    MissingId(String),

    #[error("response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One resolved page: `rows.len() <= page_size`, and `total_count` is the
/// count of all rows matching the current filter/search regardless of
/// pagination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchResult {
    pub rows: Vec<Row>,
    pub total_count: usize,
    pub has_next: bool,
}

/// Paged, sorted, filtered data provider.
pub trait DataSource {
    fn fetch(&mut self, state: &ListViewState) -> Result<FetchResult, SourceError>;
}

/// In-memory data source: applies filter and search predicates, sorts
/// with the standard two-value comparator, then slices out the page.
#[derive(Debug, Default)]
pub struct LocalSource {
    rows: Vec<Row>,
}

impl LocalSource {
    pub fn new(rows: Vec<Row>) -> Self {
        LocalSource { rows }
    }

    /// Replaces the whole dataset. The next fetch sees the new rows.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn matches(&self, row: &Row, state: &ListViewState) -> bool {
        for (key, expected) in state.filters() {
            let actual = row.display(key).unwrap_or_default();
            if actual != expected {
                return false;
            }
        }

        let term = state.search_term().trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        row.keys()
            .any(|key| {
                row.display(key)
                    .map(|text| text.to_lowercase().contains(&term))
                    .unwrap_or(false)
            })
    }
}

impl DataSource for LocalSource {
    fn fetch(&mut self, state: &ListViewState) -> Result<FetchResult, SourceError> {
        let mut matching: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| self.matches(row, state))
            .collect();

        if let (Some(column), Some(direction)) = (state.sort_column(), state.sort_direction()) {
            matching.sort_by(|a, b| {
                let va = a.get(column).cloned().unwrap_or(CellValue::Null);
                let vb = b.get(column).cloned().unwrap_or(CellValue::Null);
                let ordering = va.compare(&vb);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let total_count = matching.len();
        let start = (state.page() - 1) * state.page_size();
        let end = (start + state.page_size()).min(total_count);
        let rows: Vec<Row> = if start < total_count {
            matching[start..end].iter().map(|r| (*r).clone()).collect()
        } else {
            Vec::new()
        };

        Ok(FetchResult {
            rows,
            total_count,
            has_next: end < total_count,
        })
    }
}
