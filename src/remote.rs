/// Remote data source.
///
/// Translates a view state into the query parameters a backend list
/// endpoint expects (`page`, `limit`, `sortColumn`, `sortDirection`,
/// `search`, plus entity-specific filter keys) and maps the
/// `{ data, total, hasNext }` response back into a `FetchResult`.
///
/// The transport itself is pluggable: anything that can turn a
/// `ListQuery` into a `ListResponse` works, which keeps the mapping layer
/// testable without a network.

use crate::row::{CellValue, Row};
use crate::source::{DataSource, FetchResult, SourceError};
use crate::state::{ListViewState, SortDirection};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Query parameters for one page request. Filters are flattened into the
/// top level, so `filters = {"organization_id": "7"}` serializes as
/// `"organization_id": "7"` next to `page` and `limit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    #[serde(rename = "sortColumn", skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<String>,
    #[serde(rename = "sortDirection", skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn from_state(state: &ListViewState) -> Self {
        ListQuery {
            page: state.page(),
            limit: state.page_size(),
            sort_column: state.sort_column().map(|c| c.to_string()),
            sort_direction: state.sort_direction(),
            search: state.search_term().to_string(),
            filters: state
                .filters()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Key/value pairs for a GET-style endpoint.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let (Some(col), Some(dir)) = (&self.sort_column, self.sort_direction) {
            pairs.push(("sortColumn".to_string(), col.clone()));
            pairs.push(("sortDirection".to_string(), dir.as_str().to_string()));
        }
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        for (k, v) in &self.filters {
            pairs.push((k.clone(), v.clone()));
        }
        pairs
    }
}

/// Response shape expected from the backend list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub data: Vec<serde_json::Map<String, JsonValue>>,
    pub total: usize,
    #[serde(rename = "hasNext", default)]
    pub has_next: bool,
}

/// One request/response exchange with the backend. Implementations may
/// block on a network call or answer from a fixture.
pub trait Transport {
    fn send(&mut self, query: &ListQuery) -> Result<ListResponse, SourceError>;
}

/// Data source backed by a remote list endpoint.
#[derive(Debug)]
pub struct RemoteSource<T: Transport> {
    transport: T,
    id_field: String,
}

impl<T: Transport> RemoteSource<T> {
    pub fn new(transport: T) -> Self {
        RemoteSource {
            transport,
            id_field: "id".to_string(),
        }
    }

    /// Overrides the name of the identity field in wire rows.
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    fn row_from_wire(
        &self,
        mut wire: serde_json::Map<String, JsonValue>,
    ) -> Result<Row, SourceError> {
        let id = match wire.remove(&self.id_field) {
            Some(JsonValue::String(s)) => s,
            Some(JsonValue::Number(n)) => n.to_string(),
            _ => return Err(SourceError::MissingId(self.id_field.clone())),
        };

        let mut row = Row::new(id);
        for (key, value) in wire {
            row.insert(key, CellValue::from(value));
        }
        Ok(row)
    }
}

impl<T: Transport> DataSource for RemoteSource<T> {
    fn fetch(&mut self, state: &ListViewState) -> Result<FetchResult, SourceError> {
        let query = ListQuery::from_state(state);
        let response = self.transport.send(&query)?;

        let mut rows = Vec::with_capacity(response.data.len());
        for wire in response.data {
            rows.push(self.row_from_wire(wire)?);
        }

        Ok(FetchResult {
            rows,
            total_count: response.total,
            has_next: response.has_next,
        })
    }
}
