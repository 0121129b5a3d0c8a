/// GridView - Reusable List View Controller
///
/// Pagination, sorting, filtering, free-text search, and row selection
/// over a paged data provider, local or remote, plus an optional terminal
/// renderer. One extracted component instead of a copy of this logic per
/// page.

pub mod columns;
pub mod controller;
pub mod debounce;
pub mod remote;
pub mod row;
pub mod selection;
pub mod source;
pub mod state;

pub use columns::{CellRenderer, ColumnDescriptor, ColumnModel, DEFAULT_COLUMN_WIDTH, PLACEHOLDER};
pub use controller::{ListView, LoadPhase, SEARCH_DEBOUNCE};
pub use debounce::Debouncer;
pub use remote::{ListQuery, ListResponse, RemoteSource, Transport};
pub use row::{CellValue, Row};
pub use selection::SelectionTracker;
pub use source::{DataSource, FetchResult, LocalSource, SourceError};
pub use state::{ListViewState, SortDirection, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

// Terminal renderer - only when the tui feature is enabled
#[cfg(feature = "tui")]
pub mod render;
#[cfg(feature = "tui")]
pub use render::ListViewWidget;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn employee_columns() -> ColumnModel {
        ColumnModel::new(vec![
            ColumnDescriptor::new("name", "Name").sticky().sortable().width(16),
            ColumnDescriptor::new("department", "Department").sortable().width(14),
            ColumnDescriptor::new("salary", "Salary")
                .sortable()
                .width(10)
                .renderer(|value, _row| match value.as_i64() {
                    Some(v) => format!("${}", v),
                    None => "n/a".to_string(),
                }),
        ])
    }

    fn employees() -> Vec<Row> {
        vec![
            Row::new("e1").with("name", "Carol").with("department", "Sales").with("salary", 52_000_i64),
            Row::new("e2").with("name", "Alice").with("department", "Engineering").with("salary", 74_000_i64),
            Row::new("e3").with("name", "Bob").with("department", "Sales").with("salary", 48_000_i64),
            Row::new("e4").with("name", "Dave").with("department", "Engineering").with("salary", 69_000_i64),
            Row::new("e5").with("name", "Erin").with("department", "HR").with("salary", 51_000_i64),
        ]
    }

    #[test]
    fn test_complete_workflow() {
        let mut view = ListView::with_state(
            employee_columns(),
            LocalSource::new(employees()),
            ListViewState::new(2),
        );
        view.refresh();

        // initial page
        assert_eq!(view.phase(), LoadPhase::Loaded);
        assert_eq!(view.total_count(), 5);
        assert_eq!(view.total_pages(), 3);

        // sort by salary ascending, then walk the pages
        view.sort_by("salary");
        let ids: Vec<&str> = view.rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["e3", "e5"]);

        view.next_page();
        let ids: Vec<&str> = view.rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["e1", "e4"]);

        // select across a re-fetch of the same query
        view.toggle_row("e1");
        view.prev_page();
        view.next_page();
        assert!(view.selection().is_selected("e1"));

        // filter changes the result set identity and drops the selection
        view.set_filter("department", Some("Sales"));
        assert!(view.selection().is_empty());
        assert_eq!(view.total_count(), 2);
        let ids: Vec<&str> = view.rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["e3", "e1"]);

        // custom renderer drives cell text
        let salary_column = view.columns().get("salary").unwrap();
        assert_eq!(salary_column.render_cell(&view.rows()[1]), "$52000");

        // footer summary math
        assert_eq!(view.state().item_range(view.total_count()), Some((1, 2)));
    }

    #[test]
    fn test_remote_workflow_matches_local_contract() {
        use serde_json::json;

        struct ScriptedTransport {
            pages: Vec<ListResponse>,
        }

        impl Transport for ScriptedTransport {
            fn send(&mut self, _query: &ListQuery) -> Result<ListResponse, SourceError> {
                if self.pages.is_empty() {
                    return Err(SourceError::Transport("no more pages".to_string()));
                }
                Ok(self.pages.remove(0))
            }
        }

        let transport = ScriptedTransport {
            pages: vec![serde_json::from_value(json!({
                "data": [
                    { "id": 1, "name": "Alice" },
                    { "id": 2, "name": "Bob" }
                ],
                "total": 45,
                "hasNext": true
            }))
            .unwrap()],
        };

        let columns = ColumnModel::new(vec![ColumnDescriptor::new("name", "Name").sortable()]);
        let mut view = ListView::new(columns, RemoteSource::new(transport));
        view.refresh();

        assert_eq!(view.total_count(), 45);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.rows().len(), 2);
        assert_eq!(view.rows()[0].id(), "1");

        // a failed follow-up fetch keeps this page on screen
        view.next_page();
        assert_eq!(view.phase(), LoadPhase::Errored);
        assert_eq!(view.rows().len(), 2);
        assert!(view.last_error().unwrap().contains("no more pages"));
    }
}
