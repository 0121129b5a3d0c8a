/// Remote Paging Example
///
/// This example demonstrates:
/// - The query parameters a ListViewState translates into
/// - Mapping a backend `{ data, total, hasNext }` response into rows
/// - The stale-response guard when two requests race

use gridview::{
    ColumnDescriptor, ColumnModel, ListQuery, ListResponse, ListView, RemoteSource, SourceError,
    Transport,
};
use serde_json::json;

/// Stands in for an HTTP client: answers every query from a canned
/// employee dataset, applying the page window server-side.
struct FakeBackend {
    names: Vec<&'static str>,
}

impl Transport for FakeBackend {
    fn send(&mut self, query: &ListQuery) -> Result<ListResponse, SourceError> {
        println!("   -> GET /employees?{}", encode(query));

        let total = self.names.len();
        let start = (query.page - 1) * query.limit;
        let data: Vec<_> = self
            .names
            .iter()
            .enumerate()
            .skip(start)
            .take(query.limit)
            .map(|(i, name)| json!({ "id": i + 1, "name": name }))
            .collect();

        serde_json::from_value(json!({
            "data": data,
            "total": total,
            "hasNext": start + query.limit < total,
        }))
        .map_err(SourceError::from)
    }
}

fn encode(query: &ListQuery) -> String {
    query
        .to_query_pairs()
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn main() {
    env_logger::init();
    println!("=== GridView Remote Paging Example ===\n");

    let backend = FakeBackend {
        names: vec!["Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace"],
    };
    let columns = ColumnModel::new(vec![ColumnDescriptor::new("name", "Name").sortable()]);
    let mut view = ListView::with_state(
        columns,
        RemoteSource::new(backend),
        gridview::ListViewState::new(3),
    );

    println!("1. Fetch the first two pages:");
    view.refresh();
    println!("      got {} rows of {}\n", view.rows().len(), view.total_count());
    view.next_page();
    println!("      got {} rows of {}\n", view.rows().len(), view.total_count());

    println!("2. Racing responses, older one resolves last:");
    let (first, _) = view.begin_request();
    let (second, _) = view.begin_request();
    view.apply_result(
        second,
        Ok(gridview::FetchResult {
            rows: vec![gridview::Row::new("7").with("name", "Grace")],
            total_count: 1,
            has_next: false,
        }),
    );
    view.apply_result(
        first,
        Ok(gridview::FetchResult {
            rows: vec![gridview::Row::new("1").with("name", "Alice")],
            total_count: 7,
            has_next: true,
        }),
    );
    println!(
        "   displayed after both resolved: {:?} (latest request won)",
        view.rows().iter().map(|r| r.display("name")).collect::<Vec<_>>()
    );
}
