/// Basic List Example
///
/// This example demonstrates:
/// - Building a column model with sortable and custom-rendered columns
/// - Driving a ListView over an in-memory data source
/// - Paging, sorting, searching, and selection

use gridview::{ColumnDescriptor, ColumnModel, ListView, ListViewState, LocalSource, Row};

fn print_page<S: gridview::DataSource>(view: &ListView<S>) {
    for row in view.rows() {
        let mark = if view.selection().is_selected(row.id()) {
            "[x]"
        } else {
            "[ ]"
        };
        let cells: Vec<String> = view
            .columns()
            .iter()
            .map(|c| format!("{:<14}", c.render_cell(row)))
            .collect();
        println!("   {} {}", mark, cells.join(" "));
    }
    let (start, end) = view.state().item_range(view.total_count()).unwrap_or((0, 0));
    println!(
        "   showing {}-{} of {} (page {}/{})\n",
        start,
        end,
        view.total_count(),
        view.state().page(),
        view.total_pages()
    );
}

fn main() {
    env_logger::init();
    println!("=== GridView Basic List Example ===\n");

    let columns = ColumnModel::new(vec![
        ColumnDescriptor::new("name", "Name").sortable().width(14),
        ColumnDescriptor::new("department", "Department").sortable().width(14),
        ColumnDescriptor::new("salary", "Salary")
            .sortable()
            .width(10)
            .renderer(|value, _| match value.as_i64() {
                Some(v) => format!("${}", v),
                None => "n/a".to_string(),
            }),
    ]);

    let rows = vec![
        Row::new("e1").with("name", "Carol").with("department", "Sales").with("salary", 52_000_i64),
        Row::new("e2").with("name", "Alice").with("department", "Engineering").with("salary", 74_000_i64),
        Row::new("e3").with("name", "Bob").with("department", "Sales").with("salary", 48_000_i64),
        Row::new("e4").with("name", "Dave").with("department", "Engineering").with("salary", 69_000_i64),
        Row::new("e5").with("name", "Erin").with("department", "HR").with("salary", 51_000_i64),
    ];

    let mut view = ListView::with_state(columns, LocalSource::new(rows), ListViewState::new(2));
    view.refresh();

    println!("1. First page, unsorted:");
    print_page(&view);

    println!("2. Sorted by salary ascending:");
    view.sort_by("salary");
    print_page(&view);

    println!("3. Next page:");
    view.next_page();
    print_page(&view);

    println!("4. Select all visible, then filter to Sales:");
    view.select_all_visible();
    print_page(&view);
    view.set_filter("department", Some("Sales"));
    println!("   (selection cleared: {})", view.selection().is_empty());
    print_page(&view);

    println!("5. Search for 'bo':");
    view.set_filter("department", None);
    view.set_search("bo");
    print_page(&view);
}
