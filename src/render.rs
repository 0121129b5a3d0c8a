/// Terminal renderer for a list view.
///
/// Pure presentation composition: a header row with sort indicators and
/// the select-all checkbox, body rows with per-row checkboxes and cells
/// rendered through the column model, and a footer with the page-size
/// selector, previous/next affordances, and the "showing X-Y of Z"
/// summary. Sticky columns stay pinned at the left while the remaining
/// columns scroll horizontally via a column offset.
///
/// While Loading the table dims and the footer announces it; a failed
/// fetch renders a non-blocking error line above the footer while the
/// previous rows stay visible.

use crate::columns::ColumnModel;
use crate::controller::{ListView, LoadPhase};
use crate::row::Row;
use crate::selection::SelectionTracker;
use crate::source::DataSource;
use crate::state::{ListViewState, PAGE_SIZE_OPTIONS};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Paragraph, Row as TableRow, Table, Widget};

const SORT_ASC: &str = "\u{25b2}"; // ▲
const SORT_DESC: &str = "\u{25bc}"; // ▼
const CHECKBOX_WIDTH: u16 = 3;

/// Transient widget view over a list view's current state. Build one per
/// frame with `ListView::as_widget`.
pub struct ListViewWidget<'a> {
    columns: &'a ColumnModel,
    rows: &'a [Row],
    state: &'a ListViewState,
    selection: &'a SelectionTracker,
    phase: LoadPhase,
    total_count: usize,
    error: Option<&'a str>,
    column_offset: usize,
    block: Option<Block<'a>>,
}

impl<'a> ListViewWidget<'a> {
    pub fn new(
        columns: &'a ColumnModel,
        rows: &'a [Row],
        state: &'a ListViewState,
        selection: &'a SelectionTracker,
    ) -> Self {
        ListViewWidget {
            columns,
            rows,
            state,
            selection,
            phase: LoadPhase::Loaded,
            total_count: rows.len(),
            error: None,
            column_offset: 0,
            block: None,
        }
    }

    pub fn phase(mut self, phase: LoadPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn total_count(mut self, total: usize) -> Self {
        self.total_count = total;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Number of non-sticky columns scrolled off the left edge. Sticky
    /// columns are unaffected.
    pub fn column_offset(mut self, offset: usize) -> Self {
        self.column_offset = offset;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Columns visible at the current horizontal offset: every sticky
    /// column first, then the non-sticky ones past the offset.
    fn visible_columns(&self) -> Vec<&'a crate::columns::ColumnDescriptor> {
        let scroll_count = self.columns.scrolling().count();
        let offset = self.column_offset.min(scroll_count);
        self.columns
            .pinned()
            .chain(self.columns.scrolling().skip(offset))
            .collect()
    }

    fn header_row(&self, visible: &[&crate::columns::ColumnDescriptor]) -> TableRow<'static> {
        let select_all = if self.selection.all_visible_selected(self.rows) {
            "[x]"
        } else {
            "[ ]"
        };

        let mut cells = vec![Cell::from(select_all.to_string())];
        for column in visible {
            let mut label = column.header().to_string();
            if self.state.sort_column() == Some(column.key()) {
                if let Some(direction) = self.state.sort_direction() {
                    label.push(' ');
                    label.push_str(match direction {
                        crate::state::SortDirection::Asc => SORT_ASC,
                        crate::state::SortDirection::Desc => SORT_DESC,
                    });
                }
            }
            cells.push(Cell::from(label));
        }
        TableRow::new(cells).style(Style::default().add_modifier(Modifier::BOLD))
    }

    fn body_rows(&self, visible: &[&crate::columns::ColumnDescriptor]) -> Vec<TableRow<'static>> {
        self.rows
            .iter()
            .map(|row| {
                let selected = self.selection.is_selected(row.id());
                let checkbox = if selected { "[x]" } else { "[ ]" };
                let mut cells = vec![Cell::from(checkbox.to_string())];
                for column in visible {
                    cells.push(Cell::from(column.render_cell(row)));
                }
                let style = if selected {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                TableRow::new(cells).style(style)
            })
            .collect()
    }

    fn footer_line(&self) -> Line<'static> {
        let dim = Style::default().add_modifier(Modifier::DIM);

        let summary = match self.state.item_range(self.total_count) {
            Some((start, end)) => format!("Showing {}-{} of {}", start, end, self.total_count),
            None => "No records".to_string(),
        };

        let page = self.state.page();
        let pages = self.state.total_pages(self.total_count).max(1);
        let at_first = page <= 1 || self.phase == LoadPhase::Loading;
        let at_last = page >= pages || self.phase == LoadPhase::Loading;

        let mut spans = vec![
            Span::raw(summary),
            Span::raw("  "),
            Span::styled("<", if at_first { dim } else { Style::default() }),
            Span::raw(format!(" Page {}/{} ", page, pages)),
            Span::styled(">", if at_last { dim } else { Style::default() }),
            Span::raw("  Per page:"),
        ];
        for option in PAGE_SIZE_OPTIONS {
            if option == self.state.page_size() {
                spans.push(Span::styled(
                    format!(" [{}]", option),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(format!(" {}", option), dim));
            }
        }
        if self.phase == LoadPhase::Loading {
            spans.push(Span::styled("  Loading...", dim));
        }
        Line::from(spans)
    }
}

impl Widget for ListViewWidget<'_> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let area = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if area.height == 0 || area.width == 0 {
            return;
        }

        let error_height = if self.error.is_some() { 1 } else { 0 };
        let [table_area, error_area, footer_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(error_height),
            Constraint::Length(1),
        ])
        .areas(area);

        let visible = self.visible_columns();

        let mut widths = vec![Constraint::Length(CHECKBOX_WIDTH)];
        widths.extend(
            visible
                .iter()
                .map(|c| Constraint::Length(c.effective_width())),
        );

        let style = if self.phase == LoadPhase::Loading {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };

        let table = Table::new(self.body_rows(&visible), widths)
            .header(self.header_row(&visible))
            .style(style);
        Widget::render(table, table_area, buf);

        if let Some(message) = self.error {
            let line = Line::from(Span::styled(
                format!("error: {} (showing previous results)", message),
                Style::default().fg(Color::Red),
            ));
            Paragraph::new(line).render(error_area, buf);
        }

        Paragraph::new(self.footer_line()).render(footer_area, buf);
    }
}

impl<S: DataSource> ListView<S> {
    /// Widget view over the current page, phase, and selection.
    pub fn as_widget(&self) -> ListViewWidget<'_> {
        ListViewWidget::new(self.columns(), self.rows(), self.state(), self.selection())
            .phase(self.phase())
            .total_count(self.total_count())
            .error(self.last_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnDescriptor;
    use crate::source::{LocalSource, SourceError};

    fn rendered(widget: ListViewWidget, width: u16, height: u16) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        Widget::render(widget, Rect::new(0, 0, width, height), &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample_view() -> ListView<LocalSource> {
        let columns = ColumnModel::new(vec![
            ColumnDescriptor::new("name", "Name").sortable().width(10),
            ColumnDescriptor::new("age", "Age").sortable().width(6),
        ]);
        let source = LocalSource::new(vec![
            Row::new("1").with("name", "Alice").with("age", 35_i64),
            Row::new("2").with("name", "Bob").with("age", 28_i64),
        ]);
        let mut view = ListView::new(columns, source);
        view.refresh();
        view
    }

    #[test]
    fn test_renders_header_body_footer() {
        let view = sample_view();
        let text = rendered(view.as_widget(), 60, 8);
        assert!(text.contains("Name"));
        assert!(text.contains("Alice"));
        assert!(text.contains("Bob"));
        assert!(text.contains("Showing 1-2 of 2"));
        assert!(text.contains("Page 1/1"));
        assert!(text.contains("[20]"));
    }

    #[test]
    fn test_sort_indicator_in_header() {
        let mut view = sample_view();
        view.sort_by("age");
        let text = rendered(view.as_widget(), 60, 8);
        assert!(text.contains(&format!("Age {}", SORT_ASC)));
        view.sort_by("age");
        let text = rendered(view.as_widget(), 60, 8);
        assert!(text.contains(&format!("Age {}", SORT_DESC)));
    }

    #[test]
    fn test_selection_checkboxes() {
        let mut view = sample_view();
        view.toggle_row("1");
        let text = rendered(view.as_widget(), 60, 8);
        let checked: Vec<&str> = text.matches("[x]").collect();
        assert_eq!(checked.len(), 1);

        view.select_all_visible();
        let text = rendered(view.as_widget(), 60, 8);
        // both rows plus the header select-all
        let checked: Vec<&str> = text.matches("[x]").collect();
        assert_eq!(checked.len(), 3);
    }

    #[test]
    fn test_error_line_keeps_previous_rows() {
        let mut view = sample_view();
        let (seq, _) = view.begin_request();
        view.apply_result(seq, Err(SourceError::Transport("offline".to_string())));
        let text = rendered(view.as_widget(), 60, 8);
        assert!(text.contains("error: transport failure: offline"));
        assert!(text.contains("Alice"));
    }

    #[test]
    fn test_sticky_columns_survive_offset() {
        let columns = ColumnModel::new(vec![
            ColumnDescriptor::new("id", "ID").sticky().width(4),
            ColumnDescriptor::new("a", "Alpha").width(8),
            ColumnDescriptor::new("b", "Beta").width(8),
        ]);
        let source = LocalSource::new(vec![Row::new("1")
            .with("id", "r1")
            .with("a", "aval")
            .with("b", "bval")]);
        let mut view = ListView::new(columns, source);
        view.refresh();

        let text = rendered(view.as_widget().column_offset(1), 60, 6);
        assert!(text.contains("ID"));
        assert!(!text.contains("Alpha"));
        assert!(text.contains("Beta"));
    }

    #[test]
    fn test_empty_dataset_footer() {
        let mut view = ListView::new(
            ColumnModel::new(vec![ColumnDescriptor::new("name", "Name")]),
            LocalSource::new(Vec::new()),
        );
        view.refresh();
        let text = rendered(view.as_widget(), 60, 6);
        assert!(text.contains("No records"));
        assert!(text.contains("Page 1/1"));
    }
}
