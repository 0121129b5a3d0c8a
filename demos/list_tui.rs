/// Interactive TUI Example
///
/// Browses a generated employee dataset with the terminal widget:
/// paging, sort cycling, debounced search, and row selection.
///
/// Keys: q quit, left/right page, +/- page size, s/d/e sort by
/// salary/department/name, a select-all, 1-9 toggle visible row,
/// / search (Esc or Enter to leave search).

use gridview::{ColumnDescriptor, ColumnModel, ListView, ListViewState, LocalSource, Row};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::widgets::Block;
use std::time::{Duration, Instant};

fn dataset() -> Vec<Row> {
    let departments = ["Sales", "Engineering", "HR", "Finance"];
    (1..=57)
        .map(|i| {
            Row::new(format!("e{}", i))
                .with("name", format!("Employee {:02}", i))
                .with("department", departments[i % departments.len()])
                .with("salary", (40_000 + (i as i64 * 1_337) % 50_000))
        })
        .collect()
}

fn columns() -> ColumnModel {
    ColumnModel::new(vec![
        ColumnDescriptor::new("name", "Name").sticky().sortable().width(14),
        ColumnDescriptor::new("department", "Department").sortable().width(14),
        ColumnDescriptor::new("salary", "Salary")
            .sortable()
            .width(10)
            .renderer(|value, _| match value.as_i64() {
                Some(v) => format!("${}", v),
                None => "n/a".to_string(),
            }),
    ])
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    let mut terminal = ratatui::init();
    let result = run(&mut terminal);
    ratatui::restore();
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal) -> std::io::Result<()> {
    let mut view = ListView::with_state(
        columns(),
        LocalSource::new(dataset()),
        ListViewState::new(10),
    );
    view.refresh();

    let mut searching = false;
    let mut search_buffer = String::new();

    loop {
        view.tick(Instant::now());

        let title = if searching {
            format!(" search: {}_ (Esc to close) ", search_buffer)
        } else {
            " employees | q quit  <-/-> page  +/- size  s/d/e sort  a all  1-9 toggle  / search "
                .to_string()
        };
        terminal.draw(|frame| {
            let block = Block::bordered().title(title.clone());
            frame.render_widget(view.as_widget().block(block), frame.area());
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => searching = false,
                KeyCode::Backspace => {
                    search_buffer.pop();
                    view.search_input(&search_buffer, Instant::now());
                }
                KeyCode::Char(c) => {
                    search_buffer.push(c);
                    view.search_input(&search_buffer, Instant::now());
                }
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Right => view.next_page(),
            KeyCode::Left => view.prev_page(),
            KeyCode::Char('+') => {
                let next = view.state().page_size().saturating_add(10).min(50);
                view.set_page_size(next);
            }
            KeyCode::Char('-') => {
                let next = view.state().page_size().saturating_sub(10).max(10);
                view.set_page_size(next);
            }
            KeyCode::Char('s') => view.sort_by("salary"),
            KeyCode::Char('d') => view.sort_by("department"),
            KeyCode::Char('e') => view.sort_by("name"),
            KeyCode::Char('a') => view.select_all_visible(),
            KeyCode::Char('/') => {
                searching = true;
                search_buffer = view.state().search_term().to_string();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                let id = view.rows().get(index).map(|r| r.id().to_string());
                if let Some(id) = id {
                    view.toggle_row(&id);
                }
            }
            _ => {}
        }
    }
}
