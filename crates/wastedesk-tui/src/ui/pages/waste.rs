use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::styles;

use super::{detail_line, render_placeholder};

/// Render the Waste items page - item table with a detail panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_item_table(frame, app, chunks[0]);
    render_item_detail(frame, app, chunks[1]);
}

fn render_item_table(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::Content);
    let items = app.waste_items.items();
    let pending = items.iter().filter(|i| i.is_actionable()).count();
    let title = format!(" Waste items ({}, {} pending) ", items.len(), pending);

    if items.is_empty() {
        let text = "No waste items registered. Press [a] to add one.";
        render_placeholder(frame, title, text, focused, area);
        return;
    }

    let header = Row::new([Cell::from("Name"), Cell::from("Address"), Cell::from("Status")])
        .style(styles::header_style())
        .height(1);

    let rows: Vec<Row> = items.iter().enumerate().map(|(i, item)| {
        let style = if i == app.waste_selection {
            styles::selected_style()
        } else {
            styles::collected_style(item.collected)
        };

        Row::new(vec![
            Cell::from(item.name.clone()),
            Cell::from(item.address.clone()),
            Cell::from(item.status()),
        ]).style(style)
    }).collect();

    let widths = [Constraint::Fill(2), Constraint::Fill(3), Constraint::Length(10)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.waste_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_item_detail(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(item) = app.selected_waste_item() {
        lines.push(detail_line("Name", item.name.clone()));
        lines.push(detail_line("Address", item.address.clone()));
        lines.push(detail_line("Status", item.status().to_string()));
        lines.push(detail_line("ID", item.id.clone()));
        lines.push(ratatui::text::Line::from(""));
        if item.is_actionable() {
            lines.push(ratatui::text::Line::styled(
                "[c] mark collected  [d] remove",
                styles::muted_style(),
            ));
        }
    }

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
