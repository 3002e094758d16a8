use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use wastedesk_core::utils::format::truncate_string;

use crate::app::{App, Focus};
use crate::ui::styles;

use super::{detail_line, render_placeholder};

/// Render the Users page - account table with a detail panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_user_table(frame, app, chunks[0]);
    render_user_detail(frame, app, chunks[1]);
}

fn render_user_table(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::Content);
    let title = format!(" Users ({}) ", app.users.len());

    if app.users.is_empty() {
        let text = "No users yet. Press [a] to add one.";
        render_placeholder(frame, title, text, focused, area);
        return;
    }

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Email"),
        Cell::from("Phone"),
        Cell::from("Role"),
    ])
    .style(styles::header_style())
    .height(1);

    let me = app.user().map(|u| u.id.as_str());
    let rows: Vec<Row> = app.users.items().iter().enumerate().map(|(i, user)| {
        let style = if i == app.users_selection {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };

        let mut name = truncate_string(user.display_name(), 28);
        if Some(user.id.as_str()) == me {
            name.push_str(" (you)");
        }

        Row::new(vec![
            Cell::from(name),
            Cell::from(user.email.clone()),
            Cell::from(user.phone_display()),
            Cell::from(user.role.to_string()),
        ]).style(style)
    }).collect();

    let widths = [
        Constraint::Percentage(30),
        Constraint::Fill(3),
        Constraint::Length(16),
        Constraint::Fill(1),
    ];

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
    state.select(Some(app.users_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_user_detail(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.selected_user() {
        Some(user) => vec![
            detail_line("Name", user.display_name().to_string()),
            detail_line("Email", user.email.clone()),
            detail_line("Phone", user.phone_display()),
            detail_line("Role", user.role.to_string()),
            detail_line("Avatar", user.avatar.clone().unwrap_or_else(|| "-".to_string())),
            detail_line("ID", user.id.clone()),
        ],
        None => vec![],
    };

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
