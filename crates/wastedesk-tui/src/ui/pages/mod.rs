//! Content pane for each dashboard page.

pub mod profile;
pub mod users;
pub mod waste;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::styles;

/// Shown in place of an empty table
pub(crate) fn render_placeholder(frame: &mut Frame, title: String, text: &str, focused: bool, area: Rect) {
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", text), styles::muted_style())),
    ])
    .block(block);
    frame.render_widget(paragraph, area);
}

/// `Label: value` detail row
pub(crate) fn detail_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<9}", label), styles::highlight_style()),
        Span::raw(value),
    ])
}
