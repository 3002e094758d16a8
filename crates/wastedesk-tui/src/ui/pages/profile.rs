use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};
use crate::ui::render::form_lines;
use crate::ui::styles;

/// Render the Profile page - current identity and the edit form
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.state == AppState::EditingProfile;
    let mut lines = vec![Line::from("")];

    if let Some(user) = app.user() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(user.display_name().to_string(), styles::highlight_style()),
            Span::styled(format!("  {}", user.role), styles::muted_style()),
        ]));
        lines.push(Line::from(""));
    }

    if app.profile_form.fields.is_empty() {
        lines.push(Line::from(Span::styled("  No profile loaded. Press [r] to refresh.", styles::muted_style())));
    } else {
        lines.extend(form_lines(&app.profile_form, editing));
        lines.push(Line::from(""));
        let hint = if editing {
            "  Blank fields keep their current value."
        } else {
            "  Press [e] or Enter to edit."
        };
        lines.push(Line::from(Span::styled(hint, styles::muted_style())));
    }

    let block = Block::default()
        .title(" My profile ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(editing));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
