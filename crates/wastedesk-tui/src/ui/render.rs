use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use wastedesk_core::{RecoveryStep, Route};

use crate::app::{App, AppState, Focus};
use crate::form::Form;

use super::pages::{profile, users, waste};
use super::styles;

/// Width of the sidebar column
const SIDEBAR_WIDTH: u16 = 26;

/// Width of the field value column in forms
const FIELD_WIDTH: usize = 28;

const LOGO: [&str; 3] = [
    "  ╦ ╦╔═╗╔═╗╔╦╗╔═╗╔╦╗╔═╗╔═╗╦╔═",
    "  ║║║╠═╣╚═╗ ║ ║╣  ║║║╣ ╚═╗╠╩╗",
    "  ╚╩╝╩ ╩╚═╝ ╩ ╚═╝═╩╝╚═╝╚═╝╩ ╩",
];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Sidebar + content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    render_sidebar(frame, app, body[0]);
    render_main_content(frame, app, body[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    match app.state {
        AppState::Booting => render_splash(frame),
        AppState::LoggingIn => render_login_overlay(frame, app),
        AppState::RecoveringPassword => render_recovery_overlay(frame, app),
        AppState::AddingItem => render_add_overlay(frame, app),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app),
        AppState::ConfirmingLogout => render_confirm_overlay(
            frame,
            "Sign out of this session?",
            "to sign out",
        ),
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_confirm_overlay(
            frame,
            "Are you sure you want to quit?",
            "to quit",
        ),
        AppState::Normal | AppState::EditingProfile | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("  wastedesk  ·  {}", app.route.title());
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title.clone(), styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.chars().count() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Sidebar && app.state == AppState::Normal;
    let mut lines = vec![Line::from("")];

    for (i, route) in app.nav_items().iter().enumerate() {
        let selected = *route == app.route;
        let cursor = if focused && i == app.nav_selection { "▶" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!(" {cursor} [{}] ", i + 1), styles::muted_style()),
            Span::styled(route.title(), styles::nav_style(selected)),
        ]));
    }

    if let Some(user) = app.user() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Signed in as", styles::muted_style())));
        lines.push(Line::from(Span::styled(
            format!(" {}", user.display_name()),
            styles::highlight_style(),
        )));
        lines.push(Line::from(Span::styled(format!(" {}", user.role), styles::muted_style())));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" [L] ", styles::help_key_style()),
            Span::styled("Sign out", styles::muted_style()),
        ]));
    }

    let block = Block::default()
        .title(" Menu ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Users => users::render(frame, app, area),
        Route::WasteItems => waste::render(frame, app, area),
        Route::Profile => profile::render(frame, app, area),
        Route::Login | Route::ForgotPassword => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border_style(false));
            frame.render_widget(block, area);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (left_text, left_style) = match app.notifications.current() {
        Some(n) => (
            format!(" {}: {} ", n.title, n.description),
            styles::notification_style(n.level),
        ),
        None => (String::new(), styles::muted_style()),
    };

    let shortcuts = match app.state {
        AppState::EditingProfile => "[Tab] next field | [Enter] save | [Esc] stop editing",
        _ => match app.route {
            Route::Users => "[a]dd | [d]elete | [r]efresh | [q]uit",
            Route::WasteItems => "[a]dd | [c]ollect | [d]elete | [r]efresh | [q]uit",
            Route::Profile => "[e]dit | [r]eload | [q]uit",
            Route::Login | Route::ForgotPassword => "[Tab] next field | [Enter] submit | [Esc] quit",
        },
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

/// Labeled field rows followed by the action buttons.
///
/// `active` is false when the form is shown read-only (profile page before editing).
pub fn form_lines(form: &Form, active: bool) -> Vec<Line<'static>> {
    let label_width = form
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = active && form.is_field_focused(i);
        let value_style = if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let cursor = if focused { "▌" } else { "" };

        let (shown, style) = if field.value.is_empty() && !focused {
            (field.placeholder.clone(), styles::muted_style())
        } else {
            (format!("{}{}", field.display(), cursor), value_style)
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:>width$}: [", field.label, width = label_width),
                styles::muted_style(),
            ),
            Span::styled(format!("{:<width$}", shown, width = FIELD_WIDTH), style),
            Span::styled("]", styles::muted_style()),
        ]));
    }

    lines.push(Line::from(""));
    let mut buttons = vec![Span::raw("  ")];
    for (i, action) in form.actions.iter().enumerate() {
        if active && form.is_action_focused(i) {
            buttons.push(Span::raw("["));
            buttons.push(Span::styled(format!(" ▶ {} ◀ ", action), styles::selected_style()));
            buttons.push(Span::raw("] "));
        } else {
            buttons.push(Span::raw("["));
            buttons.push(Span::styled(format!("   {}   ", action), styles::list_item_style()));
            buttons.push(Span::raw("] "));
        }
    }
    lines.push(Line::from(buttons));
    lines
}

fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|l| Line::from(Span::styled(*l, styles::title_style())))
        .collect()
}

fn render_overlay(frame: &mut Frame, title: &str, lines: Vec<Line>, width: u16) {
    let height = lines.len() as u16 + 2;
    let area = centered_rect_fixed(width, height, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_splash(frame: &mut Frame) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "        Restoring session...",
        styles::muted_style(),
    )));
    render_overlay(frame, "wastedesk", lines, 36);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.extend(form_lines(&app.login_form, true));
    render_overlay(frame, "Login", lines, 50);
}

fn render_recovery_overlay(frame: &mut Frame, app: &App) {
    let hint = match app.recovery.step() {
        RecoveryStep::RequestToken => "  Enter your email to receive a reset token.",
        RecoveryStep::EnterToken | RecoveryStep::Done => "  Enter the token you received and a new password.",
    };
    let mut lines = vec![
        Line::from(Span::styled(hint, styles::muted_style())),
        Line::from(""),
    ];
    lines.extend(form_lines(&app.recovery_form, true));
    render_overlay(frame, "Password recovery", lines, 56);
}

fn render_add_overlay(frame: &mut Frame, app: &App) {
    let title = match app.route {
        Route::Users => "New user",
        _ => "New waste item",
    };
    let mut lines = vec![Line::from("")];
    lines.extend(form_lines(&app.add_form, true));
    render_overlay(frame, title, lines, 50);
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let label = app.pending_delete_label().unwrap_or_default();
    render_confirm_overlay(frame, &format!("Remove {}?", label), "to remove");
}

fn render_confirm_overlay(frame: &mut Frame, question: &str, action: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", question), styles::highlight_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(format!(" {}, ", action), styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];
    let width = (question.chars().count() as u16 + 6).clamp(46, 72);
    render_overlay(frame, "Confirm", lines, width);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let version = env!("CARGO_PKG_VERSION");

    let mut lines = logo_lines();
    lines.push(Line::from(Span::styled(
        format!("              version {}", version),
        styles::muted_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Navigation", styles::highlight_style())));
    lines.push(help_line("1-3", "Switch page"));
    lines.push(help_line("Tab", "Switch focus (menu ↔ content)"));
    lines.push(help_line("↑/↓ j/k", "Move selection"));
    lines.push(help_line("Enter", "Open page / edit profile"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Actions", styles::highlight_style())));
    lines.push(help_line("a", "Add user or waste item"));
    lines.push(help_line("c", "Mark waste item collected"));
    lines.push(help_line("d", "Remove selected record"));
    lines.push(help_line("e", "Edit profile"));
    lines.push(help_line("r", "Reload page"));
    lines.push(help_line("L", "Sign out"));
    lines.push(help_line("q", "Quit"));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("       Press ", styles::muted_style()),
        Span::styled("?", styles::help_key_style()),
        Span::styled(" or ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    render_overlay(frame, "Help", lines, 52);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;

    #[test]
    fn test_centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let rect = centered_rect_fixed(50, 10, outer);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));

        let small = Rect::new(0, 0, 30, 5);
        let rect = centered_rect_fixed(50, 10, small);
        assert_eq!((rect.width, rect.height), (30, 5));
    }

    #[test]
    fn test_form_lines_masks_and_shows_placeholders() {
        let form = Form::new(
            vec![
                FormField::text("Name").with_placeholder("Ana"),
                FormField::password("Password").with_value("abc"),
            ],
            vec!["Save"],
        );
        let lines = form_lines(&form, false);
        // Two fields, a blank line, the button row
        assert_eq!(lines.len(), 4);

        let text = |line: &Line| line.spans.iter().map(|s| s.content.to_string()).collect::<String>();
        assert!(text(&lines[0]).contains("Ana"));
        assert!(text(&lines[1]).contains("***"));
        assert!(!text(&lines[1]).contains("abc"));
        assert!(text(&lines[3]).contains("Save"));
    }
}
