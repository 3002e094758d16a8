//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use wastedesk_core::Route;

use crate::app::{
    App, AppState, Focus, ADD_CANCEL_ACTION, ADD_SAVE_ACTION, FORGOT_ACTION, LOGIN_ACTION,
    PAGE_SCROLL_SIZE, RECOVERY_BACK_ACTION, RECOVERY_SUBMIT_ACTION,
};
use crate::form::Form;

/// What a key did to a form
enum FormKey {
    /// Enter pressed; carries the focused action, if any
    Submit(Option<usize>),
    Cancel,
    Handled,
}

/// Shared editing keys for every form
fn handle_form_key(form: &mut Form, key: KeyEvent) -> FormKey {
    match key.code {
        KeyCode::Esc => return FormKey::Cancel,
        KeyCode::Enter => return FormKey::Submit(form.focused_action()),
        KeyCode::Down | KeyCode::Tab => form.next(),
        KeyCode::Up | KeyCode::BackTab => form.prev(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
    FormKey::Handled
}

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::Booting => return Ok(false),
        AppState::LoggingIn => return handle_login_input(app, key).await,
        AppState::RecoveringPassword => {
            handle_recovery_input(app, key).await;
            return Ok(false);
        }
        AppState::AddingItem => {
            handle_add_input(app, key).await;
            return Ok(false);
        }
        AppState::EditingProfile => {
            handle_profile_input(app, key).await;
            return Ok(false);
        }
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.confirm_delete().await;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.cancel_delete();
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingLogout => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.logout(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::Quitting => return Ok(true),
        AppState::Normal => {}
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            app.navigate_to_index(index).await;
        }
        KeyCode::Char('r') => {
            app.refresh_current_page().await;
        }
        KeyCode::Char('L') => {
            app.start_logout();
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Sidebar => Focus::Content,
                Focus::Content => Focus::Sidebar,
            };
        }
        _ => match app.focus {
            Focus::Sidebar => handle_sidebar_input(app, key).await,
            Focus::Content => match app.route {
                Route::Users | Route::WasteItems => handle_list_input(app, key).await,
                Route::Profile => {
                    if matches!(key.code, KeyCode::Char('e') | KeyCode::Enter) {
                        app.start_profile_edit();
                    }
                }
                Route::Login | Route::ForgotPassword => {}
            },
        },
    }

    Ok(false)
}

async fn handle_sidebar_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_nav(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_nav(-1),
        KeyCode::Enter => {
            app.navigate_to_index(app.nav_selection).await;
        }
        KeyCode::Esc => app.focus = Focus::Content,
        _ => {}
    }
}

async fn handle_list_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Char('a') => app.start_add(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('c') => app.collect_selected().await,
        KeyCode::Esc => app.focus = Focus::Sidebar,
        _ => {}
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match handle_form_key(&mut app.login_form, key) {
        FormKey::Cancel => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        FormKey::Submit(Some(FORGOT_ACTION)) => app.start_recovery(),
        FormKey::Submit(Some(LOGIN_ACTION)) | FormKey::Submit(None) => {
            app.submit_login().await;
        }
        FormKey::Submit(Some(_)) | FormKey::Handled => {}
    }
    Ok(false)
}

async fn handle_recovery_input(app: &mut App, key: KeyEvent) {
    match handle_form_key(&mut app.recovery_form, key) {
        FormKey::Cancel | FormKey::Submit(Some(RECOVERY_BACK_ACTION)) => app.cancel_recovery(),
        FormKey::Submit(Some(RECOVERY_SUBMIT_ACTION)) | FormKey::Submit(None) => {
            app.submit_recovery().await;
        }
        FormKey::Submit(Some(_)) | FormKey::Handled => {}
    }
}

async fn handle_add_input(app: &mut App, key: KeyEvent) {
    match handle_form_key(&mut app.add_form, key) {
        FormKey::Cancel | FormKey::Submit(Some(ADD_CANCEL_ACTION)) => app.cancel_add(),
        FormKey::Submit(Some(ADD_SAVE_ACTION)) | FormKey::Submit(None) => {
            app.submit_add().await;
        }
        FormKey::Submit(Some(_)) | FormKey::Handled => {}
    }
}

async fn handle_profile_input(app: &mut App, key: KeyEvent) {
    match handle_form_key(&mut app.profile_form, key) {
        FormKey::Cancel => app.state = AppState::Normal,
        FormKey::Submit(_) => app.submit_profile().await,
        FormKey::Handled => {}
    }
}
