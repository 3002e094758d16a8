//! Application state management for wastedesk.
//!
//! This module contains the `App` struct that owns the API client, the auth
//! manager, both resource lists and every piece of UI state. Input handlers
//! call into it; the renderer only reads from it.

use anyhow::Result;
use tracing::{debug, info, warn};

use wastedesk_core::{
    nav_items, ApiClient, AuthManager, Config, MutationOutcome, NewUser, NewWasteItem, Notification,
    Notifications, PasswordRecovery, RecoveryStep, Resource, ResourceList, Route, SessionStorage, User, WasteItem,
    WasteItemUpdate,
};

use crate::form::{Form, FormField};

// ============================================================================
// Constants
// ============================================================================

/// Number of rows to move on page up/down
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Avatar URLs routinely outgrow the default field length
const MAX_AVATAR_URL_LENGTH: usize = 500;

// ============================================================================
// UI State Types
// ============================================================================

/// Current UI focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Booting,
    Normal,
    LoggingIn,
    RecoveringPassword,
    EditingProfile,
    AddingItem,
    ConfirmingDelete,
    ConfirmingLogout,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login overlay actions
pub const LOGIN_ACTION: usize = 0;
pub const FORGOT_ACTION: usize = 1;

/// Recovery overlay actions
pub const RECOVERY_SUBMIT_ACTION: usize = 0;
pub const RECOVERY_BACK_ACTION: usize = 1;

/// Add overlay actions
pub const ADD_SAVE_ACTION: usize = 0;
pub const ADD_CANCEL_ACTION: usize = 1;

pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub auth: AuthManager,

    pub state: AppState,
    pub route: Route,
    pub focus: Focus,
    pub nav_selection: usize,

    pub users: ResourceList<User>,
    pub waste_items: ResourceList<WasteItem>,
    pub users_selection: usize,
    pub waste_selection: usize,

    pub login_form: Form,
    pub recovery: PasswordRecovery,
    pub recovery_form: Form,
    pub add_form: Form,
    pub profile_form: Form,

    pub notifications: Notifications,
}

impl App {
    /// Create a new application instance from the loaded configuration
    pub fn new(config: Config) -> Result<Self> {
        let api_url = config.api_url();
        debug!(%api_url, "Config loaded");

        let api = ApiClient::new(api_url)?;
        let storage = SessionStorage::new(config.data_dir()?);
        let auth = AuthManager::new(storage).with_bootstrap_delay(config.bootstrap_delay());

        Ok(Self::from_parts(config, api, auth))
    }

    pub fn from_parts(config: Config, api: ApiClient, auth: AuthManager) -> Self {
        let login_email = config.login_email().unwrap_or_default();

        Self {
            config,
            api,
            auth,

            state: AppState::Booting,
            route: Route::Login,
            focus: Focus::Content,
            nav_selection: 0,

            users: ResourceList::new(),
            waste_items: ResourceList::new(),
            users_selection: 0,
            waste_selection: 0,

            login_form: login_form(&login_email),
            recovery: PasswordRecovery::new(),
            recovery_form: recovery_form(RecoveryStep::RequestToken, ""),
            add_form: Form::new(vec![], vec![]),
            profile_form: Form::new(vec![], vec![]),

            notifications: Notifications::new(),
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn notify_outcome(&mut self, outcome: MutationOutcome) {
        for notification in outcome.into_notifications() {
            self.notify(notification);
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.user()
    }

    /// Sidebar entries for the signed-in role
    pub fn nav_items(&self) -> Vec<Route> {
        nav_items(self.user().map(|u| &u.role))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Restore the persisted session, then land on the right page
    pub async fn bootstrap(&mut self) {
        self.state = AppState::Booting;
        self.auth.bootstrap(&mut self.api).await;
        let route = match self.user() {
            Some(user) => Route::landing_for(&user.role),
            None => Route::Login,
        };
        self.navigate(route).await;
    }

    /// Switch to a page without loading anything. Returns the page actually
    /// opened after the access rules are applied.
    pub fn open(&mut self, requested: Route) -> Route {
        let route = requested.guard(self.auth.session());
        if route != requested {
            debug!(?requested, ?route, "Navigation redirected");
        }
        self.route = route;

        match route {
            Route::Login => {
                self.state = AppState::LoggingIn;
                let focus = if self.login_form.value(0).is_empty() { 0 } else { 1 };
                self.login_form.set_focus(focus);
            }
            Route::ForgotPassword => {
                self.state = AppState::RecoveringPassword;
                let email = self.login_form.value(0).to_string();
                self.recovery = PasswordRecovery::new();
                self.recovery_form = recovery_form(RecoveryStep::RequestToken, &email);
            }
            _ => {
                self.state = AppState::Normal;
                self.focus = Focus::Content;
                if let Some(index) = self.nav_items().iter().position(|r| *r == route) {
                    self.nav_selection = index;
                }
            }
        }
        route
    }

    pub async fn navigate(&mut self, route: Route) {
        let route = self.open(route);
        self.load_page(route).await;
    }

    /// Open the n-th sidebar entry (0-based)
    pub async fn navigate_to_index(&mut self, index: usize) {
        if let Some(route) = self.nav_items().get(index).copied() {
            self.navigate(route).await;
        }
    }

    /// Fetch whatever the page shows
    pub async fn load_page(&mut self, route: Route) {
        match route {
            Route::Users => {
                if let Some(n) = self.users.refresh(&self.api).await {
                    self.notify(n);
                }
                self.users_selection = clamp_selection(self.users_selection, self.users.len());
            }
            Route::WasteItems => {
                if let Some(n) = self.waste_items.refresh(&self.api).await {
                    self.notify(n);
                }
                self.waste_selection = clamp_selection(self.waste_selection, self.waste_items.len());
            }
            Route::Profile => self.load_profile().await,
            Route::Login | Route::ForgotPassword => {}
        }
    }

    pub async fn refresh_current_page(&mut self) {
        self.load_page(self.route).await;
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub async fn submit_login(&mut self) {
        let email = self.login_form.value(0).trim().to_string();
        let password = self.login_form.value(1).to_string();

        let outcome = self.auth.login(&mut self.api, &email, &password).await;
        self.login_form.set_value(1, "");
        self.notify(outcome.notification.clone());

        if outcome.succeeded() {
            self.config.last_email = Some(email);
            if let Err(e) = self.config.save() {
                warn!(error = %e, "Failed to save config");
            }
        }
        self.navigate(outcome.route).await;
    }

    pub fn start_recovery(&mut self) {
        self.open(Route::ForgotPassword);
    }

    /// Run the current recovery step with what is typed in the overlay
    pub async fn submit_recovery(&mut self) {
        match self.recovery.step() {
            RecoveryStep::RequestToken => {
                self.recovery.email = self.recovery_form.value(0).to_string();
            }
            RecoveryStep::EnterToken => {
                self.recovery.token = self.recovery_form.value(0).to_string();
                self.recovery.new_password = self.recovery_form.value(1).to_string();
            }
            RecoveryStep::Done => {}
        }

        let before = self.recovery.step();
        let (route, notification) = self.recovery.submit(&self.api).await;
        self.notify(notification);

        if let Some(route) = route {
            self.login_form.set_value(0, self.recovery.email.clone());
            self.navigate(route).await;
        } else if self.recovery.step() != before || self.recovery.email.is_empty() {
            self.recovery_form = recovery_form(self.recovery.step(), &self.recovery.email);
        }
    }

    pub fn cancel_recovery(&mut self) {
        self.open(Route::Login);
    }

    pub fn start_logout(&mut self) {
        if self.auth.is_authenticated() {
            self.state = AppState::ConfirmingLogout;
        }
    }

    pub fn logout(&mut self) {
        let (route, notification) = self.auth.logout(&mut self.api);
        self.users.reset();
        self.waste_items.reset();
        self.users_selection = 0;
        self.waste_selection = 0;
        self.nav_selection = 0;
        self.profile_form = Form::new(vec![], vec![]);
        self.login_form.set_value(1, "");
        self.notifications.clear();
        self.notify(notification);
        self.open(route);
    }

    // =========================================================================
    // Resource actions
    // =========================================================================

    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.users_selection)
    }

    pub fn selected_waste_item(&self) -> Option<&WasteItem> {
        self.waste_items.get(self.waste_selection)
    }

    /// Open the add overlay for the current page
    pub fn start_add(&mut self) {
        let form = match self.route {
            Route::Users => new_user_form(),
            Route::WasteItems => new_waste_item_form(),
            _ => return,
        };
        self.add_form = form;
        self.state = AppState::AddingItem;
    }

    pub fn cancel_add(&mut self) {
        self.add_form.clear();
        self.state = AppState::Normal;
    }

    pub async fn submit_add(&mut self) {
        let outcome = match self.route {
            Route::Users => {
                let draft = NewUser {
                    name: self.add_form.value(0).trim().to_string(),
                    email: self.add_form.value(1).trim().to_string(),
                    phone: self.add_form.value(2).trim().to_string(),
                    password: self.add_form.value(3).to_string(),
                };
                self.users.create(&self.api, &draft).await
            }
            Route::WasteItems => {
                let draft = NewWasteItem {
                    name: self.add_form.value(0).trim().to_string(),
                    address: self.add_form.value(1).trim().to_string(),
                };
                self.waste_items.create(&self.api, &draft).await
            }
            _ => return,
        };

        // The record exists once the create succeeded, even if the re-fetch failed
        if outcome.succeeded() {
            self.add_form.clear();
            self.state = AppState::Normal;
        }
        self.notify_outcome(outcome);
    }

    /// First phase of a delete: ask for confirmation
    pub fn request_delete(&mut self) {
        let result = match self.route {
            Route::Users => match self.selected_user().cloned() {
                Some(target) => check_user_delete(self.user(), &target).map(|()| {
                    self.users.request_delete(target);
                }),
                None => return,
            },
            Route::WasteItems => match self.selected_waste_item().cloned() {
                Some(item) => check_waste_item_action(&item).map(|()| {
                    self.waste_items.request_delete(item);
                }),
                None => return,
            },
            _ => return,
        };

        match result {
            Ok(()) => self.state = AppState::ConfirmingDelete,
            Err(n) => self.notify(n),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.users.cancel_delete();
        self.waste_items.cancel_delete();
        self.state = AppState::Normal;
    }

    pub async fn confirm_delete(&mut self) {
        let outcome = match self.route {
            Route::Users => self.users.confirm_delete(&self.api).await,
            Route::WasteItems => self.waste_items.confirm_delete(&self.api).await,
            _ => None,
        };
        if let Some(outcome) = outcome {
            self.notify_outcome(outcome);
        }
        self.users_selection = clamp_selection(self.users_selection, self.users.len());
        self.waste_selection = clamp_selection(self.waste_selection, self.waste_items.len());
        self.state = AppState::Normal;
    }

    /// Label of the record waiting for delete confirmation
    pub fn pending_delete_label(&self) -> Option<String> {
        match self.route {
            Route::Users => self.users.pending_delete().map(delete_label),
            Route::WasteItems => self.waste_items.pending_delete().map(delete_label),
            _ => None,
        }
    }

    /// Mark the selected waste item collected
    pub async fn collect_selected(&mut self) {
        if self.route != Route::WasteItems {
            return;
        }
        let Some(item) = self.selected_waste_item().cloned() else {
            return;
        };
        if let Err(n) = check_waste_item_action(&item) {
            self.notify(n);
            return;
        }

        info!(item_id = %item.id, "Marking waste item collected");
        let outcome = self
            .waste_items
            .update(&self.api, &item.id, &WasteItemUpdate::collected(), "Waste item collected")
            .await;
        self.notify_outcome(outcome);
    }

    // =========================================================================
    // Profile
    // =========================================================================

    pub async fn load_profile(&mut self) {
        match self.auth.fetch_profile(&self.api).await {
            Ok(user) => self.profile_form = profile_form(&user),
            Err(n) => {
                if let Some(user) = self.auth.user() {
                    self.profile_form = profile_form(user);
                }
                self.notify(n);
            }
        }
    }

    pub fn start_profile_edit(&mut self) {
        if self.route == Route::Profile && !self.profile_form.fields.is_empty() {
            self.profile_form.set_focus(0);
            self.state = AppState::EditingProfile;
        }
    }

    pub async fn submit_profile(&mut self) {
        let notification = self
            .auth
            .update_profile(
                &self.api,
                self.profile_form.value(0),
                self.profile_form.value(1),
                self.profile_form.value(2),
                self.profile_form.value(3),
            )
            .await;

        if !notification.is_error() {
            if let Some(user) = self.auth.user() {
                self.profile_form = profile_form(user);
            }
            self.state = AppState::Normal;
        }
        self.notify(notification);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn current_list_len(&self) -> usize {
        match self.route {
            Route::Users => self.users.len(),
            Route::WasteItems => self.waste_items.len(),
            _ => 0,
        }
    }

    fn current_selection_mut(&mut self) -> Option<&mut usize> {
        match self.route {
            Route::Users => Some(&mut self.users_selection),
            Route::WasteItems => Some(&mut self.waste_selection),
            _ => None,
        }
    }

    /// Move the list cursor by `delta` rows, clamped to the list
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.current_list_len();
        if let Some(selection) = self.current_selection_mut() {
            let moved = selection.saturating_add_signed(delta);
            *selection = clamp_selection(moved, len);
        }
    }

    pub fn select_first(&mut self) {
        if let Some(selection) = self.current_selection_mut() {
            *selection = 0;
        }
    }

    pub fn select_last(&mut self) {
        let len = self.current_list_len();
        if let Some(selection) = self.current_selection_mut() {
            *selection = len.saturating_sub(1);
        }
    }

    pub fn move_nav(&mut self, delta: isize) {
        let len = self.nav_items().len();
        self.nav_selection = clamp_selection(self.nav_selection.saturating_add_signed(delta), len);
    }
}

// ============================================================================
// Forms
// ============================================================================

fn login_form(email: &str) -> Form {
    Form::new(
        vec![FormField::text("Email").with_value(email), FormField::password("Password")],
        vec!["Login", "Forgot password"],
    )
}

fn recovery_form(step: RecoveryStep, email: &str) -> Form {
    match step {
        RecoveryStep::RequestToken => Form::new(
            vec![FormField::text("Email").with_value(email)],
            vec!["Send token", "Back to login"],
        ),
        RecoveryStep::EnterToken | RecoveryStep::Done => Form::new(
            vec![FormField::text("Token"), FormField::password("New password")],
            vec!["Save password", "Back to login"],
        ),
    }
}

fn new_user_form() -> Form {
    Form::new(
        vec![
            FormField::text("Name"),
            FormField::text("Email"),
            FormField::text("Phone"),
            FormField::password("Password"),
        ],
        vec!["Save", "Cancel"],
    )
}

fn new_waste_item_form() -> Form {
    Form::new(
        vec![FormField::text("Name"), FormField::text("Address")],
        vec!["Save", "Cancel"],
    )
}

/// Blank inputs with the current values as placeholders; blank keeps current
fn profile_form(user: &User) -> Form {
    Form::new(
        vec![
            FormField::text("Name").with_placeholder(&user.name),
            FormField::text("Email").with_placeholder(&user.email),
            FormField::text("Phone").with_placeholder(user.phone_display()),
            FormField::text("Avatar URL")
                .with_placeholder(user.avatar.clone().unwrap_or_default())
                .with_max_length(MAX_AVATAR_URL_LENGTH),
        ],
        vec!["Save"],
    )
}

// ============================================================================
// Guards and helpers
// ============================================================================

/// Nobody may remove the account they are signed in with
pub fn check_user_delete(current: Option<&User>, target: &User) -> Result<(), Notification> {
    match current {
        Some(me) if me.id == target.id => Err(Notification::error(
            "Error",
            "You cannot remove your own account",
        )),
        _ => Ok(()),
    }
}

/// Collected items are final
pub fn check_waste_item_action(item: &WasteItem) -> Result<(), Notification> {
    if item.is_actionable() {
        Ok(())
    } else {
        Err(Notification::info("This waste item was already collected"))
    }
}

fn delete_label<R: Resource>(item: &R) -> String {
    format!("{} \"{}\"", R::SINGULAR, item.title())
}

fn clamp_selection(selection: usize, len: usize) -> usize {
    selection.min(len.saturating_sub(1))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wastedesk_core::Role;

    use super::*;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            phone: "11987654321".to_string(),
            role,
            avatar: None,
        }
    }

    fn item(id: &str, collected: bool) -> WasteItem {
        WasteItem {
            id: id.to_string(),
            name: "Glass bottles".to_string(),
            address: "Rua A, 10".to_string(),
            collected,
        }
    }

    fn app() -> (tempfile::TempDir, App) {
        app_at("http://127.0.0.1:9")
    }

    fn app_at(base_url: &str) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let api = ApiClient::new(base_url).unwrap();
        let auth = AuthManager::new(SessionStorage::new(dir.path().to_path_buf()))
            .with_bootstrap_delay(Duration::ZERO);
        (dir, App::from_parts(Config::default(), api, auth))
    }

    /// App with a persisted session restored through bootstrap (no request made)
    async fn signed_in(role: Role) -> (tempfile::TempDir, App) {
        signed_in_at("http://127.0.0.1:9", role).await
    }

    async fn signed_in_at(base_url: &str, role: Role) -> (tempfile::TempDir, App) {
        let (dir, mut app) = app_at(base_url);
        app.auth
            .storage()
            .persist(&user("1", role), "tok")
            .unwrap();
        app.auth.bootstrap(&mut app.api).await;
        (dir, app)
    }

    #[test]
    fn test_unauthenticated_pages_redirect_to_login() {
        let (_dir, mut app) = app();
        assert_eq!(app.open(Route::Users), Route::Login);
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.open(Route::Profile), Route::Login);
        assert!(app.nav_items().is_empty());
    }

    #[test]
    fn test_forgot_password_opens_recovery_with_login_email() {
        let (_dir, mut app) = app();
        app.login_form.set_value(0, "ana@example.com");
        app.start_recovery();
        assert_eq!(app.state, AppState::RecoveringPassword);
        assert_eq!(app.recovery_form.value(0), "ana@example.com");

        app.cancel_recovery();
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.route, Route::Login);
        // Email already filled: focus starts on the password
        assert!(app.login_form.is_field_focused(1));
    }

    #[tokio::test]
    async fn test_member_is_kept_off_users_page() {
        let (_dir, mut app) = signed_in(Role::Member("Collector".into())).await;
        assert_eq!(app.open(Route::Users), Route::WasteItems);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.nav_items(), vec![Route::WasteItems, Route::Profile]);
        assert_eq!(app.nav_selection, 0);
        assert_eq!(app.open(Route::Login), Route::WasteItems);
    }

    #[tokio::test]
    async fn test_admin_sidebar_tracks_page() {
        let (_dir, mut app) = signed_in(Role::Admin).await;
        app.open(Route::Profile);
        assert_eq!(app.nav_selection, 2);
        app.move_nav(-5);
        assert_eq!(app.nav_selection, 0);
        app.move_nav(10);
        assert_eq!(app.nav_selection, 2);
    }

    #[tokio::test]
    async fn test_logout_confirmation_and_reset() {
        let (_dir, mut app) = signed_in(Role::Admin).await;
        app.open(Route::Users);
        app.start_logout();
        assert_eq!(app.state, AppState::ConfirmingLogout);

        app.logout();
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.route, Route::Login);
        assert!(app.user().is_none());
        assert!(!app.auth.storage().load().unwrap().is_complete());
        assert_eq!(app.notifications.len(), 1);

        // Nothing to log out of now
        app.state = AppState::Normal;
        app.start_logout();
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_add_form_depends_on_page() {
        let (_dir, mut app) = signed_in(Role::Admin).await;
        app.open(Route::Users);
        app.start_add();
        assert_eq!(app.state, AppState::AddingItem);
        assert_eq!(app.add_form.fields.len(), 4);
        assert!(app.add_form.fields[3].masked);
        app.cancel_add();
        assert_eq!(app.state, AppState::Normal);

        app.open(Route::WasteItems);
        app.start_add();
        let labels: Vec<_> = app.add_form.fields.iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["Name", "Address"]);

        app.open(Route::Profile);
        app.state = AppState::Normal;
        app.start_add();
        assert_eq!(app.state, AppState::Normal);
    }

    /// Answer each connection with the next canned status, then close it
    async fn serve_statuses(statuses: Vec<&'static str>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            for status in statuses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while let Ok(n) = socket.read(&mut chunk).await {
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    let text = String::from_utf8_lossy(&request).into_owned();
                    if let Some(end) = text.find("\r\n\r\n") {
                        let length = text[..end]
                            .lines()
                            .filter_map(|line| line.split_once(':'))
                            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                            .unwrap_or(0);
                        if request.len() >= end + 4 + length {
                            break;
                        }
                    }
                }
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        base_url
    }

    #[tokio::test]
    async fn test_add_form_closes_when_create_succeeds_but_reload_fails() {
        let url = serve_statuses(vec!["201 Created", "500 Internal Server Error"]).await;
        let (_dir, mut app) = signed_in_at(&url, Role::Admin).await;
        app.open(Route::WasteItems);
        app.start_add();
        app.add_form.set_value(0, "Old batteries");
        app.add_form.set_value(1, "Av. Paulista, 1000");

        app.submit_add().await;

        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.add_form.value(0), "");
        assert_eq!(app.notifications.len(), 2);
        let current = app.notifications.current().unwrap();
        assert!(current.is_error());
        assert_eq!(current.description, "Could not load the waste item list");
    }

    #[tokio::test]
    async fn test_add_form_stays_open_when_create_fails() {
        let url = serve_statuses(vec!["400 Bad Request"]).await;
        let (_dir, mut app) = signed_in_at(&url, Role::Admin).await;
        app.open(Route::WasteItems);
        app.start_add();
        app.add_form.set_value(0, "Old batteries");

        app.submit_add().await;

        assert_eq!(app.state, AppState::AddingItem);
        assert_eq!(app.add_form.value(0), "Old batteries");
        assert_eq!(app.notifications.current().unwrap().description, "Could not create waste item");
    }

    #[test]
    fn test_cannot_delete_own_account() {
        let me = user("1", Role::Admin);
        assert!(check_user_delete(Some(&me), &me).unwrap_err().is_error());
        assert!(check_user_delete(Some(&me), &user("2", Role::default())).is_ok());
        assert!(check_user_delete(None, &me).is_ok());
    }

    #[test]
    fn test_collected_items_are_final() {
        assert!(check_waste_item_action(&item("1", false)).is_ok());
        assert!(check_waste_item_action(&item("1", true)).is_err());
    }

    #[test]
    fn test_delete_label() {
        assert_eq!(delete_label(&item("1", false)), "waste item \"Glass bottles\"");
    }

    #[test]
    fn test_profile_form_uses_placeholders() {
        let form = profile_form(&user("7", Role::Admin));
        assert!(form.fields.iter().all(|f| f.value.is_empty()));
        assert_eq!(form.fields[0].placeholder, "User 7");
        assert_eq!(form.fields[2].placeholder, "(11) 98765-4321");
    }

    #[test]
    fn test_profile_avatar_accepts_long_urls() {
        let mut form = profile_form(&user("7", Role::Admin));
        let url = format!("https://cdn.example.com/avatars/{}.png", "b".repeat(90));
        form.set_focus(3);
        for c in url.chars() {
            form.push_char(c);
        }
        assert_eq!(form.value(3), url);
    }

    #[test]
    fn test_recovery_form_per_step() {
        let form = recovery_form(RecoveryStep::RequestToken, "a@b.c");
        assert_eq!(form.fields.len(), 1);
        assert_eq!(form.value(0), "a@b.c");

        let form = recovery_form(RecoveryStep::EnterToken, "a@b.c");
        assert_eq!(form.fields.len(), 2);
        assert!(form.fields[1].masked);
    }

    #[test]
    fn test_clamp_selection() {
        assert_eq!(clamp_selection(5, 3), 2);
        assert_eq!(clamp_selection(1, 3), 1);
        assert_eq!(clamp_selection(4, 0), 0);
    }
}
