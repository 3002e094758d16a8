//! Session bootstrap, login, logout and profile flows.
//!
//! Each flow performs at most one request, logs failures with `tracing`, and
//! reports the outcome to the caller as a [`Notification`].

use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{debug, error, info, warn};

use crate::api::DashboardApi;
use crate::models::{Credentials, ProfileUpdate, User};
use crate::notify::Notification;
use crate::route::Route;

use super::{Session, SessionStorage};

/// Fixed pause before persisted entries are evaluated on startup.
pub const DEFAULT_BOOTSTRAP_DELAY: Duration = Duration::from_millis(1200);

/// Result of a login attempt: where to go next and what to tell the user.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub route: Route,
    pub notification: Notification,
}

impl LoginOutcome {
    pub fn succeeded(&self) -> bool {
        !self.notification.is_error()
    }
}

pub struct AuthManager {
    session: Session,
    storage: SessionStorage,
    bootstrap_delay: Duration,
}

impl AuthManager {
    pub fn new(storage: SessionStorage) -> Self {
        Self {
            session: Session::new(),
            storage,
            bootstrap_delay: DEFAULT_BOOTSTRAP_DELAY,
        }
    }

    pub fn with_bootstrap_delay(mut self, delay: Duration) -> Self {
        self.bootstrap_delay = delay;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// Restore a previously persisted session.
    ///
    /// Waits the fixed bootstrap delay, then restores identity and token only when
    /// both entries are present. Unreadable storage or a corrupt identity entry is
    /// cleared and leaves the session signed out. Returns whether a session was
    /// restored.
    pub async fn bootstrap<A: DashboardApi>(&mut self, api: &mut A) -> bool {
        self.session.set_loading(true);

        let persisted = self.storage.load();

        tokio::time::sleep(self.bootstrap_delay).await;

        let restored = match persisted {
            Ok(persisted) => match (persisted.user, persisted.token) {
                (Some(user_json), Some(token)) => match serde_json::from_str::<User>(&user_json) {
                    Ok(user) => Some((user, token)),
                    Err(e) => {
                        warn!(error = %e, "Stored identity is corrupt, clearing session storage");
                        self.discard_storage();
                        None
                    }
                },
                (user, token) => {
                    debug!(has_user = user.is_some(), has_token = token.is_some(), "No complete persisted session");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Session storage unreadable, clearing it");
                self.discard_storage();
                None
            }
        };

        match restored {
            Some((user, token)) => {
                api.set_token(Some(token.clone()));
                info!(user_id = %user.id, "Session restored");
                self.session.authenticate(user, token);
                true
            }
            None => {
                self.session.clear();
                false
            }
        }
    }

    fn discard_storage(&self) {
        if let Err(e) = self.storage.clear() {
            error!(error = %e, "Failed to clear session storage");
        }
    }

    // =========================================================================
    // Login / Logout
    // =========================================================================

    /// Exchange credentials for an identity and token.
    pub async fn login<A: DashboardApi>(&mut self, api: &mut A, email: &str, password: &str) -> LoginOutcome {
        let credentials = Credentials::new(email.trim(), password);
        if !credentials.is_complete() {
            return LoginOutcome {
                route: Route::Login,
                notification: Notification::error("Login failed", "Email and password are required"),
            };
        }

        self.session.set_loading(true);

        match self.exchange(api, &credentials).await {
            Ok(user) => {
                let route = Route::landing_for(&user.role);
                info!(user_id = %user.id, role = %user.role, "Login successful");
                LoginOutcome {
                    route,
                    notification: Notification::success("Logged in"),
                }
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.reset(api);
                LoginOutcome {
                    route: Route::Login,
                    notification: Notification::error("Login failed", "Check your credentials"),
                }
            }
        }
    }

    async fn exchange<A: DashboardApi>(&mut self, api: &mut A, credentials: &Credentials) -> Result<User> {
        let response = api.login(credentials).await?;

        let user = response.user.ok_or_else(|| anyhow!("Login response carried no user"))?;
        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("Login response carried no token"))?;

        api.set_token(Some(token.clone()));
        self.storage.persist(&user, &token)?;
        self.session.authenticate(user.clone(), token);
        Ok(user)
    }

    /// Drop in-memory state, persisted entries and the auth header.
    fn reset<A: DashboardApi>(&mut self, api: &mut A) {
        self.session.clear();
        api.set_token(None);
        self.discard_storage();
    }

    pub fn logout<A: DashboardApi>(&mut self, api: &mut A) -> (Route, Notification) {
        if let Some(user) = self.session.user() {
            info!(user_id = %user.id, "Logging out");
        }
        self.reset(api);
        (Route::Login, Notification::success("You have been signed out"))
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Fetch the signed-in identity's current record from the service.
    pub async fn fetch_profile<A: DashboardApi>(&self, api: &A) -> Result<User, Notification> {
        let Some(id) = self.session.user().map(|u| u.id.clone()) else {
            return Err(Notification::error("Error", "Not signed in"));
        };

        api.fetch::<User>(&id).await.map_err(|e| {
            error!(error = %e, user_id = %id, "Failed to fetch profile");
            Notification::error("Error", "Could not load user data")
        })
    }

    /// Update profile fields; blank inputs keep the current values.
    pub async fn update_profile<A: DashboardApi>(
        &mut self,
        api: &A,
        name: &str,
        email: &str,
        phone: &str,
        avatar: &str,
    ) -> Notification {
        let Some(current) = self.session.user().cloned() else {
            return Notification::error("Error", "Not signed in");
        };

        let update = ProfileUpdate::merged(&current, name, email, phone, avatar);

        match api.update::<User>(&current.id, &update).await {
            Ok(()) => {
                if let Some(user) = self.session.user_mut() {
                    user.apply(&update);
                    if let Err(e) = self.storage.persist_user(user) {
                        warn!(error = %e, "Failed to persist updated identity");
                    }
                }
                info!(user_id = %current.id, "Profile updated");
                Notification::success("User updated")
            }
            Err(e) => {
                error!(error = %e, user_id = %current.id, "Profile update failed");
                Notification::error("Error", "Could not update user")
            }
        }
    }
}
