use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Absent,
    Loading,
    Authenticated,
}

/// Client-held authentication state.
///
/// Identity and token are always set and cleared together.
#[derive(Debug, Clone)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Cold-start session: nobody signed in, still loading persisted state
    pub fn new() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_authenticated() {
            SessionStatus::Authenticated
        } else if self.loading {
            SessionStatus::Loading
        } else {
            SessionStatus::Absent
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_mut(&mut self) -> Option<&mut User> {
        self.user.as_mut()
    }

    /// Get the bearer token if signed in
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn authenticate(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.loading = false;
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
        self.loading = false;
    }
}
