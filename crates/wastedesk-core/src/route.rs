//! Dashboard pages and the rules that decide who may see them.

use crate::auth::Session;
use crate::models::Role;

/// A page of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    ForgotPassword,
    Users,
    WasteItems,
    Profile,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::ForgotPassword => "Password recovery",
            Route::Users => "Users",
            Route::WasteItems => "Waste items",
            Route::Profile => "My profile",
        }
    }

    /// Where a freshly signed-in identity lands
    pub fn landing_for(role: &Role) -> Self {
        if role.is_admin() {
            Route::Users
        } else {
            Route::WasteItems
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::ForgotPassword)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Users)
    }

    /// Resolve a navigation request against the current session.
    ///
    /// Protected pages redirect to Login when nobody is signed in, admin pages
    /// redirect non-admins to their landing page, and the public pages send an
    /// already signed-in identity to its landing page.
    pub fn guard(self, session: &Session) -> Self {
        match session.user() {
            None if self.requires_auth() => Route::Login,
            None => self,
            Some(user) if self.requires_admin() && !user.is_admin() => Route::landing_for(&user.role),
            Some(user) if !self.requires_auth() => Route::landing_for(&user.role),
            Some(_) => self,
        }
    }
}

/// Sidebar entries visible to the given role, in display order.
pub fn nav_items(role: Option<&Role>) -> Vec<Route> {
    match role {
        Some(role) if role.is_admin() => vec![Route::Users, Route::WasteItems, Route::Profile],
        Some(_) => vec![Route::WasteItems, Route::Profile],
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{admin, member};

    #[test]
    fn test_landing_by_role() {
        assert_eq!(Route::landing_for(&Role::Admin), Route::Users);
        assert_eq!(Route::landing_for(&Role::Member("Collector".into())), Route::WasteItems);
        assert_eq!(Route::landing_for(&Role::default()), Route::WasteItems);
    }

    #[test]
    fn test_guard_without_session() {
        let session = Session::new();
        assert_eq!(Route::Users.guard(&session), Route::Login);
        assert_eq!(Route::WasteItems.guard(&session), Route::Login);
        assert_eq!(Route::Profile.guard(&session), Route::Login);
        assert_eq!(Route::Login.guard(&session), Route::Login);
        assert_eq!(Route::ForgotPassword.guard(&session), Route::ForgotPassword);
    }

    #[test]
    fn test_guard_for_member() {
        let mut session = Session::new();
        session.authenticate(member(), "tok".to_string());
        assert_eq!(Route::Users.guard(&session), Route::WasteItems);
        assert_eq!(Route::WasteItems.guard(&session), Route::WasteItems);
        assert_eq!(Route::Profile.guard(&session), Route::Profile);
        assert_eq!(Route::Login.guard(&session), Route::WasteItems);
    }

    #[test]
    fn test_guard_for_admin() {
        let mut session = Session::new();
        session.authenticate(admin(), "tok".to_string());
        assert_eq!(Route::Users.guard(&session), Route::Users);
        assert_eq!(Route::WasteItems.guard(&session), Route::WasteItems);
        assert_eq!(Route::ForgotPassword.guard(&session), Route::Users);
    }

    #[test]
    fn test_nav_items_hide_users_from_members() {
        assert_eq!(
            nav_items(Some(&Role::Admin)),
            vec![Route::Users, Route::WasteItems, Route::Profile]
        );
        assert_eq!(
            nav_items(Some(&Role::Member("Collector".into()))),
            vec![Route::WasteItems, Route::Profile]
        );
        assert!(nav_items(None).is_empty());
    }
}
