use std::fmt;

use serde::{Deserialize, Serialize};

use super::{deserialize_id, Resource};
use crate::utils::format::format_phone;

/// Role tag carried on every account.
///
/// Only `Admin` changes behavior (navigation and page access). Every other tag
/// the service sends is kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Member(String),
}

const ADMIN_TAG: &str = "Admin";

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Member(String::new())
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        if tag == ADMIN_TAG {
            Role::Admin
        } else {
            Role::Member(tag)
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => ADMIN_TAG.to_string(),
            Role::Member(tag) => tag,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "{}", ADMIN_TAG),
            Role::Member(tag) if tag.is_empty() => write!(f, "-"),
            Role::Member(tag) => write!(f, "{}", tag),
        }
    }
}

/// An account, and also the signed-in identity cached by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn phone_display(&self) -> String {
        if self.phone.is_empty() {
            "-".to_string()
        } else {
            format_phone(&self.phone)
        }
    }

    /// Apply a successful profile update to the cached copy.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.name = update.name.clone();
        self.email = update.email.clone();
        self.phone = update.phone.clone();
        self.avatar = update.avatar.clone();
    }
}

/// Payload for creating an account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Payload for `PUT /users/:id` from the profile editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Build an update from form input. A blank input keeps the current value.
    pub fn merged(current: &User, name: &str, email: &str, phone: &str, avatar: &str) -> Self {
        fn pick(input: &str, current: &str) -> String {
            let input = input.trim();
            if input.is_empty() {
                current.to_string()
            } else {
                input.to_string()
            }
        }

        let avatar = avatar.trim();
        Self {
            name: pick(name, &current.name),
            email: pick(email, &current.email),
            phone: pick(phone, &current.phone),
            avatar: if avatar.is_empty() {
                current.avatar.clone()
            } else {
                Some(avatar.to_string())
            },
        }
    }
}

impl Resource for User {
    type Draft = NewUser;
    type Patch = ProfileUpdate;

    const COLLECTION: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        self.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "7".to_string(),
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            phone: "11987654321".to_string(),
            role: Role::Member("Collector".to_string()),
            avatar: Some("https://img.example.com/ana.png".to_string()),
        }
    }

    #[test]
    fn test_role_from_tag() {
        assert_eq!(Role::from("Admin".to_string()), Role::Admin);
        assert_eq!(
            Role::from("Collector".to_string()),
            Role::Member("Collector".to_string())
        );
        // Tags are case sensitive, matching the service
        assert!(!Role::from("admin".to_string()).is_admin());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert_eq!(Role::Member("Collector".to_string()).to_string(), "Collector");
        assert_eq!(Role::default().to_string(), "-");
    }

    #[test]
    fn test_user_parses_numeric_and_string_ids() {
        let numeric: User =
            serde_json::from_str(r#"{"id": 12, "name": "A", "email": "a@x", "phone": "1", "role": "Admin"}"#)
                .unwrap();
        assert_eq!(numeric.id, "12");
        assert!(numeric.is_admin());

        let text: User = serde_json::from_str(r#"{"id": "64f1c0", "name": "B"}"#).unwrap();
        assert_eq!(text.id, "64f1c0");
        assert_eq!(text.email, "");
        assert_eq!(text.role, Role::default());
        assert!(text.avatar.is_none());
    }

    #[test]
    fn test_user_survives_persistence() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn test_profile_update_keeps_current_values_for_blank_input() {
        let user = sample_user();
        let update = ProfileUpdate::merged(&user, "", "new@example.com", "  ", "");
        assert_eq!(update.name, "Ana Souza");
        assert_eq!(update.email, "new@example.com");
        assert_eq!(update.phone, "11987654321");
        assert_eq!(update.avatar.as_deref(), Some("https://img.example.com/ana.png"));
    }

    #[test]
    fn test_profile_update_applies_to_cached_user() {
        let mut user = sample_user();
        let update = ProfileUpdate::merged(&user, "Ana S.", "", "", "https://img.example.com/new.png");
        user.apply(&update);
        assert_eq!(user.name, "Ana S.");
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.avatar.as_deref(), Some("https://img.example.com/new.png"));
        assert_eq!(user.role, Role::Member("Collector".to_string()));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = sample_user();
        user.name.clear();
        assert_eq!(user.display_name(), "ana@example.com");
    }
}
