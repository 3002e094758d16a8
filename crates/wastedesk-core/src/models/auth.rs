use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The only client-side check: both fields must be non-empty.
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// Body of a `POST /auth/login` response. The service answers 200 with a null
/// user when the credentials do not match, so both fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub token: String,
    pub password: String,
}
