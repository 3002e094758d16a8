use tracing::{error, info};

use crate::api::DashboardApi;
use crate::models::ResetPasswordRequest;
use crate::notify::Notification;
use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    /// Waiting for the account email
    RequestToken,
    /// Token sent; waiting for token and new password
    EnterToken,
    Done,
}

/// Forgot-password flow: request a reset token by email, then submit it with a
/// new password.
#[derive(Debug, Clone)]
pub struct PasswordRecovery {
    pub email: String,
    pub token: String,
    pub new_password: String,
    step: RecoveryStep,
}

impl Default for PasswordRecovery {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordRecovery {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            token: String::new(),
            new_password: String::new(),
            step: RecoveryStep::RequestToken,
        }
    }

    pub fn step(&self) -> RecoveryStep {
        self.step
    }

    /// Both steps need the email
    pub fn can_submit(&self) -> bool {
        !self.email.trim().is_empty()
    }

    pub async fn send_token<A: DashboardApi>(&mut self, api: &A) -> Notification {
        let email = self.email.trim().to_string();
        match api.forgot_password(&email).await {
            Ok(()) => {
                info!("Password reset token requested");
                self.step = RecoveryStep::EnterToken;
                Notification::success("Token sent")
            }
            Err(e) => {
                error!(error = %e, "Password reset token request failed");
                self.step = RecoveryStep::RequestToken;
                self.email.clear();
                Notification::error("Error", "Could not send token")
            }
        }
    }

    /// Submit token and new password. On success the caller should go to Login.
    pub async fn reset<A: DashboardApi>(&mut self, api: &A) -> (Option<Route>, Notification) {
        let request = ResetPasswordRequest {
            email: self.email.trim().to_string(),
            token: self.token.trim().to_string(),
            password: self.new_password.clone(),
        };
        match api.reset_password(&request).await {
            Ok(()) => {
                info!("Password reset");
                self.step = RecoveryStep::Done;
                self.new_password.clear();
                (Some(Route::Login), Notification::success("New password saved"))
            }
            Err(e) => {
                error!(error = %e, "Password reset failed");
                (None, Notification::error("Error", "Could not save new password"))
            }
        }
    }

    /// Run whichever step is current
    pub async fn submit<A: DashboardApi>(&mut self, api: &A) -> (Option<Route>, Notification) {
        if !self.can_submit() {
            return (None, Notification::error("Error", "Email is required"));
        }
        match self.step {
            RecoveryStep::RequestToken => (None, self.send_token(api).await),
            RecoveryStep::EnterToken => self.reset(api).await,
            RecoveryStep::Done => (Some(Route::Login), Notification::info("Password already reset")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    #[tokio::test]
    async fn test_full_recovery() {
        let api = FakeApi::new();
        let mut recovery = PasswordRecovery::new();
        recovery.email = "ana@example.com".to_string();

        let (route, notification) = recovery.submit(&api).await;
        assert_eq!(route, None);
        assert_eq!(notification.description, "Token sent");
        assert_eq!(recovery.step(), RecoveryStep::EnterToken);

        recovery.token = "123456".to_string();
        recovery.new_password = "nova-senha".to_string();
        let (route, notification) = recovery.submit(&api).await;
        assert_eq!(route, Some(Route::Login));
        assert!(!notification.is_error());
        assert_eq!(recovery.step(), RecoveryStep::Done);
        assert!(recovery.new_password.is_empty());

        assert_eq!(
            api.calls(),
            vec![
                "POST auth/forgot ana@example.com".to_string(),
                "POST auth/reset ana@example.com 123456".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_token_request_clears_email() {
        let api = FakeApi::new();
        api.fail("POST auth/forgot");
        let mut recovery = PasswordRecovery::new();
        recovery.email = "ghost@example.com".to_string();

        let (_, notification) = recovery.submit(&api).await;
        assert!(notification.is_error());
        assert_eq!(recovery.step(), RecoveryStep::RequestToken);
        assert!(recovery.email.is_empty());
        assert!(!recovery.can_submit());
    }

    #[tokio::test]
    async fn test_failed_reset_stays_on_token_step() {
        let api = FakeApi::new();
        let mut recovery = PasswordRecovery::new();
        recovery.email = "ana@example.com".to_string();
        recovery.submit(&api).await;

        api.fail("POST auth/reset");
        recovery.token = "bad".to_string();
        let (route, notification) = recovery.submit(&api).await;
        assert_eq!(route, None);
        assert!(notification.is_error());
        assert_eq!(recovery.step(), RecoveryStep::EnterToken);
        assert_eq!(recovery.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_submit_without_email_makes_no_request() {
        let api = FakeApi::new();
        let mut recovery = PasswordRecovery::new();
        let (route, notification) = recovery.submit(&api).await;
        assert_eq!(route, None);
        assert!(notification.is_error());
        assert!(api.calls().is_empty());
    }
}
