//! Authentication module for managing the signed-in session.
//!
//! This module provides:
//! - `Session`: in-memory identity, token and loading flag
//! - `SessionStorage`: the two persisted session entries (identity and token)
//! - `AuthManager`: bootstrap, login, logout and profile flows
//! - `PasswordRecovery`: the two-step forgot/reset password flow
//!
//! The token entry expires after 7 days; the identity entry has no expiry.

pub mod manager;
pub mod recovery;
pub mod session;
pub mod storage;

pub use manager::{AuthManager, LoginOutcome, DEFAULT_BOOTSTRAP_DELAY};
pub use recovery::{PasswordRecovery, RecoveryStep};
pub use session::{Session, SessionStatus};
pub use storage::{PersistedSession, SessionStorage};
