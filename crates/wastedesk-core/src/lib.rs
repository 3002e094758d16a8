//! Core library for wastedesk.
//!
//! Everything the dashboard does that is not drawing pixels lives here:
//!
//! - `api`: REST client for the waste-collection service and the `DashboardApi` seam
//! - `auth`: session state, persisted session entries, login/bootstrap/logout flows,
//!   and password recovery
//! - `resources`: list/create/update/delete controller shared by users and waste items
//! - `route`: pages, role-based landing and access rules, sidebar entries
//! - `notify`: transient success/error notifications
//! - `config`: application configuration and directory layout

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod notify;
pub mod resources;
pub mod route;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, ApiError, DashboardApi};
pub use auth::{AuthManager, LoginOutcome, PasswordRecovery, RecoveryStep, Session, SessionStatus, SessionStorage};
pub use config::Config;
pub use models::{NewUser, NewWasteItem, ProfileUpdate, Resource, Role, User, WasteItem, WasteItemUpdate};
pub use notify::{Level, Notification, Notifications};
pub use resources::{MutationOutcome, ResourceList};
pub use route::{nav_items, Route};
