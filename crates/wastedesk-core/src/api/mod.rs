//! REST API client module for the waste-collection service.
//!
//! This module provides the `ApiClient` for talking to the service and the
//! `DashboardApi` trait that the auth and resource flows are written against.
//!
//! The service uses bearer token authentication. The token is obtained from
//! `POST /auth/login` and attached to every request once known.

pub mod client;
pub mod error;

use anyhow::Result;

use crate::models::{Credentials, LoginResponse, ResetPasswordRequest, Resource};

pub use client::ApiClient;
pub use error::ApiError;

/// Operations the dashboard performs against the service.
///
/// Every call is a single request/response round trip. Implementations must keep
/// the `Authorization` header in step with `set_token`.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    fn set_token(&mut self, token: Option<String>);

    fn token(&self) -> Option<&str>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    async fn forgot_password(&self, email: &str) -> Result<()>;

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()>;

    async fn list<R: Resource>(&self) -> Result<Vec<R>>;

    async fn fetch<R: Resource>(&self, id: &str) -> Result<R>;

    async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<()>;

    async fn update<R: Resource>(&self, id: &str, patch: &R::Patch) -> Result<()>;

    async fn delete<R: Resource>(&self, id: &str) -> Result<()>;
}
