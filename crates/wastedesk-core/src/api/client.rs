//! API client for communicating with the waste-collection REST API.
//!
//! This module provides the `ApiClient` struct, the reqwest-backed implementation
//! of [`DashboardApi`].

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{Credentials, ForgotPasswordRequest, LoginResponse, ResetPasswordRequest, Resource};

use super::{ApiError, DashboardApi};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const LOGIN_PATH: &str = "auth/login";
const FORGOT_PATH: &str = "auth/forgot";
const RESET_PATH: &str = "auth/reset";

/// API client for the waste-collection service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn item_url<R: Resource>(&self, id: &str) -> String {
        self.url(&format!("{}/{}", R::COLLECTION, id))
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .context("Token is not a valid header value")?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = url, "GET");
        let response = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn send_json<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        debug!(url = url, method = %method, "Sending JSON body");
        let response = self
            .client
            .request(method.clone(), url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {}", method, url))?;

        Self::check_response(response).await
    }
}

impl DashboardApi for ApiClient {
    /// Set or clear the bearer token for authenticated requests
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = self.url(LOGIN_PATH);
        let response = self
            .send_json(reqwest::Method::POST, &url, credentials)
            .await
            .context("Login request failed")?;

        response
            .json()
            .await
            .context("Failed to parse login response")
    }

    async fn forgot_password(&self, email: &str) -> Result<()> {
        let url = self.url(FORGOT_PATH);
        let body = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.send_json(reqwest::Method::POST, &url, &body).await?;
        Ok(())
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        let url = self.url(RESET_PATH);
        self.send_json(reqwest::Method::POST, &url, request).await?;
        Ok(())
    }

    async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        let url = self.url(R::COLLECTION);
        self.get(&url)
            .await
            .with_context(|| format!("Failed to fetch {} list", R::SINGULAR))
    }

    async fn fetch<R: Resource>(&self, id: &str) -> Result<R> {
        let url = self.item_url::<R>(id);
        self.get(&url)
            .await
            .with_context(|| format!("Failed to fetch {} {}", R::SINGULAR, id))
    }

    async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<()> {
        let url = self.url(R::COLLECTION);
        let response = self.send_json(reqwest::Method::POST, &url, draft).await?;

        // The service reports a stored record with 201 and nothing else
        if response.status() != StatusCode::CREATED {
            return Err(ApiError::InvalidResponse(format!(
                "expected 201 Created for new {}, got {}",
                R::SINGULAR,
                response.status()
            ))
            .into());
        }
        Ok(())
    }

    async fn update<R: Resource>(&self, id: &str, patch: &R::Patch) -> Result<()> {
        let url = self.item_url::<R>(id);
        self.send_json(reqwest::Method::PUT, &url, patch).await?;
        Ok(())
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        let url = self.item_url::<R>(id);
        debug!(url = %url, "DELETE");
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }
}
