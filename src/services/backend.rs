// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking API client.
//!
//! Handles:
//! - User auth (login, registration, current user, make-admin)
//! - Event listing and creation
//! - Booking listing, creation and cancellation
//! - Mapping HTTP failures onto [`ClientError`] with the server's message
//!
//! The client holds no credential. Every authenticated call takes the
//! caller's [`Credential`] explicitly.

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::user::{LoginRequest, RegisterRequest};
use crate::models::{
    AuthResponse, Booking, Credential, Event, Identity, MakeAdminResponse, NewBooking, NewEvent,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Booking API client.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Users ───────────────────────────────────────────────────

    /// Resolve the identity behind a credential.
    pub async fn current_user(&self, credential: &Credential) -> Result<Identity> {
        self.send_json(self.request(Method::GET, "/api/users/me", Some(credential)))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest { email, password };
        self.send_json(
            self.request(Method::POST, "/api/users/login", None)
                .json(&body),
        )
        .await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let body = RegisterRequest {
            name,
            email,
            password,
        };
        self.send_json(
            self.request(Method::POST, "/api/users/register", None)
                .json(&body),
        )
        .await
    }

    /// Grant admin rights to the credential's owner.
    pub async fn make_admin(&self, credential: &Credential) -> Result<MakeAdminResponse> {
        self.send_json(
            self.request(Method::POST, "/api/users/make-admin", Some(credential))
                .json(&serde_json::json!({})),
        )
        .await
    }

    // ─── Events ──────────────────────────────────────────────────

    pub async fn list_events(&self, credential: &Credential) -> Result<Vec<Event>> {
        self.send_json(self.request(Method::GET, "/api/events", Some(credential)))
            .await
    }

    pub async fn get_event(&self, credential: &Credential, event_id: &str) -> Result<Event> {
        let path = format!("/api/events/{}", urlencoding::encode(event_id));
        self.send_json(self.request(Method::GET, &path, Some(credential)))
            .await
    }

    pub async fn create_event(&self, credential: &Credential, event: &NewEvent) -> Result<Event> {
        self.send_json(
            self.request(Method::POST, "/api/events", Some(credential))
                .json(event),
        )
        .await
    }

    // ─── Bookings ────────────────────────────────────────────────

    /// All bookings of the credential's owner, each embedding its event.
    pub async fn list_user_bookings(&self, credential: &Credential) -> Result<Vec<Booking>> {
        self.send_json(self.request(Method::GET, "/api/bookings/user", Some(credential)))
            .await
    }

    pub async fn create_booking(&self, credential: &Credential, event_id: &str) -> Result<Booking> {
        let body = NewBooking { event_id };
        self.send_json(
            self.request(Method::POST, "/api/bookings", Some(credential))
                .json(&body),
        )
        .await
    }

    pub async fn cancel_booking(&self, credential: &Credential, booking_id: &str) -> Result<()> {
        let path = format!("/api/bookings/{}", urlencoding::encode(booking_id));
        let response = self
            .request(Method::DELETE, &path, Some(credential))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        check_response(response).await?;
        Ok(())
    }

    // ─── Plumbing ────────────────────────────────────────────────

    /// Build a request, attaching the bearer credential when given.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> RequestBuilder {
        tracing::debug!(method = %method, path, authenticated = credential.is_some(), "API request");

        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match credential {
            Some(credential) => builder.bearer_auth(credential.expose()),
            None => builder,
        }
    }

    /// Send a request and parse the JSON body of a successful response.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let response = check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("JSON parse error: {}", e)))
    }
}

/// Error payload returned by the API.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extract the human-readable message from an error body.
fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Check response status and return an error if not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url_path = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);

    tracing::warn!(
        status = status.as_u16(),
        path = %url_path,
        message = message.as_deref().unwrap_or(""),
        "API request failed"
    );

    Err(classify(status, message))
}

fn classify(status: StatusCode, message: Option<String>) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        s if s.is_client_error() => ClientError::Validation(message),
        s => ClientError::Server {
            status: s.as_u16(),
            message,
        },
    }
}
