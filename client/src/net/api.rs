//! REST API helpers for the auth and profile endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call returns
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses are returned as [`ApiError::Status`] carrying the
//! server's `message` when it sent one. Nothing here retries or falls back.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{LoginResponse, RegisterResponse, RegistrationDetails, UserProfile};
#[cfg(feature = "hydrate")]
use super::types::{ApiMessage, ConfirmEmailRequest, LoginRequest, RegisterRequest, SendConfirmationRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request rejected: {status}")]
    Status { status: u16, message: Option<String> },
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Server-supplied message for a rejected request, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn profile_endpoint(base_url: &str, user_id: &str) -> String {
    endpoint(base_url, &format!("users/{user_id}/profile"))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(feature = "hydrate")]
async fn check_status(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let message = resp.json::<ApiMessage>().await.ok().and_then(|m| m.message);
    Err(ApiError::Status { status, message })
}

#[cfg(feature = "hydrate")]
async fn send(request: gloo_net::http::Request) -> Result<gloo_net::http::Response, ApiError> {
    let resp = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    check_status(resp).await
}

#[cfg(feature = "hydrate")]
fn with_json<T: serde::Serialize>(
    builder: gloo_net::http::RequestBuilder,
    body: &T,
) -> Result<gloo_net::http::Request, ApiError> {
    builder.json(body).map_err(|e| ApiError::Transport(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn decode<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Create an account via `POST /auth/register`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, non-2xx status or an
/// undecodable body.
pub async fn register(
    base_url: &str,
    email: &str,
    password: &str,
    details: &RegistrationDetails,
) -> Result<RegisterResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = RegisterRequest { email, password, details };
        let request = with_json(gloo_net::http::Request::post(&endpoint(base_url, "auth/register")), &body)?;
        decode(send(request).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base_url, email, password, details);
        Err(ApiError::Unavailable)
    }
}

/// Ask the API to deliver a confirmation email via `POST /auth/send-confirmation`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure or non-2xx status.
pub async fn send_confirmation(
    base_url: &str,
    email: &str,
    confirmation_token: &str,
    confirmation_url: &str,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = SendConfirmationRequest { email, confirmation_token, confirmation_url };
        let request = with_json(
            gloo_net::http::Request::post(&endpoint(base_url, "auth/send-confirmation")),
            &body,
        )?;
        send(request).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base_url, email, confirmation_token, confirmation_url);
        Err(ApiError::Unavailable)
    }
}

/// Confirm an email address via `POST /auth/confirm-email`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure or non-2xx status.
pub async fn confirm_email(base_url: &str, confirmation_token: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = ConfirmEmailRequest { confirmation_token };
        let request = with_json(gloo_net::http::Request::post(&endpoint(base_url, "auth/confirm-email")), &body)?;
        send(request).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base_url, confirmation_token);
        Err(ApiError::Unavailable)
    }
}

/// Exchange credentials for a token via `POST /auth/login`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, non-2xx status or an
/// undecodable body.
pub async fn login(base_url: &str, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = LoginRequest { email, password };
        let request = with_json(gloo_net::http::Request::post(&endpoint(base_url, "auth/login")), &body)?;
        decode(send(request).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base_url, email, password);
        Err(ApiError::Unavailable)
    }
}

/// Fetch a user's profile via `GET /users/{id}/profile`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, non-2xx status or an
/// undecodable body.
pub async fn fetch_profile(base_url: &str, user_id: &str, token: &str) -> Result<UserProfile, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::get(&profile_endpoint(base_url, user_id))
            .header("Authorization", &bearer(token))
            .header("Content-Type", "application/json")
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode(send(request).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base_url, user_id, token);
        Err(ApiError::Unavailable)
    }
}

/// Replace a user's profile via `PUT /users/{id}/profile`.
///
/// The body is the full merged profile; the response is the stored profile.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, non-2xx status or an
/// undecodable body.
pub async fn update_profile(
    base_url: &str,
    user_id: &str,
    token: &str,
    profile: &UserProfile,
) -> Result<UserProfile, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder =
            gloo_net::http::Request::put(&profile_endpoint(base_url, user_id)).header("Authorization", &bearer(token));
        let request = with_json(builder, profile)?;
        decode(send(request).await?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base_url, user_id, token, profile);
        Err(ApiError::Unavailable)
    }
}
