//! REST API helpers for the auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as display-ready strings: the server's `error` body
//! when it sent one, else a status-derived message, else the transport
//! error. The auth store shows them as the sign-in error message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{LoginRequest, RegisterRequest};
#[cfg(feature = "hydrate")]
use super::types::{AuthResponse, PasswordResetConfirm, PasswordResetRequest, UserDto};
use crate::state::auth::User;

#[cfg(feature = "hydrate")]
const LOGIN_ENDPOINT: &str = "/api/auth/login";
#[cfg(feature = "hydrate")]
const REGISTER_ENDPOINT: &str = "/api/auth/register";
#[cfg(feature = "hydrate")]
const ME_ENDPOINT: &str = "/api/auth/me";
#[cfg(feature = "hydrate")]
const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
#[cfg(feature = "hydrate")]
const RESET_REQUEST_ENDPOINT: &str = "/api/auth/password-reset/request";
#[cfg(feature = "hydrate")]
const RESET_CONFIRM_ENDPOINT: &str = "/api/auth/password-reset/confirm";

#[cfg(not(feature = "hydrate"))]
const NOT_AVAILABLE: &str = "not available on server";

#[cfg(any(test, feature = "hydrate"))]
fn status_failure_message(status: u16) -> String {
    match status {
        401 => "Invalid credentials".to_owned(),
        429 => "Too many attempts, try again later".to_owned(),
        500..=599 => format!("Server error ({status}), try again later"),
        _ => format!("request failed: {status}"),
    }
}

/// Message for a non-OK response: the server's `error` field if present.
#[cfg(any(test, feature = "hydrate"))]
fn error_message_for(status: u16, body: &str) -> String {
    serde_json::from_str::<super::types::ApiError>(body)
        .ok()
        .map(|e| e.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| status_failure_message(status))
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_error_message(err: impl std::fmt::Display) -> String {
    format!("network error: {err}")
}

/// POST `body` as JSON; non-OK responses become their error message.
#[cfg(feature = "hydrate")]
async fn post_json<B: serde::Serialize>(url: &str, body: &B) -> Result<gloo_net::http::Response, String> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(transport_error_message)?
        .send()
        .await
        .map_err(transport_error_message)?;
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    log::warn!("{url} failed: {status}");
    Err(error_message_for(status, &text))
}

/// Sign in via `POST /api/auth/login`. The server also sets the session cookie.
///
/// # Errors
///
/// Returns a display-ready message if the request fails or is rejected.
pub async fn login(request: LoginRequest) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = post_json(LOGIN_ENDPOINT, &request).await?;
        let body: AuthResponse = resp.json().await.map_err(transport_error_message)?;
        Ok(body.user.into())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Create an account via `POST /api/auth/register` and sign it in.
///
/// # Errors
///
/// Returns a display-ready message if the request fails or is rejected.
pub async fn register(request: RegisterRequest) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = post_json(REGISTER_ENDPOINT, &request).await?;
        let body: AuthResponse = resp.json().await.map_err(transport_error_message)?;
        Ok(body.user.into())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(ME_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<UserDto>().await.ok().map(User::from)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = gloo_net::http::Request::post(LOGOUT_ENDPOINT).send().await {
            log::warn!("logout request failed: {e}");
        }
    }
}

/// Ask for a password-reset email via `POST /api/auth/password-reset/request`.
///
/// # Errors
///
/// Returns a display-ready message if the request fails or is rejected.
pub async fn request_password_reset(email: String) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        post_json(RESET_REQUEST_ENDPOINT, &PasswordResetRequest { email }).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Set a new password from an emailed reset token via
/// `POST /api/auth/password-reset/confirm`.
///
/// # Errors
///
/// Returns a display-ready message if the request fails or the token is rejected.
pub async fn confirm_password_reset(token: String, password: String) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        post_json(RESET_CONFIRM_ENDPOINT, &PasswordResetConfirm { token, password }).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, password);
        Err(NOT_AVAILABLE.to_owned())
    }
}
