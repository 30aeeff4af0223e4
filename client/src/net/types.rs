//! Wire DTOs for the `/api/auth` endpoints.
//!
//! DESIGN
//! ======
//! Field names mirror the server's JSON exactly. Responses convert into the
//! client-side `User` record at the `api` boundary so pages never see DTOs.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::auth::User;

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Ask for a persistent session cookie.
    pub remember: bool,
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/password-reset/request`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Body of `POST /api/auth/password-reset/confirm`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordResetConfirm {
    pub token: String,
    pub password: String,
}

/// A user as returned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_validated: bool,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self { id: Some(dto.id), name: Some(dto.name), email: Some(dto.email) }
    }
}

/// Successful login or registration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub user: UserDto,
    pub token: String,
}

/// Error body: `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub error: String,
}
