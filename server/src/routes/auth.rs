//! Auth routes: password login, registration, session cookie, email
//! validation, and password reset.

use axum::extract::{FromRef, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::config::Envs;
use crate::services::auth::{self as auth_svc, AuthError, UserDto, UserRecord};
use crate::services::jwt::TokenPurpose;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

// =============================================================================
// ERROR MAPPING
// =============================================================================

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidName
        | AuthError::InvalidEmail
        | AuthError::MissingPassword
        | AuthError::WeakPassword
        | AuthError::InvalidToken => StatusCode::BAD_REQUEST,
        AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::InvalidCredentials | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
        AuthError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        AuthError::Email(_) => StatusCode::BAD_GATEWAY,
        AuthError::Db(_) | AuthError::Password(_) | AuthError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = auth_error_to_status(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "auth request failed");
        } else {
            tracing::debug!(error = %self, %status, "auth request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.public_message() }))).into_response()
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Read the session token from the cookie, falling back to a bearer header.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(COOKIE_NAME).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_owned());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

/// Authenticated user extracted from the session token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: UserRecord,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AuthError::Unauthenticated)?;
        let app_state = AppState::from_ref(state);
        let claims = app_state
            .jwt
            .validate(&token, TokenPurpose::Session)
            .ok_or(AuthError::Unauthenticated)?;
        let user = auth_svc::find_user(&app_state.pool, claims.sub)
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        Ok(Self { user })
    }
}

// =============================================================================
// COOKIES
// =============================================================================

/// Session cookie. `remember` makes it persistent for the session lifetime;
/// otherwise it ends with the browser session.
pub(crate) fn session_cookie(token: &str, remember: bool, envs: &Envs) -> Cookie<'static> {
    let cookie = Cookie::build((COOKIE_NAME, token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(envs.cookie_secure);
    if remember {
        let secs = i64::try_from(envs.session_ttl.as_secs()).unwrap_or(i64::MAX);
        cookie.max_age(Duration::seconds(secs)).build()
    } else {
        cookie.build()
    }
}

fn cleared_session_cookie(envs: &Envs) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(envs.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    remember: bool,
}

/// `POST /api/auth/login`: check credentials, set the session cookie.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Result<Response, AuthError> {
    let input = auth_svc::validate_login(&body.email, &body.password)?;
    state.login_limiter.check_and_record(&input.email)?;

    let account = input.email.clone();
    let session = match auth_svc::login(&state, input).await {
        Ok(session) => session,
        Err(e) => {
            if matches!(e, AuthError::InvalidCredentials) {
                state.login_limiter.record_failure();
            }
            return Err(e);
        }
    };
    state.login_limiter.reset(&account);

    let jar = CookieJar::new().add(session_cookie(&session.token, body.remember, &state.envs));
    Ok((jar, Json(session)).into_response())
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// `POST /api/auth/register`: create an account and sign it in.
pub async fn register(State(state): State<AppState>, Json(body): Json<RegisterRequest>) -> Result<Response, AuthError> {
    let input = auth_svc::validate_registration(&body.name, &body.email, &body.password)?;
    let session = auth_svc::register(&state, input).await?;

    let jar = CookieJar::new().add(session_cookie(&session.token, false, &state.envs));
    Ok((StatusCode::CREATED, jar, Json(session)).into_response())
}

/// `POST /api/auth/logout`: clear the session cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let jar = CookieJar::new().add(cleared_session_cookie(&state.envs));
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`: return the current user.
pub async fn me(auth: AuthUser) -> Json<UserDto> {
    Json(UserDto::from(&auth.user))
}

/// `GET /api/auth/validate-email/{token}`: confirm an email address from the
/// emailed link, then send the browser to the sign-in page.
pub async fn validate_email(State(state): State<AppState>, Path(token): Path<String>) -> Result<Redirect, AuthError> {
    auth_svc::validate_email(&state.pool, &state.jwt, &token).await?;
    Ok(Redirect::to("/login"))
}

#[derive(Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default)]
    email: String,
}

/// `POST /api/auth/password-reset/request`: email a reset link.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<PasswordResetRequest>,
) -> Result<StatusCode, AuthError> {
    auth_svc::request_password_reset(&state, &body.email).await?;
    Ok(StatusCode::ACCEPTED)
}

#[derive(Deserialize)]
pub struct PasswordResetConfirm {
    #[serde(default)]
    token: String,
    #[serde(default)]
    password: String,
}

/// `POST /api/auth/password-reset/confirm`: set a new password from a reset token.
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(body): Json<PasswordResetConfirm>,
) -> Result<StatusCode, AuthError> {
    auth_svc::reset_password(&state.pool, &state.jwt, &body.token, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
