//! Account workflows: registration, password login, email validation, and
//! password reset.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route handlers in `routes::auth` call into this module and translate
//! [`AuthError`] into HTTP responses. Tokens come from `services::jwt`, mail
//! goes out through the injected `services::email::Mailer`.
//!
//! ERROR HANDLING
//! ==============
//! Unknown email and wrong password produce the same
//! [`AuthError::InvalidCredentials`]. Password-reset requests succeed for
//! unknown addresses.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::email::{self, Mailer};
use super::jwt::{self, JwtAdapter, TokenPurpose};
use super::password::{self, PasswordError};
use crate::rate_limit::RateLimitError;
use crate::state::AppState;

pub const MIN_PASSWORD_LEN: usize = 6;

const UNIQUE_VIOLATION: &str = "23505";

/// Hash verified when a login email matches no account, so unknown emails
/// cost the same bcrypt work as wrong passwords.
static UNKNOWN_ACCOUNT_HASH: tokio::sync::OnceCell<String> = tokio::sync::OnceCell::const_new();

// =============================================================================
// TYPES
// =============================================================================

/// Row of the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub email_validated: bool,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub email_validated: bool,
}

impl From<&UserRecord> for UserDto {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            email_validated: record.email_validated,
        }
    }
}

/// A user together with a freshly issued session token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing name")]
    InvalidName,
    #[error("Email is not valid")]
    InvalidEmail,
    #[error("Missing password")]
    MissingPassword,
    #[error("Password must be at least 6 characters")]
    WeakPassword,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Too many login attempts, try again later")]
    RateLimited(#[from] RateLimitError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Token(#[from] jwt::JwtError),
    #[error(transparent)]
    Email(#[from] email::EmailError),
}

impl AuthError {
    /// Message safe to show to the end user.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Db(_) | Self::Password(_) | Self::Token(_) => "Internal server error".to_owned(),
            Self::Email(_) => "Could not send email, try again later".to_owned(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// INPUT NORMALIZATION
// =============================================================================

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || normalized.contains(char::is_whitespace) {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

fn check_password_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

/// Normalize and validate a sign-up payload.
///
/// # Errors
///
/// Returns the first invalid field.
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<RegisterUser, AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::InvalidName);
    }
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    check_password_strength(password)?;
    Ok(RegisterUser { name: name.to_owned(), email, password: password.to_owned() })
}

/// Normalize and validate a sign-in payload.
///
/// # Errors
///
/// Returns the first invalid field.
pub fn validate_login(email: &str, password: &str) -> Result<LoginUser, AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(LoginUser { email, password: password.to_owned() })
}

// =============================================================================
// WORKFLOWS
// =============================================================================

/// Create an account, send the validation link, and open a session.
///
/// # Errors
///
/// Fails on invalid input, a duplicate email, or a storage error. A failed
/// validation email is logged but does not undo the registration.
pub async fn register(state: &AppState, input: RegisterUser) -> Result<AuthenticatedUser, AuthError> {
    if find_user_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(AuthError::EmailTaken);
    }

    let password_hash = password::hash_password(input.password).await?;
    let record = sqlx::query_as::<_, UserRecord>(
        r"INSERT INTO users (name, email, password_hash)
          VALUES ($1, $2, $3)
          RETURNING id, name, email, password_hash, email_validated",
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&password_hash)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AuthError::EmailTaken
        } else {
            AuthError::Db(e)
        }
    })?;

    tracing::info!(user_id = %record.id, "user registered");

    if let Err(e) = send_validation_email(state.mailer.as_ref(), &state.jwt, &state.envs.webservice_url, &record).await
    {
        tracing::warn!(user_id = %record.id, error = %e, "validation email not sent");
    }

    open_session(&state.jwt, &record, state.envs.session_ttl)
}

/// Check credentials and open a session.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] for an unknown email or a wrong
/// password.
pub async fn login(state: &AppState, input: LoginUser) -> Result<AuthenticatedUser, AuthError> {
    let Some(record) = find_user_by_email(&state.pool, &input.email).await? else {
        let hash = unknown_account_hash().await?;
        password::verify_password(input.password, hash.to_owned()).await;
        return Err(AuthError::InvalidCredentials);
    };
    if !password::verify_password(input.password, record.password_hash.clone()).await {
        return Err(AuthError::InvalidCredentials);
    }
    tracing::info!(user_id = %record.id, "user logged in");
    open_session(&state.jwt, &record, state.envs.session_ttl)
}

async fn unknown_account_hash() -> Result<&'static str, PasswordError> {
    UNKNOWN_ACCOUNT_HASH
        .get_or_try_init(|| password::hash_password("unknown-account".to_owned()))
        .await
        .map(String::as_str)
}

/// Mark the account named by an email-validation token as validated.
///
/// # Errors
///
/// Returns [`AuthError::InvalidToken`] when the token is bad or the account
/// no longer matches it.
pub async fn validate_email(pool: &PgPool, jwt: &JwtAdapter, token: &str) -> Result<(), AuthError> {
    let claims = jwt
        .validate(token, TokenPurpose::EmailValidation)
        .ok_or(AuthError::InvalidToken)?;
    let result = sqlx::query(
        "UPDATE users SET email_validated = TRUE, updated_at = now() WHERE id = $1 AND email = $2",
    )
    .bind(claims.sub)
    .bind(&claims.email)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AuthError::InvalidToken);
    }
    tracing::info!(user_id = %claims.sub, "email validated");
    Ok(())
}

/// Email a password-reset link if the address belongs to an account.
///
/// # Errors
///
/// Fails on an invalid email, a storage error, or a delivery failure.
pub async fn request_password_reset(state: &AppState, email: &str) -> Result<(), AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    let Some(record) = find_user_by_email(&state.pool, &email).await? else {
        tracing::debug!("password reset requested for unknown email");
        return Ok(());
    };
    send_password_reset_email(state.mailer.as_ref(), &state.jwt, &state.envs.webservice_url, &record).await
}

/// Replace the password of the account named by a reset token.
///
/// # Errors
///
/// Fails on a bad token, a weak password, or a storage error.
pub async fn reset_password(pool: &PgPool, jwt: &JwtAdapter, token: &str, new_password: &str) -> Result<(), AuthError> {
    let claims = jwt
        .validate(token, TokenPurpose::PasswordReset)
        .ok_or(AuthError::InvalidToken)?;
    check_password_strength(new_password)?;
    let password_hash = password::hash_password(new_password.to_owned()).await?;
    let result = sqlx::query("UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2 AND email = $3")
        .bind(&password_hash)
        .bind(claims.sub)
        .bind(&claims.email)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AuthError::InvalidToken);
    }
    tracing::info!(user_id = %claims.sub, "password reset");
    Ok(())
}

/// Load a user by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRecord>, AuthError> {
    let record = sqlx::query_as::<_, UserRecord>(
        "SELECT id, name, email, password_hash, email_validated FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

// =============================================================================
// HELPERS
// =============================================================================

async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>, AuthError> {
    let record = sqlx::query_as::<_, UserRecord>(
        "SELECT id, name, email, password_hash, email_validated FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

fn open_session(jwt: &JwtAdapter, record: &UserRecord, ttl: std::time::Duration) -> Result<AuthenticatedUser, AuthError> {
    let token = jwt.generate(record.id, &record.email, TokenPurpose::Session, ttl)?;
    Ok(AuthenticatedUser { user: UserDto::from(record), token })
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

pub(crate) async fn send_validation_email(
    mailer: &dyn Mailer,
    jwt: &JwtAdapter,
    webservice_url: &str,
    record: &UserRecord,
) -> Result<(), AuthError> {
    let token = jwt.generate(record.id, &record.email, TokenPurpose::EmailValidation, jwt::EMAIL_VALIDATION_TTL)?;
    let link = email::validation_link(webservice_url, &token);
    mailer
        .send(email::validation_email(&record.email, &record.name, &link))
        .await?;
    Ok(())
}

pub(crate) async fn send_password_reset_email(
    mailer: &dyn Mailer,
    jwt: &JwtAdapter,
    webservice_url: &str,
    record: &UserRecord,
) -> Result<(), AuthError> {
    let token = jwt.generate(record.id, &record.email, TokenPurpose::PasswordReset, jwt::PASSWORD_RESET_TTL)?;
    let link = email::password_reset_link(webservice_url, &token);
    mailer
        .send(email::password_reset_email(&record.email, &record.name, &link))
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
