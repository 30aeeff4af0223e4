//! Typed deployment configuration loaded from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` through `dotenvy`, then calls [`Envs::from_env`] once
//! before touching the database or the mail provider. Any missing or malformed
//! required variable aborts startup.
//!
//! DESIGN
//! ======
//! Parsing goes through [`Envs::from_lookup`] with an injected lookup so tests
//! can build configurations without mutating the process environment.

use std::time::Duration;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_HOURS: u64 = 24;
const DEFAULT_LOGIN_RATE_LIMIT: usize = 5;
const DEFAULT_LOGIN_RATE_WINDOW_SECS: u64 = 300;
const DEFAULT_LOGIN_RATE_GLOBAL_LIMIT: usize = 1000;
const SECS_PER_HOUR: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("environment variable {var} must not be empty")]
    Empty { var: &'static str },
    #[error("environment variable {var} must be a port number (0-65535), got {value:?}")]
    InvalidPort { var: &'static str, value: String },
    #[error("environment variable {var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("unsupported MAILER_SERVICE {value:?} (expected 'resend' or 'log')")]
    UnsupportedMailer { value: String },
}

/// Postgres connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub url: String,
    pub user: String,
    pub db: String,
    pub port: u16,
    pub password: String,
    pub max_connections: u32,
}

/// Which backend delivers outgoing mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailerService {
    /// Deliver through the Resend HTTP API.
    Resend,
    /// Write messages to the log instead of sending them (local development).
    Log,
}

impl MailerService {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "resend" => Ok(Self::Resend),
            "log" => Ok(Self::Log),
            _ => Err(ConfigError::UnsupportedMailer { value: raw.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    pub service: MailerService,
    /// Sender address.
    pub email: String,
    /// Provider API key.
    pub secret_key: String,
}

/// Sliding-window limits applied to login attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginLimits {
    pub per_account: usize,
    pub global: usize,
    pub window: Duration,
}

impl Default for LoginLimits {
    fn default() -> Self {
        Self {
            per_account: DEFAULT_LOGIN_RATE_LIMIT,
            global: DEFAULT_LOGIN_RATE_GLOBAL_LIMIT,
            window: Duration::from_secs(DEFAULT_LOGIN_RATE_WINDOW_SECS),
        }
    }
}

/// Full server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envs {
    pub port: u16,
    pub postgres: PostgresConfig,
    pub jwt_seed: String,
    pub mailer: MailerConfig,
    /// Public base URL used to build links in outgoing mail. No trailing slash.
    pub webservice_url: String,
    pub session_ttl: Duration,
    pub login_limits: LoginLimits,
    pub cookie_secure: bool,
}

impl Envs {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed required variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = required_port(&lookup, "PORT")?;

        let postgres = PostgresConfig {
            url: required(&lookup, "POSTGRES_URL")?,
            user: required(&lookup, "POSTGRES_USER")?,
            db: required(&lookup, "POSTGRES_DB")?,
            port: required_port(&lookup, "POSTGRES_PORT")?,
            password: required(&lookup, "POSTGRES_PASSWORD")?,
            max_connections: optional_parse(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
        };

        let jwt_seed = required(&lookup, "JWT_SEED")?;

        let mailer = MailerConfig {
            service: MailerService::parse(&required(&lookup, "MAILER_SERVICE")?)?,
            email: required(&lookup, "MAILER_EMAIL")?,
            secret_key: required(&lookup, "MAILER_SECRET_KEY")?,
        };

        let webservice_url = required_url(&lookup, "WEBSERVICE_URL")?;

        let session_ttl = Duration::from_secs(
            optional_parse(&lookup, "SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS)
                .checked_mul(SECS_PER_HOUR)
                .unwrap_or(DEFAULT_SESSION_TTL_HOURS * SECS_PER_HOUR),
        );
        let login_limits = LoginLimits {
            per_account: optional_parse(&lookup, "LOGIN_RATE_LIMIT", DEFAULT_LOGIN_RATE_LIMIT),
            global: optional_parse(&lookup, "LOGIN_RATE_GLOBAL_LIMIT", DEFAULT_LOGIN_RATE_GLOBAL_LIMIT),
            window: Duration::from_secs(optional_parse(
                &lookup,
                "LOGIN_RATE_WINDOW_SECS",
                DEFAULT_LOGIN_RATE_WINDOW_SECS,
            )),
        };
        let cookie_secure = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or_else(|| webservice_url.starts_with("https://"));

        Ok(Self { port, postgres, jwt_seed, mailer, webservice_url, session_ttl, login_limits, cookie_secure })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var).ok_or(ConfigError::Missing { var })?;
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(value)
}

fn required_port<F>(lookup: &F, var: &'static str) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = required(lookup, var)?;
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort { var, value: raw })
}

fn required_url<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = required(lookup, var)?;
    let trimmed = raw.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(trimmed.trim_end_matches('/').to_owned()),
        _ => Err(ConfigError::InvalidUrl { var, value: raw }),
    }
}

fn optional_parse<F, T>(lookup: &F, var: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(var)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
