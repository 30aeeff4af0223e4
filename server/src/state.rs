//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool, the loaded configuration, the token signer,
//! the outgoing mailer, and the login rate limiter.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Envs;
use crate::rate_limit::RateLimiter;
use crate::services::email::Mailer;
use crate::services::jwt::JwtAdapter;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub envs: Arc<Envs>,
    pub jwt: JwtAdapter,
    pub mailer: Arc<dyn Mailer>,
    pub login_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, envs: Envs, mailer: Arc<dyn Mailer>) -> Self {
        let jwt = JwtAdapter::new(&envs.jwt_seed);
        let login_limiter = RateLimiter::new(envs.login_limits);
        Self { pool, envs: Arc::new(envs), jwt, mailer, login_limiter }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
