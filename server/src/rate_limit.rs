//! In-memory rate limiting for login attempts.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`,
//! keyed by normalized email. Two limits are enforced:
//! - Per-account: `LOGIN_RATE_LIMIT` attempts per window, charged before the
//!   credentials are checked
//! - Global: `LOGIN_RATE_GLOBAL_LIMIT` failed logins per window, a fail-safe
//!   far above the per-account limit
//!
//! Only failures feed the global window, so successful logins never spend it.
//! A successful login clears the account's window. Accounts whose window has
//! emptied are dropped on the next check.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::LoginLimits;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("per-account login limit exceeded (max {limit} attempts/{window_secs}s)")]
    PerAccountExceeded { limit: usize, window_secs: u64 },
    #[error("global login limit exceeded (max {limit} attempts/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
    limits: LoginLimits,
}

struct RateLimiterInner {
    /// Per-account attempt timestamps.
    accounts: HashMap<String, VecDeque<Instant>>,
    /// Failed-login timestamps across all accounts.
    global: VecDeque<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(limits: LoginLimits) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimiterInner { accounts: HashMap::new(), global: VecDeque::new() })),
            limits,
        }
    }

    /// Check both limits, then record the attempt against the account.
    ///
    /// # Errors
    ///
    /// Returns which limit was exceeded; the attempt is not recorded.
    pub fn check_and_record(&self, account: &str) -> Result<(), RateLimitError> {
        self.check_and_record_at(account, Instant::now())
    }

    /// Internal: check + record with explicit timestamp (for testing).
    fn check_and_record_at(&self, account: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let limits = self.limits;

        prune_window(&mut inner.global, now, limits.window);
        inner.accounts.retain(|_, attempts| {
            prune_window(attempts, now, limits.window);
            !attempts.is_empty()
        });

        if inner.global.len() >= limits.global {
            return Err(RateLimitError::GlobalExceeded { limit: limits.global, window_secs: limits.window.as_secs() });
        }
        if inner.accounts.get(account).map_or(0, VecDeque::len) >= limits.per_account {
            return Err(RateLimitError::PerAccountExceeded {
                limit: limits.per_account,
                window_secs: limits.window.as_secs(),
            });
        }

        inner.accounts.entry(account.to_owned()).or_default().push_back(now);
        Ok(())
    }

    /// Charge a failed login to the global window.
    pub fn record_failure(&self) {
        self.record_failure_at(Instant::now());
    }

    fn record_failure_at(&self, now: Instant) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        prune_window(&mut inner.global, now, self.limits.window);
        inner.global.push_back(now);
    }

    /// Forget the account's attempts after a successful login.
    pub fn reset(&self, account: &str) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.accounts.remove(account);
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
