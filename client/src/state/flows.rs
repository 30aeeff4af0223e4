//! Async auth workflows over the session store.
//!
//! Every remote auth call follows the same two phases: enter `Checking`
//! immediately, then apply exactly one outcome when the call resolves. The
//! remote call is injected, so pages pass `net::api` functions and tests pass
//! local futures.

#[cfg(test)]
#[path = "flows_test.rs"]
mod flows_test;

use std::future::Future;

use leptos::prelude::*;

use super::auth::{AuthAction, AuthRequest, AuthSession, User};

/// Dispatch seam between the workflows and wherever the session lives.
pub trait AuthStore {
    /// Enter `Checking` and take a ticket, or `None` if the store is gone.
    fn begin_request(&self) -> Option<AuthRequest>;

    /// Apply a request outcome. `false` when the ticket is stale.
    fn complete_request(&self, request: AuthRequest, outcome: Result<User, Option<String>>) -> bool;

    fn dispatch(&self, action: AuthAction);
}

impl<S: AuthStore + ?Sized> AuthStore for &S {
    fn begin_request(&self) -> Option<AuthRequest> {
        (**self).begin_request()
    }

    fn complete_request(&self, request: AuthRequest, outcome: Result<User, Option<String>>) -> bool {
        (**self).complete_request(request, outcome)
    }

    fn dispatch(&self, action: AuthAction) {
        (**self).dispatch(action);
    }
}

impl AuthStore for RwSignal<AuthSession> {
    fn begin_request(&self) -> Option<AuthRequest> {
        self.try_update(AuthSession::begin_request)
    }

    fn complete_request(&self, request: AuthRequest, outcome: Result<User, Option<String>>) -> bool {
        self.try_update(|session| session.complete_request(request, outcome))
            .unwrap_or(false)
    }

    fn dispatch(&self, action: AuthAction) {
        let _ = self.try_update(|session| session.dispatch(action));
    }
}

/// Sign in (or sign up) with `credentials`.
///
/// `Checking` is dispatched when this is called, before the returned future
/// is first polled. A failed call signs out with the error as the displayed
/// message. The future resolves to whether this attempt's outcome was applied.
pub fn start_login<S, C, F, Fut>(store: S, credentials: C, authenticate: F) -> impl Future<Output = bool>
where
    S: AuthStore,
    F: FnOnce(C) -> Fut,
    Fut: Future<Output = Result<User, String>>,
{
    let request = store.begin_request();
    async move {
        let Some(request) = request else {
            return false;
        };
        let outcome = authenticate(credentials).await.map_err(Some);
        store.complete_request(request, outcome)
    }
}

/// Resume an existing server session on startup. `Checking` is dispatched
/// eagerly, as in [`start_login`]. No session is not an error, so a miss
/// signs out without a message.
pub fn restore_session<S, F, Fut>(store: S, fetch: F) -> impl Future<Output = bool>
where
    S: AuthStore,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Option<User>>,
{
    let request = store.begin_request();
    async move {
        let Some(request) = request else {
            return false;
        };
        let outcome = fetch().await.ok_or(None);
        store.complete_request(request, outcome)
    }
}

/// End the server session, then sign out locally.
pub async fn sign_out<S, F, Fut>(store: S, logout: F)
where
    S: AuthStore,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    logout().await;
    store.dispatch(AuthAction::Logout(None));
}
