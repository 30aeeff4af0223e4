//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior: protected pages
//! bounce signed-out users to `/login`, and the sign-in pages send signed-in
//! users home.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthSession, AuthState, AuthStatus};

/// True once auth has settled with no signed-in user. `Checking` never
/// redirects, so a session restore in flight keeps the current page.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    state.status == AuthStatus::NotAuthenticated
}

pub fn should_redirect_home(state: &AuthState) -> bool {
    state.is_authenticated()
}

/// Redirect to `/login` whenever auth has settled and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthSession>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.with(|session| should_redirect_unauth(session.state())) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Redirect to `/` as soon as the session is authenticated.
pub fn install_home_redirect<F>(auth: RwSignal<AuthSession>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.with(|session| should_redirect_home(session.state())) {
            navigate("/", NavigateOptions::default());
        }
    });
}
