//! Dismissable banner for the auth session's error message.

use leptos::prelude::*;

use crate::state::auth::{AuthAction, AuthSession};
use crate::state::flows::AuthStore;

/// Shows the current auth `error_message`, if any. Dismissing it clears the
/// message without touching the session status.
#[component]
pub fn AuthErrorBanner() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let message = move || auth.with(|session| session.state().error_message.clone());

    view! {
        <Show when=move || message().is_some()>
            <div class="auth-message auth-message--error" role="alert">
                <span>{move || message().unwrap_or_default()}</span>
                <button
                    class="auth-message__dismiss"
                    type="button"
                    aria-label="Dismiss"
                    on:click=move |_| auth.dispatch(AuthAction::ClearErrorMessage)
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
