//! Password-reset request page: email a reset link.
//!
//! The server answers the same way whether or not the account exists, so the
//! confirmation message never reveals which emails are registered.

use leptos::prelude::*;

use crate::components::auth_card::AuthCard;
use crate::components::page_meta::PageMeta;
use crate::state::form::{FormState, ResetRequestField, ResetRequestForm};

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let form = RwSignal::new(FormState::<ResetRequestForm>::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email = form.with(|f| f.value(ResetRequestField::Email).trim().to_owned());
        if email.is_empty() {
            info.set("Enter your email first.".to_owned());
            return;
        }
        busy.set(true);
        info.set("Sending reset link...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::request_password_reset(email).await {
                Ok(()) => {
                    form.update(FormState::on_reset_form);
                    info.set("If an account exists for that email, a reset link is on its way.".to_owned());
                }
                Err(e) => info.set(format!("Reset request failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = email;
    };

    view! {
        <PageMeta title="Reset password" description="Request a password reset link"/>
        <AuthCard title="Reset password" subtitle="We'll email you a link to choose a new password">
            <form class="auth-form" on:submit=on_submit>
                <input
                    class="auth-input"
                    type="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    prop:value=move || form.with(|f| f.value(ResetRequestField::Email).to_owned())
                    on:input=move |ev| {
                        form.update(|f| f.on_input_change(ResetRequestField::Email, event_target_value(&ev)));
                    }
                />
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Send reset link"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
            <div class="auth-links">
                <a href="/login">"Back to sign in"</a>
            </div>
        </AuthCard>
    }
}
