//! Sign-up page: create an account and sign straight in.
//!
//! Registration follows the same two-phase session protocol as sign-in, with
//! the register call as the remote step.

#[cfg(test)]
#[path = "sign_up_test.rs"]
mod sign_up_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::MIN_PASSWORD_LEN;
use crate::components::auth_card::AuthCard;
use crate::components::error_banner::AuthErrorBanner;
use crate::components::page_meta::PageMeta;
use crate::net::types::RegisterRequest;
use crate::state::auth::{AuthAction, AuthSession};
use crate::state::flows::AuthStore;
use crate::state::form::{FormState, SignUpForm};
use crate::util::auth::install_home_redirect;

fn sign_up_request(form: &SignUpForm) -> Result<RegisterRequest, &'static str> {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() {
        return Err("Enter your name.");
    }
    if email.is_empty() || !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(RegisterRequest { name: name.to_owned(), email: email.to_owned(), password: form.password.clone() })
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    install_home_redirect(auth, use_navigate());

    let form = RwSignal::new(FormState::<SignUpForm>::default());
    let checking = move || auth.with(|session| session.state().is_checking());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if checking() {
            return;
        }
        let request = match form.with(|f| sign_up_request(f.values())) {
            Ok(request) => request,
            Err(message) => {
                auth.dispatch(AuthAction::Logout(Some(message.to_owned())));
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            let register = crate::state::flows::start_login(auth, request, crate::net::api::register);
            leptos::task::spawn_local(async move {
                if register.await {
                    form.update(FormState::on_reset_form);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let input = move |name: &'static str, kind: &'static str, placeholder: &'static str, autocomplete: &'static str| {
        view! {
            <input
                class="auth-input"
                type=kind
                name=name
                autocomplete=autocomplete
                placeholder=placeholder
                prop:value=move || form.with(|f| f.named_value(name).unwrap_or_default().to_owned())
                on:input=move |ev| {
                    form.update(|f| {
                        f.on_named_input_change(name, event_target_value(&ev));
                    });
                }
            />
        }
    };
    let untouched = move || form.with(|f| !f.is_dirty());

    view! {
        <PageMeta title="Create account" description="Create a new account"/>
        <AuthCard title="Create account">
            <form class="auth-form" on:submit=on_submit>
                {input("name", "text", "Full name", "name")}
                {input("email", "email", "you@example.com", "email")}
                {input("password", "password", "Password (6+ characters)", "new-password")}
                <button class="auth-button" type="submit" disabled=move || checking() || untouched()>
                    {move || if checking() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>
            <AuthErrorBanner/>
            <div class="auth-links">
                <a href="/login">"Already have an account? Sign in"</a>
            </div>
        </AuthCard>
    }
}
