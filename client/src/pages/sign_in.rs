//! Sign-in page: email + password against the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submitting runs `state::flows::start_login` with the REST login call, so the
//! session enters `Checking` at once and settles on the server's answer. The
//! submit button stays disabled while `Checking`, and the page leaves for `/`
//! once authenticated.

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::auth_card::AuthCard;
use crate::components::error_banner::AuthErrorBanner;
use crate::components::page_meta::PageMeta;
use crate::net::types::LoginRequest;
use crate::state::auth::{AuthAction, AuthSession};
use crate::state::flows::AuthStore;
use crate::state::form::{FormState, SignInField, SignInForm};
use crate::util::auth::install_home_redirect;

/// Build the login body from the form, trimming the email.
fn sign_in_request(form: &SignInForm, remember: bool) -> Result<LoginRequest, &'static str> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok(LoginRequest { email: email.to_owned(), password: form.password.clone(), remember })
}

/// Button label. A startup session check also runs in `Checking`, so only
/// this page's own submission reads as signing in.
fn submit_label(checking: bool, submitted: bool) -> &'static str {
    match (checking, submitted) {
        (true, true) => "Signing in...",
        (true, false) => "Checking session...",
        (false, _) => "Sign in",
    }
}

fn password_input_type(visible: bool) -> &'static str {
    if visible { "text" } else { "password" }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    install_home_redirect(auth, use_navigate());

    let form = RwSignal::new(FormState::<SignInForm>::default());
    let show_password = RwSignal::new(false);
    let remember = RwSignal::new(false);
    let submitted = RwSignal::new(false);
    let checking = move || auth.with(|session| session.state().is_checking());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if checking() {
            return;
        }
        let request = match form.with(|f| sign_in_request(f.values(), remember.get())) {
            Ok(request) => request,
            Err(message) => {
                auth.dispatch(AuthAction::Logout(Some(message.to_owned())));
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            submitted.set(true);
            let login = crate::state::flows::start_login(auth, request, crate::net::api::login);
            leptos::task::spawn_local(async move {
                if login.await {
                    form.update(FormState::on_reset_form);
                }
                submitted.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    view! {
        <PageMeta title="Sign in" description="Sign in to your account"/>
        <AuthCard title="Sign in" subtitle="Welcome back">
            <form class="auth-form" on:submit=on_submit>
                <input
                    class="auth-input"
                    type="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    prop:value=move || form.with(|f| f.value(SignInField::Email).to_owned())
                    on:input=move |ev| form.update(|f| f.on_input_change(SignInField::Email, event_target_value(&ev)))
                />
                <div class="auth-input-row">
                    <input
                        class="auth-input"
                        type=move || password_input_type(show_password.get())
                        name="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || form.with(|f| f.value(SignInField::Password).to_owned())
                        on:input=move |ev| {
                            form.update(|f| f.on_input_change(SignInField::Password, event_target_value(&ev)));
                        }
                    />
                    <button
                        class="auth-input-row__toggle"
                        type="button"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                <label class="auth-checkbox">
                    <input
                        type="checkbox"
                        name="remember"
                        prop:checked=move || remember.get()
                        on:change=move |ev| remember.set(event_target_checked(&ev))
                    />
                    "Keep me logged in"
                </label>
                <button class="auth-button" type="submit" disabled=checking>
                    {move || submit_label(checking(), submitted.get())}
                </button>
            </form>
            <AuthErrorBanner/>
            <div class="auth-links">
                <a href="/reset-password">"Forgot your password?"</a>
                <a href="/signup">"Create an account"</a>
            </div>
        </AuthCard>
    }
}
