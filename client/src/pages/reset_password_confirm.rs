//! Choose a new password from an emailed reset link (`/reset-password/{token}`).

#[cfg(test)]
#[path = "reset_password_confirm_test.rs"]
mod reset_password_confirm_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use super::MIN_PASSWORD_LEN;
use crate::components::auth_card::AuthCard;
use crate::components::page_meta::PageMeta;
use crate::state::form::{FormState, ResetConfirmField, ResetConfirmForm};

/// The new password, once both entries agree and are long enough.
fn new_password(form: &ResetConfirmForm) -> Result<String, &'static str> {
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    if form.password != form.confirm {
        return Err("Passwords do not match.");
    }
    Ok(form.password.clone())
}

#[component]
pub fn ResetPasswordConfirmPage() -> impl IntoView {
    let params = use_params_map();
    let navigate = use_navigate();
    let token = move || params.with(|p| p.get("token").unwrap_or_default());

    let form = RwSignal::new(FormState::<ResetConfirmForm>::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let password = match form.with(|f| new_password(f.values())) {
            Ok(password) => password,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let token_value = token();
        busy.set(true);
        info.set("Saving new password...".to_owned());

        #[cfg(feature = "hydrate")]
        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::confirm_password_reset(token_value, password).await {
                Ok(()) => {
                    form.update(FormState::on_reset_form);
                    navigate("/login", NavigateOptions::default());
                }
                Err(e) => {
                    info.set(e);
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (token_value, password, &navigate);
    };

    let input = move |field: ResetConfirmField, placeholder: &'static str| {
        view! {
            <input
                class="auth-input"
                type="password"
                autocomplete="new-password"
                placeholder=placeholder
                prop:value=move || form.with(|f| f.value(field).to_owned())
                on:input=move |ev| form.update(|f| f.on_input_change(field, event_target_value(&ev)))
            />
        }
    };

    view! {
        <PageMeta title="Choose a new password" description="Set a new password for your account"/>
        <AuthCard title="Choose a new password">
            <form class="auth-form" on:submit=on_submit>
                {input(ResetConfirmField::Password, "New password")}
                {input(ResetConfirmField::Confirm, "Repeat new password")}
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Save password"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
            <div class="auth-links">
                <a href="/reset-password">"Request a new link"</a>
            </div>
        </AuthCard>
    }
}
