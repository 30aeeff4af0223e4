//! Signed-in landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the protected route: signed-out visitors are sent to `/login`
//! once the startup session check has settled.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::page_meta::PageMeta;
use crate::state::auth::AuthSession;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    install_unauth_redirect(auth, use_navigate());

    let display_name = move || {
        auth.with(|session| {
            let user = &session.state().user;
            user.name.clone().or_else(|| user.email.clone()).unwrap_or_default()
        })
    };
    let email = move || auth.with(|session| session.state().user.email.clone().unwrap_or_default());
    let ready = move || auth.with(|session| session.state().is_authenticated());

    let on_sign_out = move |_: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(crate::state::flows::sign_out(auth, crate::net::api::logout));
    };

    view! {
        <PageMeta title="Home" description="Your account"/>
        <div class="home-page">
            <Show when=ready fallback=|| view! { <p class="home-page__loading">"Checking session..."</p> }>
                <h1>"Welcome, " {display_name}</h1>
                <p class="home-page__email">{email}</p>
                <button class="auth-button" type="button" on:click=on_sign_out>
                    "Sign out"
                </button>
            </Show>
        </div>
    }
}
