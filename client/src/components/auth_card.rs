//! Centered card shared by the sign-in, sign-up, and password-reset pages.

use leptos::prelude::*;

#[component]
pub fn AuthCard(
    /// Card heading.
    title: &'static str,
    /// Optional line under the heading.
    #[prop(optional)]
    subtitle: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{title}</h1>
                {subtitle.map(|text| view! { <p class="auth-card__subtitle">{text}</p> })}
                {children()}
            </div>
        </div>
    }
}
