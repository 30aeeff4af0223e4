//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    home::HomePage, reset_password::ResetPasswordPage, reset_password_confirm::ResetPasswordConfirmPage,
    sign_in::SignInPage, sign_up::SignUpPage,
};
use crate::state::auth::AuthSession;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth session context, checks for an existing server session
/// once in the browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthSession::default());
    provide_context(auth);

    // Enter `Checking` before any route guard runs so a returning user is not
    // bounced to `/login` while the cookie is being checked.
    #[cfg(feature = "hydrate")]
    {
        let restore = crate::state::flows::restore_session(auth, crate::net::api::fetch_current_user);
        leptos::task::spawn_local(async move {
            if !restore.await {
                log::debug!("session restore superseded");
            }
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/authdesk.css"/>
        <Title text="Authdesk"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=SignInPage/>
                <Route path=StaticSegment("signup") view=SignUpPage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                <Route path=(StaticSegment("reset-password"), ParamSegment("token")) view=ResetPasswordConfirmPage/>
            </Routes>
        </Router>
    }
}
