//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthSession` is provided once by `App` as `RwSignal<AuthSession>` and read
//! by route guards, pages, and the login flows in `state::flows`.
//!
//! DESIGN
//! ======
//! `AuthState` is a four-transition reducer: [`AuthState::reduce`] is a pure
//! function of the current state and an [`AuthAction`]. Every transition is
//! total and never fails.
//!
//! `AuthSession` wraps the state with a request generation. Each remote auth
//! call takes an [`AuthRequest`] ticket from [`AuthSession::begin_request`];
//! its outcome is applied only while that ticket is still the latest, so a
//! superseded login finishing late cannot overwrite a newer result.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

/// Authentication phase of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthStatus {
    /// A remote auth call is in flight.
    Checking,
    Authenticated,
    #[default]
    NotAuthenticated,
}

/// Identity of the signed-in user. All fields are empty when signed out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// True for the empty record `{}`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.email.is_none()
    }
}

/// The four auth transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Checking,
    Login(User),
    /// Sign out, optionally recording why.
    Logout(Option<String>),
    ClearErrorMessage,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: User,
    pub error_message: Option<String>,
}

impl AuthState {
    /// Next state for `action`.
    #[must_use]
    pub fn reduce(mut self, action: AuthAction) -> Self {
        self.apply(action);
        self
    }

    /// In-place form of [`AuthState::reduce`].
    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::Checking => {
                self.status = AuthStatus::Checking;
                self.user = User::default();
                self.error_message = None;
            }
            AuthAction::Login(user) => {
                self.status = AuthStatus::Authenticated;
                self.user = user;
                self.error_message = None;
            }
            AuthAction::Logout(reason) => {
                self.status = AuthStatus::NotAuthenticated;
                self.user = User::default();
                self.error_message = reason;
            }
            AuthAction::ClearErrorMessage => {
                self.error_message = None;
            }
        }
    }

    #[must_use]
    pub fn is_checking(&self) -> bool {
        self.status == AuthStatus::Checking
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }
}

/// Ticket for one remote auth call, issued by [`AuthSession::begin_request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthRequest(u64);

/// Owned auth store: the current [`AuthState`] plus request sequencing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSession {
    state: AuthState,
    generation: u64,
}

impl AuthSession {
    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Apply a transition directly. Status-changing actions supersede any
    /// request still in flight.
    pub fn dispatch(&mut self, action: AuthAction) {
        if action != AuthAction::ClearErrorMessage {
            self.generation += 1;
        }
        self.state.apply(action);
    }

    /// Start a remote auth call: enter `Checking` and return its ticket.
    pub fn begin_request(&mut self) -> AuthRequest {
        self.dispatch(AuthAction::Checking);
        AuthRequest(self.generation)
    }

    #[must_use]
    pub fn is_current(&self, request: AuthRequest) -> bool {
        request.0 == self.generation
    }

    /// Apply the outcome of a remote auth call. `Ok` signs the user in; `Err`
    /// signs out with the given reason. The ticket is consumed. Returns
    /// `false`, leaving the state untouched, when the request has already been
    /// completed or superseded.
    pub fn complete_request(&mut self, request: AuthRequest, outcome: Result<User, Option<String>>) -> bool {
        if !self.is_current(request) {
            return false;
        }
        let action = match outcome {
            Ok(user) => AuthAction::Login(user),
            Err(reason) => AuthAction::Logout(reason),
        };
        self.dispatch(action);
        true
    }
}
