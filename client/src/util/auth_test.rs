use super::*;
use crate::state::auth::{AuthAction, User};

fn signed_in() -> AuthState {
    AuthState::default().reduce(AuthAction::Login(User {
        id: Some("u1".to_owned()),
        name: Some("Alice".to_owned()),
        email: Some("alice@example.com".to_owned()),
    }))
}

#[test]
fn should_redirect_unauth_when_signed_out() {
    assert!(should_redirect_unauth(&AuthState::default()));
    let failed = AuthState::default().reduce(AuthAction::Logout(Some("Invalid credentials".to_owned())));
    assert!(should_redirect_unauth(&failed));
}

#[test]
fn should_not_redirect_while_checking() {
    let state = AuthState::default().reduce(AuthAction::Checking);
    assert!(!should_redirect_unauth(&state));
    assert!(!should_redirect_home(&state));
}

#[test]
fn should_not_redirect_unauth_when_user_exists() {
    assert!(!should_redirect_unauth(&signed_in()));
}

#[test]
fn should_redirect_home_only_when_authenticated() {
    assert!(should_redirect_home(&signed_in()));
    assert!(!should_redirect_home(&AuthState::default()));
}
