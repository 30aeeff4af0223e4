use super::*;

fn user_42() -> User {
    User { id: Some("42".to_owned()), name: None, email: Some("a@b.com".to_owned()) }
}

fn sample_actions() -> Vec<AuthAction> {
    vec![
        AuthAction::Checking,
        AuthAction::Login(user_42()),
        AuthAction::Logout(None),
        AuthAction::Logout(Some("Invalid credentials".to_owned())),
        AuthAction::ClearErrorMessage,
    ]
}

/// Every action sequence over `sample_actions` up to `len` steps.
fn sequences(len: usize) -> Vec<Vec<AuthAction>> {
    let actions = sample_actions();
    let mut out = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..len {
        let mut next = Vec::new();
        for seq in &frontier {
            for action in &actions {
                let mut extended: Vec<AuthAction> = seq.clone();
                extended.push(action.clone());
                next.push(extended);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn initial_state_is_not_authenticated() {
    let state = AuthState::default();
    assert_eq!(state.status, AuthStatus::NotAuthenticated);
    assert!(state.user.is_empty());
    assert_eq!(state.error_message, None);
}

#[test]
fn status_wire_names() {
    assert_eq!(serde_json::to_string(&AuthStatus::Checking).unwrap(), "\"checking\"");
    assert_eq!(serde_json::to_string(&AuthStatus::Authenticated).unwrap(), "\"authenticated\"");
    assert_eq!(serde_json::to_string(&AuthStatus::NotAuthenticated).unwrap(), "\"not-authenticated\"");
}

#[test]
fn empty_user_serializes_as_empty_object() {
    assert_eq!(serde_json::to_string(&User::default()).unwrap(), "{}");
    let parsed: User = serde_json::from_str("{}").unwrap();
    assert!(parsed.is_empty());
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn checking_from_initial() {
    let state = AuthState::default().reduce(AuthAction::Checking);
    assert_eq!(state, AuthState { status: AuthStatus::Checking, user: User::default(), error_message: None });
}

#[test]
fn login_from_checking() {
    let state = AuthState::default()
        .reduce(AuthAction::Checking)
        .reduce(AuthAction::Login(user_42()));
    assert_eq!(state, AuthState { status: AuthStatus::Authenticated, user: user_42(), error_message: None });
}

#[test]
fn logout_with_reason_from_authenticated() {
    let state = AuthState::default()
        .reduce(AuthAction::Login(user_42()))
        .reduce(AuthAction::Logout(Some("Invalid credentials".to_owned())));
    assert_eq!(
        state,
        AuthState {
            status: AuthStatus::NotAuthenticated,
            user: User::default(),
            error_message: Some("Invalid credentials".to_owned()),
        }
    );
}

#[test]
fn logout_without_reason_clears_previous_error() {
    let state = AuthState::default()
        .reduce(AuthAction::Logout(Some("boom".to_owned())))
        .reduce(AuthAction::Logout(None));
    assert_eq!(state.error_message, None);
}

#[test]
fn checking_and_login_clear_error_message() {
    let failed = AuthState::default().reduce(AuthAction::Logout(Some("boom".to_owned())));
    assert_eq!(failed.clone().reduce(AuthAction::Checking).error_message, None);
    assert_eq!(failed.reduce(AuthAction::Login(user_42())).error_message, None);
}

#[test]
fn login_does_not_validate_payload() {
    let state = AuthState::default().reduce(AuthAction::Login(User::default()));
    assert_eq!(state.status, AuthStatus::Authenticated);
    assert!(state.user.is_empty());
}

#[test]
fn apply_matches_reduce() {
    for seq in sequences(3) {
        let mut in_place = AuthState::default();
        let mut pure = AuthState::default();
        for action in seq {
            in_place.apply(action.clone());
            pure = pure.reduce(action);
        }
        assert_eq!(in_place, pure);
    }
}

// =============================================================
// Properties over action sequences
// =============================================================

#[test]
fn authenticated_iff_last_status_transition_was_login() {
    for seq in sequences(4) {
        let state = seq.iter().cloned().fold(AuthState::default(), AuthState::reduce);
        let last_status_action = seq.iter().rev().find(|a| **a != AuthAction::ClearErrorMessage);
        let expect_auth = matches!(last_status_action, Some(AuthAction::Login(_)));
        assert_eq!(state.is_authenticated(), expect_auth, "sequence {seq:?}");
    }
}

#[test]
fn user_empty_unless_authenticated() {
    for seq in sequences(4) {
        let state = seq.iter().cloned().fold(AuthState::default(), AuthState::reduce);
        if state.is_authenticated() {
            assert!(state.user.id.is_some(), "sequence {seq:?}");
        } else {
            assert!(state.user.is_empty(), "sequence {seq:?}");
        }
    }
}

#[test]
fn clear_error_message_never_changes_status_or_user() {
    for seq in sequences(3) {
        let before = seq.iter().cloned().fold(AuthState::default(), AuthState::reduce);
        let after = before.clone().reduce(AuthAction::ClearErrorMessage);
        assert_eq!(after.status, before.status);
        assert_eq!(after.user, before.user);
        assert_eq!(after.error_message, None);
    }
}

#[test]
fn error_message_only_survives_from_logout_with_reason() {
    for seq in sequences(4) {
        let state = seq.iter().cloned().fold(AuthState::default(), AuthState::reduce);
        let expected = match seq.last() {
            Some(AuthAction::Logout(reason)) => reason.clone(),
            _ => None,
        };
        assert_eq!(state.error_message, expected, "sequence {seq:?}");
    }
}

// =============================================================
// AuthSession request sequencing
// =============================================================

#[test]
fn begin_request_enters_checking() {
    let mut session = AuthSession::default();
    let request = session.begin_request();
    assert!(session.state().is_checking());
    assert!(session.is_current(request));
}

#[test]
fn complete_request_applies_login() {
    let mut session = AuthSession::default();
    let request = session.begin_request();
    assert!(session.complete_request(request, Ok(user_42())));
    assert!(session.state().is_authenticated());
    assert_eq!(session.state().user, user_42());
}

#[test]
fn complete_request_applies_logout_reason() {
    let mut session = AuthSession::default();
    let request = session.begin_request();
    assert!(session.complete_request(request, Err(Some("Invalid credentials".to_owned()))));
    assert_eq!(session.state().status, AuthStatus::NotAuthenticated);
    assert_eq!(session.state().error_message.as_deref(), Some("Invalid credentials"));
}

#[test]
fn superseded_request_is_dropped() {
    let mut session = AuthSession::default();
    let first = session.begin_request();
    let second = session.begin_request();

    assert!(session.complete_request(second, Ok(user_42())));
    assert!(!session.complete_request(first, Err(Some("late failure".to_owned()))));

    assert!(session.state().is_authenticated());
    assert_eq!(session.state().error_message, None);
}

#[test]
fn superseded_request_does_not_end_checking() {
    let mut session = AuthSession::default();
    let first = session.begin_request();
    let _second = session.begin_request();

    assert!(!session.complete_request(first, Ok(user_42())));
    assert!(session.state().is_checking());
}

#[test]
fn request_completes_only_once() {
    let mut session = AuthSession::default();
    let request = session.begin_request();
    assert!(session.complete_request(request, Ok(user_42())));
    assert!(!session.complete_request(request, Err(None)));
    assert!(session.state().is_authenticated());
}

#[test]
fn direct_logout_supersedes_in_flight_request() {
    let mut session = AuthSession::default();
    let request = session.begin_request();
    session.dispatch(AuthAction::Logout(None));
    assert!(!session.complete_request(request, Ok(user_42())));
    assert_eq!(session.state().status, AuthStatus::NotAuthenticated);
}

#[test]
fn clear_error_message_keeps_request_current() {
    let mut session = AuthSession::default();
    let request = session.begin_request();
    session.dispatch(AuthAction::ClearErrorMessage);
    assert!(session.is_current(request));
}
