use super::*;

#[test]
fn sign_in_request_trims_email_and_keeps_password() {
    let form = SignInForm { email: "  ada@example.com ".to_owned(), password: " pw ".to_owned() };
    assert_eq!(
        sign_in_request(&form, true),
        Ok(LoginRequest { email: "ada@example.com".to_owned(), password: " pw ".to_owned(), remember: true })
    );
}

#[test]
fn sign_in_request_requires_both_fields() {
    let missing_password = SignInForm { email: "ada@example.com".to_owned(), password: String::new() };
    assert_eq!(sign_in_request(&missing_password, false), Err("Enter your email and password."));

    let blank_email = SignInForm { email: "   ".to_owned(), password: "pw".to_owned() };
    assert_eq!(sign_in_request(&blank_email, false), Err("Enter your email and password."));
}

#[test]
fn password_toggle_switches_input_type() {
    assert_eq!(password_input_type(false), "password");
    assert_eq!(password_input_type(true), "text");
}

#[test]
fn submit_label_separates_own_submission_from_session_check() {
    assert_eq!(submit_label(true, true), "Signing in...");
    assert_eq!(submit_label(true, false), "Checking session...");
    assert_eq!(submit_label(false, false), "Sign in");
    assert_eq!(submit_label(false, true), "Sign in");
}
