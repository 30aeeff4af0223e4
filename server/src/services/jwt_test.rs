use super::*;

const HOUR: Duration = Duration::from_secs(3600);

#[test]
fn session_token_round_trips_claims() {
    let jwt = JwtAdapter::new("seed");
    let user_id = Uuid::new_v4();
    let token = jwt.generate(user_id, "a@b.com", TokenPurpose::Session, HOUR).unwrap();

    let claims = jwt.validate(&token, TokenPurpose::Session).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "a@b.com");
    assert_eq!(claims.purpose, TokenPurpose::Session);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn token_rejected_for_other_purpose() {
    let jwt = JwtAdapter::new("seed");
    let token = jwt
        .generate(Uuid::new_v4(), "a@b.com", TokenPurpose::PasswordReset, HOUR)
        .unwrap();
    assert!(jwt.validate(&token, TokenPurpose::Session).is_none());
    assert!(jwt.validate(&token, TokenPurpose::EmailValidation).is_none());
    assert!(jwt.validate(&token, TokenPurpose::PasswordReset).is_some());
}

#[test]
fn token_rejected_under_different_seed() {
    let token = JwtAdapter::new("seed-a")
        .generate(Uuid::new_v4(), "a@b.com", TokenPurpose::Session, HOUR)
        .unwrap();
    assert!(JwtAdapter::new("seed-b").validate(&token, TokenPurpose::Session).is_none());
}

#[test]
fn expired_token_rejected() {
    let jwt = JwtAdapter::new("seed");
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "a@b.com".to_owned(),
        purpose: TokenPurpose::Session,
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = jwt.encode(&claims).unwrap();
    assert!(jwt.validate(&token, TokenPurpose::Session).is_none());
}

#[test]
fn garbage_token_rejected() {
    let jwt = JwtAdapter::new("seed");
    assert!(jwt.validate("not.a.jwt", TokenPurpose::Session).is_none());
    assert!(jwt.validate("", TokenPurpose::Session).is_none());
}

#[test]
fn purpose_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&TokenPurpose::EmailValidation).unwrap(), "\"email_validation\"");
}
