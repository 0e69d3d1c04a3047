//! Unit tests for the access token service

use jt_shared::config::JwtConfig;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::TokenService;

fn user() -> User {
    User::new_pending(
        "b@x.com".to_string(),
        "hash".to_string(),
        "B".to_string(),
        "X".to_string(),
    )
}

#[test]
fn test_issue_and_verify() {
    let service = TokenService::new(JwtConfig::new("test-secret-key-for-unit-tests"));
    let user = user();

    let token = service.issue_access_token(&user).unwrap();
    assert_eq!(token.token_type, "bearer");
    assert_eq!(token.expires_in, 1800);

    let claims = service.verify_access_token(&token.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.email, "b@x.com");
    assert_eq!(claims.iss, "job-tracker");
}

#[test]
fn test_custom_expiry() {
    let config = JwtConfig::new("test-secret-key-for-unit-tests").with_access_expiry_minutes(5);
    let service = TokenService::new(config);
    let token = service.issue_access_token(&user()).unwrap();
    assert_eq!(token.expires_in, 300);
    assert_eq!(service.access_token_expiry(), 300);
}

#[test]
fn test_tampered_token_rejected() {
    let service = TokenService::new(JwtConfig::new("test-secret-key-for-unit-tests"));
    let other = TokenService::new(JwtConfig::new("another-secret"));
    let token = other.issue_access_token(&user()).unwrap();

    let result = service.verify_access_token(&token.access_token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
    assert!(service.verify_access_token("not-a-jwt").is_err());
}

#[test]
fn test_expired_token_rejected() {
    let service = TokenService::new(JwtConfig::new("test-secret-key-for-unit-tests"));
    // Well past the default validation leeway
    let claims = Claims::new_access(user().id, "b@x.com", "job-tracker", -600);
    let token = service.encode_jwt(&claims).unwrap();

    let result = service.verify_access_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_wrong_issuer_rejected() {
    let service = TokenService::new(JwtConfig::new("test-secret-key-for-unit-tests"));
    let claims = Claims::new_access(user().id, "b@x.com", "someone-else", 600);
    let token = service.encode_jwt(&claims).unwrap();

    assert!(service.verify_access_token(&token).is_err());
}
