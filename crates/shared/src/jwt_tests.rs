//! Unit tests for JWT functionality.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::auth::Claims;
use crate::jwt::{JwtConfig, JwtError, JwtService};
use crate::types::OwnerId;

fn create_test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: 15,
    })
}

#[test]
fn test_claims_new_sets_correct_fields() {
    let owner = OwnerId::new();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(owner, expires_at);

    assert_eq!(claims.sub, owner);
    assert_eq!(claims.owner_id(), owner);
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_generate_and_validate_token() {
    let service = create_test_service();
    let owner = OwnerId::new();

    let token = service.generate_access_token(owner).unwrap();
    assert!(!token.is_empty());

    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.owner_id(), owner);
}

#[test]
fn test_invalid_token() {
    let service = create_test_service();
    let result = service.validate_token("invalid.token.here");
    assert!(matches!(result, Err(JwtError::DecodingError(_))));
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let other = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        access_token_expires_minutes: 15,
    });
    let token = other.generate_access_token(OwnerId::new()).unwrap();

    assert!(create_test_service().validate_token(&token).is_err());
}

#[test]
fn test_expired_token() {
    let claims = Claims::new(OwnerId::new(), Utc::now() - Duration::hours(2));
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret-key-for-testing"),
    )
    .unwrap();

    let result = create_test_service().validate_token(&token);
    assert!(matches!(result, Err(JwtError::Expired)));
}

#[test]
fn test_access_token_expires_in_seconds() {
    assert_eq!(create_test_service().access_token_expires_in(), 900);
}
