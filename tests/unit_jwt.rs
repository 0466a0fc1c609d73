use learnroot::config::jwt::JwtConfig;
use learnroot::modules::auth::model::UserRole;
use learnroot::utils::jwt::{
    create_access_token, create_reset_token, verify_reset_token, verify_token,
};
use uuid::Uuid;

fn test_config() -> JwtConfig {
    JwtConfig {
        secret: "unit-test-secret".to_string(),
        access_token_expiry: 3600,
        reset_token_expiry: 900,
    }
}

#[test]
fn test_access_token_round_trip() {
    let config = test_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "admin@school.test", &UserRole::SchoolAdmin, &config)
        .expect("token creation should succeed");

    let claims = verify_token(&token, &config).expect("token should verify");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "admin@school.test");
    assert_eq!(claims.role, "school_admin");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_access_token_carries_role() {
    let config = test_config();

    for (role, expected) in [
        (UserRole::SuperAdmin, "super_admin"),
        (UserRole::SchoolAdmin, "school_admin"),
        (UserRole::Moderator, "moderator"),
    ] {
        let token = create_access_token(Uuid::new_v4(), "u@school.test", &role, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.role, expected);
    }
}

#[test]
fn test_expired_token_rejected() {
    // Expiry well past the default 60s validation leeway
    let config = JwtConfig {
        access_token_expiry: -3600,
        ..test_config()
    };

    let token =
        create_access_token(Uuid::new_v4(), "u@school.test", &UserRole::Moderator, &config)
            .unwrap();

    assert!(verify_token(&token, &config).is_err());
}

#[test]
fn test_token_with_wrong_secret_rejected() {
    let config = test_config();
    let token =
        create_access_token(Uuid::new_v4(), "u@school.test", &UserRole::Moderator, &config)
            .unwrap();

    let other = JwtConfig {
        secret: "a-different-secret".to_string(),
        ..test_config()
    };

    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn test_garbage_token_rejected() {
    let config = test_config();
    assert!(verify_token("not.a.jwt", &config).is_err());
}

#[test]
fn test_reset_token_round_trip() {
    let config = test_config();
    let user_id = Uuid::new_v4();

    let token = create_reset_token(user_id, "u@school.test", &config).unwrap();
    let claims = verify_reset_token(&token, &config).expect("reset token should verify");

    assert_eq!(claims.user_id, user_id.to_string());
    assert_eq!(claims.email, "u@school.test");
}

#[test]
fn test_access_token_is_not_a_valid_reset_token() {
    let config = test_config();
    let token =
        create_access_token(Uuid::new_v4(), "u@school.test", &UserRole::SchoolAdmin, &config)
            .unwrap();

    // Different claim shape, so decoding as a reset token must fail
    assert!(verify_reset_token(&token, &config).is_err());
}
