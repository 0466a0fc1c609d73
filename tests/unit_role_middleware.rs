use axum::http::StatusCode;
use learnroot::middleware::auth::AuthUser;
use learnroot::middleware::role::{ADMIN_ROLES, check_admin, check_any_role, check_role};
use learnroot::modules::auth::model::{Claims, UserRole};
use uuid::Uuid;

fn auth_user_with_role(role: &str) -> AuthUser {
    AuthUser(Claims {
        sub: Uuid::new_v4().to_string(),
        email: "user@school.test".to_string(),
        role: role.to_string(),
        exp: 4_102_444_800, // far future
        iat: 0,
    })
}

#[test]
fn test_check_admin_allows_super_admin() {
    assert!(check_admin(&auth_user_with_role("super_admin")).is_ok());
}

#[test]
fn test_check_admin_allows_school_admin() {
    assert!(check_admin(&auth_user_with_role("school_admin")).is_ok());
}

#[test]
fn test_check_admin_forbids_moderator() {
    let err = check_admin(&auth_user_with_role("moderator")).unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[test]
fn test_check_role_requires_exact_role() {
    let user = auth_user_with_role("school_admin");

    assert!(check_role(&user, UserRole::SchoolAdmin).is_ok());
    assert_eq!(
        check_role(&user, UserRole::SuperAdmin).unwrap_err().status,
        StatusCode::FORBIDDEN
    );
}

#[test]
fn test_check_any_role_with_empty_list_forbids_everyone() {
    let user = auth_user_with_role("super_admin");
    assert!(check_any_role(&user, &[]).is_err());
}

#[test]
fn test_unknown_role_in_claims_is_an_error() {
    assert!(check_admin(&auth_user_with_role("janitor")).is_err());
}

#[test]
fn test_admin_roles_exclude_moderator() {
    assert!(!ADMIN_ROLES.contains(&UserRole::Moderator));
}
