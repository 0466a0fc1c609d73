//! Role-based authorization helpers.
//!
//! Resource reads require any authenticated user; mutations require an
//! administrative role. Handlers call [`check_any_role`] (or [`check_role`])
//! with the roles the operation allows.

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::UserRole;
use crate::utils::errors::AppError;

/// Roles allowed to perform administrative mutations.
pub const ADMIN_ROLES: [UserRole; 2] = [UserRole::SuperAdmin, UserRole::SchoolAdmin];

/// Check that the authenticated user holds exactly the required role.
pub fn check_role(auth_user: &AuthUser, required_role: UserRole) -> Result<(), AppError> {
    let user_role = parse_role_from_string(&auth_user.0.role)?;

    if user_role != required_role {
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {:?}, but user has role: {:?}",
            required_role, user_role
        )));
    }

    Ok(())
}

/// Check that the authenticated user holds one of the allowed roles.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let user_role = parse_role_from_string(&auth_user.0.role)?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles, user_role
        )));
    }

    Ok(())
}

/// Shortcut for the common "school admin or super admin" gate on mutations.
pub fn check_admin(auth_user: &AuthUser) -> Result<(), AppError> {
    check_any_role(auth_user, &ADMIN_ROLES)
}

pub fn parse_role_from_string(role_str: &str) -> Result<UserRole, AppError> {
    match role_str {
        "super_admin" => Ok(UserRole::SuperAdmin),
        "school_admin" => Ok(UserRole::SchoolAdmin),
        "moderator" => Ok(UserRole::Moderator),
        _ => Err(AppError::internal(anyhow::anyhow!(
            "Invalid role: {}",
            role_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_from_string() {
        assert!(matches!(
            parse_role_from_string("super_admin"),
            Ok(UserRole::SuperAdmin)
        ));
        assert!(matches!(
            parse_role_from_string("school_admin"),
            Ok(UserRole::SchoolAdmin)
        ));
        assert!(matches!(
            parse_role_from_string("moderator"),
            Ok(UserRole::Moderator)
        ));
        assert!(parse_role_from_string("invalid").is_err());
    }
}
