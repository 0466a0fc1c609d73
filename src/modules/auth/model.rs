//! Authentication data models and DTOs.
//!
//! # Core Types
//!
//! - [`User`] - Base user entity from the database
//! - [`UserRole`] - The three system roles
//! - [`Claims`] - JWT access token claims
//!
//! # System Roles
//!
//! | Role | Description |
//! |------|-------------|
//! | Super Admin | Full system access |
//! | School Admin | Administrative mutations on school resources |
//! | Moderator | Teacher account; authenticated read access |

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A user account. Teacher accounts hold the `moderator` role and are
/// linked 1:1 to a row in `teachers`.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(
    Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    SchoolAdmin,
    Moderator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::SchoolAdmin => "school_admin",
            UserRole::Moderator => "moderator",
        }
    }
}

/// JWT access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Claims of a short-lived password reset token.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetTokenClaims {
    pub user_id: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginData {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_round_trip() {
        for (role, s) in [
            (UserRole::SuperAdmin, "\"super_admin\""),
            (UserRole::SchoolAdmin, "\"school_admin\""),
            (UserRole::Moderator, "\"moderator\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), s);
            let parsed: UserRole = serde_json::from_str(s).unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_user_role_text_representation_matches_schema() {
        use sqlx::{Postgres, Type};

        // The users.role column is VARCHAR with a CHECK over these strings.
        // Inserts bind `as_str()` rather than the enum itself, so no custom
        // Postgres type named after the enum is ever referenced at prepare
        // time; reads decode the enum from the text value.
        for (role, s) in [
            (UserRole::SuperAdmin, "super_admin"),
            (UserRole::SchoolAdmin, "school_admin"),
            (UserRole::Moderator, "moderator"),
        ] {
            assert_eq!(role.as_str(), s);
        }
        assert!(<UserRole as Type<Postgres>>::compatible(
            &<&str as Type<Postgres>>::type_info()
        ));
    }

    #[test]
    fn test_register_dto_validation() {
        use validator::Validate;

        let dto = RegisterRequestDto {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret123".to_string(),
            role: UserRole::SchoolAdmin,
        };
        assert!(dto.validate().is_ok());

        let short_name = RegisterRequestDto {
            name: "Jo".to_string(),
            ..dto_clone(&dto)
        };
        assert!(short_name.validate().is_err());

        let short_password = RegisterRequestDto {
            password: "short".to_string(),
            ..dto_clone(&dto)
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_register_dto_rejects_unknown_role() {
        let json = r#"{"name":"Jane Doe","email":"jane@example.com","password":"secret123","role":"intruder"}"#;
        assert!(serde_json::from_str::<RegisterRequestDto>(json).is_err());
    }

    fn dto_clone(dto: &RegisterRequestDto) -> RegisterRequestDto {
        RegisterRequestDto {
            name: dto.name.clone(),
            email: dto.email.clone(),
            password: dto.password.clone(),
            role: dto.role,
        }
    }
}
