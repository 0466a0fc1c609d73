use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const TEACHER_STATUSES: [&str; 2] = ["active", "inactive"];
pub const GENDERS: [&str; 3] = ["male", "female", "other"];

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub qualification: Option<String>,
    pub experience_years: i32,
    pub subjects: Option<String>,
    pub joining_date: Option<chrono::NaiveDate>,
    pub salary: Option<f64>,
    pub address: Option<String>,
    pub status: String,
    pub grade: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Creating a teacher also provisions a login account, so the payload
/// carries the credentials alongside the profile fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    pub phone: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    pub qualification: Option<String>,
    #[validate(range(min = 0, message = "Experience years cannot be negative"))]
    pub experience_years: Option<i32>,
    pub subjects: Option<String>,
    pub joining_date: Option<chrono::NaiveDate>,
    pub salary: Option<f64>,
    pub address: Option<String>,
    pub grade: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    pub qualification: Option<String>,
    #[validate(range(min = 0, message = "Experience years cannot be negative"))]
    pub experience_years: Option<i32>,
    pub subjects: Option<String>,
    pub joining_date: Option<chrono::NaiveDate>,
    pub salary: Option<f64>,
    pub address: Option<String>,
    #[validate(custom(function = "validate_teacher_status"))]
    pub status: Option<String>,
    pub grade: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TeacherFilterParams {
    /// Filter by employment status, "active" or "inactive".
    pub status: Option<String>,
    /// Case-insensitive match against name or email.
    pub search: Option<String>,
}

pub fn validate_teacher_status(value: &str) -> Result<(), ValidationError> {
    if TEACHER_STATUSES.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("status");
        err.message = Some("Status must be 'active' or 'inactive'".into());
        Err(err)
    }
}

pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    if GENDERS.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("gender");
        err.message = Some("Invalid gender".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateTeacherDto {
        CreateTeacherDto {
            name: "Jane Smith".to_string(),
            email: "jane@school.test".to_string(),
            password: "secret123".to_string(),
            phone: None,
            gender: Some("female".to_string()),
            qualification: Some("M.Sc. Mathematics".to_string()),
            experience_years: Some(5),
            subjects: Some("Mathematics, Physics".to_string()),
            joining_date: None,
            salary: Some(42000.0),
            address: None,
            grade: None,
        }
    }

    #[test]
    fn test_create_teacher_dto_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_create_teacher_dto_rejects_short_password() {
        let dto = CreateTeacherDto {
            password: "abc".to_string(),
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_teacher_dto_rejects_unknown_gender() {
        let dto = CreateTeacherDto {
            gender: Some("unknown".to_string()),
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_teacher_dto_rejects_bad_status() {
        let dto = UpdateTeacherDto {
            name: None,
            email: None,
            phone: None,
            gender: None,
            qualification: None,
            experience_years: None,
            subjects: None,
            joining_date: None,
            salary: None,
            address: None,
            status: Some("retired".to_string()),
            grade: None,
        };
        assert!(dto.validate().is_err());
    }
}
