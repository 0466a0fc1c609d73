use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::modules::teachers::model::validate_gender;

pub const STUDENT_STATUSES: [&str; 3] = ["active", "inactive", "transferred"];

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub admission_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub class_id: Option<Uuid>,
    pub section: Option<String>,
    pub roll_number: Option<i32>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub address: Option<String>,
    pub admission_date: Option<chrono::NaiveDate>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Student row joined with the name of the class they are enrolled in.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct StudentWithClass {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub student: Student,
    pub class_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, message = "Admission number is required"))]
    pub admission_number: String,
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub class_id: Option<Uuid>,
    pub section: Option<String>,
    pub roll_number: Option<i32>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    #[validate(email(message = "Invalid parent email format"))]
    pub parent_email: Option<String>,
    pub address: Option<String>,
    pub admission_date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, message = "Admission number cannot be empty"))]
    pub admission_number: Option<String>,
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub class_id: Option<Uuid>,
    pub section: Option<String>,
    pub roll_number: Option<i32>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    #[validate(email(message = "Invalid parent email format"))]
    pub parent_email: Option<String>,
    pub address: Option<String>,
    pub admission_date: Option<chrono::NaiveDate>,
    #[validate(custom(function = "validate_student_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentFilterParams {
    /// Filter by enrolled class.
    pub class_id: Option<Uuid>,
    /// Filter by enrollment status.
    pub status: Option<String>,
    /// Case-insensitive match against name or admission number.
    pub search: Option<String>,
}

pub fn validate_student_status(value: &str) -> Result<(), ValidationError> {
    if STUDENT_STATUSES.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("status");
        err.message = Some("Status must be 'active', 'inactive' or 'transferred'".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateStudentDto {
        CreateStudentDto {
            admission_number: "ADM-2026-001".to_string(),
            name: "Ravi Kumar".to_string(),
            email: None,
            phone: None,
            gender: Some("male".to_string()),
            date_of_birth: None,
            class_id: None,
            section: Some("A".to_string()),
            roll_number: Some(12),
            parent_name: Some("S. Kumar".to_string()),
            parent_phone: None,
            parent_email: None,
            address: None,
            admission_date: None,
        }
    }

    #[test]
    fn test_create_student_dto_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_create_student_dto_rejects_empty_admission_number() {
        let dto = CreateStudentDto {
            admission_number: String::new(),
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_student_status_values() {
        assert!(validate_student_status("transferred").is_ok());
        assert!(validate_student_status("graduated").is_err());
    }
}
