use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::modules::grades::model::validate_segment;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub segment: String,
    pub grade: String,
    pub section: Option<String>,
    pub class_teacher_id: Option<Uuid>,
    pub max_students: i32,
    pub current_students: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Class row joined with the assigned class teacher's name.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct ClassWithTeacher {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub class: Class,
    pub class_teacher_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, message = "Class name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_segment"))]
    pub segment: String,
    #[validate(length(min = 1, message = "Grade is required"))]
    pub grade: String,
    pub section: Option<String>,
    pub class_teacher_id: Option<Uuid>,
    #[validate(range(min = 1, message = "Maximum students must be at least 1"))]
    pub max_students: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, message = "Class name cannot be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_segment"))]
    pub segment: Option<String>,
    #[validate(length(min = 1, message = "Grade cannot be empty"))]
    pub grade: Option<String>,
    pub section: Option<String>,
    pub class_teacher_id: Option<Uuid>,
    #[validate(range(min = 1, message = "Maximum students must be at least 1"))]
    pub max_students: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ClassFilterParams {
    /// Filter by school segment.
    pub segment: Option<String>,
    /// Filter by grade label, e.g. "10".
    pub grade: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_class_dto_validation() {
        let dto = CreateClassDto {
            name: "10-A".to_string(),
            segment: "secondary".to_string(),
            grade: "10".to_string(),
            section: Some("A".to_string()),
            class_teacher_id: None,
            max_students: Some(35),
        };
        assert!(dto.validate().is_ok());

        let zero_capacity = CreateClassDto {
            max_students: Some(0),
            ..dto
        };
        assert!(zero_capacity.validate().is_err());
    }

    #[test]
    fn test_class_with_teacher_serializes_flat() {
        let class = Class {
            id: Uuid::new_v4(),
            name: "10-A".to_string(),
            segment: "secondary".to_string(),
            grade: "10".to_string(),
            section: Some("A".to_string()),
            class_teacher_id: None,
            max_students: 40,
            current_students: 12,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let with_teacher = ClassWithTeacher {
            class,
            class_teacher_name: Some("Jane Smith".to_string()),
        };

        let json = serde_json::to_value(&with_teacher).unwrap();
        assert_eq!(json["name"], "10-A");
        assert_eq!(json["class_teacher_name"], "Jane Smith");
        assert_eq!(json["current_students"], 12);
    }
}
