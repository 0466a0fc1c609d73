use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const SEGMENTS: [&str; 3] = ["primary", "secondary", "sr_secondary"];

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Grade {
    pub id: Uuid,
    pub name: String,
    pub segment: String,
    pub subjects: Vec<Uuid>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Minimal subject info joined into grade responses.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct SubjectSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct GradeWithSubjects {
    #[serde(flatten)]
    pub grade: Grade,
    pub subjects_details: Vec<SubjectSummary>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGradeDto {
    #[validate(length(min = 1, message = "Grade name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_segment"))]
    pub segment: String,
    #[serde(default)]
    pub subjects: Vec<Uuid>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGradeDto {
    #[validate(length(min = 1, message = "Grade name cannot be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_segment"))]
    pub segment: Option<String>,
    pub subjects: Option<Vec<Uuid>>,
    pub description: Option<String>,
}

pub fn validate_segment(value: &str) -> Result<(), ValidationError> {
    if SEGMENTS.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("segment");
        err.message = Some("Invalid segment".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_grade_dto_validation() {
        let dto = CreateGradeDto {
            name: "Grade 10".to_string(),
            segment: "secondary".to_string(),
            subjects: vec![],
            description: None,
        };
        assert!(dto.validate().is_ok());

        let bad_segment = CreateGradeDto {
            segment: "middle".to_string(),
            ..dto
        };
        assert!(bad_segment.validate().is_err());
    }

    #[test]
    fn test_grade_with_subjects_flattens_grade_fields() {
        let grade = Grade {
            id: Uuid::new_v4(),
            name: "Grade 10".to_string(),
            segment: "secondary".to_string(),
            subjects: vec![],
            description: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let response = GradeWithSubjects {
            grade,
            subjects_details: vec![],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["name"], "Grade 10");
        assert!(json["subjects_details"].is_array());
    }
}
