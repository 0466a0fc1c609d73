use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const SUBJECT_TYPES: [&str; 3] = ["core", "elective", "optional"];
pub const SUBJECT_STREAMS: [&str; 4] = ["science", "commerce", "humanities", "general"];

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub subject_type: String,
    pub stream: Option<String>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[validate(length(min = 1, message = "Subject name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Subject code is required"))]
    pub code: String,
    #[serde(rename = "type", default = "default_subject_type")]
    #[validate(custom(function = "validate_subject_type"))]
    pub subject_type: String,
    #[validate(custom(function = "validate_subject_stream"))]
    pub stream: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1, message = "Subject name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Subject code cannot be empty"))]
    pub code: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_subject_type"))]
    pub subject_type: Option<String>,
    #[validate(custom(function = "validate_subject_stream"))]
    pub stream: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubjectFilterParams {
    pub stream: Option<String>,
    #[serde(rename = "type")]
    pub subject_type: Option<String>,
}

fn default_subject_type() -> String {
    "core".to_string()
}

pub fn validate_subject_type(value: &str) -> Result<(), ValidationError> {
    if SUBJECT_TYPES.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("subject_type");
        err.message = Some("Invalid type".into());
        Err(err)
    }
}

pub fn validate_subject_stream(value: &str) -> Result<(), ValidationError> {
    if SUBJECT_STREAMS.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("stream");
        err.message = Some("Invalid stream".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_subject_dto_validation() {
        let dto = CreateSubjectDto {
            name: "Mathematics".to_string(),
            code: "MATH101".to_string(),
            subject_type: "core".to_string(),
            stream: Some("science".to_string()),
            description: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_subject_dto_invalid_type() {
        let dto = CreateSubjectDto {
            name: "Mathematics".to_string(),
            code: "MATH101".to_string(),
            subject_type: "mandatory".to_string(),
            stream: None,
            description: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_subject_dto_invalid_stream() {
        let dto = CreateSubjectDto {
            name: "Mathematics".to_string(),
            code: "MATH101".to_string(),
            subject_type: "core".to_string(),
            stream: Some("arts".to_string()),
            description: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_subject_dto_defaults_type_to_core() {
        let json = r#"{"name":"Mathematics","code":"MATH101"}"#;
        let dto: CreateSubjectDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.subject_type, "core");
    }
}
