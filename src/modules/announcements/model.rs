use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const ANNOUNCEMENT_TYPES: [&str; 4] = ["general", "urgent", "academic", "event"];

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub announcement_type: String,
    pub target_audience: Option<String>,
    pub expiry_date: Option<chrono::NaiveDate>,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Announcement joined with the author's name for display.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct AnnouncementWithAuthor {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub announcement: Announcement,
    pub created_by_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnnouncementDto {
    #[validate(length(min = 1, message = "Announcement title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Announcement content is required"))]
    pub content: String,
    #[serde(rename = "type", default = "default_announcement_type")]
    #[validate(custom(function = "validate_announcement_type"))]
    pub announcement_type: String,
    pub target_audience: Option<String>,
    pub expiry_date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAnnouncementDto {
    #[validate(length(min = 1, message = "Announcement title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Announcement content cannot be empty"))]
    pub content: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_announcement_type"))]
    pub announcement_type: Option<String>,
    pub target_audience: Option<String>,
    pub expiry_date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AnnouncementFilterParams {
    /// Filter by announcement type.
    #[serde(rename = "type")]
    pub announcement_type: Option<String>,
    /// When true, only announcements that have not expired.
    pub active: Option<bool>,
}

fn default_announcement_type() -> String {
    "general".to_string()
}

pub fn validate_announcement_type(value: &str) -> Result<(), ValidationError> {
    if ANNOUNCEMENT_TYPES.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("type");
        err.message = Some("Invalid announcement type".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_announcement_dto_defaults_type() {
        let dto: CreateAnnouncementDto = serde_json::from_value(serde_json::json!({
            "title": "Exam schedule released",
            "content": "Mid-term exams begin on the 5th."
        }))
        .unwrap();
        assert_eq!(dto.announcement_type, "general");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_announcement_dto_rejects_empty_content() {
        let dto: CreateAnnouncementDto = serde_json::from_value(serde_json::json!({
            "title": "Heads up",
            "content": ""
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_announcement_type_values() {
        assert!(validate_announcement_type("urgent").is_ok());
        assert!(validate_announcement_type("misc").is_err());
    }
}
