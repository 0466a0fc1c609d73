use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const EVENT_TYPES: [&str; 5] = ["holiday", "exam", "ptm", "activity", "other"];
pub const EVENT_STATUSES: [&str; 4] = ["upcoming", "ongoing", "completed", "cancelled"];

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub event_type: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    pub location: Option<String>,
    pub target_audience: Option<String>,
    pub status: String,
    pub created_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventDto {
    #[validate(length(min = 1, message = "Event title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type", default = "default_event_type")]
    #[validate(custom(function = "validate_event_type"))]
    pub event_type: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    pub location: Option<String>,
    pub target_audience: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEventDto {
    #[validate(length(min = 1, message = "Event title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_event_type"))]
    pub event_type: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    pub location: Option<String>,
    pub target_audience: Option<String>,
    #[validate(custom(function = "validate_event_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EventFilterParams {
    /// Filter by event type.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// Filter by lifecycle status.
    pub status: Option<String>,
    /// When true, only events starting today or later.
    pub upcoming: Option<bool>,
}

fn default_event_type() -> String {
    "other".to_string()
}

pub fn validate_event_type(value: &str) -> Result<(), ValidationError> {
    if EVENT_TYPES.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("type");
        err.message = Some("Invalid event type".into());
        Err(err)
    }
}

pub fn validate_event_status(value: &str) -> Result<(), ValidationError> {
    if EVENT_STATUSES.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("status");
        err.message = Some("Invalid event status".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_event_dto_defaults_type() {
        let dto: CreateEventDto = serde_json::from_value(serde_json::json!({
            "title": "Sports Day",
            "start_date": "2026-09-12"
        }))
        .unwrap();
        assert_eq!(dto.event_type, "other");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_event_dto_rejects_unknown_type() {
        let dto: CreateEventDto = serde_json::from_value(serde_json::json!({
            "title": "Sports Day",
            "type": "festival",
            "start_date": "2026-09-12"
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_event_status_values() {
        assert!(validate_event_status("cancelled").is_ok());
        assert!(validate_event_status("postponed").is_err());
    }
}
