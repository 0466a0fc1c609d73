use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DAYS_OF_WEEK: [&str; 6] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct TimetableEntry {
    pub id: Uuid,
    pub class_id: Uuid,
    pub day_of_week: String,
    pub period_number: i32,
    pub subject_id: Uuid,
    pub teacher_id: Uuid,
    pub room: Option<String>,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub academic_year: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Timetable entry joined with the names behind its foreign keys,
/// which is what schedule views actually render.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct TimetableEntryDetailed {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub entry: TimetableEntry,
    pub class_name: String,
    pub subject_name: String,
    pub teacher_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_period_times"))]
pub struct CreateTimetableEntryDto {
    pub class_id: Uuid,
    #[validate(custom(function = "validate_day_of_week"))]
    pub day_of_week: String,
    #[validate(range(min = 1, message = "Period number must be at least 1"))]
    pub period_number: i32,
    pub subject_id: Uuid,
    pub teacher_id: Uuid,
    pub room: Option<String>,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub academic_year: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTimetableEntryDto {
    pub class_id: Option<Uuid>,
    #[validate(custom(function = "validate_day_of_week"))]
    pub day_of_week: Option<String>,
    #[validate(range(min = 1, message = "Period number must be at least 1"))]
    pub period_number: Option<i32>,
    pub subject_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub room: Option<String>,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TimetableFilterParams {
    /// Restrict to one class's schedule.
    pub class_id: Option<Uuid>,
    /// Restrict to one teacher's schedule.
    pub teacher_id: Option<Uuid>,
    /// Restrict to a single day, e.g. "monday".
    pub day_of_week: Option<String>,
    /// Restrict to an academic year, e.g. "2026-27".
    pub academic_year: Option<String>,
}

pub fn validate_day_of_week(value: &str) -> Result<(), ValidationError> {
    if DAYS_OF_WEEK.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("day_of_week");
        err.message = Some("Day must be monday through saturday".into());
        Err(err)
    }
}

fn validate_period_times(dto: &CreateTimetableEntryDto) -> Result<(), ValidationError> {
    if dto.start_time < dto.end_time {
        Ok(())
    } else {
        let mut err = ValidationError::new("period_times");
        err.message = Some("Start time must be before end time".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn valid_dto() -> CreateTimetableEntryDto {
        CreateTimetableEntryDto {
            class_id: Uuid::new_v4(),
            day_of_week: "monday".to_string(),
            period_number: 1,
            subject_id: Uuid::new_v4(),
            teacher_id: Uuid::new_v4(),
            room: Some("101".to_string()),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
            academic_year: Some("2026-27".to_string()),
        }
    }

    #[test]
    fn test_create_entry_dto_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_create_entry_dto_rejects_bad_day() {
        let dto = CreateTimetableEntryDto {
            day_of_week: "sunday".to_string(),
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_entry_dto_rejects_zero_period() {
        let dto = CreateTimetableEntryDto {
            period_number: 0,
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_entry_dto_rejects_inverted_times() {
        let dto = CreateTimetableEntryDto {
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            ..valid_dto()
        };
        assert!(dto.validate().is_err());
    }
}
