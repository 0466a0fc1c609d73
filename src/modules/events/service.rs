use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::events::model::{CreateEventDto, Event, EventFilterParams, UpdateEventDto};
use crate::utils::errors::AppError;

const EVENT_COLUMNS: &str = "id, title, description, type, start_date, end_date, start_time, \
     end_time, location, target_audience, status, created_by, created_at, updated_at";

pub struct EventService;

impl EventService {
    #[instrument(skip(db))]
    pub async fn get_events(
        db: &PgPool,
        filters: EventFilterParams,
    ) -> Result<Vec<Event>, AppError> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE ($1::text IS NULL OR type = $1)
               AND ($2::text IS NULL OR status = $2)
               AND (NOT $3 OR start_date >= CURRENT_DATE)
             ORDER BY start_date, start_time NULLS FIRST"
        );

        sqlx::query_as::<_, Event>(&query)
            .bind(&filters.event_type)
            .bind(&filters.status)
            .bind(filters.upcoming.unwrap_or(false))
            .fetch_all(db)
            .await
            .context("Failed to fetch events")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_event_by_id(db: &PgPool, id: Uuid) -> Result<Event, AppError> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");

        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch event by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Event not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_event(
        db: &PgPool,
        dto: CreateEventDto,
        created_by: Uuid,
    ) -> Result<Event, AppError> {
        if let Some(end_date) = dto.end_date {
            if end_date < dto.start_date {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "End date cannot be before start date"
                )));
            }
        }

        let insert = format!(
            "INSERT INTO events
                 (title, description, type, start_date, end_date, start_time, end_time,
                  location, target_audience, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {EVENT_COLUMNS}"
        );

        let event = sqlx::query_as::<_, Event>(&insert)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.event_type)
            .bind(dto.start_date)
            .bind(dto.end_date)
            .bind(dto.start_time)
            .bind(dto.end_time)
            .bind(&dto.location)
            .bind(&dto.target_audience)
            .bind(created_by)
            .fetch_one(db)
            .await
            .context("Failed to create event")
            .map_err(AppError::database)?;

        Ok(event)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_event(db: &PgPool, id: Uuid, dto: UpdateEventDto) -> Result<Event, AppError> {
        let existing = Self::get_event_by_id(db, id).await?;

        let start_date = dto.start_date.unwrap_or(existing.start_date);
        let end_date = dto.end_date.or(existing.end_date);

        if let Some(end) = end_date {
            if end < start_date {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "End date cannot be before start date"
                )));
            }
        }

        let update = format!(
            "UPDATE events
             SET title = $1, description = $2, type = $3, start_date = $4, end_date = $5,
                 start_time = $6, end_time = $7, location = $8, target_audience = $9,
                 status = $10, updated_at = NOW()
             WHERE id = $11
             RETURNING {EVENT_COLUMNS}"
        );

        let event = sqlx::query_as::<_, Event>(&update)
            .bind(dto.title.unwrap_or(existing.title))
            .bind(dto.description.or(existing.description))
            .bind(dto.event_type.unwrap_or(existing.event_type))
            .bind(start_date)
            .bind(end_date)
            .bind(dto.start_time.or(existing.start_time))
            .bind(dto.end_time.or(existing.end_time))
            .bind(dto.location.or(existing.location))
            .bind(dto.target_audience.or(existing.target_audience))
            .bind(dto.status.unwrap_or(existing.status))
            .bind(id)
            .fetch_one(db)
            .await
            .context("Failed to update event")
            .map_err(AppError::database)?;

        Ok(event)
    }

    #[instrument(skip(db))]
    pub async fn delete_event(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete event")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Event not found")));
        }

        Ok(())
    }
}
