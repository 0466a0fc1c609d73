use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::announcements::model::{
    Announcement, AnnouncementFilterParams, AnnouncementWithAuthor, CreateAnnouncementDto,
    UpdateAnnouncementDto,
};
use crate::utils::errors::AppError;

const ANNOUNCEMENT_COLUMNS: &str = "a.id, a.title, a.content, a.type, a.target_audience, \
     a.expiry_date, a.status, a.created_by, a.created_at, a.updated_at";

pub struct AnnouncementService;

impl AnnouncementService {
    /// Announcements past their expiry date report "expired" regardless of
    /// what the stored status column says, so stale rows never show as live.
    #[instrument(skip(db))]
    pub async fn get_announcements(
        db: &PgPool,
        filters: AnnouncementFilterParams,
    ) -> Result<Vec<AnnouncementWithAuthor>, AppError> {
        let query = format!(
            "SELECT a.id, a.title, a.content, a.type, a.target_audience, a.expiry_date,
                    CASE WHEN a.expiry_date IS NOT NULL AND a.expiry_date < CURRENT_DATE
                         THEN 'expired' ELSE a.status END AS status,
                    a.created_by, a.created_at, a.updated_at,
                    u.name AS created_by_name
             FROM announcements a
             JOIN users u ON u.id = a.created_by
             WHERE ($1::text IS NULL OR a.type = $1)
               AND (NOT $2 OR (a.status = 'active'
                    AND (a.expiry_date IS NULL OR a.expiry_date >= CURRENT_DATE)))
             ORDER BY a.created_at DESC"
        );

        sqlx::query_as::<_, AnnouncementWithAuthor>(&query)
            .bind(&filters.announcement_type)
            .bind(filters.active.unwrap_or(false))
            .fetch_all(db)
            .await
            .context("Failed to fetch announcements")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_announcement_by_id(
        db: &PgPool,
        id: Uuid,
    ) -> Result<AnnouncementWithAuthor, AppError> {
        let query = format!(
            "SELECT {ANNOUNCEMENT_COLUMNS}, u.name AS created_by_name
             FROM announcements a
             JOIN users u ON u.id = a.created_by
             WHERE a.id = $1"
        );

        sqlx::query_as::<_, AnnouncementWithAuthor>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch announcement by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Announcement not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_announcement(
        db: &PgPool,
        dto: CreateAnnouncementDto,
        created_by: Uuid,
    ) -> Result<Announcement, AppError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (title, content, type, target_audience, expiry_date, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, title, content, type, target_audience, expiry_date, status,
                       created_by, created_at, updated_at",
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.announcement_type)
        .bind(&dto.target_audience)
        .bind(dto.expiry_date)
        .bind(created_by)
        .fetch_one(db)
        .await
        .context("Failed to create announcement")
        .map_err(AppError::database)?;

        Ok(announcement)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_announcement(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAnnouncementDto,
    ) -> Result<Announcement, AppError> {
        let existing = Self::get_announcement_by_id(db, id).await?.announcement;

        let announcement = sqlx::query_as::<_, Announcement>(
            "UPDATE announcements
             SET title = $1, content = $2, type = $3, target_audience = $4,
                 expiry_date = $5, updated_at = NOW()
             WHERE id = $6
             RETURNING id, title, content, type, target_audience, expiry_date, status,
                       created_by, created_at, updated_at",
        )
        .bind(dto.title.unwrap_or(existing.title))
        .bind(dto.content.unwrap_or(existing.content))
        .bind(dto.announcement_type.unwrap_or(existing.announcement_type))
        .bind(dto.target_audience.or(existing.target_audience))
        .bind(dto.expiry_date.or(existing.expiry_date))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update announcement")
        .map_err(AppError::database)?;

        Ok(announcement)
    }

    #[instrument(skip(db))]
    pub async fn delete_announcement(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete announcement")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Announcement not found"
            )));
        }

        Ok(())
    }
}
