use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::announcements::model::AnnouncementWithAuthor;
use crate::modules::dashboard::model::{
    ClassDistribution, DashboardStats, EntityCounts, StatusCount,
};
use crate::modules::events::model::Event;
use crate::utils::errors::AppError;

pub struct DashboardService;

impl DashboardService {
    #[instrument(skip(db))]
    pub async fn get_stats(db: &PgPool) -> Result<DashboardStats, AppError> {
        let counts = sqlx::query_as::<_, EntityCounts>(
            "SELECT
                 (SELECT COUNT(*) FROM teachers WHERE status = 'active') AS teachers,
                 (SELECT COUNT(*) FROM students WHERE status = 'active') AS students,
                 (SELECT COUNT(*) FROM classes) AS classes,
                 (SELECT COUNT(*) FROM subjects) AS subjects",
        )
        .fetch_one(db)
        .await
        .context("Failed to fetch entity counts")
        .map_err(AppError::database)?;

        let class_distribution = sqlx::query_as::<_, ClassDistribution>(
            "SELECT name, current_students, max_students FROM classes ORDER BY name",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch class distribution")
        .map_err(AppError::database)?;

        let teacher_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM teachers GROUP BY status ORDER BY status",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch teacher status distribution")
        .map_err(AppError::database)?;

        let recent_announcements = sqlx::query_as::<_, AnnouncementWithAuthor>(
            "SELECT a.id, a.title, a.content, a.type, a.target_audience, a.expiry_date,
                    a.status, a.created_by, a.created_at, a.updated_at,
                    u.name AS created_by_name
             FROM announcements a
             JOIN users u ON u.id = a.created_by
             WHERE a.status = 'active'
               AND (a.expiry_date IS NULL OR a.expiry_date >= CURRENT_DATE)
             ORDER BY a.created_at DESC
             LIMIT 5",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch recent announcements")
        .map_err(AppError::database)?;

        let upcoming_events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, type, start_date, end_date, start_time, end_time,
                    location, target_audience, status, created_by, created_at, updated_at
             FROM events
             WHERE start_date >= CURRENT_DATE AND status NOT IN ('completed', 'cancelled')
             ORDER BY start_date, start_time NULLS FIRST
             LIMIT 5",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch upcoming events")
        .map_err(AppError::database)?;

        Ok(DashboardStats {
            counts,
            class_distribution,
            teacher_status,
            recent_announcements,
            upcoming_events,
        })
    }
}
