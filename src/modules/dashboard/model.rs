use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::modules::announcements::model::AnnouncementWithAuthor;
use crate::modules::events::model::Event;

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct DashboardStats {
    pub counts: EntityCounts,
    pub class_distribution: Vec<ClassDistribution>,
    pub teacher_status: Vec<StatusCount>,
    pub recent_announcements: Vec<AnnouncementWithAuthor>,
    pub upcoming_events: Vec<Event>,
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct EntityCounts {
    pub teachers: i64,
    pub students: i64,
    pub classes: i64,
    pub subjects: i64,
}

/// Enrollment against capacity per class.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct ClassDistribution {
    pub name: String,
    pub current_students: i32,
    pub max_students: i32,
}

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
