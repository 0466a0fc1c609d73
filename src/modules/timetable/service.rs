use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::timetable::model::{
    CreateTimetableEntryDto, DAYS_OF_WEEK, TimetableEntry, TimetableEntryDetailed,
    TimetableFilterParams, UpdateTimetableEntryDto,
};
use crate::utils::errors::AppError;

const ENTRY_COLUMNS: &str = "t.id, t.class_id, t.day_of_week, t.period_number, t.subject_id, \
     t.teacher_id, t.room, t.start_time, t.end_time, t.academic_year, t.created_at, t.updated_at";

/// Target slot of an insert or update, used for the three collision checks.
struct Slot<'a> {
    class_id: Uuid,
    teacher_id: Uuid,
    day_of_week: &'a str,
    period_number: i32,
    room: Option<&'a str>,
    academic_year: Option<&'a str>,
}

pub struct TimetableService;

impl TimetableService {
    #[instrument(skip(db))]
    pub async fn get_entries(
        db: &PgPool,
        filters: TimetableFilterParams,
    ) -> Result<Vec<TimetableEntryDetailed>, AppError> {
        let week_order = Self::week_order_expr();
        let query = format!(
            "SELECT {ENTRY_COLUMNS}, c.name AS class_name, s.name AS subject_name,
                    te.name AS teacher_name
             FROM timetable t
             JOIN classes c ON c.id = t.class_id
             JOIN subjects s ON s.id = t.subject_id
             JOIN teachers te ON te.id = t.teacher_id
             WHERE ($1::uuid IS NULL OR t.class_id = $1)
               AND ($2::uuid IS NULL OR t.teacher_id = $2)
               AND ($3::text IS NULL OR t.day_of_week = $3)
               AND ($4::text IS NULL OR t.academic_year = $4)
             ORDER BY {week_order}, t.period_number"
        );

        sqlx::query_as::<_, TimetableEntryDetailed>(&query)
            .bind(filters.class_id)
            .bind(filters.teacher_id)
            .bind(&filters.day_of_week)
            .bind(&filters.academic_year)
            .fetch_all(db)
            .await
            .context("Failed to fetch timetable entries")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_entry_by_id(db: &PgPool, id: Uuid) -> Result<TimetableEntryDetailed, AppError> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS}, c.name AS class_name, s.name AS subject_name,
                    te.name AS teacher_name
             FROM timetable t
             JOIN classes c ON c.id = t.class_id
             JOIN subjects s ON s.id = t.subject_id
             JOIN teachers te ON te.id = t.teacher_id
             WHERE t.id = $1"
        );

        sqlx::query_as::<_, TimetableEntryDetailed>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch timetable entry by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Timetable entry not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_entry(
        db: &PgPool,
        dto: CreateTimetableEntryDto,
    ) -> Result<TimetableEntry, AppError> {
        Self::ensure_references_exist(db, dto.class_id, dto.subject_id, dto.teacher_id).await?;

        let slot = Slot {
            class_id: dto.class_id,
            teacher_id: dto.teacher_id,
            day_of_week: &dto.day_of_week,
            period_number: dto.period_number,
            room: dto.room.as_deref(),
            academic_year: dto.academic_year.as_deref(),
        };
        Self::check_conflicts(db, &slot, None).await?;

        let entry = sqlx::query_as::<_, TimetableEntry>(
            "INSERT INTO timetable
                 (class_id, day_of_week, period_number, subject_id, teacher_id, room,
                  start_time, end_time, academic_year)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id, class_id, day_of_week, period_number, subject_id, teacher_id,
                       room, start_time, end_time, academic_year, created_at, updated_at",
        )
        .bind(dto.class_id)
        .bind(&dto.day_of_week)
        .bind(dto.period_number)
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .bind(&dto.room)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(&dto.academic_year)
        .fetch_one(db)
        .await
        .map_err(Self::map_insert_error)?;

        Ok(entry)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_entry(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTimetableEntryDto,
    ) -> Result<TimetableEntry, AppError> {
        let existing = Self::get_entry_by_id(db, id).await?.entry;

        let class_id = dto.class_id.unwrap_or(existing.class_id);
        let day_of_week = dto.day_of_week.unwrap_or(existing.day_of_week);
        let period_number = dto.period_number.unwrap_or(existing.period_number);
        let subject_id = dto.subject_id.unwrap_or(existing.subject_id);
        let teacher_id = dto.teacher_id.unwrap_or(existing.teacher_id);
        let room = dto.room.or(existing.room);
        let start_time = dto.start_time.unwrap_or(existing.start_time);
        let end_time = dto.end_time.unwrap_or(existing.end_time);
        let academic_year = dto.academic_year.or(existing.academic_year);

        if start_time >= end_time {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Start time must be before end time"
            )));
        }

        Self::ensure_references_exist(db, class_id, subject_id, teacher_id).await?;

        let slot = Slot {
            class_id,
            teacher_id,
            day_of_week: &day_of_week,
            period_number,
            room: room.as_deref(),
            academic_year: academic_year.as_deref(),
        };
        Self::check_conflicts(db, &slot, Some(id)).await?;

        let entry = sqlx::query_as::<_, TimetableEntry>(
            "UPDATE timetable
             SET class_id = $1, day_of_week = $2, period_number = $3, subject_id = $4,
                 teacher_id = $5, room = $6, start_time = $7, end_time = $8,
                 academic_year = $9, updated_at = NOW()
             WHERE id = $10
             RETURNING id, class_id, day_of_week, period_number, subject_id, teacher_id,
                       room, start_time, end_time, academic_year, created_at, updated_at",
        )
        .bind(class_id)
        .bind(&day_of_week)
        .bind(period_number)
        .bind(subject_id)
        .bind(teacher_id)
        .bind(&room)
        .bind(start_time)
        .bind(end_time)
        .bind(&academic_year)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(Self::map_insert_error)?;

        Ok(entry)
    }

    #[instrument(skip(db))]
    pub async fn delete_entry(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM timetable WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete timetable entry")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Timetable entry not found"
            )));
        }

        Ok(())
    }

    /// `day_of_week` is stored as text, where a plain ORDER BY would sort
    /// friday before monday. Ordering by position in the week list restores
    /// the weekly sequence.
    fn week_order_expr() -> String {
        let days = DAYS_OF_WEEK
            .iter()
            .map(|d| format!("'{d}'"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("array_position(ARRAY[{days}], t.day_of_week)")
    }

    /// Rejects the slot when the class, the teacher or the room is already
    /// taken at the same day and period within the same academic year.
    /// `exclude` skips the entry being updated so it never conflicts with
    /// itself.
    async fn check_conflicts(
        db: &PgPool,
        slot: &Slot<'_>,
        exclude: Option<Uuid>,
    ) -> Result<(), AppError> {
        let class_conflict: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM timetable
             WHERE class_id = $1 AND day_of_week = $2 AND period_number = $3
               AND COALESCE(academic_year, '') = COALESCE($4, '')
               AND ($5::uuid IS NULL OR id <> $5)
             LIMIT 1",
        )
        .bind(slot.class_id)
        .bind(slot.day_of_week)
        .bind(slot.period_number)
        .bind(slot.academic_year)
        .bind(exclude)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if class_conflict.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Class already has a period scheduled in this slot"
            )));
        }

        let teacher_conflict: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM timetable
             WHERE teacher_id = $1 AND day_of_week = $2 AND period_number = $3
               AND COALESCE(academic_year, '') = COALESCE($4, '')
               AND ($5::uuid IS NULL OR id <> $5)
             LIMIT 1",
        )
        .bind(slot.teacher_id)
        .bind(slot.day_of_week)
        .bind(slot.period_number)
        .bind(slot.academic_year)
        .bind(exclude)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if teacher_conflict.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Teacher is already scheduled in this slot"
            )));
        }

        if let Some(room) = slot.room {
            let room_conflict: Option<(Uuid,)> = sqlx::query_as(
                "SELECT id FROM timetable
                 WHERE room = $1 AND day_of_week = $2 AND period_number = $3
                   AND COALESCE(academic_year, '') = COALESCE($4, '')
                   AND ($5::uuid IS NULL OR id <> $5)
                 LIMIT 1",
            )
            .bind(room)
            .bind(slot.day_of_week)
            .bind(slot.period_number)
            .bind(slot.academic_year)
            .bind(exclude)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

            if room_conflict.is_some() {
                return Err(AppError::conflict(anyhow::anyhow!(
                    "Room is already booked in this slot"
                )));
            }
        }

        Ok(())
    }

    async fn ensure_references_exist(
        db: &PgPool,
        class_id: Uuid,
        subject_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<(), AppError> {
        let class: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM classes WHERE id = $1")
            .bind(class_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;
        if class.is_none() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Class does not exist"
            )));
        }

        let subject: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM subjects WHERE id = $1")
            .bind(subject_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;
        if subject.is_none() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Subject does not exist"
            )));
        }

        let teacher: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM teachers WHERE id = $1")
            .bind(teacher_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;
        if teacher.is_none() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Teacher does not exist"
            )));
        }

        Ok(())
    }

    /// A concurrent insert can still trip the unique slot index after the
    /// pre-checks pass, which surfaces as the same conflict response.
    fn map_insert_error(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::conflict(anyhow::anyhow!(
                    "Class already has a period scheduled in this slot"
                ));
            }
        }
        AppError::database(anyhow::Error::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_orders_days_by_week_position() {
        let expr = TimetableService::week_order_expr();
        assert_eq!(
            expr,
            "array_position(ARRAY['monday', 'tuesday', 'wednesday', 'thursday', 'friday', \
             'saturday'], t.day_of_week)"
        );
        // Monday must sort ahead of Friday despite the alphabetical order
        let monday = expr.find("'monday'").unwrap();
        let friday = expr.find("'friday'").unwrap();
        assert!(monday < friday);
    }
}
