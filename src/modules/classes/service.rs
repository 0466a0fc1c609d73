use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classes::model::{
    Class, ClassFilterParams, ClassWithTeacher, CreateClassDto, UpdateClassDto,
};
use crate::utils::errors::AppError;

const CLASS_COLUMNS: &str = "c.id, c.name, c.segment, c.grade, c.section, c.class_teacher_id, \
     c.max_students, c.current_students, c.created_at, c.updated_at";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn get_classes(
        db: &PgPool,
        filters: ClassFilterParams,
    ) -> Result<Vec<ClassWithTeacher>, AppError> {
        let query = format!(
            "SELECT {CLASS_COLUMNS}, t.name AS class_teacher_name
             FROM classes c
             LEFT JOIN teachers t ON t.id = c.class_teacher_id
             WHERE ($1::text IS NULL OR c.segment = $1)
               AND ($2::text IS NULL OR c.grade = $2)
             ORDER BY c.grade, c.section NULLS FIRST, c.name"
        );

        sqlx::query_as::<_, ClassWithTeacher>(&query)
            .bind(&filters.segment)
            .bind(&filters.grade)
            .fetch_all(db)
            .await
            .context("Failed to fetch classes")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_class_by_id(db: &PgPool, id: Uuid) -> Result<ClassWithTeacher, AppError> {
        let query = format!(
            "SELECT {CLASS_COLUMNS}, t.name AS class_teacher_name
             FROM classes c
             LEFT JOIN teachers t ON t.id = c.class_teacher_id
             WHERE c.id = $1"
        );

        sqlx::query_as::<_, ClassWithTeacher>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch class by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        if let Some(teacher_id) = dto.class_teacher_id {
            Self::ensure_teacher_exists(db, teacher_id).await?;
        }

        let class = sqlx::query_as::<_, Class>(
            "INSERT INTO classes (name, segment, grade, section, class_teacher_id, max_students)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 40))
             RETURNING id, name, segment, grade, section, class_teacher_id,
                       max_students, current_students, created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(&dto.segment)
        .bind(&dto.grade)
        .bind(&dto.section)
        .bind(dto.class_teacher_id)
        .bind(dto.max_students)
        .fetch_one(db)
        .await
        .context("Failed to create class")
        .map_err(AppError::database)?;

        Ok(class)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_class(db: &PgPool, id: Uuid, dto: UpdateClassDto) -> Result<Class, AppError> {
        let existing = Self::get_class_by_id(db, id).await?.class;

        if let Some(teacher_id) = dto.class_teacher_id {
            Self::ensure_teacher_exists(db, teacher_id).await?;
        }

        if let Some(max_students) = dto.max_students {
            if max_students < existing.current_students {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Maximum students cannot be lower than current enrollment"
                )));
            }
        }

        let class = sqlx::query_as::<_, Class>(
            "UPDATE classes
             SET name = $1, segment = $2, grade = $3, section = $4,
                 class_teacher_id = $5, max_students = $6, updated_at = NOW()
             WHERE id = $7
             RETURNING id, name, segment, grade, section, class_teacher_id,
                       max_students, current_students, created_at, updated_at",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.segment.unwrap_or(existing.segment))
        .bind(dto.grade.unwrap_or(existing.grade))
        .bind(dto.section.or(existing.section))
        .bind(dto.class_teacher_id.or(existing.class_teacher_id))
        .bind(dto.max_students.unwrap_or(existing.max_students))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update class")
        .map_err(AppError::database)?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let enrolled: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM students WHERE class_id = $1")
                .bind(id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        if enrolled.0 > 0 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Cannot delete class with enrolled students"
            )));
        }

        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete class")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }

    async fn ensure_teacher_exists(db: &PgPool, teacher_id: Uuid) -> Result<(), AppError> {
        let teacher: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM teachers WHERE id = $1")
            .bind(teacher_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if teacher.is_none() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Class teacher does not exist"
            )));
        }

        Ok(())
    }
}
