use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::grades::model::{
    CreateGradeDto, Grade, GradeWithSubjects, SubjectSummary, UpdateGradeDto,
};
use crate::utils::errors::AppError;

pub struct GradeService;

impl GradeService {
    #[instrument(skip(db))]
    pub async fn get_grades(db: &PgPool) -> Result<Vec<GradeWithSubjects>, AppError> {
        let grades = sqlx::query_as::<_, Grade>(
            "SELECT id, name, segment, subjects, description, created_at, updated_at
             FROM grades ORDER BY segment, name",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch grades")
        .map_err(AppError::database)?;

        let mut result = Vec::with_capacity(grades.len());
        for grade in grades {
            let subjects_details = Self::fetch_subject_summaries(db, &grade.subjects).await?;
            result.push(GradeWithSubjects {
                grade,
                subjects_details,
            });
        }

        Ok(result)
    }

    #[instrument(skip(db))]
    pub async fn get_grade_by_id(db: &PgPool, id: Uuid) -> Result<GradeWithSubjects, AppError> {
        let grade = sqlx::query_as::<_, Grade>(
            "SELECT id, name, segment, subjects, description, created_at, updated_at
             FROM grades WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch grade by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade not found")))?;

        let subjects_details = Self::fetch_subject_summaries(db, &grade.subjects).await?;

        Ok(GradeWithSubjects {
            grade,
            subjects_details,
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create_grade(db: &PgPool, dto: CreateGradeDto) -> Result<Grade, AppError> {
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM grades WHERE name = $1")
            .bind(&dto.name)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Grade name already exists"
            )));
        }

        Self::ensure_subjects_exist(db, &dto.subjects).await?;

        let grade = sqlx::query_as::<_, Grade>(
            "INSERT INTO grades (name, segment, subjects, description)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, segment, subjects, description, created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(&dto.segment)
        .bind(&dto.subjects)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Grade name already exists"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(grade)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_grade(
        db: &PgPool,
        id: Uuid,
        dto: UpdateGradeDto,
    ) -> Result<Grade, AppError> {
        let existing = Self::get_grade_by_id(db, id).await?.grade;

        if let Some(name) = &dto.name {
            let duplicate: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM grades WHERE name = $1 AND id <> $2")
                    .bind(name)
                    .bind(id)
                    .fetch_optional(db)
                    .await
                    .map_err(AppError::database)?;

            if duplicate.is_some() {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Grade name already exists"
                )));
            }
        }

        if let Some(subjects) = &dto.subjects {
            Self::ensure_subjects_exist(db, subjects).await?;
        }

        let grade = sqlx::query_as::<_, Grade>(
            "UPDATE grades
             SET name = $1, segment = $2, subjects = $3, description = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING id, name, segment, subjects, description, created_at, updated_at",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.segment.unwrap_or(existing.segment))
        .bind(dto.subjects.unwrap_or(existing.subjects))
        .bind(dto.description.or(existing.description))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update grade")
        .map_err(AppError::database)?;

        Ok(grade)
    }

    #[instrument(skip(db))]
    pub async fn delete_grade(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete grade")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Grade not found")));
        }

        Ok(())
    }

    async fn fetch_subject_summaries(
        db: &PgPool,
        subject_ids: &[Uuid],
    ) -> Result<Vec<SubjectSummary>, AppError> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, SubjectSummary>(
            "SELECT id, name FROM subjects WHERE id = ANY($1) ORDER BY name",
        )
        .bind(subject_ids)
        .fetch_all(db)
        .await
        .context("Failed to fetch grade subjects")
        .map_err(AppError::database)
    }

    async fn ensure_subjects_exist(db: &PgPool, subject_ids: &[Uuid]) -> Result<(), AppError> {
        if subject_ids.is_empty() {
            return Ok(());
        }

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subjects WHERE id = ANY($1)")
            .bind(subject_ids)
            .fetch_one(db)
            .await
            .map_err(AppError::database)?;

        if count.0 as usize != subject_ids.len() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "One or more subjects do not exist"
            )));
        }

        Ok(())
    }
}
