use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::subjects::model::{
    CreateSubjectDto, Subject, SubjectFilterParams, UpdateSubjectDto,
};
use crate::utils::errors::AppError;

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn get_subjects(
        db: &PgPool,
        params: SubjectFilterParams,
    ) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, name, code, type, stream, description, created_at, updated_at
             FROM subjects
             WHERE ($1::text IS NULL OR stream = $1)
               AND ($2::text IS NULL OR type = $2)
             ORDER BY name",
        )
        .bind(params.stream)
        .bind(params.subject_type)
        .fetch_all(db)
        .await
        .context("Failed to fetch subjects")
        .map_err(AppError::database)?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn get_subject_by_id(db: &PgPool, id: Uuid) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(
            "SELECT id, name, code, type, stream, description, created_at, updated_at
             FROM subjects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch subject by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM subjects WHERE code = $1")
            .bind(&dto.code)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Subject code already exists"
            )));
        }

        let subject = sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (name, code, type, stream, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, code, type, stream, description, created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(&dto.subject_type)
        .bind(&dto.stream)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Subject code already exists"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(subject)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_subject(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let existing = Self::get_subject_by_id(db, id).await?;

        if let Some(code) = &dto.code {
            let duplicate: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM subjects WHERE code = $1 AND id <> $2")
                    .bind(code)
                    .bind(id)
                    .fetch_optional(db)
                    .await
                    .map_err(AppError::database)?;

            if duplicate.is_some() {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Subject code already exists"
                )));
            }
        }

        let subject = sqlx::query_as::<_, Subject>(
            "UPDATE subjects
             SET name = $1, code = $2, type = $3, stream = $4, description = $5,
                 updated_at = NOW()
             WHERE id = $6
             RETURNING id, name, code, type, stream, description, created_at, updated_at",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.code.unwrap_or(existing.code))
        .bind(dto.subject_type.unwrap_or(existing.subject_type))
        .bind(dto.stream.or(existing.stream))
        .bind(dto.description.or(existing.description))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update subject")
        .map_err(AppError::database)?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        Self::get_subject_by_id(db, id).await?;

        let referencing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM grades WHERE $1 = ANY(subjects) LIMIT 1")
                .bind(id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if referencing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Cannot delete subject that is being used in grades"
            )));
        }

        sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete subject")
            .map_err(AppError::database)?;

        Ok(())
    }
}
