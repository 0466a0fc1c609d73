use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::model::UserRole;
use crate::modules::teachers::model::{
    CreateTeacherDto, Teacher, TeacherFilterParams, UpdateTeacherDto,
};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

const TEACHER_COLUMNS: &str = "id, user_id, name, email, phone, gender, qualification, \
     experience_years, subjects, joining_date, salary, address, status, grade, \
     created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db))]
    pub async fn get_teachers(
        db: &PgPool,
        filters: TeacherFilterParams,
    ) -> Result<Vec<Teacher>, AppError> {
        let query = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR email ILIKE '%' || $2 || '%')
             ORDER BY name"
        );

        sqlx::query_as::<_, Teacher>(&query)
            .bind(&filters.status)
            .bind(&filters.search)
            .fetch_all(db)
            .await
            .context("Failed to fetch teachers")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_by_id(db: &PgPool, id: Uuid) -> Result<Teacher, AppError> {
        let query = format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1");

        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch teacher by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    /// Creates the login account and the teacher profile in one transaction,
    /// so a failed profile insert never leaves an orphaned user behind.
    #[instrument(skip(db, dto))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        let existing_user: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if existing_user.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User with this email already exists"
            )));
        }

        let existing_teacher: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM teachers WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if existing_teacher.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Teacher with this email already exists"
            )));
        }

        let password_hash = hash_password(&dto.password)?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let user_id: (Uuid,) = sqlx::query_as(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(UserRole::Moderator.as_str())
        .fetch_one(&mut *tx)
        .await
        .context("Failed to create teacher login account")
        .map_err(AppError::database)?;

        let insert = format!(
            "INSERT INTO teachers
                 (user_id, name, email, phone, gender, qualification, experience_years,
                  subjects, joining_date, salary, address, grade)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), $8, $9, $10, $11, $12)
             RETURNING {TEACHER_COLUMNS}"
        );

        let teacher = sqlx::query_as::<_, Teacher>(&insert)
            .bind(user_id.0)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.gender)
            .bind(&dto.qualification)
            .bind(dto.experience_years)
            .bind(&dto.subjects)
            .bind(dto.joining_date)
            .bind(dto.salary)
            .bind(&dto.address)
            .bind(&dto.grade)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(anyhow::anyhow!(
                            "Teacher with this email already exists"
                        ));
                    }
                }
                AppError::database(anyhow::Error::from(e))
            })?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(teacher)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get_teacher_by_id(db, id).await?;

        if let Some(email) = &dto.email {
            let duplicate: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM teachers WHERE email = $1 AND id <> $2")
                    .bind(email)
                    .bind(id)
                    .fetch_optional(db)
                    .await
                    .map_err(AppError::database)?;

            if duplicate.is_some() {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Teacher with this email already exists"
                )));
            }

            if Self::user_email_taken(db, email, existing.user_id).await? {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "User with this email already exists"
                )));
            }
        }

        let new_name = dto.name.clone().unwrap_or_else(|| existing.name.clone());
        let new_email = dto.email.clone().unwrap_or_else(|| existing.email.clone());

        let mut tx = db.begin().await.map_err(AppError::database)?;

        // Keep the login account in step with the profile
        if let Some(user_id) = existing.user_id {
            sqlx::query("UPDATE users SET name = $1, email = $2, updated_at = NOW() WHERE id = $3")
                .bind(&new_name)
                .bind(&new_email)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .context("Failed to update teacher login account")
                .map_err(AppError::database)?;
        }

        let update = format!(
            "UPDATE teachers
             SET name = $1, email = $2, phone = $3, gender = $4, qualification = $5,
                 experience_years = $6, subjects = $7, joining_date = $8, salary = $9,
                 address = $10, status = $11, grade = $12, updated_at = NOW()
             WHERE id = $13
             RETURNING {TEACHER_COLUMNS}"
        );

        let teacher = sqlx::query_as::<_, Teacher>(&update)
            .bind(&new_name)
            .bind(&new_email)
            .bind(dto.phone.or(existing.phone))
            .bind(dto.gender.or(existing.gender))
            .bind(dto.qualification.or(existing.qualification))
            .bind(dto.experience_years.unwrap_or(existing.experience_years))
            .bind(dto.subjects.or(existing.subjects))
            .bind(dto.joining_date.or(existing.joining_date))
            .bind(dto.salary.or(existing.salary))
            .bind(dto.address.or(existing.address))
            .bind(dto.status.unwrap_or(existing.status))
            .bind(dto.grade.or(existing.grade))
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .context("Failed to update teacher")
            .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(teacher)
    }

    async fn user_email_taken(
        db: &PgPool,
        email: &str,
        own_user_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)")
                .bind(email)
                .bind(own_user_id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        Ok(row.is_some())
    }

    /// Deleting the linked user cascades to the teacher row.
    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let teacher = Self::get_teacher_by_id(db, id).await?;

        if let Some(user_id) = teacher.user_id {
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(user_id)
                .execute(db)
                .await
                .context("Failed to delete teacher account")
                .map_err(AppError::database)?;
        } else {
            sqlx::query("DELETE FROM teachers WHERE id = $1")
                .bind(id)
                .execute(db)
                .await
                .context("Failed to delete teacher")
                .map_err(AppError::database)?;
        }

        Ok(())
    }
}
