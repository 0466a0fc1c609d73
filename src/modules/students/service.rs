use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{
    CreateStudentDto, Student, StudentFilterParams, StudentWithClass, UpdateStudentDto,
};
use crate::utils::errors::AppError;

const STUDENT_COLUMNS: &str = "s.id, s.admission_number, s.name, s.email, s.phone, s.gender, \
     s.date_of_birth, s.class_id, s.section, s.roll_number, s.parent_name, s.parent_phone, \
     s.parent_email, s.address, s.admission_date, s.status, s.created_at, s.updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        filters: StudentFilterParams,
    ) -> Result<Vec<StudentWithClass>, AppError> {
        let query = format!(
            "SELECT {STUDENT_COLUMNS}, c.name AS class_name
             FROM students s
             LEFT JOIN classes c ON c.id = s.class_id
             WHERE ($1::uuid IS NULL OR s.class_id = $1)
               AND ($2::text IS NULL OR s.status = $2)
               AND ($3::text IS NULL OR s.name ILIKE '%' || $3 || '%'
                    OR s.admission_number ILIKE '%' || $3 || '%')
             ORDER BY s.name"
        );

        sqlx::query_as::<_, StudentWithClass>(&query)
            .bind(filters.class_id)
            .bind(&filters.status)
            .bind(&filters.search)
            .fetch_all(db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: Uuid) -> Result<StudentWithClass, AppError> {
        let query = format!(
            "SELECT {STUDENT_COLUMNS}, c.name AS class_name
             FROM students s
             LEFT JOIN classes c ON c.id = s.class_id
             WHERE s.id = $1"
        );

        sqlx::query_as::<_, StudentWithClass>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM students WHERE admission_number = $1")
                .bind(&dto.admission_number)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Student with this admission number already exists"
            )));
        }

        let mut tx = db.begin().await.map_err(AppError::database)?;

        if let Some(class_id) = dto.class_id {
            Self::reserve_class_seat(&mut tx, class_id).await?;
        }

        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students
                 (admission_number, name, email, phone, gender, date_of_birth, class_id,
                  section, roll_number, parent_name, parent_phone, parent_email, address,
                  admission_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING id, admission_number, name, email, phone, gender, date_of_birth,
                       class_id, section, roll_number, parent_name, parent_phone,
                       parent_email, address, admission_date, status, created_at, updated_at",
        )
        .bind(&dto.admission_number)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.gender)
        .bind(dto.date_of_birth)
        .bind(dto.class_id)
        .bind(&dto.section)
        .bind(dto.roll_number)
        .bind(&dto.parent_name)
        .bind(&dto.parent_phone)
        .bind(&dto.parent_email)
        .bind(&dto.address)
        .bind(dto.admission_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Student with this admission number already exists"
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student_by_id(db, id).await?.student;

        if let Some(admission_number) = &dto.admission_number {
            let duplicate: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM students WHERE admission_number = $1 AND id <> $2")
                    .bind(admission_number)
                    .bind(id)
                    .fetch_optional(db)
                    .await
                    .map_err(AppError::database)?;

            if duplicate.is_some() {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Student with this admission number already exists"
                )));
            }
        }

        let new_class_id = dto.class_id.or(existing.class_id);

        let mut tx = db.begin().await.map_err(AppError::database)?;

        if new_class_id != existing.class_id {
            if let Some(old_class) = existing.class_id {
                Self::release_class_seat(&mut tx, old_class).await?;
            }
            if let Some(new_class) = new_class_id {
                Self::reserve_class_seat(&mut tx, new_class).await?;
            }
        }

        let student = sqlx::query_as::<_, Student>(
            "UPDATE students
             SET admission_number = $1, name = $2, email = $3, phone = $4, gender = $5,
                 date_of_birth = $6, class_id = $7, section = $8, roll_number = $9,
                 parent_name = $10, parent_phone = $11, parent_email = $12, address = $13,
                 admission_date = $14, status = $15, updated_at = NOW()
             WHERE id = $16
             RETURNING id, admission_number, name, email, phone, gender, date_of_birth,
                       class_id, section, roll_number, parent_name, parent_phone,
                       parent_email, address, admission_date, status, created_at, updated_at",
        )
        .bind(dto.admission_number.unwrap_or(existing.admission_number))
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.email.or(existing.email))
        .bind(dto.phone.or(existing.phone))
        .bind(dto.gender.or(existing.gender))
        .bind(dto.date_of_birth.or(existing.date_of_birth))
        .bind(new_class_id)
        .bind(dto.section.or(existing.section))
        .bind(dto.roll_number.or(existing.roll_number))
        .bind(dto.parent_name.or(existing.parent_name))
        .bind(dto.parent_phone.or(existing.parent_phone))
        .bind(dto.parent_email.or(existing.parent_email))
        .bind(dto.address.or(existing.address))
        .bind(dto.admission_date.or(existing.admission_date))
        .bind(dto.status.unwrap_or(existing.status))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to update student")
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let existing = Self::get_student_by_id(db, id).await?.student;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if let Some(class_id) = existing.class_id {
            Self::release_class_seat(&mut tx, class_id).await?;
        }

        tx.commit().await.map_err(AppError::database)?;

        Ok(())
    }

    /// Increments the class enrollment counter, failing when the class is
    /// missing or already full. The row is locked for the transaction so
    /// concurrent admissions cannot overshoot the capacity.
    async fn reserve_class_seat(
        tx: &mut Transaction<'_, Postgres>,
        class_id: Uuid,
    ) -> Result<(), AppError> {
        let class: Option<(i32, i32)> = sqlx::query_as(
            "SELECT max_students, current_students FROM classes WHERE id = $1 FOR UPDATE",
        )
        .bind(class_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::database)?;

        let Some((max_students, current_students)) = class else {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Class does not exist"
            )));
        };

        if current_students >= max_students {
            return Err(AppError::bad_request(anyhow::anyhow!("Class is full")));
        }

        sqlx::query(
            "UPDATE classes SET current_students = current_students + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(class_id)
        .execute(&mut **tx)
        .await
        .map_err(AppError::database)?;

        Ok(())
    }

    async fn release_class_seat(
        tx: &mut Transaction<'_, Postgres>,
        class_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE classes
             SET current_students = GREATEST(current_students - 1, 0), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(class_id)
        .execute(&mut **tx)
        .await
        .map_err(AppError::database)?;

        Ok(())
    }
}
