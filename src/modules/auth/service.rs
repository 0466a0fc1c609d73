use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_reset_token, verify_reset_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    ForgotPasswordRequest, LoginData, LoginRequest, RegisterRequestDto, ResetPasswordRequest, User,
};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User with this email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, role, created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        // Bound as text: the role column is VARCHAR, not a Postgres enum type
        .bind(dto.role.as_str())
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginData, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            name: String,
            email: String,
            password: String,
            role: super::model::UserRole,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, password, role, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let token = create_access_token(row.id, &row.email, &row.role, jwt_config)?;

        Ok(LoginData {
            token,
            user: User {
                id: row.id,
                name: row.name,
                email: row.email,
                role: row.role,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("User no longer exists".to_string()))
    }

    /// Produces a reset token when the account exists. The caller always
    /// reports success so that the endpoint cannot be used to probe for
    /// registered emails.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn forgot_password(
        db: &PgPool,
        dto: ForgotPasswordRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(), AppError> {
        let user: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, email FROM users WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if let Some((id, email)) = user {
            let reset_token = create_reset_token(id, &email, jwt_config)?;
            // No mail transport is wired up; surface the token to operators.
            debug!(user_id = %id, reset_token = %reset_token, "Password reset requested");
        }

        Ok(())
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn reset_password(
        db: &PgPool,
        dto: ResetPasswordRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(), AppError> {
        let claims = verify_reset_token(&dto.token, jwt_config)?;
        let user_id = Uuid::parse_str(&claims.user_id)
            .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid reset token")))?;

        let hashed_password = hash_password(&dto.password)?;

        let result = sqlx::query(
            "UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2 AND email = $3",
        )
        .bind(&hashed_password)
        .bind(user_id)
        .bind(&claims.email)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid reset token"
            )));
        }

        Ok(())
    }
}
