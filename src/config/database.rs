//! Database configuration and connection pool initialization.
//!
//! The database URL is read from the `DATABASE_URL` environment variable.
//! Pending SQL migrations under `migrations/` are applied at startup, so a
//! fresh database is ready to serve without a separate migration step.
//!
//! # Panics
//!
//! [`init_db_pool`] panics if `DATABASE_URL` is unset, the connection
//! cannot be established, or a migration fails.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(
            env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        )
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
