//! Database configuration and connection pool initialization.
//!
//! Reads the PostgreSQL connection string from `DATABASE_URL` and runs the
//! embedded migrations on startup. The returned pool is cheaply cloneable
//! and is shared through the application state.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool and applies migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, the connection cannot be
/// established, or a migration fails. This runs once at startup, before the
/// server binds.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
