//! Database configuration and connection pool initialization.
//!
//! Reads the connection string from the `DATABASE_URL` environment variable
//! and builds the SQLx pool used throughout the application.
//!
//! # Panics
//!
//! [`init_db_pool`] panics if `DATABASE_URL` is unset or the database cannot
//! be reached; there is no meaningful way to serve requests without a store.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// Called once during startup; the returned pool is cheaply cloneable and is
/// shared through the application state.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
