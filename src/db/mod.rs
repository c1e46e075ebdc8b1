//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Tables are created on startup if missing. Order line items are kept as a
/// JSONB document on the order row.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS products (
        id                TEXT PRIMARY KEY,
        name              TEXT NOT NULL,
        flavor            TEXT NOT NULL,
        nicotine_strength TEXT NOT NULL,
        price             NUMERIC(12, 2) NOT NULL CHECK (price >= 0),
        stock             BIGINT NOT NULL CHECK (stock >= 0),
        is_available      BOOLEAN NOT NULL DEFAULT TRUE,
        image_url         TEXT NOT NULL,
        description       TEXT NOT NULL,
        created_at        TIMESTAMPTZ NOT NULL,
        updated_at        TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS orders (
        id             TEXT PRIMARY KEY,
        customer_name  TEXT NOT NULL,
        phone          TEXT NOT NULL,
        address        TEXT NOT NULL,
        email          TEXT,
        items          JSONB NOT NULL,
        total          NUMERIC(12, 2) NOT NULL,
        payment_method TEXT NOT NULL,
        status         TEXT NOT NULL,
        created_at     TIMESTAMPTZ NOT NULL,
        updated_at     TIMESTAMPTZ NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS orders_created_at_idx ON orders (created_at DESC)",
    r#"CREATE TABLE IF NOT EXISTS contact_messages (
        id         TEXT PRIMARY KEY,
        name       TEXT NOT NULL,
        email      TEXT NOT NULL,
        phone      TEXT,
        message    TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        is_read    BOOLEAN NOT NULL DEFAULT FALSE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS admins (
        id            TEXT PRIMARY KEY,
        username      TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL
    )"#,
];

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create missing tables
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
