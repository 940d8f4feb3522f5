//! Database module for PostgreSQL persistence

pub mod models;
pub mod repository;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

// Environment variable names
const ENV_POSTGRES_HOST: &str = "LGPD_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "LGPD_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "LGPD_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "LGPD_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "LGPD_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "lgpd";
const DEFAULT_POSTGRES_PASSWORD: &str = "lgpd";
const DEFAULT_POSTGRES_DB: &str = "supplier_risk";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Create a new database connection pool
pub async fn create_pool() -> Result<PgPool, DbError> {
    let host = env::var(ENV_POSTGRES_HOST).unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env::var(ENV_POSTGRES_PORT).unwrap_or_else(|_| DEFAULT_POSTGRES_PORT.to_string());
    let user = env::var(ENV_POSTGRES_USER).unwrap_or_else(|_| DEFAULT_POSTGRES_USER.to_string());
    let password =
        env::var(ENV_POSTGRES_PASSWORD).unwrap_or_else(|_| DEFAULT_POSTGRES_PASSWORD.to_string());
    let database = env::var(ENV_POSTGRES_DB).unwrap_or_else(|_| DEFAULT_POSTGRES_DB.to_string());

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    );

    tracing::debug!(host = %host, port = %port, database = %database, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS supplier_assessments (
            id UUID PRIMARY KEY,
            supplier_name TEXT NOT NULL,
            tax_id VARCHAR(32),
            contact_email TEXT,
            strategy VARCHAR(16) NOT NULL,
            is_technology_provider BOOLEAN NOT NULL DEFAULT FALSE,
            answers JSONB NOT NULL,
            tier_code VARCHAR(1),
            base_tier VARCHAR(1),
            score INTEGER,
            risk_level VARCHAR(16),
            document_tier VARCHAR(1) NOT NULL,
            required_documents JSONB NOT NULL DEFAULT '[]',
            review_status VARCHAR(32) NOT NULL DEFAULT 'pending',
            adjusted_tier VARCHAR(1),
            reviewer_notes TEXT,
            reviewed_by TEXT,
            reviewed_at TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS document_submissions (
            id UUID PRIMARY KEY,
            assessment_id UUID NOT NULL REFERENCES supplier_assessments(id) ON DELETE CASCADE,
            requirement_id VARCHAR(64) NOT NULL,
            file_name TEXT NOT NULL,
            storage_path TEXT NOT NULL,
            content_type VARCHAR(100),
            status VARCHAR(16) NOT NULL DEFAULT 'submitted',
            submitted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes separately
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_supplier_assessments_review_status ON supplier_assessments(review_status)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_supplier_assessments_document_tier ON supplier_assessments(document_tier)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_document_submissions_assessment_id ON document_submissions(assessment_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
