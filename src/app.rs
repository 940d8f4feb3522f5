//! Application state and service initialization
//!
//! This module centralizes service initialization and dependency injection.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::repository::{DocumentSubmissionRepository, SupplierAssessmentRepository};
use crate::model::Config;
use crate::service::{ClassificationService, SupplierService};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Database connection pool
    pub db_pool: PgPool,
    /// Stateless classification over the built-in catalog
    pub classification_service: Arc<ClassificationService>,
    /// Supplier intake, review and document tracking
    pub supplier_service: Arc<SupplierService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Catalog verification
    /// 2. Database connection and schema initialization
    /// 3. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let classification_service = Arc::new(
            ClassificationService::new(&config.classification)
                .map_err(|e| AppError::InvalidConfig(e.to_string()))?,
        );

        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        let supplier_service = Arc::new(SupplierService::new(
            SupplierAssessmentRepository::new(db_pool.clone()),
            DocumentSubmissionRepository::new(db_pool.clone()),
            Arc::clone(&classification_service),
            config.classification.default_page_size,
        ));

        Ok(Self {
            db_pool,
            classification_service,
            supplier_service,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
