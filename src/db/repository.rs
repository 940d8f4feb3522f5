//! Repositories for supplier assessment database operations

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::DbError;
use super::models::{
    DocumentSubmissionRow, ListAssessmentsQuery, PaginatedAssessments, SupplierAssessmentRow,
    assessments_from_rows, page_window,
};
use crate::model::{
    Categorical, DocumentSubmission, SubmissionStatus, SupplierAssessment, SupplierReview,
};

/// Repository for supplier assessment records
#[derive(Clone)]
pub struct SupplierAssessmentRepository {
    pool: PgPool,
}

impl SupplierAssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new assessment
    pub async fn insert(&self, assessment: &SupplierAssessment) -> Result<(), DbError> {
        let row = SupplierAssessmentRow::from_domain(assessment).map_err(DbError::Serialization)?;

        sqlx::query(
            r#"
            INSERT INTO supplier_assessments (
                id, supplier_name, tax_id, contact_email, strategy, is_technology_provider,
                answers, tier_code, base_tier, score, risk_level, document_tier,
                required_documents, review_status, adjusted_tier, reviewer_notes,
                reviewed_by, reviewed_at, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            "#,
        )
        .bind(row.id)
        .bind(&row.supplier_name)
        .bind(&row.tax_id)
        .bind(&row.contact_email)
        .bind(&row.strategy)
        .bind(row.is_technology_provider)
        .bind(&row.answers)
        .bind(&row.tier_code)
        .bind(&row.base_tier)
        .bind(row.score)
        .bind(&row.risk_level)
        .bind(&row.document_tier)
        .bind(&row.required_documents)
        .bind(&row.review_status)
        .bind(&row.adjusted_tier)
        .bind(&row.reviewer_notes)
        .bind(&row.reviewed_by)
        .bind(row.reviewed_at)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %row.id, "Inserted supplier assessment");
        Ok(())
    }

    /// Get an assessment by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<SupplierAssessment, DbError> {
        let row: SupplierAssessmentRow = sqlx::query_as(
            r#"
            SELECT * FROM supplier_assessments WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }

    /// Store a reviewer decision. Only review columns change.
    pub async fn update_review(
        &self,
        id: Uuid,
        review: &SupplierReview,
    ) -> Result<SupplierAssessment, DbError> {
        let updated_at = review.reviewed_at.unwrap_or_else(Utc::now);

        let row: SupplierAssessmentRow = sqlx::query_as(
            r#"
            UPDATE supplier_assessments SET
                review_status = $2,
                adjusted_tier = $3,
                reviewer_notes = $4,
                reviewed_by = $5,
                reviewed_at = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(review.status.as_str())
        .bind(review.adjusted_tier.map(|t| t.as_str()))
        .bind(&review.notes)
        .bind(&review.reviewed_by)
        .bind(review.reviewed_at)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        tracing::debug!(id = %id, status = review.status.as_str(), "Updated supplier review");

        row.into_domain().map_err(DbError::Serialization)
    }

    /// Delete an assessment by ID
    /// Returns true if the assessment was deleted, false if it didn't exist
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            DELETE FROM supplier_assessments WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(id = %id, "Deleted supplier assessment");
        }

        Ok(deleted)
    }

    /// List assessments with pagination and filters
    pub async fn list(&self, query: ListAssessmentsQuery) -> Result<PaginatedAssessments, DbError> {
        let (page, page_size, offset) = page_window(query.page, query.page_size);

        // Build dynamic query
        let mut conditions = Vec::new();
        let mut params: Vec<&'static str> = Vec::new();

        if let Some(status) = query.review_status {
            params.push(status.as_str());
            conditions.push(format!("review_status = ${}", params.len()));
        }

        if let Some(tier) = query.document_tier {
            params.push(tier.as_str());
            conditions.push(format!("document_tier = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!(
            "SELECT COUNT(*) as count FROM supplier_assessments {}",
            where_clause
        );

        let total_count: i64 = {
            let mut q = sqlx::query_scalar(&count_query);
            for param in &params {
                q = q.bind(*param);
            }
            q.fetch_one(&self.pool).await?
        };

        let select_query = format!(
            r#"
            SELECT * FROM supplier_assessments
            {}
            ORDER BY created_at DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, page_size, offset
        );

        let rows: Vec<SupplierAssessmentRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(*param);
            }
            q.fetch_all(&self.pool).await?
        };

        let assessments = assessments_from_rows(rows)?;

        let total_pages = ((total_count as f64) / (page_size as f64)).ceil() as u32;

        Ok(PaginatedAssessments {
            assessments,
            page,
            page_size,
            total_count,
            total_pages,
        })
    }
}

/// Repository for uploaded document metadata
#[derive(Clone)]
pub struct DocumentSubmissionRepository {
    pool: PgPool,
}

impl DocumentSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new submission
    pub async fn insert(&self, submission: &DocumentSubmission) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO document_submissions (
                id, assessment_id, requirement_id, file_name, storage_path,
                content_type, status, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(submission.id)
        .bind(submission.assessment_id)
        .bind(&submission.requirement_id)
        .bind(&submission.file_name)
        .bind(&submission.storage_path)
        .bind(&submission.content_type)
        .bind(submission.status.as_str())
        .bind(submission.submitted_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            id = %submission.id,
            assessment_id = %submission.assessment_id,
            requirement_id = %submission.requirement_id,
            "Inserted document submission"
        );
        Ok(())
    }

    /// All submissions for an assessment, oldest first
    pub async fn list_for_assessment(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<DocumentSubmission>, DbError> {
        let rows: Vec<DocumentSubmissionRow> = sqlx::query_as(
            r#"
            SELECT * FROM document_submissions
            WHERE assessment_id = $1
            ORDER BY submitted_at ASC
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_domain().map_err(DbError::Serialization))
            .collect()
    }

    /// Change the status of a submission belonging to an assessment
    pub async fn update_status(
        &self,
        assessment_id: Uuid,
        submission_id: Uuid,
        status: SubmissionStatus,
    ) -> Result<DocumentSubmission, DbError> {
        let row: DocumentSubmissionRow = sqlx::query_as(
            r#"
            UPDATE document_submissions SET status = $3
            WHERE assessment_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(assessment_id)
        .bind(submission_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(submission_id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }
}
