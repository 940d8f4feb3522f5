//! Database models for supplier assessments and document submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::DbError;
use crate::model::{
    AssessmentInput, Categorical, Classification, ClassificationOutcome, DocumentRequirement,
    DocumentSubmission, ReviewStatus, RiskLevel, RiskScore, SubmissionStatus, SupplierAssessment,
    SupplierReview, SupplierTier, TierCode,
};

/// Database representation of a supplier assessment
#[derive(Debug, Clone, FromRow)]
pub struct SupplierAssessmentRow {
    pub id: Uuid,
    pub supplier_name: String,
    pub tax_id: Option<String>,
    pub contact_email: Option<String>,
    pub strategy: String,
    pub is_technology_provider: bool,
    pub answers: serde_json::Value,
    pub tier_code: Option<String>,
    pub base_tier: Option<String>,
    pub score: Option<i32>,
    pub risk_level: Option<String>,
    pub document_tier: String,
    pub required_documents: serde_json::Value,
    pub review_status: String,
    pub adjusted_tier: Option<String>,
    pub reviewer_notes: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupplierAssessmentRow {
    /// Build a row from the domain model
    pub fn from_domain(assessment: &SupplierAssessment) -> Result<Self, String> {
        let answers = serde_json::to_value(&assessment.input)
            .map_err(|e| format!("Failed to serialize answers: {}", e))?;
        let required_documents = serde_json::to_value(&assessment.outcome.required_documents)
            .map_err(|e| format!("Failed to serialize required documents: {}", e))?;

        let (tier_code, base_tier, score, risk_level) = match &assessment.outcome.classification {
            Classification::Matrix { base_tier, tier } => (
                Some(tier.code.as_str().to_string()),
                Some(base_tier.as_str().to_string()),
                None,
                None,
            ),
            Classification::Score { risk_score } => (
                None,
                None,
                Some(risk_score.score),
                Some(risk_score.level.as_str().to_string()),
            ),
        };

        Ok(Self {
            id: assessment.id,
            supplier_name: assessment.supplier_name.clone(),
            tax_id: assessment.tax_id.clone(),
            contact_email: assessment.contact_email.clone(),
            strategy: assessment.input.strategy().as_str().to_string(),
            is_technology_provider: assessment.input.is_technology_provider(),
            answers,
            tier_code,
            base_tier,
            score,
            risk_level,
            document_tier: assessment.outcome.document_tier.as_str().to_string(),
            required_documents,
            review_status: assessment.review.status.as_str().to_string(),
            adjusted_tier: assessment
                .review
                .adjusted_tier
                .map(|t| t.as_str().to_string()),
            reviewer_notes: assessment.review.notes.clone(),
            reviewed_by: assessment.review.reviewed_by.clone(),
            reviewed_at: assessment.review.reviewed_at,
            created_at: assessment.created_at,
            updated_at: assessment.updated_at,
        })
    }

    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<SupplierAssessment, String> {
        let input: AssessmentInput = serde_json::from_value(self.answers)
            .map_err(|e| format!("Invalid answers for {}: {}", self.id, e))?;

        if input.strategy().as_str() != self.strategy {
            return Err(format!(
                "Strategy column '{}' does not match answers for {}",
                self.strategy, self.id
            ));
        }

        let classification = match input {
            AssessmentInput::Matrix(_) => {
                let tier = parse_column::<TierCode>("tier_code", self.tier_code.as_deref())?;
                let base_tier = parse_column::<TierCode>("base_tier", self.base_tier.as_deref())?;
                Classification::Matrix {
                    base_tier,
                    tier: SupplierTier::new(tier),
                }
            }
            AssessmentInput::Score { .. } => {
                let score = self
                    .score
                    .ok_or_else(|| format!("Missing score for {}", self.id))?;
                let level = parse_column::<RiskLevel>("risk_level", self.risk_level.as_deref())?;
                Classification::Score {
                    risk_score: RiskScore { score, level },
                }
            }
        };

        let required_documents: Vec<DocumentRequirement> =
            serde_json::from_value(self.required_documents)
                .map_err(|e| format!("Invalid required documents for {}: {}", self.id, e))?;

        let adjusted_tier = match self.adjusted_tier.as_deref() {
            Some(code) => Some(parse_column::<TierCode>("adjusted_tier", Some(code))?),
            None => None,
        };

        Ok(SupplierAssessment {
            id: self.id,
            supplier_name: self.supplier_name,
            tax_id: self.tax_id,
            contact_email: self.contact_email,
            input,
            outcome: ClassificationOutcome {
                classification,
                document_tier: parse_column("document_tier", Some(&self.document_tier))?,
                required_documents,
            },
            review: SupplierReview {
                status: parse_column::<ReviewStatus>("review_status", Some(&self.review_status))?,
                adjusted_tier,
                notes: self.reviewer_notes,
                reviewed_by: self.reviewed_by,
                reviewed_at: self.reviewed_at,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database representation of a document submission
#[derive(Debug, Clone, FromRow)]
pub struct DocumentSubmissionRow {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub requirement_id: String,
    pub file_name: String,
    pub storage_path: String,
    pub content_type: Option<String>,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

impl DocumentSubmissionRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<DocumentSubmission, String> {
        Ok(DocumentSubmission {
            id: self.id,
            assessment_id: self.assessment_id,
            requirement_id: self.requirement_id,
            file_name: self.file_name,
            storage_path: self.storage_path,
            content_type: self.content_type,
            status: parse_column::<SubmissionStatus>("status", Some(&self.status))?,
            submitted_at: self.submitted_at,
        })
    }
}

fn parse_column<T: Categorical>(column: &str, value: Option<&str>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing value in column {}", column))?;
    T::from_code(value).ok_or_else(|| format!("Unknown value '{}' in column {}", value, column))
}

const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Normalized `(page, page_size, offset)` for a list query.
/// The offset is computed in `i64` so no `u32` page can overflow it.
pub fn page_window(page: Option<u32>, page_size: Option<u32>) -> (u32, u32, i64) {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = i64::from(page - 1) * i64::from(page_size);
    (page, page_size, offset)
}

/// Convert a page of rows; one unreadable row fails the whole page
pub fn assessments_from_rows(
    rows: Vec<SupplierAssessmentRow>,
) -> Result<Vec<SupplierAssessment>, DbError> {
    rows.into_iter()
        .map(|row| {
            let id = row.id;
            row.into_domain().map_err(|e| {
                tracing::error!(id = %id, error = %e, "Unreadable supplier assessment row");
                DbError::Serialization(e)
            })
        })
        .collect()
}

/// Query parameters for listing supplier assessments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAssessmentsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub review_status: Option<ReviewStatus>,
    pub document_tier: Option<TierCode>,
}

/// Paginated supplier assessments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedAssessments {
    pub assessments: Vec<SupplierAssessment>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}
