//! Supplier assessment records kept by the registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    Categorical, ClassificationInput, DocumentRequirement, RiskScore, ScoreInput, SupplierTier,
    TierCode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStrategy {
    Matrix,
    Score,
}

impl Categorical for AssessmentStrategy {
    const ALL: &'static [Self] = &[Self::Matrix, Self::Score];

    fn as_str(&self) -> &'static str {
        match self {
            AssessmentStrategy::Matrix => "matrix",
            AssessmentStrategy::Score => "score",
        }
    }
}

/// Validated answers for one assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AssessmentInput {
    Matrix(ClassificationInput),
    Score {
        answers: ScoreInput,
        is_technology_provider: bool,
    },
}

impl AssessmentInput {
    pub fn strategy(&self) -> AssessmentStrategy {
        match self {
            AssessmentInput::Matrix(_) => AssessmentStrategy::Matrix,
            AssessmentInput::Score { .. } => AssessmentStrategy::Score,
        }
    }

    pub fn is_technology_provider(&self) -> bool {
        match self {
            AssessmentInput::Matrix(input) => input.is_technology_provider,
            AssessmentInput::Score {
                is_technology_provider,
                ..
            } => *is_technology_provider,
        }
    }
}

/// Result of running one classification strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Classification {
    Matrix {
        /// Tier straight from the matrix, before technology escalation
        base_tier: TierCode,
        tier: SupplierTier,
    },
    Score { risk_score: RiskScore },
}

/// Classification plus the document checklist derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationOutcome {
    pub classification: Classification,
    /// Tier used to resolve the document checklist
    pub document_tier: TierCode,
    pub required_documents: Vec<DocumentRequirement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    NeedsInformation,
}

impl Categorical for ReviewStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::NeedsInformation,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
            ReviewStatus::NeedsInformation => "needs_information",
        }
    }
}

// Manual review state. The adjusted tier never replaces the computed classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplierReview {
    pub status: ReviewStatus,
    pub adjusted_tier: Option<TierCode>,
    pub notes: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl SupplierReview {
    pub fn pending() -> Self {
        Self {
            status: ReviewStatus::Pending,
            adjusted_tier: None,
            notes: None,
            reviewed_by: None,
            reviewed_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplierAssessment {
    pub id: Uuid,
    pub supplier_name: String,
    pub tax_id: Option<String>,
    pub contact_email: Option<String>,
    pub input: AssessmentInput,
    pub outcome: ClassificationOutcome,
    pub review: SupplierReview,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupplierAssessment {
    /// Tier to act on: the reviewer's adjustment when present, else the computed one
    pub fn effective_tier(&self) -> TierCode {
        self.review
            .adjusted_tier
            .unwrap_or(self.outcome.document_tier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    Accepted,
    Rejected,
}

impl Categorical for SubmissionStatus {
    const ALL: &'static [Self] = &[Self::Submitted, Self::Accepted, Self::Rejected];

    fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

/// Metadata of a file uploaded against a checklist slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DocumentSubmission {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub requirement_id: String,
    pub file_name: String,
    pub storage_path: String,
    pub content_type: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChecklistItem {
    pub requirement: DocumentRequirement,
    pub submissions: Vec<DocumentSubmission>,
    /// At least one submission that has not been rejected
    pub fulfilled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentChecklist {
    pub assessment_id: Uuid,
    /// Effective tier: the reviewer's adjustment when present, else the computed one
    pub document_tier: TierCode,
    pub items: Vec<ChecklistItem>,
    /// Ids of required documents without a live submission
    pub missing_required: Vec<String>,
    pub complete: bool,
}
