//! Payloads as submitted by the intake and review forms
//!
//! Categorical answers arrive as plain strings and are validated into the
//! typed inputs before any classification runs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Risk matrix answers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmittedClassification {
    /// low, medium, high or massive
    pub data_volume: String,
    /// non_sensitive, regular or sensitive
    pub data_sensitivity: String,
    #[serde(default)]
    pub is_technology_provider: bool,
    /// Overrides the configured technology escalation for this request
    #[serde(default)]
    pub escalate_technology: Option<bool>,
}

/// Score questionnaire answers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmittedScore {
    pub data_type: String,
    pub volume: String,
    pub criticality: String,
    pub policy: String,
    pub certification: String,
    pub subcontracting: String,
    pub incidents: String,
    #[serde(default)]
    pub is_technology_provider: bool,
}

/// Answers for either assessment flow, tagged by strategy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SubmittedAssessment {
    Matrix(SubmittedClassification),
    Score(SubmittedScore),
}

/// Supplier intake form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierIntakeRequest {
    pub supplier_name: String,
    /// CNPJ or other registration number
    pub tax_id: Option<String>,
    pub contact_email: Option<String>,
    pub assessment: SubmittedAssessment,
}

/// Reviewer decision on a supplier assessment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewRequest {
    /// pending, approved, rejected or needs_information
    pub status: String,
    /// Reviewer-adjusted tier (A-D); stored apart from the computed classification
    pub adjusted_tier: Option<String>,
    pub notes: Option<String>,
    pub reviewer: Option<String>,
}

/// Metadata for a file already stored by the upload subsystem
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentSubmissionRequest {
    pub requirement_id: String,
    pub file_name: String,
    /// Opaque object-storage path
    pub storage_path: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionStatusRequest {
    /// submitted, accepted or rejected
    pub status: String,
}
