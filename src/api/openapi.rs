//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ApiError;
use crate::api::{classification, health, supplier};
use crate::db::models::PaginatedAssessments;
use crate::model::forms::{
    DocumentSubmissionRequest, ReviewRequest, SubmissionStatusRequest, SubmittedAssessment,
    SubmittedClassification, SubmittedScore, SupplierIntakeRequest,
};
use crate::model::{
    AssessmentInput, ChecklistItem, Classification, ClassificationInput, ClassificationOutcome,
    DocumentChecklist, DocumentRequirement, DocumentSubmission, ReviewStatus, RiskLevel,
    RiskScore, ScoreInput, SubmissionStatus, SupplierAssessment, SupplierReview, SupplierTier,
    TierCode,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LGPD Supplier Risk API",
        description = "Supplier risk classification and document checklists for LGPD compliance"
    ),
    paths(
        classification::classify_matrix,
        classification::classify_score,
        classification::required_documents,
        classification::input_schema,
        supplier::create_supplier,
        supplier::list_suppliers,
        supplier::get_supplier,
        supplier::review_supplier,
        supplier::delete_supplier,
        supplier::submit_document,
        supplier::document_checklist,
        supplier::update_submission_status,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        SubmittedClassification,
        SubmittedScore,
        SubmittedAssessment,
        SupplierIntakeRequest,
        ReviewRequest,
        DocumentSubmissionRequest,
        SubmissionStatusRequest,
        ClassificationInput,
        ScoreInput,
        AssessmentInput,
        TierCode,
        SupplierTier,
        RiskLevel,
        RiskScore,
        Classification,
        ClassificationOutcome,
        DocumentRequirement,
        ReviewStatus,
        SupplierReview,
        SupplierAssessment,
        PaginatedAssessments,
        SubmissionStatus,
        DocumentSubmission,
        ChecklistItem,
        DocumentChecklist,
        classification::DocumentListResponse,
        health::LivenessStatus,
        health::ReadinessStatus,
        crate::api::error::ErrorResponse,
    )),
    tags(
        (name = "classification", description = "Stateless risk classification"),
        (name = "suppliers", description = "Supplier assessments, reviews and document submissions"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("Failed to render OpenAPI YAML: {}", e)))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
