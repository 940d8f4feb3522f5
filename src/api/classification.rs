//! REST API endpoints for stateless supplier classification

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::model::forms::{SubmittedClassification, SubmittedScore};
use crate::model::{
    AssessmentInput, ClassificationInput, ClassificationOutcome, DocumentRequirement, ScoreInput,
    SupplierTier,
};
use crate::service::ClassificationService;
use crate::service::classification::converters::{
    convert_classification, convert_score, parse_tier,
};

/// Query parameters for resolving a checklist
#[derive(Debug, Deserialize, IntoParams)]
pub struct DocumentQueryParams {
    /// Tier code (A, B, C or D)
    pub tier: String,
    /// Include the technology addendum (default: false)
    pub technology: Option<bool>,
}

/// Checklist for a tier
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub tier: SupplierTier,
    pub is_technology_provider: bool,
    pub documents: Vec<DocumentRequirement>,
}

/// Classify a supplier with the volume x sensitivity risk matrix
#[utoipa::path(
    post,
    path = "/v1/classification/matrix",
    request_body = SubmittedClassification,
    responses(
        (status = 200, description = "Supplier classified", body = ClassificationOutcome),
        (status = 400, description = "Invalid answer", body = crate::api::error::ErrorResponse)
    ),
    tag = "classification"
)]
#[post("/v1/classification/matrix")]
pub async fn classify_matrix(
    service: web::Data<ClassificationService>,
    body: web::Json<SubmittedClassification>,
) -> Result<HttpResponse, ApiError> {
    let input = AssessmentInput::Matrix(convert_classification(&body)?);
    let outcome = service.assess_default(&input, body.escalate_technology)?;

    tracing::debug!(
        document_tier = %outcome.document_tier,
        documents = outcome.required_documents.len(),
        "Matrix classification"
    );

    Ok(HttpResponse::Ok().json(outcome))
}

/// Classify a supplier with the additive score questionnaire
#[utoipa::path(
    post,
    path = "/v1/classification/score",
    request_body = SubmittedScore,
    responses(
        (status = 200, description = "Supplier classified", body = ClassificationOutcome),
        (status = 400, description = "Invalid answer", body = crate::api::error::ErrorResponse)
    ),
    tag = "classification"
)]
#[post("/v1/classification/score")]
pub async fn classify_score(
    service: web::Data<ClassificationService>,
    body: web::Json<SubmittedScore>,
) -> Result<HttpResponse, ApiError> {
    let input = AssessmentInput::Score {
        answers: convert_score(&body)?,
        is_technology_provider: body.is_technology_provider,
    };
    let outcome = service.assess_default(&input, None)?;

    tracing::debug!(
        document_tier = %outcome.document_tier,
        documents = outcome.required_documents.len(),
        "Score classification"
    );

    Ok(HttpResponse::Ok().json(outcome))
}

/// Resolve the document checklist for a tier
#[utoipa::path(
    get,
    path = "/v1/classification/documents",
    params(DocumentQueryParams),
    responses(
        (status = 200, description = "Checklist resolved", body = DocumentListResponse),
        (status = 400, description = "Unknown tier", body = crate::api::error::ErrorResponse)
    ),
    tag = "classification"
)]
#[get("/v1/classification/documents")]
pub async fn required_documents(
    service: web::Data<ClassificationService>,
    query: web::Query<DocumentQueryParams>,
) -> Result<HttpResponse, ApiError> {
    let tier = parse_tier(&query.tier)?;
    let is_technology_provider = query.technology.unwrap_or(false);
    let documents = service.required_documents(tier, is_technology_provider)?;

    Ok(HttpResponse::Ok().json(DocumentListResponse {
        tier: tier.into(),
        is_technology_provider,
        documents,
    }))
}

/// JSON schema of the validated classification inputs
#[utoipa::path(
    get,
    path = "/v1/classification/schema",
    responses(
        (status = 200, description = "JSON schema for both assessment flows")
    ),
    tag = "classification"
)]
#[get("/v1/classification/schema")]
pub async fn input_schema() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "matrix": schemars::schema_for!(ClassificationInput),
        "score": schemars::schema_for!(ScoreInput),
    }))
}

/// Configure classification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(classify_matrix)
        .service(classify_score)
        .service(required_documents)
        .service(input_schema);
}
