//! REST API endpoints for supplier assessments and document submissions

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::error::{ApiError, ErrorResponse};
use crate::db::models::{ListAssessmentsQuery, PaginatedAssessments};
use crate::model::forms::{
    DocumentSubmissionRequest, ReviewRequest, SubmissionStatusRequest, SupplierIntakeRequest,
};
use crate::model::{DocumentChecklist, DocumentSubmission, ReviewStatus, SupplierAssessment};
use crate::service::SupplierService;
use crate::service::classification::converters::{parse_field, parse_tier};

const MAX_PAGE: u32 = 1_000_000;

/// Query parameters for listing supplier assessments
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSuppliersParams {
    /// Page number (1-indexed, default: 1, max: 1000000)
    pub page: Option<u32>,
    /// Page size (default from configuration, max: 100)
    pub page_size: Option<u32>,
    /// Filter by review status (pending, approved, rejected, needs_information)
    pub review_status: Option<String>,
    /// Filter by computed document tier (A, B, C or D)
    pub tier: Option<String>,
}

impl ListSuppliersParams {
    fn into_query(self) -> Result<ListAssessmentsQuery, ApiError> {
        if let Some(page) = self.page.filter(|p| *p > MAX_PAGE) {
            return Err(ApiError::InvalidInput {
                field: "page".to_string(),
                value: page.to_string(),
            });
        }

        let review_status = match self.review_status.as_deref() {
            Some(raw) => Some(parse_field::<ReviewStatus>("review_status", raw)?),
            None => None,
        };
        let document_tier = match self.tier.as_deref() {
            Some(raw) => Some(parse_tier(raw)?),
            None => None,
        };

        Ok(ListAssessmentsQuery {
            page: self.page,
            page_size: self.page_size,
            review_status,
            document_tier,
        })
    }
}

/// Register and classify a supplier
#[utoipa::path(
    post,
    path = "/v1/suppliers",
    request_body = SupplierIntakeRequest,
    responses(
        (status = 201, description = "Supplier assessment created", body = SupplierAssessment),
        (status = 400, description = "Invalid intake form", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
#[post("/v1/suppliers")]
pub async fn create_supplier(
    service: web::Data<SupplierService>,
    body: web::Json<SupplierIntakeRequest>,
) -> Result<HttpResponse, ApiError> {
    let assessment = service.intake(&body).await?;
    Ok(HttpResponse::Created().json(assessment))
}

/// List supplier assessments with pagination and filters
#[utoipa::path(
    get,
    path = "/v1/suppliers",
    params(ListSuppliersParams),
    responses(
        (status = 200, description = "Assessments retrieved successfully", body = PaginatedAssessments),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
#[get("/v1/suppliers")]
pub async fn list_suppliers(
    service: web::Data<SupplierService>,
    query: web::Query<ListSuppliersParams>,
) -> Result<HttpResponse, ApiError> {
    let paginated = service.list(query.into_inner().into_query()?).await?;
    Ok(HttpResponse::Ok().json(paginated))
}

/// Get a supplier assessment by ID
#[utoipa::path(
    get,
    path = "/v1/suppliers/{id}",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment retrieved successfully", body = SupplierAssessment),
        (status = 404, description = "Assessment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
#[get("/v1/suppliers/{id}")]
pub async fn get_supplier(
    service: web::Data<SupplierService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let assessment = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(assessment))
}

/// Record a reviewer decision
///
/// The adjusted tier is stored next to the computed classification and never replaces it.
#[utoipa::path(
    put,
    path = "/v1/suppliers/{id}/review",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review recorded", body = SupplierAssessment),
        (status = 400, description = "Invalid review", body = ErrorResponse),
        (status = 404, description = "Assessment not found", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
#[put("/v1/suppliers/{id}/review")]
pub async fn review_supplier(
    service: web::Data<SupplierService>,
    path: web::Path<Uuid>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    let assessment = service.review(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(assessment))
}

/// Delete a supplier assessment by ID
#[utoipa::path(
    delete,
    path = "/v1/suppliers/{id}",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    responses(
        (status = 204, description = "Assessment deleted successfully"),
        (status = 404, description = "Assessment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
#[delete("/v1/suppliers/{id}")]
pub async fn delete_supplier(
    service: web::Data<SupplierService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if service.delete(id).await? {
        tracing::info!(id = %id, "Supplier assessment deleted");
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::AssessmentNotFound(id.to_string()))
    }
}

/// Register an uploaded document against a checklist slot
#[utoipa::path(
    post,
    path = "/v1/suppliers/{id}/documents",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    request_body = DocumentSubmissionRequest,
    responses(
        (status = 201, description = "Submission registered", body = DocumentSubmission),
        (status = 400, description = "Requirement not in checklist", body = ErrorResponse),
        (status = 404, description = "Assessment not found", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
#[post("/v1/suppliers/{id}/documents")]
pub async fn submit_document(
    service: web::Data<SupplierService>,
    path: web::Path<Uuid>,
    body: web::Json<DocumentSubmissionRequest>,
) -> Result<HttpResponse, ApiError> {
    let submission = service.submit_document(path.into_inner(), &body).await?;
    Ok(HttpResponse::Created().json(submission))
}

/// Checklist status for a supplier
#[utoipa::path(
    get,
    path = "/v1/suppliers/{id}/documents",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Checklist status", body = DocumentChecklist),
        (status = 404, description = "Assessment not found", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
#[get("/v1/suppliers/{id}/documents")]
pub async fn document_checklist(
    service: web::Data<SupplierService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let checklist = service.checklist(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(checklist))
}

/// Accept or reject a document submission
#[utoipa::path(
    put,
    path = "/v1/suppliers/{id}/documents/{submission_id}/status",
    params(
        ("id" = Uuid, Path, description = "Assessment ID"),
        ("submission_id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = SubmissionStatusRequest,
    responses(
        (status = 200, description = "Submission updated", body = DocumentSubmission),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 404, description = "Submission not found", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
#[put("/v1/suppliers/{id}/documents/{submission_id}/status")]
pub async fn update_submission_status(
    service: web::Data<SupplierService>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<SubmissionStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let (id, submission_id) = path.into_inner();
    let submission = service
        .update_submission_status(id, submission_id, &body)
        .await?;

    tracing::info!(
        id = %submission_id,
        assessment_id = %id,
        status = ?submission.status,
        "Document submission status updated"
    );

    Ok(HttpResponse::Ok().json(submission))
}

/// Configure supplier routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_supplier)
        .service(list_suppliers)
        .service(get_supplier)
        .service(review_supplier)
        .service(delete_supplier)
        .service(submit_document)
        .service(document_checklist)
        .service(update_submission_status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TierCode;

    fn params(review_status: Option<&str>, tier: Option<&str>) -> ListSuppliersParams {
        ListSuppliersParams {
            page: Some(2),
            page_size: None,
            review_status: review_status.map(str::to_string),
            tier: tier.map(str::to_string),
        }
    }

    #[test]
    fn test_list_filters_are_parsed() {
        let query = params(Some("needs_information"), Some("B"))
            .into_query()
            .unwrap();
        assert_eq!(query.page, Some(2));
        assert_eq!(query.review_status, Some(ReviewStatus::NeedsInformation));
        assert_eq!(query.document_tier, Some(TierCode::B));
    }

    #[test]
    fn test_unknown_list_filter_is_invalid_input() {
        let err = params(Some("archived"), None).into_query().unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "review_status"));

        let err = params(None, Some("Z")).into_query().unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "tier"));
    }

    #[test]
    fn test_page_beyond_bound_is_invalid_input() {
        let mut out_of_range = params(None, None);
        out_of_range.page = Some(u32::MAX);
        let err = out_of_range.into_query().unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "page"));

        let mut last = params(None, None);
        last.page = Some(MAX_PAGE);
        assert_eq!(last.into_query().unwrap().page, Some(MAX_PAGE));
    }
}
