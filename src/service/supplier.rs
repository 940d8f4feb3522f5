//! Supplier registry: intake, review and document checklist tracking

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::DbError;
use crate::db::models::{ListAssessmentsQuery, PaginatedAssessments};
use crate::db::repository::{DocumentSubmissionRepository, SupplierAssessmentRepository};
use crate::model::forms::{
    DocumentSubmissionRequest, ReviewRequest, SubmissionStatusRequest, SubmittedAssessment,
    SupplierIntakeRequest,
};
use crate::model::{
    ChecklistItem, DocumentChecklist, DocumentRequirement, DocumentSubmission, ReviewStatus,
    SubmissionStatus, SupplierAssessment, SupplierReview,
};
use crate::service::classification::converters::{convert_assessment, parse_field, parse_tier};
use crate::service::classification::{ClassificationError, ClassificationService};

#[derive(Debug, thiserror::Error)]
pub enum SupplierServiceError {
    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Database error: {0}")]
    DbError(#[from] DbError),
}

/// Service for supplier assessments and their document submissions
pub struct SupplierService {
    assessments: SupplierAssessmentRepository,
    submissions: DocumentSubmissionRepository,
    classification: Arc<ClassificationService>,
    default_page_size: u32,
}

impl SupplierService {
    pub fn new(
        assessments: SupplierAssessmentRepository,
        submissions: DocumentSubmissionRepository,
        classification: Arc<ClassificationService>,
        default_page_size: u32,
    ) -> Self {
        Self {
            assessments,
            submissions,
            classification,
            default_page_size,
        }
    }

    /// Validate, classify and persist a supplier intake form
    pub async fn intake(
        &self,
        request: &SupplierIntakeRequest,
    ) -> Result<SupplierAssessment, SupplierServiceError> {
        let assessment = prepare_assessment(&self.classification, request, Utc::now())?;
        self.assessments.insert(&assessment).await?;

        tracing::info!(
            id = %assessment.id,
            strategy = ?assessment.input.strategy(),
            document_tier = %assessment.outcome.document_tier,
            documents = assessment.outcome.required_documents.len(),
            "Supplier assessment recorded"
        );

        Ok(assessment)
    }

    pub async fn get(&self, id: Uuid) -> Result<SupplierAssessment, SupplierServiceError> {
        Ok(self.assessments.get_by_id(id).await?)
    }

    /// List assessments, applying the configured page size when none is given
    pub async fn list(
        &self,
        mut query: ListAssessmentsQuery,
    ) -> Result<PaginatedAssessments, SupplierServiceError> {
        query.page_size = query.page_size.or(Some(self.default_page_size));
        Ok(self.assessments.list(query).await?)
    }

    /// Record a reviewer decision
    pub async fn review(
        &self,
        id: Uuid,
        request: &ReviewRequest,
    ) -> Result<SupplierAssessment, SupplierServiceError> {
        let review = build_review(request, Utc::now())?;
        let updated = self.assessments.update_review(id, &review).await?;

        let computed = updated.outcome.document_tier;
        let effective = updated.effective_tier();
        if effective.risk_rank() < computed.risk_rank() {
            tracing::warn!(
                id = %id,
                computed_tier = %computed,
                adjusted_tier = %effective,
                "Reviewer lowered supplier tier"
            );
        }

        tracing::info!(
            id = %id,
            status = ?updated.review.status,
            effective_tier = %effective,
            computed_tier = %computed,
            "Supplier review recorded"
        );

        Ok(updated)
    }

    /// Delete an assessment and its submissions
    /// Returns true if the assessment was deleted, false if it didn't exist
    pub async fn delete(&self, id: Uuid) -> Result<bool, SupplierServiceError> {
        Ok(self.assessments.delete(id).await?)
    }

    /// Register an uploaded file against a checklist slot
    pub async fn submit_document(
        &self,
        id: Uuid,
        request: &DocumentSubmissionRequest,
    ) -> Result<DocumentSubmission, SupplierServiceError> {
        let assessment = self.assessments.get_by_id(id).await?;
        let requirements = effective_requirements(&self.classification, &assessment)?;
        let submission = prepare_submission(&assessment, &requirements, request, Utc::now())?;
        self.submissions.insert(&submission).await?;

        tracing::info!(
            id = %submission.id,
            assessment_id = %id,
            requirement_id = %submission.requirement_id,
            "Document submission registered"
        );

        Ok(submission)
    }

    /// Accept or reject a submission
    pub async fn update_submission_status(
        &self,
        id: Uuid,
        submission_id: Uuid,
        request: &SubmissionStatusRequest,
    ) -> Result<DocumentSubmission, SupplierServiceError> {
        let status: SubmissionStatus = parse_field("status", &request.status)?;
        Ok(self
            .submissions
            .update_status(id, submission_id, status)
            .await?)
    }

    /// Checklist status for an assessment
    pub async fn checklist(&self, id: Uuid) -> Result<DocumentChecklist, SupplierServiceError> {
        let assessment = self.assessments.get_by_id(id).await?;
        let requirements = effective_requirements(&self.classification, &assessment)?;
        let submissions = self.submissions.list_for_assessment(id).await?;
        Ok(build_checklist(&assessment, requirements, submissions))
    }
}

/// Validate an intake form and classify it, without persisting
pub fn prepare_assessment(
    classification: &ClassificationService,
    request: &SupplierIntakeRequest,
    now: DateTime<Utc>,
) -> Result<SupplierAssessment, ClassificationError> {
    let supplier_name = request.supplier_name.trim();
    if supplier_name.is_empty() {
        return Err(ClassificationError::invalid(
            "supplier_name",
            &request.supplier_name,
        ));
    }

    let contact_email = non_empty(request.contact_email.as_deref());
    if let Some(email) = contact_email.as_deref() {
        if !email.contains('@') {
            return Err(ClassificationError::invalid("contact_email", email));
        }
    }

    let input = convert_assessment(&request.assessment)?;
    let escalate_override = match &request.assessment {
        SubmittedAssessment::Matrix(form) => form.escalate_technology,
        SubmittedAssessment::Score(_) => None,
    };
    let outcome = classification.assess_default(&input, escalate_override)?;

    Ok(SupplierAssessment {
        id: Uuid::new_v4(),
        supplier_name: supplier_name.to_string(),
        tax_id: non_empty(request.tax_id.as_deref()),
        contact_email,
        input,
        outcome,
        review: SupplierReview::pending(),
        created_at: now,
        updated_at: now,
    })
}

/// Validate a reviewer decision
pub fn build_review(
    request: &ReviewRequest,
    now: DateTime<Utc>,
) -> Result<SupplierReview, ClassificationError> {
    let status: ReviewStatus = parse_field("status", &request.status)?;
    let adjusted_tier = match request.adjusted_tier.as_deref().filter(|v| !v.is_empty()) {
        Some(code) => Some(parse_tier(code)?),
        None => None,
    };

    Ok(SupplierReview {
        status,
        adjusted_tier,
        notes: non_empty(request.notes.as_deref()),
        reviewed_by: non_empty(request.reviewer.as_deref()),
        reviewed_at: Some(now),
    })
}

/// Checklist for the effective tier
///
/// A reviewer adjustment swaps in the checklist of the adjusted tier; the
/// one stored with the computed outcome is left untouched.
pub fn effective_requirements(
    classification: &ClassificationService,
    assessment: &SupplierAssessment,
) -> Result<Vec<DocumentRequirement>, ClassificationError> {
    let tier = assessment.effective_tier();
    if tier == assessment.outcome.document_tier {
        return Ok(assessment.outcome.required_documents.clone());
    }
    classification.required_documents(tier, assessment.input.is_technology_provider())
}

/// Validate a submission against the assessment's checklist
pub fn prepare_submission(
    assessment: &SupplierAssessment,
    requirements: &[DocumentRequirement],
    request: &DocumentSubmissionRequest,
    now: DateTime<Utc>,
) -> Result<DocumentSubmission, ClassificationError> {
    let requirement_id = request.requirement_id.trim();
    let listed = requirements.iter().any(|d| d.id == requirement_id);
    if !listed {
        return Err(ClassificationError::invalid(
            "requirement_id",
            &request.requirement_id,
        ));
    }

    let file_name = request.file_name.trim();
    if file_name.is_empty() {
        return Err(ClassificationError::invalid("file_name", &request.file_name));
    }

    let storage_path = request.storage_path.trim();
    if storage_path.is_empty() {
        return Err(ClassificationError::invalid(
            "storage_path",
            &request.storage_path,
        ));
    }

    Ok(DocumentSubmission {
        id: Uuid::new_v4(),
        assessment_id: assessment.id,
        requirement_id: requirement_id.to_string(),
        file_name: file_name.to_string(),
        storage_path: storage_path.to_string(),
        content_type: non_empty(request.content_type.as_deref()),
        status: SubmissionStatus::Submitted,
        submitted_at: now,
    })
}

/// Group submissions under the checklist resolved for the assessment
pub fn build_checklist(
    assessment: &SupplierAssessment,
    requirements: Vec<DocumentRequirement>,
    submissions: Vec<DocumentSubmission>,
) -> DocumentChecklist {
    let items: Vec<ChecklistItem> = requirements
        .into_iter()
        .map(|requirement| {
            let matching: Vec<DocumentSubmission> = submissions
                .iter()
                .filter(|s| s.requirement_id == requirement.id)
                .cloned()
                .collect();
            let fulfilled = matching
                .iter()
                .any(|s| s.status != SubmissionStatus::Rejected);
            ChecklistItem {
                requirement,
                submissions: matching,
                fulfilled,
            }
        })
        .collect();

    let missing_required: Vec<String> = items
        .iter()
        .filter(|item| item.requirement.required && !item.fulfilled)
        .map(|item| item.requirement.id.clone())
        .collect();

    DocumentChecklist {
        assessment_id: assessment.id,
        document_tier: assessment.effective_tier(),
        complete: missing_required.is_empty(),
        items,
        missing_required,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::forms::{SubmittedClassification, SubmittedScore};
    use crate::model::{Classification, ClassificationSettings, TierCode};

    fn classification() -> ClassificationService {
        ClassificationService::new(&ClassificationSettings::default()).unwrap()
    }

    fn matrix_request(volume: &str) -> SupplierIntakeRequest {
        SupplierIntakeRequest {
            supplier_name: "  Nuvem Pagamentos Ltda ".to_string(),
            tax_id: Some("".to_string()),
            contact_email: Some("dpo@nuvem.example".to_string()),
            assessment: SubmittedAssessment::Matrix(SubmittedClassification {
                data_volume: volume.to_string(),
                data_sensitivity: "sensitive".to_string(),
                is_technology_provider: true,
                escalate_technology: None,
            }),
        }
    }

    fn submission(requirement_id: &str, status: SubmissionStatus) -> DocumentSubmission {
        DocumentSubmission {
            id: Uuid::new_v4(),
            assessment_id: Uuid::nil(),
            requirement_id: requirement_id.to_string(),
            file_name: format!("{}.pdf", requirement_id),
            storage_path: format!("suppliers/{}.pdf", requirement_id),
            content_type: Some("application/pdf".to_string()),
            status,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_prepare_matrix_assessment() {
        let assessment =
            prepare_assessment(&classification(), &matrix_request("medium"), Utc::now()).unwrap();

        assert_eq!(assessment.supplier_name, "Nuvem Pagamentos Ltda");
        assert_eq!(assessment.tax_id, None);
        assert_eq!(assessment.review.status, ReviewStatus::Pending);
        // medium x sensitive = B, escalated for technology
        assert_eq!(assessment.outcome.document_tier, TierCode::A);
        assert_eq!(assessment.effective_tier(), TierCode::A);
    }

    #[test]
    fn test_prepare_score_assessment() {
        let request = SupplierIntakeRequest {
            supplier_name: "Gráfica Central".to_string(),
            tax_id: None,
            contact_email: None,
            assessment: SubmittedAssessment::Score(SubmittedScore {
                data_type: "sensitive".to_string(),
                volume: "high".to_string(),
                criticality: "critical".to_string(),
                policy: "no".to_string(),
                certification: "no".to_string(),
                subcontracting: "unknown".to_string(),
                incidents: "unresolved".to_string(),
                is_technology_provider: false,
            }),
        };

        let assessment = prepare_assessment(&classification(), &request, Utc::now()).unwrap();
        match &assessment.outcome.classification {
            Classification::Score { risk_score } => assert_eq!(risk_score.score, 185),
            other => panic!("unexpected classification: {:?}", other),
        }
        assert_eq!(assessment.outcome.document_tier, TierCode::A);
    }

    #[test]
    fn test_blank_supplier_name_is_rejected() {
        let mut request = matrix_request("low");
        request.supplier_name = "   ".to_string();
        let err = prepare_assessment(&classification(), &request, Utc::now()).unwrap_err();
        assert!(matches!(err, ClassificationError::InvalidInput { ref field, .. } if field == "supplier_name"));
    }

    #[test]
    fn test_invalid_answer_is_rejected_before_classification() {
        let err =
            prepare_assessment(&classification(), &matrix_request("gigantic"), Utc::now())
                .unwrap_err();
        assert_eq!(err, ClassificationError::invalid("data_volume", "gigantic"));
    }

    #[test]
    fn test_review_keeps_adjusted_tier_separate() {
        let request = ReviewRequest {
            status: "approved".to_string(),
            adjusted_tier: Some("C".to_string()),
            notes: Some("Scope limited to marketing data".to_string()),
            reviewer: Some("ana@example.com".to_string()),
        };
        let review = build_review(&request, Utc::now()).unwrap();
        assert_eq!(review.status, ReviewStatus::Approved);
        assert_eq!(review.adjusted_tier, Some(TierCode::C));

        let mut assessment =
            prepare_assessment(&classification(), &matrix_request("massive"), Utc::now()).unwrap();
        assessment.review = review;
        assert_eq!(assessment.outcome.document_tier, TierCode::A);
        assert_eq!(assessment.effective_tier(), TierCode::C);
    }

    #[test]
    fn test_review_rejects_unknown_values() {
        let request = ReviewRequest {
            status: "escalated".to_string(),
            adjusted_tier: None,
            notes: None,
            reviewer: None,
        };
        assert_eq!(
            build_review(&request, Utc::now()).unwrap_err(),
            ClassificationError::invalid("status", "escalated")
        );

        let request = ReviewRequest {
            status: "approved".to_string(),
            adjusted_tier: Some("Z".to_string()),
            notes: None,
            reviewer: None,
        };
        assert_eq!(
            build_review(&request, Utc::now()).unwrap_err(),
            ClassificationError::invalid("tier", "Z")
        );
    }

    #[test]
    fn test_submission_must_target_checklist_slot() {
        let assessment =
            prepare_assessment(&classification(), &matrix_request("low"), Utc::now()).unwrap();

        let request = DocumentSubmissionRequest {
            requirement_id: "dpia".to_string(),
            file_name: "dpia.pdf".to_string(),
            storage_path: "suppliers/x/dpia.pdf".to_string(),
            content_type: None,
        };
        // low x sensitive = C, escalated to B: no DPIA slot
        let requirements = &assessment.outcome.required_documents;
        assert_eq!(
            prepare_submission(&assessment, requirements, &request, Utc::now()).unwrap_err(),
            ClassificationError::invalid("requirement_id", "dpia")
        );

        let request = DocumentSubmissionRequest {
            requirement_id: "privacy_policy".to_string(),
            ..request
        };
        let submission = prepare_submission(&assessment, requirements, &request, Utc::now()).unwrap();
        assert_eq!(submission.assessment_id, assessment.id);
        assert_eq!(submission.status, SubmissionStatus::Submitted);
    }

    #[test]
    fn test_checklist_tracks_missing_required_documents() {
        let assessment =
            prepare_assessment(&classification(), &matrix_request("low"), Utc::now()).unwrap();
        let required: Vec<String> = assessment
            .outcome
            .required_documents
            .iter()
            .filter(|d| d.required)
            .map(|d| d.id.clone())
            .collect();

        let checklist = build_checklist(
            &assessment,
            assessment.outcome.required_documents.clone(),
            vec![
                submission("privacy_policy", SubmissionStatus::Accepted),
                submission("dpo_appointment", SubmissionStatus::Rejected),
            ],
        );

        assert_eq!(checklist.items.len(), assessment.outcome.required_documents.len());
        assert!(!checklist.complete);
        assert!(!checklist.missing_required.contains(&"privacy_policy".to_string()));
        assert!(checklist.missing_required.contains(&"dpo_appointment".to_string()));
        assert_eq!(checklist.missing_required.len(), required.len() - 1);
    }

    #[test]
    fn test_checklist_complete_when_all_required_submitted() {
        let assessment =
            prepare_assessment(&classification(), &matrix_request("low"), Utc::now()).unwrap();
        let submissions = assessment
            .outcome
            .required_documents
            .iter()
            .filter(|d| d.required)
            .map(|d| submission(&d.id, SubmissionStatus::Submitted))
            .collect();

        let requirements = effective_requirements(&classification(), &assessment).unwrap();
        let checklist = build_checklist(&assessment, requirements, submissions);
        assert!(checklist.complete);
        assert!(checklist.missing_required.is_empty());
    }

    #[test]
    fn test_raised_tier_opens_its_checklist() {
        let service = classification();
        let mut assessment =
            prepare_assessment(&service, &matrix_request("low"), Utc::now()).unwrap();
        assert_eq!(assessment.outcome.document_tier, TierCode::B);

        let request = ReviewRequest {
            status: "approved".to_string(),
            adjusted_tier: Some("A".to_string()),
            notes: None,
            reviewer: None,
        };
        assessment.review = build_review(&request, Utc::now()).unwrap();

        let requirements = effective_requirements(&service, &assessment).unwrap();
        assert!(requirements.iter().any(|d| d.id == "dpia" && d.required));
        // stored outcome keeps the computed checklist
        assert!(!assessment.outcome.required_documents.iter().any(|d| d.id == "dpia"));

        let upload = DocumentSubmissionRequest {
            requirement_id: "dpia".to_string(),
            file_name: "dpia.pdf".to_string(),
            storage_path: "suppliers/x/dpia.pdf".to_string(),
            content_type: None,
        };
        let dpia = prepare_submission(&assessment, &requirements, &upload, Utc::now()).unwrap();

        let checklist = build_checklist(&assessment, requirements, vec![dpia]);
        assert_eq!(checklist.document_tier, TierCode::A);
        assert!(!checklist.missing_required.contains(&"dpia".to_string()));
        assert!(checklist.missing_required.contains(&"backup_recovery_policy".to_string()));
    }

    #[test]
    fn test_unadjusted_assessment_keeps_stored_checklist() {
        let assessment =
            prepare_assessment(&classification(), &matrix_request("massive"), Utc::now()).unwrap();
        let requirements = effective_requirements(&classification(), &assessment).unwrap();
        assert_eq!(requirements, assessment.outcome.required_documents);
    }

    #[test]
    fn test_padded_adjusted_tier_is_rejected() {
        let request = ReviewRequest {
            status: "approved".to_string(),
            adjusted_tier: Some(" C ".to_string()),
            notes: None,
            reviewer: None,
        };
        assert_eq!(
            build_review(&request, Utc::now()).unwrap_err(),
            ClassificationError::invalid("tier", " C ")
        );
    }
}
