//! Converters from submitted form payloads to validated inputs

use crate::model::forms::{SubmittedAssessment, SubmittedClassification, SubmittedScore};
use crate::model::{AssessmentInput, Categorical, ClassificationInput, ScoreInput, TierCode};

use super::error::ClassificationError;

/// Parse one categorical answer, rejecting anything outside its domain.
/// Codes match exactly; surrounding whitespace is not stripped.
pub fn parse_field<T: Categorical>(field: &str, raw: &str) -> Result<T, ClassificationError> {
    T::from_code(raw).ok_or_else(|| ClassificationError::invalid(field, raw))
}

/// Parse a tier code (A-D)
pub fn parse_tier(raw: &str) -> Result<TierCode, ClassificationError> {
    parse_field("tier", raw)
}

/// Convert submitted risk matrix answers
pub fn convert_classification(
    submitted: &SubmittedClassification,
) -> Result<ClassificationInput, ClassificationError> {
    Ok(ClassificationInput {
        data_volume: parse_field("data_volume", &submitted.data_volume)?,
        data_sensitivity: parse_field("data_sensitivity", &submitted.data_sensitivity)?,
        is_technology_provider: submitted.is_technology_provider,
    })
}

/// Convert submitted score questionnaire answers
pub fn convert_score(submitted: &SubmittedScore) -> Result<ScoreInput, ClassificationError> {
    Ok(ScoreInput {
        data_type: parse_field("data_type", &submitted.data_type)?,
        volume: parse_field("volume", &submitted.volume)?,
        criticality: parse_field("criticality", &submitted.criticality)?,
        policy: parse_field("policy", &submitted.policy)?,
        certification: parse_field("certification", &submitted.certification)?,
        subcontracting: parse_field("subcontracting", &submitted.subcontracting)?,
        incidents: parse_field("incidents", &submitted.incidents)?,
    })
}

/// Convert either assessment flow
pub fn convert_assessment(
    submitted: &SubmittedAssessment,
) -> Result<AssessmentInput, ClassificationError> {
    match submitted {
        SubmittedAssessment::Matrix(form) => {
            convert_classification(form).map(AssessmentInput::Matrix)
        }
        SubmittedAssessment::Score(form) => Ok(AssessmentInput::Score {
            answers: convert_score(form)?,
            is_technology_provider: form.is_technology_provider,
        }),
    }
}
